//! Infrastructure implementations behind the domain seams

pub mod account;
pub mod logging;
