#![forbid(unsafe_code)]

pub mod error;
pub mod logger;
pub mod result;
pub mod xml;
