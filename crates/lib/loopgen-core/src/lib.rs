#![forbid(unsafe_code)]

pub use indexmap;

pub mod cardinal;
pub mod context;
pub mod error;
pub mod geometry;
pub mod params;
pub mod placement;
pub mod routes;
