#![forbid(unsafe_code)]

pub mod catalog;
pub mod code;
pub mod error;
pub mod model;
pub mod time;
pub mod visibility;

pub use catalog::{ContentProvider, StaticCatalog};
pub use error::Error;
pub use time::Clock;
