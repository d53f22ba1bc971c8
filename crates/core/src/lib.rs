pub mod error;
pub mod logging;

pub mod assemble;
pub mod availability;
pub mod catalog;
pub mod collation;
pub mod environment;
pub mod launch;
pub mod manifest;
pub mod scan;
pub mod session;

pub use error::{GalleryError, Result};
