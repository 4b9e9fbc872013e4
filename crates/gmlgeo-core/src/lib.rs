pub mod error;
pub mod id;
pub mod srs;
pub mod tolerance;

pub use error::{GeoError, Result};
pub use id::ElementId;
pub use srs::{SrsLookup, SrsNode};
pub use tolerance::Tolerance;
