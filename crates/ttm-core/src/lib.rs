//! ttm-core: shared foundation for the transformer thermal model.
//!
//! Contains:
//! - numeric (Real + float guards)
//! - time (minute arithmetic over profile timestamps)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod time;

pub use error::{TtmError, TtmResult};
pub use numeric::*;
pub use time::*;
