//! Core conversion logic
//!
//! - `catalog`: categories, units and conversion rules
//! - `format`: result formatting and input parsing
//! - `history`: recents and favorites collections
//! - `store`: persistence port and its redb / in-memory backends
//! - `notify`: transient notifications
//! - `session`: the stateful conversion session tying these together

pub mod catalog;
pub mod format;
pub mod history;
pub mod notify;
pub mod session;
pub mod store;

pub use catalog::Catalog;
pub use session::{Confirm, ConversionSession};
