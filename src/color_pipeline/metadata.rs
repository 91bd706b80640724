//! Raw metadata tag module
//!
//! This module turns a JSON dump of raw-file metadata into typed tag values.

mod tag_store;
mod tag_value;


pub use tag_store::{TagEntry, TagStore};
pub use tag_value::{parse_tag_text, TagValue};
