//! Domain logic - release values independent of the GitHub transport

pub mod parameters;
pub mod tag;

pub use parameters::{ReleaseParameters, Tagger, OBJECT_TYPE_COMMIT};
pub use tag::{ReleaseTag, TagMessageTemplate};
