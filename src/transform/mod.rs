//! Pointer gesture interpretation for text blocks and individual words.

pub(crate) mod gesture;
pub(crate) mod space;
