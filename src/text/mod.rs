//! Caption text: word tokenisation, per-word style resolution and the curve offsets.

pub(crate) mod curve;
pub(crate) mod words;
