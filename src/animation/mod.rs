//! Per-word entrance animations.

pub(crate) mod ease;
pub(crate) mod entrance;
