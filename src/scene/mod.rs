//! Scene data model, the owned scene store and the storyboard file format.

pub(crate) mod color;
pub(crate) mod model;
pub(crate) mod store;
pub(crate) mod storyboard;
