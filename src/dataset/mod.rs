//! Story datasets, the on-disk archive and bottom-word selection.

pub mod archive;
pub mod model;
pub mod sentiment;
