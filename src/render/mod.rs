//! Rasterization and post passes (CPU).

/// Backend trait and frame type.
pub mod backend;
pub mod contrast;
/// `vello_cpu` backend.
pub mod cpu;
pub mod grain;
pub mod overlay;
pub mod pipeline;
