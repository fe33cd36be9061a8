//! Software fragment programs: the animated aurora, the static glow and their drivers.

pub mod animation;
pub mod aurora;
pub mod gallery;
pub mod glow;
pub mod program;
pub mod static_renderer;
