//! Phase one of a poster render: text measurement, typesetting and story placement.
//!
//! Nothing here touches pixels. [`typeset`](typeset::typeset) yields text bounds for a target,
//! [`solve_layout`](solver::solve_layout) turns them into marker positions once per render.

pub mod solver;
pub mod text;
pub mod typeset;
pub mod typography;
