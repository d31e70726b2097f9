//! Deterministic simulation module
//!
//! All ball logic lives here. This module must be pure and deterministic:
//! - Fixed period only, driven from outside
//! - Stable iteration order (insertion order within a region, registration
//!   order across regions)
//! - No rendering, audio device or platform dependencies

pub mod collision;
pub mod event;
pub mod graph;
pub mod region;
pub mod state;
pub mod tick;

pub use collision::{axis_overshoot, is_axis_wall, is_true_wall, is_warp_zone, warp_side, wrap_coordinate};
pub use event::{EventSink, NullSink, ReflectionEvent};
pub use graph::{RegionGraph, RegionId};
pub use region::{Region, Sequence};
pub use state::{Axis, Ball, Cell, Color, Direction, Neighbors};
pub use tick::Transfer;
