//! Boundary classification
//!
//! A coordinate outside `[0, N-1]` on some axis is either a true wall (no
//! neighbor on that side, reflects) or a warp zone (neighbor present,
//! transfers). These helpers are pure so the renderer and the tick share them.

use glam::Vec2;

use super::state::{Axis, Direction, Neighbors};

/// Side of the grid that `coord` lies beyond on `axis`, if any
#[inline]
pub fn axis_overshoot(size: u32, axis: Axis, coord: f32) -> Option<Direction> {
    let [low, high] = Direction::on_axis(axis);
    let max = (size - 1) as f32;
    if coord < 0.0 {
        Some(low)
    } else if coord > max {
        Some(high)
    } else {
        None
    }
}

/// True wall check restricted to one axis
#[inline]
pub fn is_axis_wall(neighbors: &Neighbors, size: u32, axis: Axis, coord: f32) -> bool {
    axis_overshoot(size, axis, coord).is_some_and(|side| !neighbors.is_linked(side))
}

/// Outside the grid on at least one axis, with no neighbor on that side
pub fn is_true_wall(neighbors: &Neighbors, size: u32, pos: Vec2) -> bool {
    is_axis_wall(neighbors, size, Axis::X, pos.x) || is_axis_wall(neighbors, size, Axis::Y, pos.y)
}

/// Outside the grid on at least one axis, with a neighbor on that side
pub fn is_warp_zone(neighbors: &Neighbors, size: u32, pos: Vec2) -> bool {
    warp_side(neighbors, size, pos).is_some()
}

/// Side a ball at `pos` leaves through.
///
/// Dual-axis overshoot resolves x before y (left, right, top, bottom).
pub fn warp_side(neighbors: &Neighbors, size: u32, pos: Vec2) -> Option<Direction> {
    Direction::WARP_ORDER.into_iter().find(|&side| {
        let axis = side.axis();
        axis_overshoot(size, axis, axis.of(pos)) == Some(side) && neighbors.is_linked(side)
    })
}

/// Position on the neighbor after leaving through `side`.
///
/// Shifts the crossed axis by one grid length, then clamps that axis into the
/// grid so a fractional crossing (14.5 -> -0.5) enters at the edge instead of
/// bouncing straight back. The other axis is left untouched.
pub fn wrap_coordinate(size: u32, pos: Vec2, side: Direction) -> Vec2 {
    let n = size as f32;
    let mut wrapped = pos;
    let axis = side.axis();
    let c = axis.component_mut(&mut wrapped);
    match side {
        Direction::Left | Direction::Top => *c += n,
        Direction::Right | Direction::Bottom => *c -= n,
    }
    *c = c.clamp(0.0, n - 1.0);
    wrapped
}
