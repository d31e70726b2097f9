//! Ball and grid value types
//!
//! Everything a region stores or reports lives here. No behavior beyond
//! field access and small conversions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::graph::RegionId;
use crate::consts::INFINITE_LIFESPAN;

/// RGB color of a ball (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Installation palette, one color per sample channel (wraps after 5)
    pub fn for_channel(channel: u8) -> Self {
        match channel % 5 {
            1 => Color::new(243, 156, 18),
            2 => Color::new(52, 152, 219),
            3 => Color::new(46, 204, 113),
            4 => Color::new(155, 89, 182),
            _ => Color::WHITE,
        }
    }
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Assigned by the owning region on insertion
    pub id: u32,
    /// Real-valued grid position (cell = truncated coordinate)
    pub pos: Vec2,
    /// Cells moved per tick
    pub vel: Vec2,
    pub color: Color,
    /// Remaining turns, `INFINITE_LIFESPAN` for never. Carried, not simulated.
    #[serde(default = "infinite_lifespan")]
    pub lifespan: i32,
    /// Channel (or pitch) handed to the event sink on reflection
    pub note: u8,
}

fn infinite_lifespan() -> i32 {
    INFINITE_LIFESPAN
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            id: 0,
            pos,
            vel,
            color: Color::WHITE,
            lifespan: INFINITE_LIFESPAN,
            note: 0,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_note(mut self, note: u8) -> Self {
        self.note = note;
        self
    }

    pub fn with_lifespan(mut self, lifespan: i32) -> Self {
        self.lifespan = lifespan;
        self
    }

    /// Grid cell the ball is drawn in (truncation toward zero)
    #[inline]
    pub fn cell(&self) -> (i32, i32) {
        (self.pos.x as i32, self.pos.y as i32)
    }
}

/// Simulation axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Component of `v` along this axis
    #[inline]
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    #[inline]
    pub fn component_mut(self, v: &mut Vec2) -> &mut f32 {
        match self {
            Axis::X => &mut v.x,
            Axis::Y => &mut v.y,
        }
    }
}

/// Cardinal side of a region. Top is `y < 0`, left is `x < 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Top = 0,
    Bottom,
    Left,
    Right,
}

impl Direction {
    /// Warp resolution order: x-axis sides before y-axis sides
    pub const WARP_ORDER: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Top,
        Direction::Bottom,
    ];

    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Bottom,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::X,
            Direction::Top | Direction::Bottom => Axis::Y,
        }
    }

    /// Sides lying on `axis`, low side first
    pub fn on_axis(axis: Axis) -> [Direction; 2] {
        match axis {
            Axis::X => [Direction::Left, Direction::Right],
            Axis::Y => [Direction::Top, Direction::Bottom],
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Four neighbor slots, one per side. Handles only, never ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighbors([Option<RegionId>; 4]);

impl Neighbors {
    pub fn get(&self, dir: Direction) -> Option<RegionId> {
        self.0[dir.index()]
    }

    pub fn set(&mut self, dir: Direction, region: RegionId) {
        self.0[dir.index()] = Some(region);
    }

    pub fn clear(&mut self, dir: Direction) {
        self.0[dir.index()] = None;
    }

    pub fn is_linked(&self, dir: Direction) -> bool {
        self.get(dir).is_some()
    }

    /// Occupied slots as (side, neighbor)
    pub fn iter(&self) -> impl Iterator<Item = (Direction, RegionId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.get(dir).map(|id| (dir, id)))
    }
}

/// What a renderer sees at one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Outside the grid on a side with no neighbor
    Wall,
    /// First ball (insertion order) whose truncated position is this cell
    Ball(Color),
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_cell_truncates_toward_zero() {
        let ball = Ball::new(Vec2::new(3.9, 14.2), Vec2::ZERO);
        assert_eq!(ball.cell(), (3, 14));

        let outside = Ball::new(Vec2::new(-0.5, 15.7), Vec2::ZERO);
        assert_eq!(outside.cell(), (0, 15));
    }

    #[test]
    fn test_ball_defaults_to_infinite_lifespan() {
        let ball = Ball::new(Vec2::ZERO, Vec2::ONE);
        assert_eq!(ball.lifespan, INFINITE_LIFESPAN);
        assert_eq!(ball.with_lifespan(3).lifespan, 3);
    }

    #[test]
    fn test_direction_opposites() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.opposite().axis(), dir.axis());
        }
    }

    #[test]
    fn test_neighbors_set_and_clear() {
        let mut n = Neighbors::default();
        assert_eq!(n.iter().count(), 0);

        n.set(Direction::Right, RegionId(3));
        assert_eq!(n.get(Direction::Right), Some(RegionId(3)));
        assert!(!n.is_linked(Direction::Left));

        n.clear(Direction::Right);
        n.clear(Direction::Right);
        assert!(!n.is_linked(Direction::Right));
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(Color::for_channel(0), Color::WHITE);
        assert_eq!(Color::for_channel(7), Color::for_channel(2));
    }
}
