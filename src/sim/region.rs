//! A single grid surface and the balls it owns

use glam::Vec2;

use super::collision;
use super::graph::RegionId;
use super::state::{Ball, Cell, Direction, Neighbors};
use crate::consts::{DEFAULT_SEQUENCE, LEAD_INDEX};

/// Fixed pitch list with a wrapping cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pitches: Vec<u8>,
    cursor: usize,
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new(DEFAULT_SEQUENCE.to_vec())
    }
}

impl Sequence {
    pub fn new(pitches: Vec<u8>) -> Self {
        Self { pitches, cursor: 0 }
    }

    /// Pitch at the cursor, advancing it. `None` for an empty sequence.
    pub fn next_pitch(&mut self) -> Option<u8> {
        let pitch = *self.pitches.get(self.cursor)?;
        self.cursor = (self.cursor + 1) % self.pitches.len();
        Some(pitch)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn pitches(&self) -> &[u8] {
        &self.pitches
    }
}

/// One square board of side `size`
#[derive(Debug, Clone)]
pub struct Region {
    size: u32,
    /// Insertion order matters: index `LEAD_INDEX` is the lead ball
    pub(crate) balls: Vec<Ball>,
    neighbors: Neighbors,
    /// Balls leaving this tick. Empty between ticks.
    pub(crate) warp_buffer: Vec<Ball>,
    pub(crate) sequence: Sequence,
    /// Next id to hand out, never reset
    next_id: u32,
}

impl Region {
    pub fn new(size: u32) -> Self {
        Self {
            size: size.max(1),
            balls: Vec::new(),
            neighbors: Neighbors::default(),
            warp_buffer: Vec::new(),
            sequence: Sequence::default(),
            next_id: 1,
        }
    }

    pub fn with_sequence(mut self, pitches: Vec<u8>) -> Self {
        self.sequence = Sequence::new(pitches);
        self
    }

    /// Start the id counter at `first_id`
    pub fn with_first_id(mut self, first_id: u32) -> Self {
        self.next_id = first_id;
        self
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Allocate a new ball ID
    fn next_ball_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a ball, assigning it a fresh id. Position is taken as given.
    pub fn add_ball(&mut self, mut ball: Ball) -> u32 {
        ball.id = self.next_ball_id();
        log::debug!(
            "ball {} added at ({}, {})",
            ball.id,
            ball.pos.x,
            ball.pos.y
        );
        let id = ball.id;
        self.balls.push(ball);
        id
    }

    /// Remove the ball with `id`; unknown ids are ignored
    pub fn delete_ball(&mut self, id: u32) {
        if let Some(index) = self.balls.iter().position(|b| b.id == id) {
            self.balls.remove(index);
            log::debug!("ball {} deleted", id);
        }
    }

    /// Remove every ball. The id counter keeps counting.
    pub fn delete_all_balls(&mut self) {
        self.balls.clear();
    }

    pub fn connect(&mut self, neighbor: RegionId, dir: Direction) {
        self.neighbors.set(dir, neighbor);
    }

    pub fn disconnect(&mut self, dir: Direction) {
        self.neighbors.clear(dir);
    }

    pub fn neighbor(&self, dir: Direction) -> Option<RegionId> {
        self.neighbors.get(dir)
    }

    pub fn neighbors(&self) -> &Neighbors {
        &self.neighbors
    }

    pub fn is_true_wall(&self, x: f32, y: f32) -> bool {
        collision::is_true_wall(&self.neighbors, self.size, Vec2::new(x, y))
    }

    pub fn is_warp_zone(&self, x: f32, y: f32) -> bool {
        collision::is_warp_zone(&self.neighbors, self.size, Vec2::new(x, y))
    }

    /// What the renderer should draw at `(x, y)`.
    ///
    /// Walls win over balls. O(balls) per call.
    pub fn query_cell(&self, x: i32, y: i32) -> Cell {
        if self.is_true_wall(x as f32, y as f32) {
            return Cell::Wall;
        }
        self.balls
            .iter()
            .find(|b| b.cell() == (x, y))
            .map_or(Cell::Empty, |b| Cell::Ball(b.color))
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ball(id).is_some()
    }

    /// The ball whose reflections walk the sequence
    pub fn lead(&self) -> Option<&Ball> {
        self.balls.get(LEAD_INDEX)
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    /// Balls waiting to leave. Always empty outside `tick`.
    pub fn pending_transfers(&self) -> &[Ball] {
        &self.warp_buffer
    }
}
