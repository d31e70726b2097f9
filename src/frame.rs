//! Read-only snapshot of a region for renderers
//!
//! Polls [`Region::query_cell`] for every cell plus the one-cell border
//! outside the grid, so walls and open edges are visible too.

use std::fmt;

use crate::sim::{Cell, Region};

/// One captured frame, border included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Grid side length (frame is `size + 2` wide)
    size: u32,
    cells: Vec<Cell>,
}

impl Frame {
    pub fn capture(region: &Region) -> Self {
        let size = region.size();
        let last = size as i32;
        let side = size as usize + 2;
        let mut cells = Vec::with_capacity(side * side);
        for y in -1..=last {
            for x in -1..=last {
                cells.push(region.query_cell(x, y));
            }
        }
        Self { size, cells }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Cell at grid coordinate `(x, y)`, with `-1` and `size` on the border
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        let side = self.size as i32 + 2;
        let (fx, fy) = (x + 1, y + 1);
        if fx < 0 || fy < 0 || fx >= side || fy >= side {
            return None;
        }
        self.cells.get((fy * side + fx) as usize).copied()
    }

    /// Cells showing a ball
    pub fn lit(&self) -> usize {
        self.cells.iter().filter(|c| matches!(c, Cell::Ball(_))).count()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.size as usize + 2;
        for (y, row) in self.cells.chunks(side).enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let border = x == 0 || y == 0 || x == side - 1 || y == side - 1;
                let c = match cell {
                    Cell::Wall => '#',
                    Cell::Ball(_) => 'o',
                    Cell::Empty if border => ' ',
                    Cell::Empty => '.',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Ball, Color, Direction, RegionGraph};
    use glam::Vec2;

    #[test]
    fn test_capture_marks_walls_and_balls() {
        let mut region = Region::new(3);
        let color = Color::new(10, 20, 30);
        region.add_ball(Ball::new(Vec2::new(1.5, 2.0), Vec2::ZERO).with_color(color));

        let frame = Frame::capture(&region);
        assert_eq!(frame.cell(-1, 0), Some(Cell::Wall));
        assert_eq!(frame.cell(3, 3), Some(Cell::Wall));
        assert_eq!(frame.cell(1, 2), Some(Cell::Ball(color)));
        assert_eq!(frame.cell(0, 0), Some(Cell::Empty));
        assert_eq!(frame.cell(4, 0), None);
        assert_eq!(frame.lit(), 1);

        assert_eq!(frame.to_string(), "#####\n#...#\n#...#\n#.o.#\n#####\n");
    }

    #[test]
    fn test_linked_side_is_open() {
        let mut graph = RegionGraph::new(3);
        let a = graph.add_region();
        let b = graph.add_region();
        graph.link(a, b, Direction::Right).unwrap();

        let frame = Frame::capture(graph.region(a).unwrap());
        assert_eq!(frame.cell(3, 1), Some(Cell::Empty));
        // Corners touch an unlinked side
        assert_eq!(frame.cell(3, -1), Some(Cell::Wall));
        assert_eq!(frame.cell(-1, 1), Some(Cell::Wall));

        // Open edge drawn blank, walls everywhere else on the border
        assert_eq!(frame.to_string(), "#####\n#... \n#... \n#... \n#####\n");
    }

    #[test]
    fn test_capture_does_not_mutate() {
        let mut region = Region::new(5);
        region.add_ball(Ball::new(Vec2::new(2.0, 2.0), Vec2::new(1.0, 1.0)));
        let before = region.balls().to_vec();
        let _ = Frame::capture(&region);
        assert_eq!(region.balls(), before.as_slice());
    }
}
