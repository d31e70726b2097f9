//! Region arena and topology
//!
//! Regions live in one `Vec` and refer to each other by [`RegionId`], so a
//! cyclic layout (A right of B, B left of A) needs no shared ownership.
//! Links are one-sided; [`RegionGraph::link`] issues both halves.

use std::fmt;

use super::event::EventSink;
use super::region::Region;
use super::state::{Ball, Direction};
use super::tick::Transfer;
use crate::consts::{DEFAULT_SEQUENCE, ID_BLOCK};
use crate::error::GraphError;

/// Stable handle to a region inside a [`RegionGraph`] (registration index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub(crate) usize);

impl RegionId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every region of the installation, all sharing one side length
#[derive(Debug, Clone)]
pub struct RegionGraph {
    size: u32,
    sequence: Vec<u8>,
    regions: Vec<Region>,
}

impl RegionGraph {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            sequence: DEFAULT_SEQUENCE.to_vec(),
            regions: Vec::new(),
        }
    }

    /// Pitch sequence given to regions added from now on
    pub fn with_sequence(mut self, pitches: Vec<u8>) -> Self {
        self.sequence = pitches;
        self
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Register a new, unlinked region. Ticked after all earlier ones.
    pub fn add_region(&mut self) -> RegionId {
        let id = RegionId(self.regions.len());
        // Readability only; a busy region can run into the next block
        let first_id = id.0 as u32 * ID_BLOCK + 1;
        let region = Region::new(self.size)
            .with_sequence(self.sequence.clone())
            .with_first_id(first_id);
        self.regions.push(region);
        log::info!("region {} added ({}x{})", id, self.size, self.size);
        id
    }

    pub fn region(&self, id: RegionId) -> Result<&Region, GraphError> {
        self.regions.get(id.0).ok_or(GraphError::UnknownRegion(id))
    }

    pub fn region_mut(&mut self, id: RegionId) -> Result<&mut Region, GraphError> {
        self.regions
            .get_mut(id.0)
            .ok_or(GraphError::UnknownRegion(id))
    }

    /// Point `from`'s `dir` side at `to`. Does not touch `to`.
    pub fn connect(&mut self, from: RegionId, to: RegionId, dir: Direction) -> Result<(), GraphError> {
        self.region(to)?;
        self.region_mut(from)?.connect(to, dir);
        log::info!("region {} {:?} -> region {}", from, dir, to);
        Ok(())
    }

    /// Connect both ways: `a`'s `dir` side to `b`, `b`'s opposite side to `a`
    pub fn link(&mut self, a: RegionId, b: RegionId, dir: Direction) -> Result<(), GraphError> {
        self.region(a)?;
        self.region(b)?;
        self.connect(a, b, dir)?;
        self.connect(b, a, dir.opposite())
    }

    /// Clear one side of `region`. Clearing an empty side is fine.
    pub fn disconnect(&mut self, region: RegionId, dir: Direction) -> Result<(), GraphError> {
        self.region_mut(region)?.disconnect(dir);
        log::info!("region {} {:?} disconnected", region, dir);
        Ok(())
    }

    /// Clear `dir` on `region` and the matching back link, if any
    pub fn unlink(&mut self, region: RegionId, dir: Direction) -> Result<(), GraphError> {
        let neighbor = self.region(region)?.neighbor(dir);
        self.disconnect(region, dir)?;
        if let Some(other) = neighbor {
            let back = dir.opposite();
            if self.region(other)?.neighbor(back) == Some(region) {
                self.disconnect(other, back)?;
            }
        }
        Ok(())
    }

    pub fn add_ball(&mut self, region: RegionId, ball: Ball) -> Result<u32, GraphError> {
        Ok(self.region_mut(region)?.add_ball(ball))
    }

    /// Tick every region in registration order, then deliver transfers.
    ///
    /// A ball that warps this step shows up on its destination only after
    /// every region has moved, so nobody sees a neighbor mid-update.
    /// Returns the number of balls delivered.
    pub fn tick<S: EventSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        let transfers: Vec<Transfer> = self
            .regions
            .iter_mut()
            .flat_map(|region| region.tick(&mut *sink))
            .collect();

        let mut delivered = 0;
        for transfer in transfers {
            match self.regions.get_mut(transfer.to.0) {
                Some(dest) => {
                    let old_id = transfer.ball.id;
                    let new_id = dest.add_ball(transfer.ball);
                    log::debug!("ball {} arrived on region {} as {}", old_id, transfer.to, new_id);
                    delivered += 1;
                }
                None => log::warn!("dropping ball {}: region {} missing", transfer.ball.id, transfer.to),
            }
        }
        delivered
    }

    pub fn ids(&self) -> impl Iterator<Item = RegionId> + '_ {
        (0..self.regions.len()).map(RegionId)
    }

    pub fn regions(&self) -> impl Iterator<Item = (RegionId, &Region)> {
        self.regions.iter().enumerate().map(|(i, r)| (RegionId(i), r))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Total balls across all regions
    pub fn ball_count(&self) -> usize {
        self.regions.iter().map(Region::len).sum()
    }
}
