//! Fixed period simulation tick
//!
//! Advances one region by a single step: reflect off true walls, integrate,
//! then hand balls sitting in a warp zone over to the neighbor.

use super::collision::{is_axis_wall, warp_side, wrap_coordinate};
use super::event::{EventSink, ReflectionEvent};
use super::graph::RegionId;
use super::region::{Region, Sequence};
use super::state::{Axis, Ball, Direction};
use crate::consts::LEAD_INDEX;

/// A ball that left a region during its tick
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    /// Neighbor the ball enters
    pub to: RegionId,
    /// Side of the source region it left through
    pub side: Direction,
    /// Wrapped ball, still carrying its source id
    pub ball: Ball,
}

impl Region {
    /// Advance this region by one step. See [`tick`].
    #[must_use = "warped balls are lost unless delivered"]
    pub fn tick<S: EventSink + ?Sized>(&mut self, sink: &mut S) -> Vec<Transfer> {
        tick(self, sink)
    }
}

/// Advance the region by one fixed step.
///
/// Balls that end the step in a warp zone are removed from `region` and
/// returned, already wrapped. The caller delivers them with
/// [`Region::add_ball`] on the destination once every region has ticked.
#[must_use = "warped balls are lost unless delivered"]
pub fn tick<S: EventSink + ?Sized>(region: &mut Region, sink: &mut S) -> Vec<Transfer> {
    region.warp_buffer.clear();

    let size = region.size();
    let neighbors = *region.neighbors();

    // Reflect and integrate. Axes are independent: a corner hit fires twice.
    for (index, ball) in region.balls.iter_mut().enumerate() {
        for axis in [Axis::X, Axis::Y] {
            let next = axis.of(ball.pos) + axis.of(ball.vel);
            if is_axis_wall(&neighbors, size, axis, next) {
                let v = axis.component_mut(&mut ball.vel);
                *v = -*v;
                reflect(index, ball, &mut region.sequence, sink);
            }
        }
        ball.pos += ball.vel;
    }

    for ball in &region.balls {
        if warp_side(&neighbors, size, ball.pos).is_some() {
            region.warp_buffer.push(ball.clone());
        }
    }

    let pending: Vec<Ball> = region.warp_buffer.drain(..).collect();
    let mut transfers = Vec::with_capacity(pending.len());
    for mut ball in pending {
        let Some(side) = warp_side(&neighbors, size, ball.pos) else {
            continue;
        };
        let Some(to) = neighbors.get(side) else {
            continue;
        };
        ball.pos = wrap_coordinate(size, ball.pos, side);
        region.delete_ball(ball.id);
        log::debug!("ball {} warped {:?} to region {}", ball.id, side, to);
        transfers.push(Transfer { to, side, ball });
    }

    transfers
}

fn reflect<S: EventSink + ?Sized>(index: usize, ball: &Ball, sequence: &mut Sequence, sink: &mut S) {
    if index == LEAD_INDEX {
        if let Some(pitch) = sequence.next_pitch() {
            log::trace!("lead ball {} reflected, pitch {}", ball.id, pitch);
            sink.emit(ReflectionEvent::Sequence { pitch });
        }
    } else {
        log::trace!("ball {} reflected, channel {}", ball.id, ball.note);
        sink.emit(ReflectionEvent::Voice { channel: ball.note });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GRID_SIZE;
    use crate::sim::NullSink;
    use glam::Vec2;
    use proptest::prelude::*;

    fn moving(pos: (f32, f32), vel: (f32, f32)) -> Ball {
        Ball::new(Vec2::new(pos.0, pos.1), Vec2::new(vel.0, vel.1))
    }

    /// Four idle balls so the next insert lands on the lead slot
    fn fill_before_lead(region: &mut Region) {
        for _ in 0..LEAD_INDEX {
            region.add_ball(moving((0.0, 0.0), (0.0, 0.0)).with_note(9));
        }
    }

    #[test]
    fn test_reflects_off_right_wall() {
        let mut region = Region::new(GRID_SIZE);
        let id = region.add_ball(moving((14.0, 7.0), (1.0, 0.0)).with_note(3));
        let mut events: Vec<ReflectionEvent> = Vec::new();

        let _ = tick(&mut region, &mut events);
        let ball = region.ball(id).cloned().unwrap();
        assert_eq!(ball.vel.x, -1.0);
        assert_eq!(ball.pos.x, 13.0);
        assert_eq!(events, vec![ReflectionEvent::Voice { channel: 3 }]);

        let _ = tick(&mut region, &mut events);
        let ball = region.ball(id).unwrap();
        assert_eq!(ball.vel.x, -1.0);
        assert_eq!(ball.pos.x, 12.0);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_corner_hit_fires_twice() {
        let mut region = Region::new(GRID_SIZE);
        region.add_ball(moving((14.0, 14.0), (1.0, 1.0)).with_note(2));
        let mut events: Vec<ReflectionEvent> = Vec::new();

        let _ = tick(&mut region, &mut events);
        assert_eq!(
            events,
            vec![
                ReflectionEvent::Voice { channel: 2 },
                ReflectionEvent::Voice { channel: 2 }
            ]
        );
        assert_eq!(region.balls()[0].pos, Vec2::new(13.0, 13.0));
        assert_eq!(region.balls()[0].vel, Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn test_lead_corner_hit_advances_sequence_twice() {
        let mut region = Region::new(GRID_SIZE).with_sequence(vec![40, 42, 44]);
        fill_before_lead(&mut region);
        region.add_ball(moving((0.0, 0.0), (-1.0, -1.0)));
        let mut events: Vec<ReflectionEvent> = Vec::new();

        let _ = tick(&mut region, &mut events);
        assert_eq!(
            events,
            vec![
                ReflectionEvent::Sequence { pitch: 40 },
                ReflectionEvent::Sequence { pitch: 42 }
            ]
        );
        assert_eq!(region.sequence().cursor(), 2);
    }

    #[test]
    fn test_lead_walks_sequence_and_wraps() {
        // Side 2: a ball at x=1 moving right bounces every tick
        let mut region = Region::new(2).with_sequence(vec![40, 42, 44]);
        fill_before_lead(&mut region);
        region.add_ball(moving((1.0, 0.0), (1.0, 0.0)));
        let mut events: Vec<ReflectionEvent> = Vec::new();

        let _ = tick(&mut region, &mut events);
        assert_eq!(events, vec![ReflectionEvent::Sequence { pitch: 40 }]);
        assert_eq!(region.sequence().cursor(), 1);

        let _ = tick(&mut region, &mut events);
        let _ = tick(&mut region, &mut events);
        assert_eq!(
            events,
            vec![
                ReflectionEvent::Sequence { pitch: 40 },
                ReflectionEvent::Sequence { pitch: 42 },
                ReflectionEvent::Sequence { pitch: 44 }
            ]
        );
        assert_eq!(region.sequence().cursor(), 0);
    }

    #[test]
    fn test_non_lead_balls_use_voice_events() {
        let mut region = Region::new(GRID_SIZE);
        for note in 0..4 {
            region.add_ball(moving((14.0, note as f32), (1.0, 0.0)).with_note(note));
        }
        let mut events: Vec<ReflectionEvent> = Vec::new();
        let _ = tick(&mut region, &mut events);
        let channels: Vec<_> = events
            .iter()
            .map(|e| match e {
                ReflectionEvent::Voice { channel } => *channel,
                ReflectionEvent::Sequence { .. } => panic!("no lead ball present"),
            })
            .collect();
        assert_eq!(channels, vec![0, 1, 2, 3]);
        assert_eq!(region.sequence().cursor(), 0);
    }

    #[test]
    fn test_lead_with_empty_sequence_is_silent() {
        let mut region = Region::new(GRID_SIZE).with_sequence(Vec::new());
        fill_before_lead(&mut region);
        let lead = region.add_ball(moving((14.0, 7.0), (1.0, 0.0)));
        let mut events: Vec<ReflectionEvent> = Vec::new();

        let _ = tick(&mut region, &mut events);
        assert!(events.is_empty());
        assert_eq!(region.ball(lead).map(|b| b.vel.x), Some(-1.0));
    }

    #[test]
    fn test_warp_leaves_region_wrapped() {
        let mut region = Region::new(GRID_SIZE);
        region.connect(RegionId(1), Direction::Right);
        let id = region.add_ball(moving((14.0, 7.0), (1.0, 0.0)).with_note(4));
        let mut events: Vec<ReflectionEvent> = Vec::new();

        let transfers = tick(&mut region, &mut events);
        assert!(events.is_empty());
        assert!(!region.contains(id));
        assert!(region.pending_transfers().is_empty());
        assert_eq!(transfers.len(), 1);

        let transfer = &transfers[0];
        assert_eq!(transfer.to, RegionId(1));
        assert_eq!(transfer.side, Direction::Right);
        assert_eq!(transfer.ball.id, id);
        assert_eq!(transfer.ball.pos, Vec2::new(0.0, 7.0));
        assert_eq!(transfer.ball.vel, Vec2::new(1.0, 0.0));
        assert_eq!(transfer.ball.note, 4);
    }

    #[test]
    fn test_diagonal_warp_resolves_x_first() {
        let mut region = Region::new(GRID_SIZE);
        region.connect(RegionId(1), Direction::Right);
        region.connect(RegionId(2), Direction::Bottom);
        region.add_ball(moving((14.0, 14.0), (1.0, 1.0)));

        let transfers = tick(&mut region, &mut NullSink);
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].to, RegionId(1));
        // y overshoot travels with the ball
        assert_eq!(transfers[0].ball.pos, Vec2::new(0.0, 15.0));
    }

    #[test]
    fn test_tick_is_deterministic() {
        let build = || {
            let mut region = Region::new(GRID_SIZE);
            region.add_ball(moving((3.0, 4.0), (0.75, -1.25)).with_note(1));
            region.add_ball(moving((10.0, 2.0), (-2.0, 0.5)).with_note(2));
            region
        };
        let mut a = build();
        let mut b = build();
        let mut events_a: Vec<ReflectionEvent> = Vec::new();
        let mut events_b: Vec<ReflectionEvent> = Vec::new();

        for _ in 0..50 {
            let _ = tick(&mut a, &mut events_a);
            let _ = tick(&mut b, &mut events_b);
        }
        assert_eq!(a.balls(), b.balls());
        assert_eq!(events_a, events_b);
    }

    proptest! {
        #[test]
        fn prop_unlinked_region_keeps_balls_inside(
            px in 0.0f32..=14.0,
            py in 0.0f32..=14.0,
            vx in -3.0f32..=3.0,
            vy in -3.0f32..=3.0,
            ticks in 1usize..80,
        ) {
            let max = (GRID_SIZE - 1) as f32;
            let mut region = Region::new(GRID_SIZE);
            region.add_ball(Ball::new(Vec2::new(px, py), Vec2::new(vx, vy)));

            for _ in 0..ticks {
                let before = region.balls()[0].clone();
                let next = before.pos + before.vel;
                let hit_x = next.x < 0.0 || next.x > max;
                let hit_y = next.y < 0.0 || next.y > max;

                let transfers = region.tick(&mut NullSink);
                prop_assert!(transfers.is_empty());

                let after = &region.balls()[0];
                prop_assert!(after.pos.x >= 0.0 && after.pos.x <= max);
                prop_assert!(after.pos.y >= 0.0 && after.pos.y <= max);
                let expect_vx = if hit_x { -before.vel.x } else { before.vel.x };
                let expect_vy = if hit_y { -before.vel.y } else { before.vel.y };
                prop_assert_eq!(after.vel.x, expect_vx);
                prop_assert_eq!(after.vel.y, expect_vy);
            }
        }
    }
}
