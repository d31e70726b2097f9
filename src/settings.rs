//! Installation settings
//!
//! Loaded from a JSON file at startup; every field has a default so a partial
//! file (or none at all) works.

use std::path::Path;
use std::time::Duration;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::sim::{Ball, Color, Direction, RegionGraph, RegionId};

/// One link between two regions, by registration index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSpec {
    pub from: usize,
    pub to: usize,
    /// Side of `from` that leads to `to`
    pub direction: Direction,
    /// Also link `to` back to `from` on the opposite side
    #[serde(default = "default_true")]
    pub both: bool,
}

fn default_true() -> bool {
    true
}

/// A ball placed at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallSpec {
    #[serde(default)]
    pub region: usize,
    pub pos: [f32; 2],
    pub vel: [f32; 2],
    #[serde(default)]
    pub channel: u8,
    /// Defaults to the channel's palette color
    #[serde(default)]
    pub color: Option<Color>,
}

impl BallSpec {
    pub fn to_ball(&self) -> Ball {
        Ball::new(Vec2::from(self.pos), Vec2::from(self.vel))
            .with_note(self.channel)
            .with_color(self.color.unwrap_or_else(|| Color::for_channel(self.channel)))
    }
}

/// Installation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Grid ===
    /// Side length shared by every region
    pub grid_size: u32,
    /// Regions registered at startup (ticked in this order)
    pub region_count: usize,
    pub layout: Vec<LinkSpec>,

    // === Timing ===
    pub tick_period_ms: u64,
    pub max_substeps: u32,

    // === Sound ===
    /// Pitches walked by each region's lead ball
    pub sequence: Vec<u8>,
    /// Ticks a sequence note sounds before note-off
    pub gate_ticks: u32,
    /// Note velocity scale (0.0 - 1.0)
    pub volume: f32,
    /// Drop every note event
    pub muted: bool,

    // === Demo ===
    pub balls: Vec<BallSpec>,
    /// Extra balls scattered with `seed`
    pub random_balls: usize,
    pub seed: u64,
    /// Stop after this many ticks (0 = run forever)
    pub run_ticks: u64,
    /// Print an ASCII frame of every region each tick
    pub print_frames: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,

            // Two blocks stacked: 0 on top of 1
            region_count: 2,
            layout: vec![LinkSpec {
                from: 0,
                to: 1,
                direction: Direction::Bottom,
                both: true,
            }],

            tick_period_ms: TICK_PERIOD_MS,
            max_substeps: MAX_SUBSTEPS,

            sequence: DEFAULT_SEQUENCE.to_vec(),
            gate_ticks: GATE_TICKS,
            volume: 1.0,
            muted: false,

            balls: Vec::new(),
            random_balls: 6,
            seed: 2017,
            run_ticks: 0,
            print_frames: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |reason: String| -> Result<(), SettingsError> {
            Err(SettingsError::Invalid { reason })
        };

        if !(2..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return invalid(format!(
                "grid_size must be between 2 and {MAX_GRID_SIZE}, got {}",
                self.grid_size
            ));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return invalid(format!("volume must be within 0.0 - 1.0, got {}", self.volume));
        }
        if self.tick_period_ms == 0 {
            return invalid("tick_period_ms must be positive".into());
        }
        if self.max_substeps == 0 {
            return invalid("max_substeps must be positive".into());
        }
        if self.sequence.is_empty() {
            return invalid("sequence must not be empty".into());
        }
        if self.region_count == 0 && (!self.balls.is_empty() || self.random_balls > 0) {
            return invalid("balls need at least one region".into());
        }
        for link in &self.layout {
            if link.from >= self.region_count || link.to >= self.region_count {
                return invalid(format!(
                    "link {} -> {} references a region beyond region_count {}",
                    link.from, link.to, self.region_count
                ));
            }
        }
        for ball in &self.balls {
            if ball.region >= self.region_count {
                return invalid(format!("ball placed on missing region {}", ball.region));
            }
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Build the region graph: regions, links, then balls
    pub fn build_graph(&self) -> Result<RegionGraph, SettingsError> {
        self.validate()?;

        let mut graph = RegionGraph::new(self.grid_size).with_sequence(self.sequence.clone());
        let ids: Vec<RegionId> = (0..self.region_count).map(|_| graph.add_region()).collect();

        for link in &self.layout {
            let (from, to) = (ids[link.from], ids[link.to]);
            if link.both {
                graph.link(from, to, link.direction)?;
            } else {
                graph.connect(from, to, link.direction)?;
            }
        }

        for ball in &self.balls {
            graph.add_ball(ids[ball.region], ball.to_ball())?;
        }

        let mut rng = Pcg32::seed_from_u64(self.seed);
        for i in 0..self.random_balls {
            let region = ids[i % ids.len()];
            graph.add_ball(region, random_ball(&mut rng, self.grid_size))?;
        }

        Ok(graph)
    }
}

/// A ball on a whole cell with a quarter-cell velocity, like a short swipe
pub fn random_ball(rng: &mut impl Rng, size: u32) -> Ball {
    let pos = Vec2::new(
        rng.random_range(0..size) as f32,
        rng.random_range(0..size) as f32,
    );
    let mut vel = Vec2::ZERO;
    while vel == Vec2::ZERO {
        vel = Vec2::new(
            rng.random_range(-4i32..=4) as f32 / 4.0,
            rng.random_range(-4i32..=4) as f32 / 4.0,
        );
    }
    let channel = rng.random_range(0..5u8);
    Ball::new(pos, vel)
        .with_note(channel)
        .with_color(Color::for_channel(channel))
}
