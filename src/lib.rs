//! Bound - bouncing balls on connected light grids
//!
//! Core modules:
//! - `sim`: Deterministic simulation (regions, boundary classification, warp transfer)
//! - `driver`: Fixed-period scheduler that ticks every region
//! - `audio`: Note gating for reflection events
//! - `frame`: Read-only cell projection for renderers
//! - `settings`: JSON configuration

pub mod audio;
pub mod driver;
pub mod error;
pub mod frame;
pub mod settings;
pub mod sim;

pub use driver::TickDriver;
pub use error::{GraphError, SettingsError};
pub use settings::Settings;

/// Installation constants
pub mod consts {
    /// Side length of every region (LED grid is 15x15)
    pub const GRID_SIZE: u32 = 15;
    /// Largest side length settings accept
    pub const MAX_GRID_SIZE: u32 = 1024;

    /// Fixed simulation period in milliseconds
    pub const TICK_PERIOD_MS: u64 = 100;
    /// Maximum ticks run per driver advance to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Collection index of the lead ball (fifth inserted)
    pub const LEAD_INDEX: usize = 4;

    /// Pitch sequence walked by the lead ball
    pub const DEFAULT_SEQUENCE: [u8; 12] = [40, 42, 44, 46, 48, 50, 52, 50, 48, 46, 44, 42];

    /// Ticks a sequence note stays on before its note-off
    pub const GATE_TICKS: u32 = 1;

    /// Lifespan value meaning "never expires"
    pub const INFINITE_LIFESPAN: i32 = -1;

    /// Offset between the first ids of consecutive regions in a graph.
    /// Only keeps ids readable in logs; ids are unique per region, not
    /// across regions once a region hands out more than this many.
    pub const ID_BLOCK: u32 = 1000;
}
