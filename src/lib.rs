//! Space War - a top-down arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, session state)
//! - `render`: Draw-command interface the simulation is rendered through
//! - `platform`: Input-source abstraction
//! - `ui`: Menu/pause/lose screen interfaces and the frame driver
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod render;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions in pixels
    pub const SCREEN_W: f32 = 1024.0;
    pub const SCREEN_H: f32 = 768.0;

    /// Target frame delay (one simulation tick) in milliseconds
    pub const TICK_MS: u64 = 10;
    /// Clock advance per tick, in seconds (drives the difficulty ramp)
    pub const TICK_SECONDS: f64 = 0.018;

    /// Enemies steer toward the interior until they clear these margins
    pub const FIELD_MARGIN_X: f32 = 50.0;
    pub const FIELD_MARGIN_Y: f32 = 100.0;

    /// Bullets whose tail drifts this far past the screen edge are culled
    pub const OFFSCREEN_MARGIN: f32 = 200.0;

    /// Ticks the simulation keeps running after the player dies
    pub const LOSE_LINGER_TICKS: u32 = 200;
}
