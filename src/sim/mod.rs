//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Single-threaded; every tick is an indivisible unit
//! - No rendering or platform dependencies

pub mod bullet;
pub mod enemy;
pub mod geom;
pub mod roster;
pub mod session;
pub mod ship;
pub mod spawn;

pub use bullet::{Bullet, BulletPool, WeaponStyle, FADE_DONE};
pub use enemy::{Arsenal, Behavior, BullState, Enemy, LaserState, PlayerView, TurretState, REAP_AT};
pub use roster::Roster;
pub use session::{GamePhase, HudState, Key, Session, TickInput};
pub use ship::{Ship, Steer};
pub use spawn::spawn_chance;
