//! Time-driven stochastic spawn scheduling
//!
//! The per-minute chance from the tuning table grows linearly with elapsed
//! time, is normalized to the tick rate, and is then dampened by widening
//! the random trial as the current population grows. The damper is soft
//! pressure only; the hard cap lives in the roster.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::TICK_MS;
use crate::tuning::SpawnTuning;

/// One spawn trial for this tick
///
/// `damper` is the kind's population-pressure factor: a damper of 0 always
/// spawns, higher values stretch the odds. Bulls pass their population
/// directly (so an empty field repopulates immediately); turrets and lasers
/// pass population + 1.
pub fn spawn_chance(tuning: &SpawnTuning, elapsed_secs: f64, damper: usize, rng: &mut Pcg32) -> bool {
    let per_minute = tuning.base_per_minute + tuning.growth_per_minute * (elapsed_secs / 60.0);
    let ticks_per_second = 1000.0 / TICK_MS as f64;
    let chance = per_minute / ticks_per_second;
    let spread = ((100.0 - chance) / chance) as i64 * damper as i64;
    rng.random_range(0..=spread.max(0)) == 0
}
