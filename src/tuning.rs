//! Data-driven game balance
//!
//! Spawn pressure, population caps and weapon-pool identities live in one
//! serializable record so a balance pass never touches simulation code.
//! Defaults match the shipped game; a JSON override can be supplied at
//! session start.

use serde::{Deserialize, Serialize};

/// Spawn scheduling parameters for one enemy kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTuning {
    /// Spawn chance per minute at time zero, in percent
    pub base_per_minute: f64,
    /// Additional percent of chance gained per elapsed minute
    pub growth_per_minute: f64,
    /// Hard roster population cap
    pub cap: usize,
}

/// Identity of one bullet pool: how it looks and how fast it flies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponTuning {
    pub color: [u8; 3],
    pub thickness: u32,
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub bulls: SpawnTuning,
    pub turrets: SpawnTuning,
    pub lasers: SpawnTuning,
    pub player_gun: WeaponTuning,
    pub enemy_gun: WeaponTuning,
    pub laser_gun: WeaponTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            bulls: SpawnTuning {
                base_per_minute: 5.0,
                growth_per_minute: 5.0,
                cap: 7,
            },
            turrets: SpawnTuning {
                base_per_minute: 2.5,
                growth_per_minute: 2.5,
                cap: 4,
            },
            lasers: SpawnTuning {
                base_per_minute: 1.0,
                growth_per_minute: 1.0,
                cap: 2,
            },
            player_gun: WeaponTuning {
                color: [192, 255, 255],
                thickness: 2,
                speed: 8.0,
            },
            enemy_gun: WeaponTuning {
                color: [255, 128, 128],
                thickness: 4,
                speed: 6.0,
            },
            laser_gun: WeaponTuning {
                color: [255, 64, 64],
                thickness: 20,
                speed: 18.0,
            },
        }
    }
}

impl Tuning {
    /// Parse a tuning override; callers fall back to [`Tuning::default`]
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
