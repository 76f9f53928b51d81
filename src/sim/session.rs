//! One playthrough: top-level game states and the fixed-tick update order
//!
//! The session owns every mutable piece of simulation state - ship, rosters,
//! bullet pools, RNG, clocks - and resets all of it atomically when a new
//! playthrough begins. External collaborators only ever see tick boundaries:
//! pause, restart and quit are phase transitions checked here, never
//! mid-update.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bullet::{BulletPool, WeaponStyle};
use super::enemy::{Arsenal, Enemy, PlayerView};
use super::roster::Roster;
use super::ship::{Ship, Steer};
use super::spawn::spawn_chance;
use crate::consts::{LOSE_LINGER_TICKS, TICK_SECONDS};
use crate::tuning::Tuning;

/// Top-level game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No playthrough running (menu is up)
    Ended,
    /// Live simulation
    InProcess,
    Paused,
    /// Player is dead but the world keeps moving for a while
    LoseLinger,
    /// Linger finished; the lose screen is up
    LoseProcessed,
    /// A fresh reset happens on the next tick
    Restarting,
}

/// The keys the simulation reacts to (no rebinding)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    W,
    A,
    D,
    I,
    Q,
    K,
    F,
}

/// Input intent for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Mouse position the ship's heading tracks
    pub cursor: Vec2,
    /// At most one key event is consumed per tick
    pub key: Option<Key>,
    /// Fire button held
    pub firing: bool,
}

/// HUD bookkeeping, reset with the session
///
/// Explicit session state rather than render-side statics so a restart
/// always starts from a clean slate.
#[derive(Debug, Clone)]
pub struct HudState {
    /// Rolling energy readout, sampled on a period-4 gate
    pub energy_graph: [f32; 30],
    graph_gate: u8,
    /// Latched for the rest of the session once the cheat fires
    pub god_mode_used: bool,
    pub infinite_energy_used: bool,
    /// Sinusoid density of the heartbeat readout, rolled per session
    pub pulse_k: f32,
    /// Animation phase for the heartbeat readout
    pub pulse_phase: f32,
}

impl HudState {
    fn new(rng: &mut Pcg32) -> Self {
        Self {
            energy_graph: [100.0; 30],
            graph_gate: 0,
            god_mode_used: false,
            infinite_energy_used: false,
            pulse_k: rng.random_range(1.0..3.0),
            pulse_phase: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub phase: GamePhase,
    pub ship: Ship,
    pub bulls: Roster,
    pub turrets: Roster,
    pub lasers: Roster,
    pub player_bullets: BulletPool,
    pub enemy_bullets: BulletPool,
    pub laser_bullets: BulletPool,
    /// Wall-clock the difficulty ramp runs on, in seconds
    pub elapsed: f64,
    pub kills: u32,
    /// Strafe direction; persists until a movement key changes it
    pub steer: Steer,
    /// Remaining linger ticks after the player dies
    pub lose_delay: u32,
    /// Death explosion clock, grows to 15
    pub blow_up: u8,
    pub hud: HudState,
    pub tuning: Tuning,
    rng: Pcg32,
    iddqd: u8,
    idkfa: u8,
}

fn pool_from(t: crate::tuning::WeaponTuning) -> BulletPool {
    BulletPool::new(
        WeaponStyle {
            color: t.color,
            thickness: t.thickness,
        },
        t.speed,
    )
}

impl Session {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let hud = HudState::new(&mut rng);
        log::info!("session created, seed {seed}");
        Self {
            phase: GamePhase::Ended,
            ship: Ship::new(),
            bulls: Roster::new(tuning.bulls.cap),
            turrets: Roster::new(tuning.turrets.cap),
            lasers: Roster::new(tuning.lasers.cap),
            player_bullets: pool_from(tuning.player_gun),
            enemy_bullets: pool_from(tuning.enemy_gun),
            laser_bullets: pool_from(tuning.laser_gun),
            elapsed: 0.0,
            kills: 0,
            steer: Steer::Ahead,
            lose_delay: LOSE_LINGER_TICKS,
            blow_up: 0,
            hud,
            tuning,
            rng,
            iddqd: 0,
            idkfa: 0,
        }
    }

    /// Atomically reset the playthrough and go live
    pub fn begin(&mut self) {
        self.ship.reset();
        self.bulls.clear();
        self.turrets.clear();
        self.lasers.clear();
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.laser_bullets.clear();
        self.elapsed = 0.0;
        self.kills = 0;
        self.steer = Steer::Ahead;
        self.lose_delay = LOSE_LINGER_TICKS;
        self.blow_up = 0;
        self.iddqd = 0;
        self.idkfa = 0;
        self.hud = HudState::new(&mut self.rng);
        self.phase = GamePhase::InProcess;
        log::info!("playthrough started");
    }

    /// Back to live play from the pause screen
    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::InProcess;
        }
    }

    /// Any screen may ask for a fresh playthrough
    pub fn request_restart(&mut self) {
        self.phase = GamePhase::Restarting;
    }

    /// Back to the top-level menu; the playthrough is discarded
    pub fn end(&mut self) {
        self.phase = GamePhase::Ended;
    }

    /// Red lamp on the HUD while the lose flow runs
    pub fn lose_bulb(&self) -> bool {
        matches!(self.phase, GamePhase::LoseLinger | GamePhase::LoseProcessed)
    }

    /// Advance the simulation by one tick
    pub fn tick(&mut self, input: &TickInput) {
        match self.phase {
            GamePhase::InProcess => self.tick_playing(input),
            GamePhase::LoseLinger => self.tick_linger(),
            GamePhase::Restarting => self.begin(),
            _ => {}
        }
    }

    fn tick_playing(&mut self, input: &TickInput) {
        if let Some(key) = input.key {
            if key == Key::Escape {
                self.phase = GamePhase::Paused;
                log::debug!("paused at {:.1}s", self.elapsed);
                return;
            }
            self.note_key(key);
        }

        let view = PlayerView {
            pos: self.ship.center,
            alive: self.ship.is_alive(),
        };

        // Enemy behavior
        self.bulls
            .advance_all(&view, &mut self.rng, &mut Arsenal::Ram(&mut self.ship));
        self.turrets
            .advance_all(&view, &mut self.rng, &mut Arsenal::Guns(&mut self.enemy_bullets));
        self.lasers
            .advance_all(&view, &mut self.rng, &mut Arsenal::Guns(&mut self.laser_bullets));

        // Player bullets land
        self.bulls.resolve_hits(&mut self.player_bullets);
        self.turrets.resolve_hits(&mut self.player_bullets);
        self.lasers.resolve_hits(&mut self.player_bullets);

        self.kills +=
            self.bulls.reap_dead() + self.turrets.reap_dead() + self.lasers.reap_dead();

        // Spawn trials; bulls repopulate an empty field immediately
        if spawn_chance(
            &self.tuning.bulls,
            self.elapsed,
            self.bulls.population(),
            &mut self.rng,
        ) {
            self.bulls.spawn(&mut self.rng, Enemy::bull);
        }
        if spawn_chance(
            &self.tuning.turrets,
            self.elapsed,
            self.turrets.population() + 1,
            &mut self.rng,
        ) {
            self.turrets.spawn(&mut self.rng, Enemy::turret);
        }
        if spawn_chance(
            &self.tuning.lasers,
            self.elapsed,
            self.lasers.population() + 1,
            &mut self.rng,
        ) {
            self.lasers.spawn(&mut self.rng, Enemy::laser_wall);
        }

        // Player intent and kinematics
        if let Some(key) = input.key {
            match key {
                Key::W => {
                    self.ship.set_accelerating(true);
                    self.steer = Steer::Ahead;
                }
                Key::A => {
                    self.ship.set_accelerating(true);
                    self.steer = Steer::Left;
                }
                Key::D => {
                    self.ship.set_accelerating(true);
                    self.steer = Steer::Right;
                }
                _ => {}
            }
        }
        self.ship.set_heading(input.cursor);
        self.ship.steer(self.steer);
        self.ship.update_speed();
        self.ship.set_accelerating(false);
        if input.firing {
            self.ship.fire(&mut self.player_bullets);
        }

        self.ship.regenerate();
        self.ship.refresh_cool_down();

        for pool in [
            &mut self.player_bullets,
            &mut self.enemy_bullets,
            &mut self.laser_bullets,
        ] {
            pool.advance();
            pool.purge();
        }

        // Enemy bullets land; the beam hits much harder
        self.ship.resolve_hits(&mut self.enemy_bullets, 10.0);
        self.ship.resolve_hits(&mut self.laser_bullets, 50.0);

        if !self.ship.is_alive() {
            self.phase = GamePhase::LoseLinger;
            self.lose_delay = LOSE_LINGER_TICKS;
            self.blow_up = 0;
            log::info!("player down after {:.1}s, {} kills", self.elapsed, self.kills);
        }

        self.apply_cheats();
        self.elapsed += TICK_SECONDS;
        self.sample_hud();
    }

    /// The world keeps moving while the death animation plays
    fn tick_linger(&mut self) {
        let view = PlayerView {
            pos: self.ship.center,
            alive: false,
        };
        self.bulls
            .advance_all(&view, &mut self.rng, &mut Arsenal::Ram(&mut self.ship));
        self.turrets
            .advance_all(&view, &mut self.rng, &mut Arsenal::Guns(&mut self.enemy_bullets));
        self.lasers
            .advance_all(&view, &mut self.rng, &mut Arsenal::Guns(&mut self.laser_bullets));

        self.bulls.resolve_hits(&mut self.player_bullets);
        self.turrets.resolve_hits(&mut self.player_bullets);
        self.lasers.resolve_hits(&mut self.player_bullets);

        self.kills +=
            self.bulls.reap_dead() + self.turrets.reap_dead() + self.lasers.reap_dead();

        for pool in [
            &mut self.player_bullets,
            &mut self.enemy_bullets,
            &mut self.laser_bullets,
        ] {
            pool.advance();
            pool.purge();
        }

        if self.blow_up < 15 {
            self.blow_up += 1;
        }
        self.lose_delay -= 1;
        if self.lose_delay == 0 {
            self.phase = GamePhase::LoseProcessed;
        }
        self.sample_hud();
    }

    /// Track the two literal cheat sequences, `iddqd` and `idkfa`
    ///
    /// `a` and `d` double as steering keys, so a mid-sequence steer restarts
    /// the tracker exactly as a wrong letter would.
    fn note_key(&mut self, key: Key) {
        match key {
            Key::D => {
                self.iddqd = match self.iddqd {
                    1 | 2 | 4 => self.iddqd + 1,
                    _ => 0,
                };
                self.idkfa = if self.idkfa == 1 { 2 } else { 0 };
            }
            Key::A => {
                self.idkfa = if self.idkfa == 4 { 5 } else { 0 };
            }
            Key::I => {
                if self.iddqd == 0 {
                    self.iddqd = 1;
                }
                if self.idkfa == 0 {
                    self.idkfa = 1;
                }
            }
            Key::Q => {
                self.iddqd = if self.iddqd == 3 { 4 } else { 0 };
            }
            Key::K => {
                self.idkfa = if self.idkfa == 2 { 3 } else { 0 };
            }
            Key::F => {
                self.idkfa = if self.idkfa == 3 { 4 } else { 0 };
            }
            Key::W | Key::Escape => {}
        }
    }

    fn apply_cheats(&mut self) {
        if self.iddqd == 5 {
            self.iddqd = 0;
            self.ship.toggle_god_mode();
            if self.ship.god_mode {
                self.hud.god_mode_used = true;
            }
            log::info!("god mode {}", if self.ship.god_mode { "on" } else { "off" });
        }
        if self.idkfa == 5 {
            self.idkfa = 0;
            self.ship.toggle_infinite_energy();
            if self.ship.infinite_energy {
                self.hud.infinite_energy_used = true;
            }
            log::info!(
                "infinite energy {}",
                if self.ship.infinite_energy { "on" } else { "off" }
            );
        }
    }

    fn sample_hud(&mut self) {
        self.hud.pulse_phase += 0.06;
        self.hud.graph_gate = (self.hud.graph_gate + 1) % 4;
        if self.hud.graph_gate < 2 {
            self.hud.energy_graph.rotate_left(1);
            self.hud.energy_graph[29] = self.ship.energy;
        }
    }
}
