//! The three enemy kinds and their per-tick behavior scripts
//!
//! All kinds share one data record; what differs is the authored shape and
//! the state machine carried by [`Behavior`]. Shape vertices live in world
//! space and translate with the center; the facing rotation is applied on
//! the fly for drawing and hit-testing, never written back.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::bullet::BulletPool;
use super::geom::{advance, aim_angle, point_in_hull, rotate_about};
use super::ship::Ship;
use crate::consts::{FIELD_MARGIN_X, FIELD_MARGIN_Y, SCREEN_H, SCREEN_W};

/// Death clock value at which the roster reclaims the entity
pub const REAP_AT: u8 = 10;

/// Walk-in speed while an enemy is still outside the field margins
const ENTRY_SPEED: f32 = 2.0;
/// Bull charge speed
const BURST_SPEED: f32 = 12.0;
/// LaserWall relocation speed
const RELOCATE_SPEED: f32 = 4.0;
/// Aim jitter applied to bull charges and turret shots, in radians
const AIM_JITTER: f32 = 0.05;

/// Melee charger: lines up on the player, then rams past their position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BullState {
    MoveToField,
    Stay,
    Burst { length: f32, travelled: f32 },
}

/// Stationary shooter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurretState {
    MoveToField,
    Shooting,
}

/// Teleporting charge-beam emitter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LaserState {
    MoveToField,
    Stay,
    Prepare,
    /// `gate` is a period-2 toggle; the beam emits on the false phase
    Shooting { gate: bool },
    Relocate { target: Vec2 },
}

/// Kind tag plus the kind-specific state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    Bull(BullState),
    Turret(TurretState),
    LaserWall(LaserState),
}

/// Read-only snapshot of the ship that enemy behavior reacts to
#[derive(Debug, Clone, Copy)]
pub struct PlayerView {
    pub pos: Vec2,
    pub alive: bool,
}

/// The kind-specific collaborator an enemy acts through
pub enum Arsenal<'a> {
    /// Melee contact against the ship itself
    Ram(&'a mut Ship),
    /// Ranged fire into a bullet pool
    Guns(&'a mut BulletPool),
}

const BULL_HULL: [usize; 4] = [0, 1, 2, 3];
const TURRET_HULL: [usize; 6] = [7, 6, 5, 4, 3, 0];
const LASER_HULL: [usize; 5] = [5, 4, 3, 2, 1];

/// One enemy entity of any kind
#[derive(Debug, Clone)]
pub struct Enemy {
    pub center: Vec2,
    pub angle: f32,
    pub dots: Vec<Vec2>,
    pub hull: &'static [usize],
    pub cool_down: i32,
    pub health: f32,
    pub death_clock: u8,
    /// Default damage one player bullet deals to this kind
    pub damage: f32,
    pub behavior: Behavior,
}

/// Pick a spawn frame just off one screen edge, facing inward
fn edge_spawn(rng: &mut Pcg32) -> (Vec2, f32) {
    use std::f32::consts::PI;
    match rng.random_range(0..=3) {
        0 => (
            Vec2::new(-50.0, rng.random_range(101..=SCREEN_H as i32 - 101) as f32),
            0.0,
        ),
        1 => (
            Vec2::new(
                SCREEN_W + 50.0,
                rng.random_range(101..=SCREEN_H as i32 - 101) as f32,
            ),
            PI,
        ),
        2 => (
            Vec2::new(rng.random_range(51..=SCREEN_W as i32 - 51) as f32, -50.0),
            PI * 3.0 / 2.0,
        ),
        _ => (
            Vec2::new(
                rng.random_range(51..=SCREEN_W as i32 - 51) as f32,
                SCREEN_H + 50.0,
            ),
            PI / 2.0,
        ),
    }
}

impl Enemy {
    fn base(rng: &mut Pcg32, local_dots: &[Vec2], hull: &'static [usize], behavior: Behavior) -> Self {
        let (center, angle) = edge_spawn(rng);
        Self {
            center,
            angle,
            dots: local_dots.iter().map(|&d| center + d).collect(),
            hull,
            cool_down: 30,
            health: 100.0,
            death_clock: 0,
            damage: 10.0,
            behavior,
        }
    }

    pub fn bull(rng: &mut Pcg32) -> Self {
        Self::base(
            rng,
            &[
                Vec2::new(25.0, 0.0),
                Vec2::new(-15.0, 16.0),
                Vec2::new(-25.0, 0.0),
                Vec2::new(-15.0, -16.0),
            ],
            &BULL_HULL,
            Behavior::Bull(BullState::MoveToField),
        )
    }

    pub fn turret(rng: &mut Pcg32) -> Self {
        let mut e = Self::base(
            rng,
            &[
                Vec2::new(15.0, 0.0),
                Vec2::new(-7.5, -10.5),
                Vec2::new(0.0, -18.0),
                Vec2::new(22.5, -12.0),
                Vec2::new(-4.5, -30.0),
                Vec2::new(-30.0, 0.0),
                Vec2::new(-4.5, 30.0),
                Vec2::new(22.5, 12.0),
                Vec2::new(0.0, 18.0),
                Vec2::new(-7.5, 10.5),
            ],
            &TURRET_HULL,
            Behavior::Turret(TurretState::MoveToField),
        );
        e.damage = 5.0;
        e
    }

    pub fn laser_wall(rng: &mut Pcg32) -> Self {
        let mut e = Self::base(
            rng,
            &[
                Vec2::new(0.0, -10.0),
                Vec2::new(30.0, -10.0),
                Vec2::new(0.0, -30.0),
                Vec2::new(-30.0, 0.0),
                Vec2::new(0.0, 30.0),
                Vec2::new(30.0, 10.0),
                Vec2::new(0.0, 10.0),
            ],
            &LASER_HULL,
            Behavior::LaserWall(LaserState::MoveToField),
        );
        e.damage = 3.5;
        e
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0 && self.death_clock == 0
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    /// Run the fade-out; the roster reclaims the entity at [`REAP_AT`]
    pub fn advance_death_clock(&mut self) {
        self.death_clock += 1;
    }

    /// True iff the point lies inside the rotated hull polygon
    pub fn hit_test(&self, p: Vec2) -> bool {
        let mut hull = [Vec2::ZERO; 8];
        for (slot, &i) in hull.iter_mut().zip(self.hull) {
            *slot = rotate_about(self.dots[i], self.center, self.angle);
        }
        point_in_hull(&hull[..self.hull.len()], p)
    }

    /// Shape vertices rotated into world space, for drawing
    pub fn world_dots(&self) -> Vec<Vec2> {
        self.dots
            .iter()
            .map(|&d| rotate_about(d, self.center, self.angle))
            .collect()
    }

    fn move_by(&mut self, speed: f32) {
        self.center = advance(self.center, self.angle, speed);
        for d in &mut self.dots {
            *d = advance(*d, self.angle, speed);
        }
    }

    fn outside_field(&self) -> bool {
        self.center.x < FIELD_MARGIN_X
            || self.center.x > SCREEN_W - FIELD_MARGIN_X
            || self.center.y < FIELD_MARGIN_Y
            || self.center.y > SCREEN_H - FIELD_MARGIN_Y
    }

    /// Advance this enemy's state machine by one tick
    pub fn act(&mut self, player: &PlayerView, rng: &mut Pcg32, weapon: &mut Arsenal<'_>) {
        if !self.is_alive() {
            return;
        }
        let mut behavior = self.behavior;
        match &mut behavior {
            Behavior::Bull(state) => self.act_bull(state, player, rng, weapon),
            Behavior::Turret(state) => self.act_turret(state, player, rng, weapon),
            Behavior::LaserWall(state) => self.act_laser(state, player, rng, weapon),
        }
        self.behavior = behavior;
    }

    fn act_bull(
        &mut self,
        state: &mut BullState,
        player: &PlayerView,
        rng: &mut Pcg32,
        weapon: &mut Arsenal<'_>,
    ) {
        match state {
            BullState::MoveToField => {
                if self.outside_field() {
                    self.move_by(ENTRY_SPEED);
                } else {
                    *state = BullState::Stay;
                }
            }
            BullState::Stay => {
                self.angle = aim_angle(self.center, player.pos);
                if self.cool_down == 0 && player.alive {
                    *state = BullState::Burst {
                        length: self.center.distance(player.pos) * 1.2,
                        travelled: 0.0,
                    };
                    self.cool_down = rng.random_range(50..=200);
                    self.angle += rng.random_range(-AIM_JITTER..AIM_JITTER);
                } else {
                    self.cool_down -= 1;
                }
            }
            BullState::Burst { length, travelled } => {
                if *travelled < *length {
                    self.move_by(BURST_SPEED);
                    *travelled += BURST_SPEED;
                } else if player.alive {
                    *state = BullState::Stay;
                }
                if let Arsenal::Ram(ship) = weapon {
                    self.check_ram(ship);
                }
            }
        }
    }

    /// Body-to-body contact: hurts the ship and bruises the bull itself
    fn check_ram(&mut self, ship: &mut Ship) {
        if ship.is_invincible() {
            return;
        }
        let corners = ship.corners();
        let contact = corners.iter().any(|&c| self.hit_test(c)) || self.hit_test(ship.center);
        if contact {
            ship.take_damage(25.0);
            self.take_damage(50.0);
        }
    }

    fn act_turret(
        &mut self,
        state: &mut TurretState,
        player: &PlayerView,
        rng: &mut Pcg32,
        weapon: &mut Arsenal<'_>,
    ) {
        match state {
            TurretState::MoveToField => {
                if self.outside_field() {
                    self.move_by(ENTRY_SPEED);
                } else {
                    *state = TurretState::Shooting;
                }
            }
            TurretState::Shooting => {
                self.angle = aim_angle(self.center, player.pos);
                if self.cool_down == 0 && player.alive {
                    let muzzle = rotate_about(self.dots[0], self.center, self.angle);
                    if let Arsenal::Guns(pool) = weapon {
                        pool.fire(muzzle, self.angle + rng.random_range(-AIM_JITTER..AIM_JITTER));
                    }
                    self.cool_down = rng.random_range(50..=175);
                } else {
                    self.cool_down -= 1;
                }
            }
        }
    }

    fn act_laser(
        &mut self,
        state: &mut LaserState,
        player: &PlayerView,
        rng: &mut Pcg32,
        weapon: &mut Arsenal<'_>,
    ) {
        match state {
            LaserState::MoveToField => {
                if self.outside_field() {
                    self.move_by(ENTRY_SPEED);
                } else {
                    self.cool_down = 50;
                    *state = LaserState::Stay;
                }
            }
            LaserState::Stay => {
                self.angle = aim_angle(self.center, player.pos);
                if self.cool_down == 0 && player.alive {
                    self.cool_down = 30;
                    *state = LaserState::Prepare;
                } else {
                    self.cool_down -= 1;
                }
            }
            LaserState::Prepare => {
                if self.cool_down == 0 && player.alive {
                    self.cool_down = 350;
                    *state = LaserState::Shooting { gate: false };
                } else {
                    self.cool_down -= 1;
                }
            }
            LaserState::Shooting { gate } => {
                // The beam is a stream of bullets emitted every other tick
                if !*gate && player.alive {
                    if let Arsenal::Guns(pool) = weapon {
                        pool.fire(self.center, self.angle);
                    }
                }
                *gate = !*gate;
                if self.cool_down == 0 && player.alive {
                    let target = Vec2::new(
                        rng.random_range(50..=SCREEN_W as i32 - 50) as f32,
                        rng.random_range(100..=SCREEN_H as i32 - 100) as f32,
                    );
                    self.angle = aim_angle(self.center, target);
                    *state = LaserState::Relocate { target };
                } else {
                    self.cool_down -= 1;
                }
            }
            LaserState::Relocate { target } => {
                self.move_by(RELOCATE_SPEED);
                let manhattan =
                    (target.x - self.center.x).abs() + (target.y - self.center.y).abs();
                if manhattan < 16.0 {
                    self.cool_down = rng.random_range(50..=100);
                    *state = LaserState::Stay;
                }
            }
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bullet::WeaponStyle;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    fn pool() -> BulletPool {
        BulletPool::new(
            WeaponStyle {
                color: [255, 128, 128],
                thickness: 4,
            },
            6.0,
        )
    }

    #[test]
    fn bull_dies_in_ten_default_hits_then_reaps_on_tenth_clock() {
        let mut r = rng();
        let mut bull = Enemy::bull(&mut r);
        let dmg = bull.damage;
        bull.take_damage(dmg);
        assert_eq!(bull.health, 90.0);
        for _ in 0..9 {
            let dmg = bull.damage;
            bull.take_damage(dmg);
        }
        assert_eq!(bull.health, 0.0);
        assert!(!bull.is_alive());
        for i in 1..=REAP_AT {
            bull.advance_death_clock();
            assert_eq!(bull.death_clock == REAP_AT, i == 10);
        }
    }

    #[test]
    fn health_never_goes_negative() {
        let mut r = rng();
        let mut e = Enemy::laser_wall(&mut r);
        e.take_damage(250.0);
        assert_eq!(e.health, 0.0);
        e.take_damage(3.5);
        assert_eq!(e.health, 0.0);
    }

    #[test]
    fn turret_fires_one_aimed_bullet_when_ready() {
        let mut r = rng();
        let mut turret = Enemy::turret(&mut r);
        // Park it in-field, directly left of the player, ready to shoot
        let shift = Vec2::new(300.0, 384.0) - turret.center;
        turret.center += shift;
        for d in &mut turret.dots {
            *d += shift;
        }
        turret.behavior = Behavior::Turret(TurretState::Shooting);
        turret.cool_down = 0;

        let player = PlayerView {
            pos: Vec2::new(512.0, 384.0),
            alive: true,
        };
        let mut guns = pool();
        turret.act(&player, &mut r, &mut Arsenal::Guns(&mut guns));

        assert_eq!(guns.bullets.len(), 1);
        // Facing locks onto the player exactly; the shot may jitter a hair
        let exact = aim_angle(turret.center, player.pos);
        assert!((turret.angle - exact).abs() < 1e-6);
        assert!((guns.bullets[0].angle - exact).abs() <= AIM_JITTER);
        assert!((50..=175).contains(&turret.cool_down));
    }

    #[test]
    fn turret_holds_fire_while_cooling() {
        let mut r = rng();
        let mut turret = Enemy::turret(&mut r);
        turret.behavior = Behavior::Turret(TurretState::Shooting);
        turret.cool_down = 3;
        let player = PlayerView {
            pos: Vec2::new(512.0, 384.0),
            alive: true,
        };
        let mut guns = pool();
        turret.act(&player, &mut r, &mut Arsenal::Guns(&mut guns));
        assert!(guns.bullets.is_empty());
        assert_eq!(turret.cool_down, 2);
    }

    #[test]
    fn dead_enemy_does_not_act() {
        let mut r = rng();
        let mut turret = Enemy::turret(&mut r);
        turret.behavior = Behavior::Turret(TurretState::Shooting);
        turret.cool_down = 0;
        turret.health = 0.0;
        let player = PlayerView {
            pos: Vec2::new(512.0, 384.0),
            alive: true,
        };
        let mut guns = pool();
        turret.act(&player, &mut r, &mut Arsenal::Guns(&mut guns));
        assert!(guns.bullets.is_empty());
        assert_eq!(turret.cool_down, 0);
    }

    #[test]
    fn bull_walks_in_then_commits_to_a_charge() {
        let mut r = rng();
        let mut bull = Enemy::bull(&mut r);
        let player = PlayerView {
            pos: Vec2::new(512.0, 384.0),
            alive: true,
        };
        let mut bogus = pool();
        // Walk until it clears the field margin
        for _ in 0..700 {
            let mut weapon = Arsenal::Guns(&mut bogus);
            bull.act(&player, &mut r, &mut weapon);
            if matches!(bull.behavior, Behavior::Bull(BullState::Stay)) {
                break;
            }
        }
        assert!(matches!(bull.behavior, Behavior::Bull(BullState::Stay)));

        bull.cool_down = 0;
        let dist = bull.center.distance(player.pos);
        let mut weapon = Arsenal::Guns(&mut bogus);
        bull.act(&player, &mut r, &mut weapon);
        match bull.behavior {
            Behavior::Bull(BullState::Burst { length, travelled }) => {
                assert!((length - dist * 1.2).abs() < 1e-3);
                assert_eq!(travelled, 0.0);
            }
            other => panic!("expected burst, got {other:?}"),
        }
        assert!((50..=200).contains(&bull.cool_down));
    }

    #[test]
    fn hit_test_tracks_rotation() {
        let mut r = rng();
        let mut bull = Enemy::bull(&mut r);
        let shift = Vec2::new(400.0, 400.0) - bull.center;
        bull.center += shift;
        for d in &mut bull.dots {
            *d += shift;
        }
        // Nose points along +x at angle 0
        bull.angle = 0.0;
        assert!(bull.hit_test(Vec2::new(420.0, 400.0)));
        // Turn to face up; the nose slot is now above the center
        bull.angle = std::f32::consts::FRAC_PI_2;
        assert!(!bull.hit_test(Vec2::new(420.0, 400.0)));
        assert!(bull.hit_test(Vec2::new(400.0, 380.0)));
    }

    #[test]
    fn laser_wall_walkthrough_to_beam() {
        let mut r = rng();
        let mut laser = Enemy::laser_wall(&mut r);
        let shift = Vec2::new(512.0, 384.0) - laser.center;
        laser.center += shift;
        for d in &mut laser.dots {
            *d += shift;
        }
        laser.behavior = Behavior::LaserWall(LaserState::MoveToField);
        let player = PlayerView {
            pos: Vec2::new(600.0, 384.0),
            alive: true,
        };
        let mut beam = pool();

        // In-field already: first act lands in Stay with the entry cooldown
        laser.act(&player, &mut r, &mut Arsenal::Guns(&mut beam));
        assert!(matches!(laser.behavior, Behavior::LaserWall(LaserState::Stay)));
        assert_eq!(laser.cool_down, 50);

        // Drain Stay, then Prepare
        for _ in 0..=50 {
            laser.act(&player, &mut r, &mut Arsenal::Guns(&mut beam));
        }
        assert!(matches!(
            laser.behavior,
            Behavior::LaserWall(LaserState::Prepare)
        ));
        for _ in 0..=30 {
            laser.act(&player, &mut r, &mut Arsenal::Guns(&mut beam));
        }
        assert!(matches!(
            laser.behavior,
            Behavior::LaserWall(LaserState::Shooting { .. })
        ));
        assert_eq!(laser.cool_down, 350);

        // Every other shooting tick emits one beam bullet from the center
        let before = beam.bullets.len();
        laser.act(&player, &mut r, &mut Arsenal::Guns(&mut beam));
        laser.act(&player, &mut r, &mut Arsenal::Guns(&mut beam));
        assert_eq!(beam.bullets.len(), before + 1);
        assert_eq!(beam.bullets[before].tail, laser.center);
    }
}
