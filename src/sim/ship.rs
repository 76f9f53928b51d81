//! The player ship: kinematics, weapon economy, damage and grace window

use glam::Vec2;

use super::bullet::BulletPool;
use super::geom::{advance, aim_angle, point_in_hull, rotate_about};
use crate::consts::{SCREEN_H, SCREEN_W};

/// Ticks of post-hit invincibility
pub const GRACE_TICKS: u32 = 50;
/// Ticks between shots
const FIRE_COOLDOWN: u32 = 5;
/// Energy cost of one shot
pub const SHOT_COST: f32 = 3.5;
/// Energy regenerated per tick
const ENERGY_REGEN: f32 = 0.175;
/// Health regenerated per tick
const HEALTH_REGEN: f32 = 0.01;

/// Strafe direction relative to the ship's facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Steer {
    Right = -1,
    #[default]
    Ahead = 0,
    Left = 1,
}

#[derive(Debug, Clone)]
pub struct Ship {
    pub center: Vec2,
    pub angle: f32,
    pub dots: [Vec2; 4],
    pub muzzles: [Vec2; 2],
    /// Period-2 muzzle alternator
    muzzle_toggle: bool,
    /// Period-8 blink phase while the grace window runs
    flicker: u8,
    pub speed: f32,
    pub max_speed: f32,
    accelerating: bool,
    pub health: f32,
    pub energy: f32,
    cool_down: u32,
    damage_cool_down: u32,
    pub god_mode: bool,
    pub infinite_energy: bool,
}

impl Default for Ship {
    fn default() -> Self {
        Self::new()
    }
}

impl Ship {
    pub fn new() -> Self {
        let center = Vec2::new(SCREEN_W / 2.0, SCREEN_H / 2.0);
        Self {
            center,
            angle: std::f32::consts::FRAC_PI_2,
            dots: [
                center + Vec2::new(25.0, 0.0),
                center + Vec2::new(-15.0, 16.0),
                center + Vec2::new(-10.0, 0.0),
                center + Vec2::new(-15.0, -16.0),
            ],
            muzzles: [center + Vec2::new(-2.0, -7.0), center + Vec2::new(-2.0, 7.0)],
            muzzle_toggle: false,
            flicker: 0,
            speed: 0.0,
            max_speed: 6.0,
            accelerating: false,
            health: 100.0,
            energy: 100.0,
            cool_down: FIRE_COOLDOWN,
            damage_cool_down: GRACE_TICKS,
            god_mode: false,
            infinite_energy: false,
        }
    }

    /// Fresh ship for a new playthrough
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.damage_cool_down < GRACE_TICKS || self.god_mode
    }

    /// Orientation tracks the cursor every tick
    pub fn set_heading(&mut self, target: Vec2) {
        self.angle = aim_angle(self.center, target);
    }

    /// Displace the whole shape along the current steering direction
    pub fn steer(&mut self, dir: Steer) {
        let heading = self.angle + std::f32::consts::FRAC_PI_2 * dir as i32 as f32;
        self.center = advance(self.center, heading, self.speed);
        for d in &mut self.dots {
            *d = advance(*d, heading, self.speed);
        }
        for m in &mut self.muzzles {
            *m = advance(*m, heading, self.speed);
        }
    }

    pub fn set_accelerating(&mut self, on: bool) {
        self.accelerating = on;
    }

    /// Instant throttle-up, linear coast-down
    pub fn update_speed(&mut self) {
        if self.accelerating {
            self.speed = self.max_speed;
        } else {
            self.speed = (self.speed - 0.1).max(0.0);
        }
    }

    /// Fire from the active muzzle if the cooldown and energy allow it
    pub fn fire(&mut self, pool: &mut BulletPool) {
        if self.cool_down < FIRE_COOLDOWN || self.energy < SHOT_COST {
            return;
        }
        let idx = usize::from(self.muzzle_toggle);
        let muzzle = rotate_about(self.muzzles[idx], self.center, self.angle);
        pool.fire(muzzle, self.angle);
        self.muzzle_toggle = !self.muzzle_toggle;
        if !self.infinite_energy {
            self.energy = (self.energy - SHOT_COST).max(1.0);
        }
        self.cool_down = 0;
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
        self.damage_cool_down = 0;
    }

    /// Advance the fire cooldown, grace window and blink phase by one tick
    pub fn refresh_cool_down(&mut self) {
        self.cool_down = (self.cool_down + 1).min(FIRE_COOLDOWN);
        self.damage_cool_down = (self.damage_cool_down + 1).min(GRACE_TICKS);
        if self.damage_cool_down < GRACE_TICKS {
            self.flicker = (self.flicker + 1) % 8;
        } else {
            self.flicker = 0;
        }
    }

    pub fn regenerate(&mut self) {
        self.energy = (self.energy + ENERGY_REGEN).min(100.0);
        // A dead ship stays dead until the session resets it
        if self.is_alive() {
            self.health = (self.health + HEALTH_REGEN).min(100.0);
        }
    }

    /// Hull corners rotated into world space
    pub fn corners(&self) -> [Vec2; 4] {
        self.dots
            .map(|d| rotate_about(d, self.center, self.angle))
    }

    /// True iff the point lies inside the rotated hull quad
    pub fn hit_test(&self, p: Vec2) -> bool {
        point_in_hull(&self.corners(), p)
    }

    /// Resolve enemy bullets against the hull
    ///
    /// Hitting bullets always start fading; damage lands only outside the
    /// grace window.
    pub fn resolve_hits(&mut self, pool: &mut BulletPool, damage: f32) {
        for i in 0..pool.bullets.len() {
            let b = pool.bullets[i];
            if b.is_live() && self.hit_test(b.head) {
                if !self.is_invincible() {
                    self.take_damage(damage);
                }
                pool.bullets[i].start_fade();
            }
        }
    }

    /// Drawn this tick? Dead ships and the blink-off phase are hidden
    pub fn visible(&self) -> bool {
        self.is_alive() && self.flicker < 4
    }

    /// Health pinned to full while on; toggling re-fills either way
    pub fn toggle_god_mode(&mut self) {
        self.god_mode = !self.god_mode;
        self.health = 100.0;
    }

    pub fn toggle_infinite_energy(&mut self) {
        self.infinite_energy = !self.infinite_energy;
        self.energy = 100.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bullet::WeaponStyle;

    fn pool() -> BulletPool {
        BulletPool::new(
            WeaponStyle {
                color: [192, 255, 255],
                thickness: 2,
            },
            8.0,
        )
    }

    #[test]
    fn fire_costs_exactly_one_shot_of_energy() {
        let mut ship = Ship::new();
        let mut guns = pool();
        ship.fire(&mut guns);
        assert_eq!(guns.bullets.len(), 1);
        assert_eq!(ship.energy, 100.0 - SHOT_COST);
    }

    #[test]
    fn fire_rejected_during_cooldown() {
        let mut ship = Ship::new();
        let mut guns = pool();
        ship.fire(&mut guns);
        let energy = ship.energy;
        // 4 refreshes are not enough; the 5th re-arms
        for _ in 0..4 {
            ship.refresh_cool_down();
            ship.fire(&mut guns);
        }
        assert_eq!(guns.bullets.len(), 1);
        assert_eq!(ship.energy, energy);
        ship.refresh_cool_down();
        ship.fire(&mut guns);
        assert_eq!(guns.bullets.len(), 2);
    }

    #[test]
    fn fire_rejected_when_energy_low_and_floored_at_one() {
        let mut ship = Ship::new();
        let mut guns = pool();
        ship.energy = 3.4;
        ship.fire(&mut guns);
        assert!(guns.bullets.is_empty());
        assert_eq!(ship.energy, 3.4);

        ship.energy = 4.0;
        ship.fire(&mut guns);
        assert_eq!(guns.bullets.len(), 1);
        assert_eq!(ship.energy, 1.0);
    }

    #[test]
    fn muzzles_alternate() {
        let mut ship = Ship::new();
        let mut guns = pool();
        ship.fire(&mut guns);
        ship.refresh_cool_down();
        for _ in 0..4 {
            ship.refresh_cool_down();
        }
        ship.fire(&mut guns);
        assert_eq!(guns.bullets.len(), 2);
        assert!(guns.bullets[0].tail.distance(guns.bullets[1].tail) > 1.0);
    }

    #[test]
    fn grace_window_lasts_exactly_fifty_ticks() {
        let mut ship = Ship::new();
        assert!(!ship.is_invincible());
        ship.take_damage(25.0);
        assert!(ship.is_invincible());
        for _ in 0..49 {
            ship.refresh_cool_down();
            assert!(ship.is_invincible());
        }
        ship.refresh_cool_down();
        assert!(!ship.is_invincible());
    }

    #[test]
    fn enemy_bullet_damages_and_fades() {
        let mut ship = Ship::new();
        // Leave the spawn grace state
        ship.damage_cool_down = GRACE_TICKS;
        let mut enemy_guns = pool();
        enemy_guns.fire(ship.center - Vec2::new(15.0, 0.0), 0.0);
        ship.resolve_hits(&mut enemy_guns, 10.0);
        assert_eq!(ship.health, 90.0);
        assert!(!enemy_guns.bullets[0].is_live());
    }

    #[test]
    fn invincible_ship_still_absorbs_bullets() {
        let mut ship = Ship::new();
        ship.take_damage(10.0); // restarts the grace window
        let health = ship.health;
        let mut enemy_guns = pool();
        enemy_guns.fire(ship.center - Vec2::new(15.0, 0.0), 0.0);
        ship.resolve_hits(&mut enemy_guns, 10.0);
        assert_eq!(ship.health, health);
        assert!(!enemy_guns.bullets[0].is_live());
    }

    #[test]
    fn god_mode_pins_health_and_blocks_damage() {
        let mut ship = Ship::new();
        ship.health = 40.0;
        ship.toggle_god_mode();
        assert_eq!(ship.health, 100.0);
        assert!(ship.is_invincible());
        ship.toggle_god_mode();
        assert!(!ship.god_mode);
        assert_eq!(ship.health, 100.0);
    }

    #[test]
    fn speed_decays_linearly_to_zero() {
        let mut ship = Ship::new();
        ship.set_accelerating(true);
        ship.update_speed();
        assert_eq!(ship.speed, ship.max_speed);
        ship.set_accelerating(false);
        for _ in 0..70 {
            ship.update_speed();
        }
        assert_eq!(ship.speed, 0.0);
    }

    #[test]
    fn steering_moves_shape_rigidly() {
        let mut ship = Ship::new();
        ship.angle = 0.0;
        ship.speed = 6.0;
        let nose = ship.dots[0];
        ship.steer(Steer::Ahead);
        assert!((ship.center.x - (SCREEN_W / 2.0 + 6.0)).abs() < 1e-4);
        assert!((ship.dots[0].x - (nose.x + 6.0)).abs() < 1e-4);
        // Strafing left of a rightward facing moves up the screen
        ship.steer(Steer::Left);
        assert!((ship.center.y - (SCREEN_H / 2.0 - 6.0)).abs() < 1e-4);
    }

    #[test]
    fn regen_caps_at_full() {
        let mut ship = Ship::new();
        ship.health = 99.999;
        ship.energy = 99.9;
        for _ in 0..10 {
            ship.regenerate();
        }
        assert_eq!(ship.health, 100.0);
        assert_eq!(ship.energy, 100.0);
    }
}
