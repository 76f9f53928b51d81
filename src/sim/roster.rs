//! Bounded-population owner of one enemy kind

use rand_pcg::Pcg32;

use super::bullet::BulletPool;
use super::enemy::{Arsenal, Enemy, PlayerView, REAP_AT};

#[derive(Debug, Clone)]
pub struct Roster {
    pub cap: usize,
    pub enemies: Vec<Enemy>,
}

impl Roster {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            enemies: Vec::with_capacity(cap),
        }
    }

    /// Alive-or-fading members; the cap applies to this number
    #[inline]
    pub fn population(&self) -> usize {
        self.enemies.len()
    }

    /// Construct and admit a new member unless the roster is full
    pub fn spawn(&mut self, rng: &mut Pcg32, ctor: impl FnOnce(&mut Pcg32) -> Enemy) {
        if self.enemies.len() < self.cap {
            self.enemies.push(ctor(rng));
        }
    }

    /// Run every member's state machine for one tick
    pub fn advance_all(&mut self, player: &PlayerView, rng: &mut Pcg32, weapon: &mut Arsenal<'_>) {
        for e in &mut self.enemies {
            e.act(player, rng, weapon);
        }
    }

    /// Tick death clocks and reclaim finished members
    ///
    /// Returns the number reclaimed, which is the caller's kill increment.
    pub fn reap_dead(&mut self) -> u32 {
        for e in &mut self.enemies {
            if !e.is_alive() {
                e.advance_death_clock();
            }
        }
        let before = self.enemies.len();
        self.enemies.retain(|e| e.death_clock < REAP_AT);
        (before - self.enemies.len()) as u32
    }

    /// Pairwise hit resolution against a player bullet pool
    ///
    /// O(members x live bullets); population caps keep both factors small.
    pub fn resolve_hits(&mut self, pool: &mut BulletPool) {
        for e in &mut self.enemies {
            if !e.is_alive() {
                continue;
            }
            for b in &mut pool.bullets {
                if b.is_live() && e.hit_test(b.head) {
                    let dmg = e.damage;
                    e.take_damage(dmg);
                    b.start_fade();
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.enemies.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bullet::{BulletPool, WeaponStyle};
    use glam::Vec2;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    fn park(e: &mut Enemy, at: Vec2) {
        let shift = at - e.center;
        e.center += shift;
        for d in &mut e.dots {
            *d += shift;
        }
    }

    #[test]
    fn spawn_is_a_noop_at_cap() {
        let mut r = rng();
        let mut roster = Roster::new(2);
        for _ in 0..5 {
            roster.spawn(&mut r, Enemy::bull);
        }
        assert_eq!(roster.population(), 2);
    }

    #[test]
    fn fading_members_hold_their_slot() {
        let mut r = rng();
        let mut roster = Roster::new(2);
        roster.spawn(&mut r, Enemy::bull);
        roster.spawn(&mut r, Enemy::bull);
        roster.enemies[0].health = 0.0;
        // Dead but not yet reaped: still at cap
        assert_eq!(roster.reap_dead(), 0);
        roster.spawn(&mut r, Enemy::bull);
        assert_eq!(roster.population(), 2);
    }

    #[test]
    fn reap_returns_kill_count_on_the_tenth_tick() {
        let mut r = rng();
        let mut roster = Roster::new(3);
        roster.spawn(&mut r, Enemy::turret);
        roster.enemies[0].health = 0.0;
        for _ in 0..9 {
            assert_eq!(roster.reap_dead(), 0);
        }
        assert_eq!(roster.reap_dead(), 1);
        assert_eq!(roster.population(), 0);
    }

    #[test]
    fn bullets_damage_members_and_start_fading() {
        let mut r = rng();
        let mut roster = Roster::new(1);
        roster.spawn(&mut r, Enemy::bull);
        park(&mut roster.enemies[0], Vec2::new(400.0, 400.0));
        roster.enemies[0].angle = 0.0;

        let mut guns = BulletPool::new(
            WeaponStyle {
                color: [192, 255, 255],
                thickness: 2,
            },
            8.0,
        );
        // Head lands on the bull's center
        guns.fire(Vec2::new(385.0, 400.0), 0.0);
        roster.resolve_hits(&mut guns);
        assert_eq!(roster.enemies[0].health, 90.0);
        assert!(!guns.bullets[0].is_live());

        // A fading bullet no longer hits
        roster.resolve_hits(&mut guns);
        assert_eq!(roster.enemies[0].health, 90.0);
    }

    #[test]
    fn fading_members_do_not_absorb_bullets() {
        let mut r = rng();
        let mut roster = Roster::new(1);
        roster.spawn(&mut r, Enemy::bull);
        park(&mut roster.enemies[0], Vec2::new(400.0, 400.0));
        roster.enemies[0].health = 0.0;

        let mut guns = BulletPool::new(
            WeaponStyle {
                color: [192, 255, 255],
                thickness: 2,
            },
            8.0,
        );
        guns.fire(Vec2::new(385.0, 400.0), 0.0);
        roster.resolve_hits(&mut guns);
        assert!(guns.bullets[0].is_live());
    }
}
