//! Projectiles and the per-weapon pools that own them

use glam::Vec2;

use super::geom::advance;
use crate::consts::{OFFSCREEN_MARGIN, SCREEN_H, SCREEN_W};

/// Fade counter value at which a bullet is purged
pub const FADE_DONE: u8 = 5;

/// How far ahead of the muzzle a fresh bullet's head starts
const HEAD_LEAD: f32 = 15.0;

/// A single projectile, drawn as a head-to-tail streak
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bullet {
    pub head: Vec2,
    pub tail: Vec2,
    pub angle: f32,
    /// 0 while live; once nonzero, counts up each tick until [`FADE_DONE`]
    pub fade: u8,
}

impl Bullet {
    fn new(origin: Vec2, angle: f32) -> Self {
        Self {
            head: advance(origin, angle, HEAD_LEAD),
            tail: origin,
            angle,
            fade: 0,
        }
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.fade == 0
    }

    /// Start the impact fade-out
    #[inline]
    pub fn start_fade(&mut self) {
        self.fade = 1;
    }
}

/// Render identity of a weapon class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponStyle {
    pub color: [u8; 3],
    pub thickness: u32,
}

/// Owns every bullet of one weapon class
///
/// Hit-testing is driven by the consumers (roster, ship); the pool only
/// handles creation, movement, fade-out and culling.
#[derive(Debug, Clone)]
pub struct BulletPool {
    pub style: WeaponStyle,
    pub speed: f32,
    pub bullets: Vec<Bullet>,
}

impl BulletPool {
    pub fn new(style: WeaponStyle, speed: f32) -> Self {
        Self {
            style,
            speed,
            bullets: Vec::new(),
        }
    }

    /// Append a live bullet launched from `origin` along `angle`
    pub fn fire(&mut self, origin: Vec2, angle: f32) {
        self.bullets.push(Bullet::new(origin, angle));
    }

    /// Move every bullet one tick
    ///
    /// Live bullets fly at full speed; fading ones only drag their tail at
    /// 2/3 speed while the fade counter runs. A tail that leaves the screen
    /// by more than the margin is culled outright, whatever its state.
    pub fn advance(&mut self) {
        for b in &mut self.bullets {
            if b.is_live() {
                b.head = advance(b.head, b.angle, self.speed);
                b.tail = advance(b.tail, b.angle, self.speed);
            } else {
                b.fade += 1;
                b.tail = advance(b.tail, b.angle, self.speed / 1.5);
            }
            if b.tail.x < -OFFSCREEN_MARGIN
                || b.tail.x > SCREEN_W + OFFSCREEN_MARGIN
                || b.tail.y < -OFFSCREEN_MARGIN
                || b.tail.y > SCREEN_H + OFFSCREEN_MARGIN
            {
                b.fade = FADE_DONE;
            }
        }
    }

    /// Drop every bullet whose fade has completed
    pub fn purge(&mut self) {
        self.bullets.retain(|b| b.fade < FADE_DONE);
    }

    pub fn clear(&mut self) {
        self.bullets.clear();
    }
}
