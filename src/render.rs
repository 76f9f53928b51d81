//! Frame drawing through an abstract canvas
//!
//! The simulation never talks to a real backend; it emits draw calls through
//! the [`Canvas`] trait and the embedding supplies the implementation
//! (double-buffer swap and frame delay included). [`NullCanvas`] swallows
//! everything for headless runs and tests.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{SCREEN_H, SCREEN_W};
use crate::sim::{GamePhase, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_array(c: [u8; 3]) -> Self {
        Self {
            r: c[0],
            g: c[1],
            b: c[2],
        }
    }
}

/// The draw primitives the core needs from its rendering collaborator
pub trait Canvas {
    fn fill_polygon(&mut self, points: &[Vec2], fill: Rgb, outline: Rgb);
    fn line(&mut self, from: Vec2, to: Vec2, color: Rgb, thickness: u32);
    fn filled_circle(&mut self, center: Vec2, radius: f32, fill: Rgb, outline: Rgb);
    fn fill_rect(&mut self, min: Vec2, max: Vec2, fill: Rgb);
    fn text(&mut self, pos: Vec2, s: &str, color: Rgb);
}

/// Swallows every draw call
#[derive(Debug, Default)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn fill_polygon(&mut self, _: &[Vec2], _: Rgb, _: Rgb) {}
    fn line(&mut self, _: Vec2, _: Vec2, _: Rgb, _: u32) {}
    fn filled_circle(&mut self, _: Vec2, _: f32, _: Rgb, _: Rgb) {}
    fn fill_rect(&mut self, _: Vec2, _: Vec2, _: Rgb) {}
    fn text(&mut self, _: Vec2, _: &str, _: Rgb) {}
}

/// Red-to-green ramp for health and energy readouts
fn vitals_color(v: f32) -> Rgb {
    Rgb::new(
        (255.0 * (((100.0 - v) / 50.0).min(1.0)).max(0.0)) as u8,
        (255.0 * ((v / 50.0).min(1.0)).max(0.0)) as u8,
        0,
    )
}

const GOD_BAR: Rgb = Rgb::new(160, 192, 224);
const HUD_GREEN: Rgb = Rgb::new(0, 255, 0);
const HUD_DIM_GREEN: Rgb = Rgb::new(0, 128, 0);

/// Slowly rotating background stars with a touch of parallax
#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<(Vec2, Rgb)>,
}

/// Rotation step per frame, in radians
const STAR_ROT: f32 = 0.0005;
const STAR_COUNT: usize = 1750;

impl Starfield {
    pub fn new(rng: &mut Pcg32) -> Self {
        // Cover the whole diagonal so rotation never exposes a bare corner
        let diagonal = (SCREEN_W * SCREEN_W + SCREEN_H * SCREEN_H).sqrt();
        let lo = (SCREEN_W - diagonal) / 2.0 - 25.0;
        let hi = diagonal + 25.0;
        let stars = (0..STAR_COUNT)
            .map(|_| {
                let pos = Vec2::new(rng.random_range(lo..hi), rng.random_range(lo..hi));
                let color = Rgb::new(
                    rng.random_range(160..=255),
                    rng.random_range(160..=255),
                    rng.random_range(160..=255),
                );
                (pos, color)
            })
            .collect();
        Self { stars }
    }

    /// Rotate one step about the screen center and draw
    pub fn rotate_and_draw(&mut self, ship_center: Vec2, canvas: &mut impl Canvas) {
        let mid = Vec2::new(SCREEN_W / 2.0, SCREEN_H / 2.0);
        let (sin, cos) = STAR_ROT.sin_cos();
        let parallax = Vec2::new(
            -25.0 * ship_center.x / SCREEN_W,
            -25.0 * ship_center.y / SCREEN_H,
        );
        for (pos, color) in &mut self.stars {
            let d = *pos - mid;
            *pos = mid + Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos);
            let at = *pos + parallax;
            canvas.fill_rect(at, at + Vec2::ONE, *color);
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.stars.len()
    }
}

/// Draw one frame of the running simulation
pub fn draw_frame(session: &Session, stars: &mut Starfield, canvas: &mut impl Canvas) {
    stars.rotate_and_draw(session.ship.center, canvas);

    for roster in [&session.bulls, &session.turrets, &session.lasers] {
        for enemy in &roster.enemies {
            draw_enemy(enemy, canvas);
        }
    }

    if session.ship.visible() {
        canvas.fill_polygon(
            &session.ship.corners(),
            Rgb::new(0, 128, 0),
            Rgb::new(0, 254, 0),
        );
    }

    for pool in [
        &session.player_bullets,
        &session.enemy_bullets,
        &session.laser_bullets,
    ] {
        draw_pool(pool, canvas);
    }

    if session.phase == GamePhase::LoseLinger && session.blow_up < 15 {
        canvas.filled_circle(
            session.ship.center,
            f32::from(session.blow_up) * 3.0,
            Rgb::new(255, 128, 0),
            Rgb::new(255, 64, 0),
        );
    }

    draw_hud(session, canvas);
}

fn draw_enemy(enemy: &crate::sim::Enemy, canvas: &mut impl Canvas) {
    if enemy.death_clock == 0 {
        canvas.fill_polygon(&enemy.world_dots(), Rgb::new(128, 0, 0), Rgb::new(255, 0, 0));
        if enemy.health < 100.0 {
            let (lift, drop) = health_bar_offsets(enemy);
            let c = enemy.center;
            canvas.fill_rect(
                Vec2::new(c.x - 25.0, c.y - lift),
                Vec2::new(c.x - 25.0 + 50.0 * enemy.health / 100.0, c.y - drop),
                vitals_color(enemy.health),
            );
        }
    } else {
        canvas.filled_circle(
            enemy.center,
            f32::from(enemy.death_clock) * 3.0,
            Rgb::new(255, 128, 0),
            Rgb::new(255, 64, 0),
        );
    }
}

/// Bulls duck their bar under the body as they tilt; the bigger kinds
/// carry it at a fixed height
fn health_bar_offsets(enemy: &crate::sim::Enemy) -> (f32, f32) {
    match enemy.behavior {
        crate::sim::Behavior::Bull(_) => {
            let tilt = 10.0 * enemy.angle.sin().abs();
            (30.0 + tilt, 25.0 + tilt)
        }
        _ => (42.0, 37.0),
    }
}

fn draw_pool(pool: &crate::sim::BulletPool, canvas: &mut impl Canvas) {
    let color = Rgb::from_array(pool.style.color);
    for b in &pool.bullets {
        canvas.line(b.tail, b.head, color, pool.style.thickness);
        if b.fade > 0 {
            let r = f32::from(b.fade) * pool.style.thickness.min(4) as f32;
            canvas.filled_circle(b.head, r, color, color);
        }
    }
}

fn draw_hud(session: &Session, canvas: &mut impl Canvas) {
    // Frame corners
    canvas.line(Vec2::new(0.0, 50.0), Vec2::new(175.0, 50.0), HUD_GREEN, 1);
    canvas.line(Vec2::new(175.0, 50.0), Vec2::new(225.0, 0.0), HUD_GREEN, 1);
    canvas.line(
        Vec2::new(SCREEN_W, 50.0),
        Vec2::new(SCREEN_W - 175.0, 50.0),
        HUD_GREEN,
        1,
    );
    canvas.line(
        Vec2::new(SCREEN_W - 175.0, 50.0),
        Vec2::new(SCREEN_W - 225.0, 0.0),
        HUD_GREEN,
        1,
    );

    // Health bar along the bottom; god mode shows a steel-blue full bar
    let (health, bar_color) = if session.ship.god_mode {
        (100.0, GOD_BAR)
    } else {
        (session.ship.health, vitals_color(session.ship.health))
    };
    canvas.fill_rect(
        Vec2::new(150.0, SCREEN_H - 40.0),
        Vec2::new((SCREEN_W - 300.0) * health / 100.0 + 150.0, SCREEN_H - 10.0),
        bar_color,
    );

    // Clock and kill counter in the top corners
    canvas.text(
        Vec2::new(60.0, 25.0),
        &fmt_clock(session.elapsed),
        HUD_GREEN,
    );
    canvas.text(
        Vec2::new(SCREEN_W - 175.0, 25.0),
        &session.kills.to_string(),
        HUD_GREEN,
    );

    // Energy dial and rolling graph in the bottom-left
    let energy = if session.ship.infinite_energy {
        100.0
    } else {
        session.ship.energy
    };
    let dial_color = if session.ship.infinite_energy {
        GOD_BAR
    } else {
        vitals_color(energy)
    };
    canvas.fill_rect(
        Vec2::new(15.0, SCREEN_H - 40.0),
        Vec2::new(15.0 + 50.0 * energy / 100.0, SCREEN_H - 34.0),
        dial_color,
    );
    for (i, &sample) in session.hud.energy_graph.iter().skip(1).enumerate() {
        let x = 71.0 + i as f32;
        canvas.line(
            Vec2::new(x, SCREEN_H - 11.0),
            Vec2::new(x, SCREEN_H - 11.0 - 18.0 * sample / 100.0),
            vitals_color(sample),
            1,
        );
    }

    // Heartbeat readout: flatlines as health drains
    let mut prev = Vec2::new(
        SCREEN_W - 67.0,
        SCREEN_H - 37.0 + (session.hud.pulse_phase - 1.0).sin() * (session.ship.health / 5.0) / 2.75,
    );
    let k = session.hud.pulse_k;
    let mut s = 0.0f32;
    for i in 1..=60 {
        let x = SCREEN_W - 67.0 + i as f32;
        s += k * std::f32::consts::PI;
        let amp = (session.ship.health / 5.0) / ((s / k).cos() + 1.75);
        let y = SCREEN_H - 37.0 + (session.hud.pulse_phase + s - s.cos()).sin() * amp;
        let next = Vec2::new(x, y);
        canvas.line(prev, next, HUD_GREEN, 1);
        prev = next;
    }

    // Status lamps: god mode, infinite energy, lose
    for (i, lit) in [
        session.hud.god_mode_used,
        session.hud.infinite_energy_used,
        session.lose_bulb(),
    ]
    .into_iter()
    .enumerate()
    {
        let at = Vec2::new(SCREEN_W - 80.0 - 10.0 * (i % 2) as f32, SCREEN_H - 10.0 - 10.0 * (i / 2) as f32);
        let (fill, edge) = if lit {
            (Rgb::new(255, 0, 0), Rgb::new(128, 0, 0))
        } else {
            (HUD_GREEN, HUD_DIM_GREEN)
        };
        canvas.filled_circle(at, 3.0, fill, edge);
    }
}

/// Format the session clock: `h:mm:ss` past an hour, `m:ss` past a minute,
/// fractional seconds below that
pub fn fmt_clock(secs: f64) -> String {
    let total = secs.max(0.0);
    let hours = (total / 3600.0) as u64;
    let minutes = ((total - hours as f64 * 3600.0) / 60.0) as u64;
    let rest = total - hours as f64 * 3600.0 - minutes as f64 * 60.0;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{:02}", rest as u64)
    } else if minutes > 0 {
        format!("{minutes}:{:02}", rest as u64)
    } else {
        format!("{rest:.2}")
    }
}
