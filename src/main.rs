//! Space War headless demo
//!
//! Runs a full scripted playthrough against the null canvas: the autopilot
//! aims at the nearest enemy and holds the trigger while the spawn ramp does
//! its thing. Useful for profiling the simulation and for eyeballing balance
//! from the log output.
//!
//! Usage: space-war [seed] [ticks] [tuning.json]

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use space_war::consts::SCREEN_W;
use space_war::render::{draw_frame, NullCanvas, Starfield};
use space_war::sim::{GamePhase, Key, Session, TickInput};
use space_war::Tuning;

fn nearest_enemy(session: &Session) -> Option<Vec2> {
    [&session.bulls, &session.turrets, &session.lasers]
        .into_iter()
        .flat_map(|r| r.enemies.iter())
        .filter(|e| e.is_alive())
        .min_by(|a, b| {
            let da = a.center.distance_squared(session.ship.center);
            let db = b.center.distance_squared(session.ship.center);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| e.center)
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(2024);
    let ticks: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(20_000);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|s| Tuning::from_json_str(&s).map_err(|e| e.to_string()))
        {
            Ok(t) => t,
            Err(e) => {
                log::warn!("could not load tuning from {path}: {e}; using defaults");
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let mut session = Session::new(seed, tuning);
    let mut stars = Starfield::new(&mut Pcg32::seed_from_u64(seed ^ 0x5747));
    let mut canvas = NullCanvas;
    session.begin();

    for i in 0..ticks {
        if session.phase == GamePhase::LoseProcessed {
            break;
        }
        draw_frame(&session, &mut stars, &mut canvas);

        let cursor = nearest_enemy(&session).unwrap_or(Vec2::new(SCREEN_W / 2.0, 0.0));
        let input = TickInput {
            cursor,
            // A nudge of thrust now and then keeps the ship drifting
            key: (i % 64 == 0).then_some(Key::W),
            firing: true,
        };
        session.tick(&input);

        if i % 1000 == 0 {
            log::info!(
                "t={:.1}s kills={} health={:.0} energy={:.0} bulls={} turrets={} lasers={}",
                session.elapsed,
                session.kills,
                session.ship.health,
                session.ship.energy,
                session.bulls.population(),
                session.turrets.population(),
                session.lasers.population(),
            );
        }
    }

    log::info!(
        "demo over: survived {:.1}s with {} kills ({})",
        session.elapsed,
        session.kills,
        if session.ship.is_alive() {
            "still flying"
        } else {
            "shot down"
        }
    );
}
