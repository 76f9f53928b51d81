//! Input-source abstraction
//!
//! The simulation consumes one [`TickInput`] per tick; where it comes from
//! (a real event queue, a script, a replay) is the embedding's business.

use glam::Vec2;

use crate::sim::{Key, TickInput};

/// Polled once per frame by the driver
pub trait InputSource {
    /// Next pending key event, if any (at most one is consumed per tick)
    fn poll_key(&mut self) -> Option<Key>;
    /// Current mouse position in screen coordinates
    fn mouse(&mut self) -> Vec2;
    /// Fire button held down
    fn fire_held(&mut self) -> bool;
}

/// Fold the source's current state into one tick of input
pub fn gather(source: &mut impl InputSource) -> TickInput {
    TickInput {
        cursor: source.mouse(),
        key: source.poll_key(),
        firing: source.fire_held(),
    }
}

/// Canned input for tests and headless demos
#[derive(Debug, Default)]
pub struct ScriptedInput {
    pub keys: Vec<Key>,
    pub cursor: Vec2,
    pub firing: bool,
}

impl InputSource for ScriptedInput {
    fn poll_key(&mut self) -> Option<Key> {
        if self.keys.is_empty() {
            None
        } else {
            Some(self.keys.remove(0))
        }
    }

    fn mouse(&mut self) -> Vec2 {
        self.cursor
    }

    fn fire_held(&mut self) -> bool {
        self.firing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gather_drains_one_key_per_tick() {
        let mut src = ScriptedInput {
            keys: vec![Key::I, Key::D],
            cursor: Vec2::new(10.0, 20.0),
            firing: true,
        };
        let first = gather(&mut src);
        assert_eq!(first.key, Some(Key::I));
        assert_eq!(first.cursor, Vec2::new(10.0, 20.0));
        assert!(first.firing);
        assert_eq!(gather(&mut src).key, Some(Key::D));
        assert_eq!(gather(&mut src).key, None);
    }
}
