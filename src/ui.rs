//! Screen-flow interfaces and the top-level frame driver
//!
//! The menu, pause and lose screens are thin external collaborators: each is
//! polled once per frame and eventually hands back a transition. The [`App`]
//! weaves them together with the simulation and the renderer.

use crate::platform::{gather, InputSource};
use crate::render::{draw_frame, Canvas, Starfield};
use crate::sim::{GamePhase, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Play,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseChoice {
    Resume,
    Restart,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoseChoice {
    Restart,
    Exit,
}

/// The three blocking screens, polled per frame (`None` = still deciding)
pub trait Screens {
    fn menu(&mut self) -> Option<MenuChoice>;
    fn pause(&mut self) -> Option<PauseChoice>;
    fn lose(&mut self) -> Option<LoseChoice>;
}

/// Owns the session and its collaborators and runs the per-frame state machine
pub struct App<C, I, S> {
    pub session: Session,
    pub canvas: C,
    pub input: I,
    pub screens: S,
    pub stars: Starfield,
}

impl<C: Canvas, I: InputSource, S: Screens> App<C, I, S> {
    pub fn new(session: Session, canvas: C, input: I, screens: S, stars: Starfield) -> Self {
        Self {
            session,
            canvas,
            input,
            screens,
            stars,
        }
    }

    /// Run one frame; returns false when the player quits for good
    pub fn frame(&mut self) -> bool {
        match self.session.phase {
            GamePhase::Ended => match self.screens.menu() {
                Some(MenuChoice::Play) => {
                    self.session.begin();
                    true
                }
                Some(MenuChoice::Quit) => false,
                None => true,
            },
            GamePhase::Paused => {
                draw_frame(&self.session, &mut self.stars, &mut self.canvas);
                match self.screens.pause() {
                    Some(PauseChoice::Resume) => self.session.resume(),
                    Some(PauseChoice::Restart) => self.session.request_restart(),
                    Some(PauseChoice::Exit) => self.session.end(),
                    None => {}
                }
                true
            }
            GamePhase::LoseProcessed => {
                draw_frame(&self.session, &mut self.stars, &mut self.canvas);
                match self.screens.lose() {
                    Some(LoseChoice::Restart) => self.session.request_restart(),
                    Some(LoseChoice::Exit) => self.session.end(),
                    None => {}
                }
                true
            }
            GamePhase::InProcess | GamePhase::LoseLinger | GamePhase::Restarting => {
                draw_frame(&self.session, &mut self.stars, &mut self.canvas);
                let input = gather(&mut self.input);
                self.session.tick(&input);
                true
            }
        }
    }
}
