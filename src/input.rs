use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction::{self, *};
use crate::{Coords, Result};

/// Where key presses come from.
pub trait KeySource {
    /// Wait at most `timeout` for a key press.
    fn next_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>>;
    fn wait_key(&mut self) -> Result<KeyEvent>;
}

/// What a key press asks the game to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Quit,
}

pub fn command_for(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Left => Some(Command::Turn(Left)),
        KeyCode::Up => Some(Command::Turn(Up)),
        KeyCode::Right => Some(Command::Turn(Right)),
        KeyCode::Down => Some(Command::Turn(Down)),
        _ => None,
    }
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

/// Most recently requested direction, applied on the next tick.
///
/// Only the key handler writes it and only the tick reads it. Presses between
/// two ticks overwrite each other; there is no queue.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DirectionLatch {
    direction: Direction,
    speed: Coords,
    magnitude: i32,
}

impl DirectionLatch {
    /// Starts out heading right with a zero speed vector.
    pub fn new(magnitude: i32) -> Self {
        DirectionLatch { direction: Right, speed: (0, 0), magnitude }
    }

    pub fn press(&mut self, direction: Direction) {
        let (dx, dy) = direction.offset();
        self.direction = direction;
        self.speed = (dx * self.magnitude, dy * self.magnitude);
        log::trace!("latched {:?}, speed {:?}", self.direction, self.speed);
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[cfg(test)]
    pub(crate) fn speed(&self) -> Coords {
        self.speed
    }
}
