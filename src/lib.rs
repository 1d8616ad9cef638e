//! A grid snake game drawn onto a pixel-addressed surface.
//!
//! The simulation ([`snake::GameState::step`]) is a pure state transition; drawing
//! goes through the [`render::Surface`] trait, and [`game::Game`] ties both to a
//! fixed-rate ticker.

pub mod config;
pub mod error;
pub mod food;
pub mod fps;
pub mod game;
pub mod input;
pub mod render;
pub mod snake;
pub mod term;

/// Grid coordinate. Signed so a candidate head can step past the top/left edge.
pub type GridInt = i32;
pub type Coords = (GridInt, GridInt);

pub use error::{GameError, Result};
