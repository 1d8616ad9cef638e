//! Immediate-mode drawing of a [`GameState`] onto a pixel surface.
//!
//! Every tick clears and redraws the whole surface; there is no dirty tracking.

use crossterm::style::Color;

use crate::config::{parse_color, HudConfig};
use crate::snake::{Cell, GameState};
use crate::Result;

pub const SCORE_POS: (i32, i32) = (10, 50);
pub const FPS_POS: (i32, i32) = (550, 50);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Font {
    pub size_px: u32,
    pub color: Color,
}

/// The primitives the game draws with, addressed in pixels.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn clear(&mut self);
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color);
    fn fill_text(&mut self, text: &str, x: i32, y: i32, font: Font);
    /// Push the drawn frame to wherever it is shown.
    fn present(&mut self) -> Result<()>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Hud {
    pub show_fps: bool,
    pub text_color: Color,
    pub game_over_color: Color,
}

impl Hud {
    pub fn from_config(config: &HudConfig) -> Result<Self> {
        Ok(Hud {
            show_fps: config.show_fps,
            text_color: parse_color(&config.text_color)?,
            game_over_color: parse_color(&config.game_over_color)?,
        })
    }
}

fn to_pixel(grid: i32, cell_size: u32) -> i32 {
    (grid as i64 * cell_size as i64).clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

pub fn draw_cell<S: Surface + ?Sized>(surface: &mut S, cell: &Cell, state: &GameState) {
    surface.fill_rect(
        to_pixel(cell.x, state.bounds.cell_width),
        to_pixel(cell.y, state.bounds.cell_height),
        cell.width,
        cell.height,
        cell.color,
    );
}

pub fn draw_food<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    draw_cell(surface, &state.food, state);
}

pub fn draw_snake<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    for segment in state.snake.body() {
        draw_cell(surface, segment, state);
    }
}

pub fn draw_score<S: Surface + ?Sized>(surface: &mut S, score: u32, hud: &Hud) {
    let font = Font { size_px: 30, color: hud.text_color };
    surface.fill_text(&format!("Score: {}", score), SCORE_POS.0, SCORE_POS.1, font);
}

pub fn draw_fps<S: Surface + ?Sized>(surface: &mut S, fps: f64, hud: &Hud) {
    if !hud.show_fps {
        return;
    }
    let font = Font { size_px: 18, color: hud.text_color };
    surface.fill_text(&format!("FPS: {}", fps.floor() as u64), FPS_POS.0, FPS_POS.1, font);
}

pub fn draw_game_over<S: Surface + ?Sized>(surface: &mut S, hud: &Hud) {
    let x = surface.width() as i32 / 2 - 90;
    let y = surface.height() as i32 / 2 - 15;
    surface.fill_text("Game Over", x, y, Font { size_px: 30, color: hud.game_over_color });
}

pub fn draw_replay_hint<S: Surface + ?Sized>(surface: &mut S, hud: &Hud) {
    let x = surface.width() as i32 / 2 - 90;
    let y = surface.height() as i32 / 2 + 25;
    surface.fill_text("Any key: again, Ctrl+C: quit", x, y, Font { size_px: 18, color: hud.text_color });
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::snake::{Bounds, Snake};

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Clear,
        Rect(i32, i32, u32, u32, Color),
        Text(String, i32, i32, Font),
        Present,
    }

    /// Surface double that records every call.
    pub struct Recorder {
        pub width: u32,
        pub height: u32,
        pub ops: Vec<Op>,
    }

    impl Recorder {
        pub fn new(width: u32, height: u32) -> Self {
            Recorder { width, height, ops: vec![] }
        }

        pub fn texts(&self) -> Vec<&str> {
            self.ops.iter().filter_map(|op| match op {
                Op::Text(text, ..) => Some(text.as_str()),
                _ => None,
            }).collect()
        }
    }

    impl Surface for Recorder {
        fn width(&self) -> u32 { self.width }
        fn height(&self) -> u32 { self.height }
        fn clear(&mut self) { self.ops.push(Op::Clear) }

        fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
            self.ops.push(Op::Rect(x, y, width, height, color));
        }

        fn fill_text(&mut self, text: &str, x: i32, y: i32, font: Font) {
            self.ops.push(Op::Text(text.to_string(), x, y, font));
        }

        fn present(&mut self) -> Result<()> {
            self.ops.push(Op::Present);
            Ok(())
        }
    }

    fn hud() -> Hud {
        Hud { show_fps: true, text_color: Color::White, game_over_color: Color::Red }
    }

    fn state() -> GameState {
        let template = Cell { x: 0, y: 0, width: 10, height: 10, color: Color::Green };
        let bounds = Bounds { width: 640, height: 480, cell_width: 10, cell_height: 10 };
        GameState::new(Snake::new(3, template), template.moved_to((1, 1)), bounds)
    }

    #[test]
    fn draws_every_segment_in_pixels() {
        let mut surface = Recorder::new(640, 480);
        let state = state();
        draw_food(&mut surface, &state);
        draw_snake(&mut surface, &state);

        assert_eq!(surface.ops, vec![
            Op::Rect(10, 10, 10, 10, Color::Green),
            Op::Rect(20, 0, 10, 10, Color::Green),
            Op::Rect(10, 0, 10, 10, Color::Green),
            Op::Rect(0, 0, 10, 10, Color::Green),
        ]);
    }

    #[test]
    fn far_cells_clamp_instead_of_overflowing() {
        let mut surface = Recorder::new(640, 480);
        let mut state = state();
        state.bounds.cell_width = 1_000_000_000;
        state.food = state.food.moved_to((5, -5));
        draw_food(&mut surface, &state);

        assert_eq!(surface.ops, vec![Op::Rect(i32::MAX, -50, 10, 10, Color::Green)]);
    }

    #[test]
    fn hud_text_positions() {
        let mut surface = Recorder::new(640, 480);
        draw_score(&mut surface, 4, &hud());
        draw_fps(&mut surface, 14.9, &hud());
        draw_game_over(&mut surface, &hud());

        assert_eq!(surface.ops, vec![
            Op::Text("Score: 4".into(), 10, 50, Font { size_px: 30, color: Color::White }),
            Op::Text("FPS: 14".into(), 550, 50, Font { size_px: 18, color: Color::White }),
            Op::Text("Game Over".into(), 230, 225, Font { size_px: 30, color: Color::Red }),
        ]);
    }

    #[test]
    fn replay_hint_sits_below_game_over() {
        let mut surface = Recorder::new(640, 480);
        draw_replay_hint(&mut surface, &hud());
        assert!(matches!(&surface.ops[0], Op::Text(_, 230, 265, _)));
    }

    #[test]
    fn fps_can_be_hidden() {
        let mut surface = Recorder::new(640, 480);
        let hud = Hud { show_fps: false, ..hud() };
        draw_fps(&mut surface, 15.0, &hud);
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn hud_rejects_bad_colors() {
        let config = HudConfig { text_color: "white".into(), ..HudConfig::default() };
        assert!(Hud::from_config(&config).is_err());
    }
}
