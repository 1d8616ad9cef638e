use std::collections::VecDeque;

use crossterm::style::Color;
use rand::Rng;

use crate::food::spawn_food;
use crate::{Coords, GridInt};
use Direction::*;
use MoveResult::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// One grid unit in this direction
    pub fn offset(self) -> Coords {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CrashReason {
    HitWall,
    HitSelf,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved,
    Ate,
    Crashed(CrashReason),
    /// The game was already over, nothing changed
    Halted,
}

/// A grid-aligned rectangle, used for the food and for every snake segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub x: GridInt,
    pub y: GridInt,
    pub width: u32,
    pub height: u32,
    pub color: Color,
}

impl Cell {
    pub fn pos(&self) -> Coords {
        (self.x, self.y)
    }

    pub fn moved_to(self, (x, y): Coords) -> Self {
        Cell { x, y, ..self }
    }
}

/// Grid extent in whole cells, plus the pixel size of one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl Bounds {
    pub fn columns(&self) -> GridInt {
        (self.width / self.cell_width) as GridInt
    }

    pub fn rows(&self) -> GridInt {
        (self.height / self.cell_height) as GridInt
    }

    /// Pixel-space check: the cell's top-left corner must lie on the surface.
    pub fn contains(&self, (x, y): Coords) -> bool {
        x >= 0
            && y >= 0
            && (x as i64) * (self.cell_width as i64) < self.width as i64
            && (y as i64) * (self.cell_height as i64) < self.height as i64
    }
}

/// Body segments, head at the front.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Lay out `size` segments ending at the origin, head at `(size - 1, 0)`.
    pub fn new(size: u32, template: Cell) -> Self {
        let body = (0..size as GridInt).rev()
            .map(|x| template.moved_to((x, 0)))
            .collect();
        Snake { body }
    }

    pub fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Self {
        Snake { body: cells.into_iter().collect() }
    }

    pub fn head(&self) -> Option<&Cell> {
        self.body.front()
    }

    pub fn body(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, pos: Coords) -> bool {
        self.body.iter().any(|cell| cell.pos() == pos)
    }

    fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }
}

/// Everything the simulation needs between two ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Cell,
    pub direction: Direction,
    pub score: u32,
    pub bounds: Bounds,
    pub game_over: bool,
}

impl GameState {
    pub fn new(snake: Snake, food: Cell, bounds: Bounds) -> Self {
        GameState { snake, food, direction: Right, score: 0, bounds, game_over: false }
    }

    /// Advance one tick using the direction latched since the previous one.
    ///
    /// The candidate head is tested against every current segment (the tail that
    /// would be vacated included) and against the board edges. Turning straight back
    /// into the neck therefore counts as a self-collision. Food that lands under the
    /// body is left there.
    pub fn step<R: Rng + ?Sized>(&self, latched: Direction, rng: &mut R) -> (GameState, MoveResult) {
        let mut next = self.clone();
        if next.game_over {
            return (next, Halted);
        }

        let head = match next.snake.head() {
            Some(head) => *head,
            None => return (next, Halted),
        };

        next.direction = latched;
        let (dx, dy) = latched.offset();
        let candidate = (head.x + dx, head.y + dy);

        if next.snake.occupies(candidate) {
            next.game_over = true;
            return (next, Crashed(CrashReason::HitSelf));
        }

        if !next.bounds.contains(candidate) {
            next.game_over = true;
            return (next, Crashed(CrashReason::HitWall));
        }

        let new_head = head.moved_to(candidate);

        if candidate == next.food.pos() {
            next.food = spawn_food(&next.bounds, next.food, rng);
            next.score += 1;
            next.snake.advance(new_head, true);
            (next, Ate)
        } else {
            next.snake.advance(new_head, false);
            (next, Moved)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const GREEN: Color = Color::Rgb { r: 0x39, g: 0xff, b: 0x14 };

    fn cell(x: GridInt, y: GridInt) -> Cell {
        Cell { x, y, width: 10, height: 10, color: GREEN }
    }

    fn bounds() -> Bounds {
        Bounds { width: 640, height: 480, cell_width: 10, cell_height: 10 }
    }

    fn positions(snake: &Snake) -> Vec<Coords> {
        snake.body().map(Cell::pos).collect()
    }

    #[test]
    fn initial_snake_is_laid_out_head_first() {
        let snake = Snake::new(3, cell(0, 0));
        assert_eq!(positions(&snake), vec![(2, 0), (1, 0), (0, 0)]);
    }

    #[test]
    fn bounds_follow_pixel_extent() {
        let b = bounds();
        assert_eq!((b.columns(), b.rows()), (64, 48));
        assert!(b.contains((0, 0)));
        assert!(b.contains((63, 47)));
        assert!(!b.contains((64, 0)));
        assert!(!b.contains((0, 48)));
        assert!(!b.contains((-1, 5)));
        assert!(!b.contains((5, -1)));
    }

    #[test]
    fn partial_cells_at_the_edge_are_inside() {
        let b = Bounds { width: 45, height: 45, cell_width: 10, cell_height: 10 };
        assert!(b.contains((4, 4)));
        assert!(!b.contains((5, 4)));
        assert_eq!(b.columns(), 4);
    }

    #[test]
    fn step_moves_head_and_drops_tail() {
        let mut rng = StdRng::seed_from_u64(7);
        let state = GameState::new(Snake::new(3, cell(0, 0)), cell(1, 1), bounds());

        let (state, res) = state.step(Down, &mut rng);
        assert_eq!(res, Moved);
        assert_eq!(positions(&state.snake), vec![(2, 1), (2, 0), (1, 0)]);
        assert_eq!(state.direction, Down);
    }

    #[test]
    fn moving_into_the_vacating_tail_is_a_crash() {
        let mut rng = StdRng::seed_from_u64(7);
        // head (1,1), tail (1,2): moving down targets the tail's current cell
        let snake = Snake::from_cells(vec![cell(1, 1), cell(2, 1), cell(2, 2), cell(1, 2)]);
        let state = GameState::new(snake, cell(10, 10), bounds());

        let (state, res) = state.step(Down, &mut rng);
        assert_eq!(res, Crashed(CrashReason::HitSelf));
        assert!(state.game_over);
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn halted_state_is_terminal() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = GameState::new(Snake::new(3, cell(0, 0)), cell(3, 0), bounds());
        state.game_over = true;

        let (next, res) = state.step(Right, &mut rng);
        assert_eq!(res, Halted);
        assert_eq!(next, state);
    }

    #[test]
    fn eating_keeps_segment_geometry() {
        let mut rng = StdRng::seed_from_u64(3);
        let state = GameState::new(Snake::new(3, cell(0, 0)), cell(3, 0), bounds());

        let (state, res) = state.step(Right, &mut rng);
        assert_eq!(res, Ate);
        let head = state.snake.head().unwrap();
        assert_eq!((head.width, head.height, head.color), (10, 10, GREEN));
    }
}
