use rand::Rng;

use crate::snake::{Bounds, Cell};

/// Pick a new food cell uniformly from `[1, columns - 1] x [1, rows - 1]`.
///
/// Row and column 0 are never chosen. The snake body is not excluded, so food
/// may appear underneath it.
pub fn spawn_food<R: Rng + ?Sized>(bounds: &Bounds, template: Cell, rng: &mut R) -> Cell {
    // Construction guarantees at least two columns and rows; max() keeps the range non-empty.
    let x = rng.gen_range(1..bounds.columns().max(2));
    let y = rng.gen_range(1..bounds.rows().max(2));
    template.moved_to((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::style::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn template() -> Cell {
        Cell { x: 1, y: 1, width: 10, height: 10, color: Color::Green }
    }

    #[test]
    fn spawns_inside_range() {
        let bounds = Bounds { width: 640, height: 480, cell_width: 10, cell_height: 10 };
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..2000 {
            let food = spawn_food(&bounds, template(), &mut rng);
            assert!((1..=63).contains(&food.x), "x out of range: {}", food.x);
            assert!((1..=47).contains(&food.y), "y out of range: {}", food.y);
        }
    }

    #[test]
    fn covers_both_range_ends() {
        let bounds = Bounds { width: 40, height: 30, cell_width: 10, cell_height: 10 };
        let mut rng = StdRng::seed_from_u64(1);

        let spawned: Vec<_> = (0..500).map(|_| spawn_food(&bounds, template(), &mut rng).pos()).collect();
        assert!(spawned.iter().any(|&(x, _)| x == 1));
        assert!(spawned.iter().any(|&(x, _)| x == 3));
        assert!(spawned.iter().all(|&(_, y)| y == 1 || y == 2));
    }

    #[test]
    fn smallest_board_has_a_single_spot() {
        let bounds = Bounds { width: 20, height: 20, cell_width: 10, cell_height: 10 };
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(spawn_food(&bounds, template(), &mut rng).pos(), (1, 1));
    }

    #[test]
    fn keeps_template_look() {
        let bounds = Bounds { width: 100, height: 100, cell_width: 10, cell_height: 10 };
        let mut rng = StdRng::seed_from_u64(5);
        let food = spawn_food(&bounds, template(), &mut rng);
        assert_eq!((food.width, food.height, food.color), (10, 10, Color::Green));
    }
}
