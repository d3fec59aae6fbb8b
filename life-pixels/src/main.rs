#![deny(clippy::all)]
#![forbid(unsafe_code)]

use life_grid::{CellGrid, Random, World, advance_generation};
use pixels_shell::animate;
use std::mem;
use std::time::Duration;
use winit::dpi::LogicalSize;

const WINDOW_WIDTH: f64 = 800.0;
const WINDOW_HEIGHT: f64 = 800.0;
const CELL_PIXEL_WIDTH: u32 = 10;
const TIME_STEP_MILLIS: u64 = 16;

const ALIVE_COLOR: [u8; 4] = [0xff, 0xff, 0xff, 0xff];
const DEAD_COLOR: [u8; 4] = [0x00, 0x00, 0x00, 0xff];

fn main() {
    env_logger::init();
    animate(
        "Game of Life",
        LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT),
        Duration::from_millis(TIME_STEP_MILLIS),
        |window_size| {
            LifeWorld::new(
                window_size.width / CELL_PIXEL_WIDTH,
                window_size.height / CELL_PIXEL_WIDTH,
                Random::new(),
            )
        },
    );
}

#[derive(Debug)]
pub struct LifeWorld {
    cells: CellGrid,
    next_cells: CellGrid,
    rand: Random,
}

impl LifeWorld {
    pub fn new(width: u32, height: u32, rand: Random) -> Self {
        let mut result = Self::new_empty(width, height, rand);
        result.randomize();
        result
    }

    fn new_empty(width: u32, height: u32, rand: Random) -> Self {
        assert!(width > 0 && height > 0);
        Self {
            cells: CellGrid::new(width, height),
            next_cells: CellGrid::new(width, height),
            rand,
        }
    }
}

impl World for LifeWorld {
    fn width(&self) -> u32 {
        self.cells.width()
    }

    fn height(&self) -> u32 {
        self.cells.height()
    }

    fn num_cells(&self) -> usize {
        self.cells.num_cells()
    }

    fn cell_colors(&self) -> impl Iterator<Item = [u8; 4]> {
        self.cells
            .cells_iter()
            .map(|&alive| if alive { ALIVE_COLOR } else { DEAD_COLOR })
    }

    fn update(&mut self) {
        advance_generation(&self.cells, &mut self.next_cells);
        mem::swap(&mut self.next_cells, &mut self.cells);
    }

    fn randomize(&mut self) {
        self.cells.randomize(&mut self.rand);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_keeps_border_dead() {
        let mut world = LifeWorld::new(8, 8, Random::from_seed(7));
        world.update();

        let colors: Vec<[u8; 4]> = world.cell_colors().collect();
        assert_eq!(colors.len(), 64);
        for x in 0..8 {
            assert_eq!(colors[x], DEAD_COLOR, "top row, column {x}");
            assert_eq!(colors[56 + x], DEAD_COLOR, "bottom row, column {x}");
        }
        for y in 0..8 {
            assert_eq!(colors[y * 8], DEAD_COLOR, "left column, row {y}");
            assert_eq!(colors[y * 8 + 7], DEAD_COLOR, "right column, row {y}");
        }
    }

    #[test]
    fn randomize_repopulates_the_grid() {
        let mut world = LifeWorld::new(8, 8, Random::from_seed(7));
        let before: Vec<[u8; 4]> = world.cell_colors().collect();
        world.randomize();
        let after: Vec<[u8; 4]> = world.cell_colors().collect();
        assert_ne!(before, after);
        assert!(after.iter().any(|&color| color == ALIVE_COLOR));
    }
}
