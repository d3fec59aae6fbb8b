#![deny(clippy::all)]
#![forbid(unsafe_code)]

use rand::SeedableRng;
use rand::prelude::*;
use rand::rngs::SmallRng;

pub trait World {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn num_cells(&self) -> usize;
    fn cell_colors(&self) -> impl Iterator<Item = [u8; 4]>;
    fn update(&mut self);
    fn randomize(&mut self);
}

#[derive(Clone, Debug)]
pub struct CellGrid {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl CellGrid {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0);
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &bool> + Clone {
        self.cells.iter()
    }

    /// Reads any coordinate; cells beyond the grid edge are dead.
    pub fn cell(&self, x: i32, y: i32) -> bool {
        self.grid_index(x, y).is_some_and(|index| self.cells[index])
    }

    /// Writes to an out-of-bounds coordinate are ignored.
    pub fn set_cell(&mut self, x: i32, y: i32, alive: bool) {
        if let Some(index) = self.grid_index(x, y) {
            self.cells[index] = alive;
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn randomize(&mut self, rand: &mut Random) {
        for cell in self.cells.iter_mut() {
            *cell = rand.next_bool(0.5);
        }
    }

    pub fn live_neighbors(&self, x: i32, y: i32) -> u32 {
        let mut count = 0;

        if self.cell(x - 1, y - 1) {
            count += 1;
        }
        if self.cell(x, y - 1) {
            count += 1;
        }
        if self.cell(x + 1, y - 1) {
            count += 1;
        }
        if self.cell(x - 1, y) {
            count += 1;
        }
        if self.cell(x + 1, y) {
            count += 1;
        }
        if self.cell(x - 1, y + 1) {
            count += 1;
        }
        if self.cell(x, y + 1) {
            count += 1;
        }
        if self.cell(x + 1, y + 1) {
            count += 1;
        }

        count
    }

    fn grid_index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

/// Computes one generation of `current` into `next`. The borrow pair keeps the
/// buffers distinct; dimensions must match.
///
/// Only interior cells are evaluated. The outermost ring is never written and
/// stays dead from the baseline clear.
pub fn advance_generation(current: &CellGrid, next: &mut CellGrid) {
    assert!(
        current.width() == next.width() && current.height() == next.height(),
        "generation buffers must have matching dimensions"
    );

    next.clear();
    for y in 1..current.height() as i32 - 1 {
        for x in 1..current.width() as i32 - 1 {
            let neighbors = current.live_neighbors(x, y);
            let alive = if current.cell(x, y) {
                neighbors == 2 || neighbors == 3
            } else {
                neighbors == 3
            };
            next.set_cell(x, y, alive);
        }
    }
}

#[derive(Debug)]
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn next_bool(&mut self, p: f64) -> bool {
        self.rng.random_bool(p)
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}
