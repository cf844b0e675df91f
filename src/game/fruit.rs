use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use super::config::{CELL_SIZE, GRID_CELLS};
use super::state::{Position, Snake};

/// Kind of fruit, which decides its score and color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FruitKind {
    Apple,
    Orange,
    Berry,
    Grape,
}

/// Catalog used by the classic variant
pub const CLASSIC_CATALOG: &[FruitKind] = &[FruitKind::Apple];

/// Catalog used by the orchard variant
pub const ORCHARD_CATALOG: &[FruitKind] = &[
    FruitKind::Apple,
    FruitKind::Orange,
    FruitKind::Berry,
    FruitKind::Grape,
];

impl FruitKind {
    /// Points awarded for eating this fruit
    pub fn score(&self) -> u32 {
        match self {
            FruitKind::Apple => 10,
            FruitKind::Orange => 15,
            FruitKind::Berry => 20,
            FruitKind::Grape => 25,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FruitKind::Apple => "apple",
            FruitKind::Orange => "orange",
            FruitKind::Berry => "berry",
            FruitKind::Grape => "grape",
        }
    }

    /// Display color name; renderers map it to their own palette
    pub fn color_name(&self) -> &'static str {
        match self {
            FruitKind::Apple => "red",
            FruitKind::Orange => "orange",
            FruitKind::Berry => "pink",
            FruitKind::Grape => "purple",
        }
    }
}

/// A fruit lying on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fruit {
    pub position: Position,
    pub kind: FruitKind,
}

impl Fruit {
    pub fn new(position: Position, kind: FruitKind) -> Self {
        Self { position, kind }
    }

    pub fn score(&self) -> u32 {
        self.kind.score()
    }
}

/// Place a fruit on a random grid-aligned cell not covered by the snake
///
/// Position and kind are drawn together on every attempt, rejected
/// attempts included. Returns `None` when the snake covers every cell
/// or the catalog is empty.
pub fn place_fruit<R: Rng + ?Sized>(
    rng: &mut R,
    snake: &Snake,
    catalog: &[FruitKind],
) -> Option<Fruit> {
    let occupied: HashSet<Position> = snake
        .body
        .iter()
        .copied()
        .filter(|pos| pos.is_in_arena())
        .collect();

    if occupied.len() >= (GRID_CELLS * GRID_CELLS) as usize {
        return None;
    }

    loop {
        let x = rng.gen_range(0..GRID_CELLS) * CELL_SIZE;
        let y = rng.gen_range(0..GRID_CELLS) * CELL_SIZE;
        let kind = *catalog.choose(rng)?;
        let position = Position::new(x, y);

        if !occupied.contains(&position) {
            return Some(Fruit::new(position, kind));
        }
    }
}
