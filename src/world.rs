use serde::Serialize;

use crate::rng::RandomSource;

pub const WATER_COLOR: &str = "#4a90e2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    Plains,
    Forest,
    Desert,
    Mountains,
    Swamp,
    Jungle,
}

impl Biome {
    pub const ALL: [Biome; 6] = [
        Biome::Plains,
        Biome::Forest,
        Biome::Desert,
        Biome::Mountains,
        Biome::Swamp,
        Biome::Jungle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Biome::Plains => "plains",
            Biome::Forest => "forest",
            Biome::Desert => "desert",
            Biome::Mountains => "mountains",
            Biome::Swamp => "swamp",
            Biome::Jungle => "jungle",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Biome::Plains => "#a3d977",
            Biome::Forest => "#228B22",
            Biome::Desert => "#edc9af",
            Biome::Mountains => "#888888",
            Biome::Swamp => "#556b2f",
            Biome::Jungle => "#2e8b57",
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Biome::Plains => '.',
            Biome::Forest => 'f',
            Biome::Desert => 'd',
            Biome::Mountains => '^',
            Biome::Swamp => 's',
            Biome::Jungle => 'j',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldCell {
    pub x: usize,
    pub y: usize,
    pub is_land: bool,
    pub food_availability: f64,
    pub predators: u8,
    pub biome: Biome,
}

impl WorldCell {
    /// Fill colour for graphical front ends.
    pub fn color(&self) -> &'static str {
        if self.is_land {
            self.biome.color()
        } else {
            WATER_COLOR
        }
    }
}

/// Fixed grid of independently sampled cells, stored row-major.
#[derive(Debug, Clone, Serialize)]
pub struct World {
    width: usize,
    height: usize,
    cells: Vec<WorldCell>,
}

impl World {
    pub fn generate(
        width: usize,
        height: usize,
        land_probability: f64,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let is_land = rng.chance(land_probability);
                let food_availability = rng.next_f64();
                let predators = rng.pick_index(3) as u8;
                let biome = Biome::ALL[rng.pick_index(Biome::ALL.len())];
                cells.push(WorldCell {
                    x,
                    y,
                    is_land,
                    food_availability,
                    predators,
                    biome,
                });
            }
        }
        tracing::debug!(width, height, "generated world");
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&WorldCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x)
    }

    pub fn cell_at(&self, position: Position) -> Option<&WorldCell> {
        self.cell(position.x, position.y)
    }

    pub fn cells(&self) -> &[WorldCell] {
        &self.cells
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x < self.width && position.y < self.height
    }

    /// Clamps signed coordinates onto the grid. An empty grid clamps to the origin.
    pub fn clamp(&self, x: i64, y: i64) -> Position {
        let max_x = self.width.saturating_sub(1) as i64;
        let max_y = self.height.saturating_sub(1) as i64;
        Position::new(x.clamp(0, max_x) as usize, y.clamp(0, max_y) as usize)
    }
}
