use crate::population::PopulationUnit;
use crate::world::{Biome, World};

/// Consumes the grid and population positions to produce a frame.
pub trait Renderer {
    fn draw(&mut self, world: &World, populations: &[PopulationUnit]);
}

pub const WATER_GLYPH: char = '~';
pub const POPULATION_GLYPH: char = '@';

/// One line per glyph, e.g. `f forest`.
pub fn legend() -> String {
    let mut lines = vec![
        format!("{WATER_GLYPH} water"),
        format!("{POPULATION_GLYPH} population"),
    ];
    lines.extend(
        Biome::ALL
            .iter()
            .map(|biome| format!("{} {}", biome.glyph(), biome.name())),
    );
    lines.join("\n") + "\n"
}

/// Text frame, one character per cell.
#[derive(Debug, Default)]
pub struct AsciiRenderer {
    frame: String,
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> &str {
        &self.frame
    }
}

impl Renderer for AsciiRenderer {
    fn draw(&mut self, world: &World, populations: &[PopulationUnit]) {
        let mut rows: Vec<Vec<char>> = (0..world.height())
            .map(|y| {
                (0..world.width())
                    .map(|x| match world.cell(x, y) {
                        Some(cell) if cell.is_land => cell.biome.glyph(),
                        _ => WATER_GLYPH,
                    })
                    .collect()
            })
            .collect();
        for population in populations {
            let position = population.position();
            if let Some(glyph) = rows
                .get_mut(position.y)
                .and_then(|row| row.get_mut(position.x))
            {
                *glyph = POPULATION_GLYPH;
            }
        }

        self.frame.clear();
        for row in rows {
            self.frame.extend(row);
            self.frame.push('\n');
        }
    }
}
