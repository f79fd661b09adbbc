//! Terrain codes and the collision mask
//!
//! The renderer owns the background image; the simulation only asks it one
//! question: what kind of terrain is under pixel (x, y)? Anything outside
//! the frame is `Open`.

use serde::{Deserialize, Serialize};

use crate::error::{PixelPuttError, Result};

/// Category of a single mask pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TerrainCode {
    #[default]
    Open,
    /// Solid; balls bounce off it
    Wall,
    /// Hole; sends the ball back to spawn and scores
    Goal,
    /// Rough; bleeds speed while the ball is over it
    Decelerant,
    /// Speeds the ball up while it is over it
    Booster,
    /// Dead stop; the ball halts where the step began
    Hazard,
}

impl TerrainCode {
    /// Glyph used in ASCII maps
    pub fn glyph(&self) -> char {
        match self {
            TerrainCode::Open => '.',
            TerrainCode::Wall => '#',
            TerrainCode::Goal => 'O',
            TerrainCode::Decelerant => '~',
            TerrainCode::Booster => '>',
            TerrainCode::Hazard => 'x',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(TerrainCode::Open),
            '#' => Some(TerrainCode::Wall),
            'O' | 'o' => Some(TerrainCode::Goal),
            '~' => Some(TerrainCode::Decelerant),
            '>' => Some(TerrainCode::Booster),
            'x' | 'X' => Some(TerrainCode::Hazard),
            _ => None,
        }
    }

    #[inline]
    pub fn is_solid(&self) -> bool {
        *self == TerrainCode::Wall
    }
}

/// Read-only view of the terrain under each pixel.
///
/// Must be side-effect free: a single step queries it hundreds of times.
pub trait TerrainMask {
    fn terrain_at(&self, x: i32, y: i32) -> TerrainCode;
}

/// Any `Fn(x, y) -> TerrainCode` works as a mask (handy for procedural fields)
impl<F> TerrainMask for F
where
    F: Fn(i32, i32) -> TerrainCode,
{
    #[inline]
    fn terrain_at(&self, x: i32, y: i32) -> TerrainCode {
        self(x, y)
    }
}

/// Colour-index to terrain agreement with the renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Palette {
    /// (colour index, code) pairs; unlisted colours are `Open`
    pub entries: Vec<(u8, TerrainCode)>,
}

impl Default for Palette {
    /// The golf course palette: 4 wall, 8 hole, 10 hazard, 15 rough
    fn default() -> Self {
        Self {
            entries: vec![
                (4, TerrainCode::Wall),
                (8, TerrainCode::Goal),
                (10, TerrainCode::Hazard),
                (15, TerrainCode::Decelerant),
            ],
        }
    }
}

impl Palette {
    /// Walls only (tag arena, bounce demo)
    pub fn walls_only(wall_color: u8) -> Self {
        Self {
            entries: vec![(wall_color, TerrainCode::Wall)],
        }
    }

    pub fn code_for(&self, color: u8) -> TerrainCode {
        self.entries
            .iter()
            .find(|(c, _)| *c == color)
            .map(|&(_, code)| code)
            .unwrap_or(TerrainCode::Open)
    }
}

/// A dense terrain grid, e.g. decoded from the rendered background
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMask {
    width: u32,
    height: u32,
    cells: Vec<TerrainCode>,
}

impl PixelMask {
    /// All-open mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![TerrainCode::Open; cell_count(width, height)],
        }
    }

    /// Open mask with a wall of the given thickness around the border
    pub fn walled(width: u32, height: u32, thickness: u32) -> Self {
        let mut mask = Self::new(width, height);
        let t = thickness as i32;
        let (w, h) = (width as i32, height as i32);
        mask.fill_rect(0, 0, w, t, TerrainCode::Wall);
        mask.fill_rect(0, h - t, w, t, TerrainCode::Wall);
        mask.fill_rect(0, 0, t, h, TerrainCode::Wall);
        mask.fill_rect(w - t, 0, t, h, TerrainCode::Wall);
        mask
    }

    /// Decode a row-major buffer of colour indices through a palette
    pub fn from_indices(width: u32, height: u32, pixels: &[u8], palette: &Palette) -> Result<Self> {
        if pixels.len() != cell_count(width, height) {
            return Err(PixelPuttError::MaskSize {
                width,
                height,
                found: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells: pixels.iter().map(|&c| palette.code_for(c)).collect(),
        })
    }

    /// Parse an ASCII map, one glyph per pixel (see [`TerrainCode::glyph`])
    ///
    /// Blank lines are skipped; every row must have the same width.
    pub fn from_ascii(text: &str) -> Result<Self> {
        let mut cells = Vec::new();
        let mut width: Option<usize> = None;
        let mut height = 0u32;

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let row_start = cells.len();
            for (column, glyph) in line.chars().enumerate() {
                let code = TerrainCode::from_glyph(glyph).ok_or(PixelPuttError::UnknownGlyph {
                    glyph,
                    line: line_no + 1,
                    column: column + 1,
                })?;
                cells.push(code);
            }
            let found = cells.len() - row_start;
            match width {
                None => width = Some(found),
                Some(expected) if expected != found => {
                    return Err(PixelPuttError::RaggedMap {
                        line: line_no + 1,
                        found,
                        expected,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }

        Ok(Self {
            width: width.unwrap_or(0) as u32,
            height,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn set(&mut self, x: i32, y: i32, code: TerrainCode) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = code;
        }
    }

    /// Paint a rectangle, clipped to the mask
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, code: TerrainCode) {
        for py in y..y + h {
            for px in x..x + w {
                self.set(px, py, code);
            }
        }
    }

    /// Paint a filled disc, clipped to the mask
    pub fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, code: TerrainCode) {
        for py in cy - r..=cy + r {
            for px in cx - r..=cx + r {
                let (dx, dy) = (px - cx, py - cy);
                if dx * dx + dy * dy <= r * r {
                    self.set(px, py, code);
                }
            }
        }
    }

    /// Render back to ASCII (debugging aid)
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for row in self.cells.chunks(self.width.max(1) as usize) {
            out.extend(row.iter().map(TerrainCode::glyph));
            out.push('\n');
        }
        out
    }
}

/// Cell total, widened before multiplying so large masks can't overflow
#[inline]
fn cell_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

impl TerrainMask for PixelMask {
    #[inline]
    fn terrain_at(&self, x: i32, y: i32) -> TerrainCode {
        self.index(x, y)
            .map(|i| self.cells[i])
            .unwrap_or(TerrainCode::Open)
    }
}
