//! The indexed pixel grid every drawing pass paints into.

use serde::Serialize;

/// What a grid cell holds. Colors are resolved from the palette at raster time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum PaintCode {
    #[default]
    Empty,
    Body,
    Accent1,
    Accent2,
    Eye,
    Pupil,
    EyeHighlight,
    /// Mouth, mandibles and proboscis.
    Feature,
    /// Limbs, wings, fins and tentacles. Drawn in the body color.
    Limb,
    /// Horns, antennae and armor plates. Drawn in the first accent color.
    LimbAccent,
}

impl PaintCode {
    pub fn is_painted(self) -> bool {
        self != PaintCode::Empty
    }

    /// Eye, pupil, highlight and mouth pixels.
    pub fn is_facial(self) -> bool {
        matches!(
            self,
            PaintCode::Eye | PaintCode::Pupil | PaintCode::EyeHighlight | PaintCode::Feature
        )
    }

    pub fn is_accent(self) -> bool {
        matches!(self, PaintCode::Accent1 | PaintCode::Accent2)
    }

    /// Cells the accent painter may recolor.
    pub fn is_skin(self) -> bool {
        matches!(self, PaintCode::Body | PaintCode::Limb | PaintCode::LimbAccent)
    }

    /// Cells eyes and mouths may be carved into.
    pub fn is_carvable(self) -> bool {
        matches!(self, PaintCode::Body | PaintCode::LimbAccent)
    }

    /// Whether a stroke of `incoming` may replace this cell without overwrite permission.
    fn accepts_stroke(self, incoming: PaintCode) -> bool {
        matches!(self, PaintCode::Empty | PaintCode::Body) || self == incoming
    }
}

/// A fixed-size grid of paint codes addressed with signed coordinates.
/// Reads outside the grid return `None`; writes outside are dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelGrid {
    pub width: usize,
    pub height: usize,
    cells: Vec<PaintCode>,
}

impl PixelGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![PaintCode::Empty; width * height],
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<PaintCode> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Cell value, treating anything outside the grid as empty.
    pub fn code_at(&self, x: i32, y: i32) -> PaintCode {
        self.get(x, y).unwrap_or_default()
    }

    /// Returns true if the cell was inside the grid.
    pub fn set(&mut self, x: i32, y: i32, code: PaintCode) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = code;
                true
            }
            None => false,
        }
    }

    /// Set the cell only when its current value satisfies `allow`.
    pub fn set_if(&mut self, x: i32, y: i32, code: PaintCode, allow: impl Fn(PaintCode) -> bool) -> bool {
        match self.index(x, y) {
            Some(i) if allow(self.cells[i]) => {
                self.cells[i] = code;
                true
            }
            _ => false,
        }
    }

    /// The 8 neighbours of a cell, `None` for positions outside the grid.
    pub fn neighbors8(&self, x: i32, y: i32) -> impl Iterator<Item = Option<PaintCode>> + '_ {
        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(move |(dx, dy)| self.get(x + dx, y + dy))
    }

    /// Bresenham line with thickness spread perpendicular to the dominant axis.
    ///
    /// Without `allow_overwrite` a stroke only lands on empty or body cells,
    /// or cells already holding the same code.
    pub fn draw_line(
        &mut self,
        (x0, y0): (i32, i32),
        (x1, y1): (i32, i32),
        code: PaintCode,
        thickness: i32,
        allow_overwrite: bool,
    ) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;
        let (mut x, mut y) = (x0, y0);
        let half = thickness.max(1) / 2;

        loop {
            for t in -half..=half {
                let (px, py) = if dx > dy {
                    (x, y + t)
                } else if dy > dx {
                    (x + t, y)
                } else {
                    let diag = t as f64 * 0.707;
                    let (rounded, floored) = (diag.round() as i32, diag.floor() as i32);
                    if t % 2 == 0 {
                        (x + rounded, y + floored)
                    } else {
                        (x + floored, y + rounded)
                    }
                };
                self.set_if(px, py, code, |current| {
                    allow_overwrite || current.accepts_stroke(code)
                });
            }

            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn count(&self, code: PaintCode) -> usize {
        self.cells.iter().filter(|&&c| c == code).count()
    }

    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_painted()).count()
    }

    /// All cells with their coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, PaintCode)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &code)| ((i % width) as i32, (i / width) as i32, code))
    }
}
