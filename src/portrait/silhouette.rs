//! Body and head outline.

use rand::Rng;
use serde::Serialize;

use super::archetype::{BodyArchetype, BodyRegion, ShapeParams};
use super::grid::{PaintCode, PixelGrid};
use super::PortraitError;
use crate::random::RandomSource;

/// Which edge of a silhouette row to query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    Left,
    Center,
    Right,
}

impl Side {
    pub const PAIR: [Side; 2] = [Side::Left, Side::Right];

    /// -1, 0 or +1.
    pub fn sign(self) -> i32 {
        match self {
            Side::Left => -1,
            Side::Center => 0,
            Side::Right => 1,
        }
    }

    pub fn signf(self) -> f64 {
        self.sign() as f64
    }
}

/// The body bounding box, in grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BodyBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub head_height: i32,
}

impl BodyBox {
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }
}

/// The body box plus the width of every body row.
#[derive(Clone, Debug, PartialEq)]
pub struct Silhouette {
    pub bounds: BodyBox,
    /// One entry per body row; always even and at least 4.
    pub widths: Vec<i32>,
}

impl Silhouette {
    /// Lay out the body box for a grid and pick the head height.
    pub fn layout<R: Rng + ?Sized>(
        grid_width: usize,
        grid_height: usize,
        archetype: BodyArchetype,
        headless: bool,
        rng: &mut R,
    ) -> BodyBox {
        let (gw, gh) = (grid_width as f64, grid_height as f64);
        let raw = (gw * rng.float(0.25, 0.52)).floor() as i32;
        let width = (raw - raw % 2).max(10);
        let height = ((gh * rng.float(0.40, 0.65)).floor() as i32).max(4);

        let (lo, hi) = archetype.head_ratio_range();
        let ratio = if headless {
            rng.float(0.05, 0.15)
        } else {
            rng.float(lo, hi)
        };
        let head_height = (height as f64 * ratio).floor() as i32;

        BodyBox {
            x: (grid_width as i32 - width) / 2,
            y: (grid_height as i32 - height) / 2,
            width,
            height,
            head_height,
        }
    }

    /// Compute every row width and paint the outline as `Body`.
    pub fn build<R: Rng + ?Sized>(
        grid: &mut PixelGrid,
        bounds: BodyBox,
        archetype: BodyArchetype,
        rng: &mut R,
    ) -> Self {
        let params = ShapeParams::roll(rng);
        let mut widths = Vec::with_capacity(bounds.height as usize);

        for row in 0..bounds.height {
            let (region, rel) = if row < bounds.head_height {
                (BodyRegion::Head, row as f64 / bounds.head_height as f64)
            } else {
                let torso = (bounds.height - bounds.head_height) as f64;
                (BodyRegion::Torso, (row - bounds.head_height) as f64 / torso)
            };
            let factor = archetype.row_width(region, rel, row, &params, rng);
            let width = even_width(bounds.width as f64 * factor);
            widths.push(width);

            let start = bounds.x + (bounds.width - width) / 2;
            for x in start..start + width {
                grid.set(x, bounds.y + row, PaintCode::Body);
            }
        }

        Self { bounds, widths }
    }

    /// Width of a grid row, clamped into the body.
    pub fn width_at(&self, grid_y: i32) -> i32 {
        let last = self.widths.len().saturating_sub(1) as i32;
        let i = (grid_y - self.bounds.y).clamp(0, last.max(0));
        self.widths.get(i as usize).copied().unwrap_or(self.bounds.width)
    }

    /// Grid X of the left edge, right edge or center of a row. Rows outside
    /// the body fall back to the center of the box.
    pub fn edge_x(&self, grid_y: i32, side: Side) -> i32 {
        let row = grid_y - self.bounds.y;
        let width = match usize::try_from(row).ok().and_then(|r| self.widths.get(r)) {
            Some(&w) if row < self.bounds.height => w,
            _ => return self.bounds.center_x(),
        };
        let start = self.bounds.x + (self.bounds.width - width) / 2;
        match side {
            Side::Left => start,
            Side::Right => start + width - 1,
            Side::Center => start + width / 2,
        }
    }

    /// Width of the head at half its height, used to size facial features.
    pub fn head_width(&self) -> i32 {
        self.widths
            .get((self.bounds.head_height / 2) as usize)
            .copied()
            .unwrap_or(self.bounds.width)
    }

    /// Sanity check the drawing passes rely on.
    pub fn validate(&self) -> Result<(), PortraitError> {
        let b = &self.bounds;
        if b.height <= 0 || b.width <= 0 {
            return Err(PortraitError::Geometry(format!(
                "empty body box {}x{}",
                b.width, b.height
            )));
        }
        if self.widths.len() != b.height as usize {
            return Err(PortraitError::Geometry(format!(
                "{} row widths for a body {} rows tall",
                self.widths.len(),
                b.height
            )));
        }
        if b.head_height < 0 || b.head_height >= b.height {
            return Err(PortraitError::Geometry(format!(
                "head height {} outside body height {}",
                b.head_height, b.height
            )));
        }
        Ok(())
    }
}

/// Floor to an even integer, at least 4.
fn even_width(width: f64) -> i32 {
    let w = width.floor() as i32;
    (w - w.rem_euclid(2)).max(4)
}
