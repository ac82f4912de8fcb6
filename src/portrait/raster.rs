//! Grid to pixels, PNG bytes and data URIs.

use std::io::Cursor;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::imageops::{self, FilterType};
use image::{ImageBuffer, ImageFormat, Rgb, RgbImage};
use serde::Serialize;

use super::grid::PixelGrid;
use super::palette::Palette;
use super::PortraitError;

const PLACEHOLDER_BACKGROUND: Rgb<u8> = Rgb([200, 0, 0]);
const PLACEHOLDER_INK: Rgb<u8> = Rgb([0, 0, 0]);
const GLYPH_ADVANCE: u32 = 4;
const LABEL_CHARS: usize = 10;
const SHEET_BACKGROUND: Rgb<u8> = Rgb([30, 30, 30]);
const SHEET_INK: Rgb<u8> = Rgb([220, 220, 220]);
const CAPTION_HEIGHT: u32 = 7;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ArtifactKind {
    Portrait,
    Placeholder { label: String },
    /// Nothing was painted; the canvas is filled with the debug color.
    DebugFill,
}

/// An encoded portrait. Always a valid PNG of the configured canvas size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortraitArtifact {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub kind: ArtifactKind,
}

impl PortraitArtifact {
    pub fn is_placeholder(&self) -> bool {
        matches!(self.kind, ArtifactKind::Placeholder { .. })
    }

    pub fn data_uri(&self) -> String {
        if self.png.is_empty() {
            return "data:,".to_string();
        }
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }

    pub fn decode(&self) -> Result<RgbImage, PortraitError> {
        let img = image::load_from_memory_with_format(&self.png, ImageFormat::Png)?;
        Ok(img.to_rgb8())
    }

    /// Write the PNG, upscaled by an integer factor with nearest-neighbour sampling.
    pub fn save(&self, path: impl AsRef<Path>, scale: u32) -> Result<(), PortraitError> {
        let img = self.decode()?;
        upscale(&img, scale).save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

/// Paint every cell over the background. Returns the image and the number of
/// painted pixels.
pub fn render(grid: &PixelGrid, palette: &Palette) -> (RgbImage, usize) {
    let mut img: RgbImage =
        ImageBuffer::from_pixel(grid.width as u32, grid.height as u32, palette.background);
    let mut painted = 0;
    for (x, y, code) in grid.iter() {
        if let Some(color) = palette.color(code) {
            img.put_pixel(x as u32, y as u32, color);
            painted += 1;
        }
    }
    (img, painted)
}

pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, PortraitError> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

pub fn upscale(img: &RgbImage, scale: u32) -> RgbImage {
    if scale <= 1 {
        return img.clone();
    }
    imageops::resize(img, img.width() * scale, img.height() * scale, FilterType::Nearest)
}

/// Red error card with a short label above the word "PORTRAIT".
pub fn placeholder_image(label: &str, width: u32, height: u32) -> RgbImage {
    let mut img: RgbImage = ImageBuffer::from_pixel(width, height, PLACEHOLDER_BACKGROUND);
    let label: String = label.to_uppercase().chars().take(LABEL_CHARS).collect();
    let mid = height / 2;
    draw_text(&mut img, &label, mid.saturating_sub(7));
    draw_text(&mut img, "PORTRAIT", mid + 1);
    img
}

/// Placeholder artifact. Encoding a flat card cannot realistically fail, but
/// if it does the artifact carries no bytes and its data URI is empty.
pub fn placeholder(label: &str, width: u32, height: u32) -> PortraitArtifact {
    let img = placeholder_image(label, width, height);
    let png = match encode_png(&img) {
        Ok(png) => png,
        Err(err) => {
            tracing::error!("placeholder encoding failed: {}", err);
            Vec::new()
        }
    };
    PortraitArtifact {
        png,
        width,
        height,
        kind: ArtifactKind::Placeholder {
            label: label.to_string(),
        },
    }
}

/// Tile portraits into one image, `columns` wide, each with a caption strip
/// above it. Tiles are placed at the size of the first one.
pub fn contact_sheet(tiles: &[(String, RgbImage)], columns: u32) -> RgbImage {
    let Some((_, first)) = tiles.first() else {
        return ImageBuffer::from_pixel(1, 1, SHEET_BACKGROUND);
    };
    let columns = columns.clamp(1, tiles.len() as u32);
    let rows = (tiles.len() as u32).div_ceil(columns);
    let (tile_w, tile_h) = first.dimensions();
    let cell_h = tile_h + CAPTION_HEIGHT;
    let mut sheet: RgbImage = ImageBuffer::from_pixel(tile_w * columns, cell_h * rows, SHEET_BACKGROUND);

    for (idx, (caption, tile)) in tiles.iter().enumerate() {
        let col = idx as u32 % columns;
        let row = idx as u32 / columns;
        let offset_x = col * tile_w;
        let offset_y = row * cell_h;
        imageops::replace(&mut sheet, tile, offset_x as i64, (offset_y + CAPTION_HEIGHT) as i64);
        let caption: String = caption.to_uppercase().chars().take((tile_w / GLYPH_ADVANCE) as usize).collect();
        draw_text_in(&mut sheet, &caption, offset_x, tile_w, offset_y + 1, SHEET_INK);
    }
    sheet
}

/// Centered line of glyphs at row `y`.
fn draw_text(img: &mut RgbImage, text: &str, y: u32) {
    let width = img.width();
    draw_text_in(img, text, 0, width, y, PLACEHOLDER_INK);
}

/// Line of glyphs centered within the column span `[x, x + width)`.
fn draw_text_in(img: &mut RgbImage, text: &str, x: u32, width: u32, y: u32, ink: Rgb<u8>) {
    let span = text.chars().count() as u32 * GLYPH_ADVANCE;
    let x0 = x + width.saturating_sub(span) / 2;
    for (i, c) in text.chars().enumerate() {
        draw_glyph(img, c, x0 + i as u32 * GLYPH_ADVANCE, y, ink);
    }
}

fn draw_glyph(img: &mut RgbImage, c: char, x: u32, y: u32, ink: Rgb<u8>) {
    for (row, bits) in glyph(c).iter().enumerate() {
        for col in 0..3 {
            if (bits >> (2 - col)) & 1 == 1 {
                let (px, py) = (x + col, y + row as u32);
                if px < img.width() && py < img.height() {
                    img.put_pixel(px, py, ink);
                }
            }
        }
    }
}

/// 3x5 bitmap, one 3-bit row pattern per line. Unknown characters render blank.
fn glyph(c: char) -> [u8; 5] {
    match c {
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b110, 0b001, 0b010, 0b100, 0b111],
        '3' => [0b110, 0b001, 0b010, 0b001, 0b110],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b110, 0b001, 0b110],
        '6' => [0b011, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b110],
        _ => [0; 5],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portrait::grid::PaintCode;

    #[test]
    fn test_render_maps_cells_one_to_one() {
        let mut grid = PixelGrid::new(16, 16);
        grid.set(3, 4, PaintCode::Eye);
        grid.set(5, 5, PaintCode::Limb);
        let palette = Palette::fallback();
        let (img, painted) = render(&grid, &palette);
        assert_eq!(painted, 2);
        assert_eq!(*img.get_pixel(3, 4), palette.eye);
        assert_eq!(*img.get_pixel(5, 5), palette.body);
        assert_eq!(*img.get_pixel(0, 0), palette.background);
    }

    #[test]
    fn test_png_survives_decode() {
        let img: RgbImage = ImageBuffer::from_pixel(20, 12, Rgb([10, 20, 30]));
        let artifact = PortraitArtifact {
            png: encode_png(&img).expect("encode"),
            width: 20,
            height: 12,
            kind: ArtifactKind::Portrait,
        };
        let back = artifact.decode().expect("decode");
        assert_eq!(back.dimensions(), (20, 12));
        assert_eq!(*back.get_pixel(7, 7), Rgb([10, 20, 30]));
        assert!(artifact.data_uri().starts_with("data:image/png;base64,iVBOR"));
    }

    #[test]
    fn test_placeholder_has_label_ink() {
        let artifact = placeholder("NO SPECIES", 64, 64);
        assert!(artifact.is_placeholder());
        let img = artifact.decode().expect("decode");
        assert_eq!(img.dimensions(), (64, 64));
        assert_eq!(*img.get_pixel(0, 0), PLACEHOLDER_BACKGROUND);
        let ink = img.pixels().filter(|p| **p == PLACEHOLDER_INK).count();
        assert!(ink > 40);
    }

    #[test]
    fn test_contact_sheet_layout() {
        let red: RgbImage = ImageBuffer::from_pixel(16, 16, Rgb([255, 0, 0]));
        let blue: RgbImage = ImageBuffer::from_pixel(16, 16, Rgb([0, 0, 255]));
        let tiles = vec![
            ("A".to_string(), red.clone()),
            ("B".to_string(), blue),
            ("C".to_string(), red),
        ];
        let sheet = contact_sheet(&tiles, 2);
        assert_eq!(sheet.dimensions(), (32, 2 * (16 + CAPTION_HEIGHT)));
        assert_eq!(*sheet.get_pixel(0, CAPTION_HEIGHT), Rgb([255, 0, 0]));
        assert_eq!(*sheet.get_pixel(16, CAPTION_HEIGHT), Rgb([0, 0, 255]));
        assert_eq!(*sheet.get_pixel(20, 16 + 2 * CAPTION_HEIGHT + 1), SHEET_BACKGROUND);
        assert!(sheet.pixels().any(|p| *p == SHEET_INK));
        assert_eq!(contact_sheet(&[], 4).dimensions(), (1, 1));
    }

    #[test]
    fn test_empty_artifact_uri() {
        let artifact = PortraitArtifact {
            png: Vec::new(),
            width: 0,
            height: 0,
            kind: ArtifactKind::DebugFill,
        };
        assert_eq!(artifact.data_uri(), "data:,");
    }

    #[test]
    fn test_upscale_and_save() {
        let mut img: RgbImage = ImageBuffer::from_pixel(8, 8, Rgb([0, 0, 0]));
        img.put_pixel(1, 1, Rgb([255, 0, 0]));
        let big = upscale(&img, 4);
        assert_eq!(big.dimensions(), (32, 32));
        assert_eq!(*big.get_pixel(5, 6), Rgb([255, 0, 0]));
        assert_eq!(*big.get_pixel(8, 8), Rgb([0, 0, 0]));

        let artifact = PortraitArtifact {
            png: encode_png(&img).expect("encode"),
            width: 8,
            height: 8,
            kind: ArtifactKind::Portrait,
        };
        let path = std::env::temp_dir().join("xeno_portrait_raster_test.png");
        artifact.save(&path, 3).expect("save");
        let loaded = image::open(&path).expect("open").to_rgb8();
        assert_eq!(loaded.dimensions(), (24, 24));
        let _ = std::fs::remove_file(&path);
    }
}
