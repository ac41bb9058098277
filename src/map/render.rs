//! Raster rendering of room layouts.
//!
//! Layouts are drawn on a white ground at ten pixels per grid cell, with a
//! one-pixel black border around every cell. The entry room is filled red,
//! corridors green, and all other rooms blue; room fills leave the outermost
//! pixel ring of their footprint to the grid.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::map::{Room, envelope};

/// Pixels per grid cell.
const CELL: usize = 10;
/// Refuse to draw envelopes wider or taller than this many cells.
const MAX_CELLS: i32 = 100;

const BLACK: [u8; 3] = [0, 0, 0];
const RED: [u8; 3] = [255, 0, 0];
const GREEN: [u8; 3] = [0, 255, 0];
const BLUE: [u8; 3] = [0, 0, 255];

/// Rendering errors.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no rooms to draw")]
    NoRooms,
    #[error("map of {width}x{height} cells is too big to draw")]
    TooLarge { width: i32, height: i32 },
    #[error("failed to write image")]
    Io(#[from] std::io::Error),
    #[error("failed to encode image")]
    Encode(#[from] png::EncodingError),
}

/// An RGB8 raster of a room layout, row-major.
#[derive(Debug, Clone)]
pub struct MapImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl MapImage {
    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGB8 pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The RGB value at pixel `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let at = (y * self.width + x) * 3;
        [self.pixels[at], self.pixels[at + 1], self.pixels[at + 2]]
    }

    /// Encode as PNG.
    pub fn write_png(&self, path: &Path) -> Result<(), RenderError> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        let mut encoder = png::Encoder::new(writer, self.width as u32, self.height as u32);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut png_writer = encoder.write_header()?;
        png_writer.write_image_data(&self.pixels)?;
        Ok(())
    }
}

fn put(pixels: &mut [u8], width: usize, x: usize, y: usize, rgb: [u8; 3]) {
    let at = (y * width + x) * 3;
    pixels[at..at + 3].copy_from_slice(&rgb);
}

/// Rasterize a room layout.
///
/// Fails on an empty layout or when the layout's envelope exceeds the size
/// limit on either axis.
pub fn rasterize(rooms: &[Room]) -> Result<MapImage, RenderError> {
    let env = envelope(rooms).ok_or(RenderError::NoRooms)?;
    if env.width() > MAX_CELLS || env.height() > MAX_CELLS {
        return Err(RenderError::TooLarge {
            width: env.width(),
            height: env.height(),
        });
    }

    let width_cells = env.width() as usize;
    let height_cells = env.height() as usize;
    let width = CELL * width_cells;
    let height = CELL * height_cells;
    let mut pixels = vec![255u8; width * height * 3];

    // Grid: a one-pixel border around every cell.
    for cy in 0..height_cells {
        for cx in 0..width_cells {
            for k in 0..CELL {
                put(&mut pixels, width, cx * CELL + k, cy * CELL, BLACK);
                put(&mut pixels, width, cx * CELL + k, cy * CELL + CELL - 1, BLACK);
                put(&mut pixels, width, cx * CELL, cy * CELL + k, BLACK);
                put(&mut pixels, width, cx * CELL + CELL - 1, cy * CELL + k, BLACK);
            }
        }
    }

    // Room fills, inset one pixel from the footprint on every side. Interior
    // grid lines inside a multi-cell room are painted over.
    for (index, room) in rooms.iter().enumerate() {
        let color = if index == 0 {
            RED
        } else if room.is_corridor() {
            GREEN
        } else {
            BLUE
        };
        let x0 = CELL as i32 * (room.min_x - env.min_x) + 1;
        let x1 = CELL as i32 * (room.max_x - env.min_x) - 1;
        let y0 = CELL as i32 * (room.min_y - env.min_y) + 1;
        let y1 = CELL as i32 * (room.max_y - env.min_y) - 1;
        for y in y0..y1 {
            for x in x0..x1 {
                put(&mut pixels, width, x as usize, y as usize, color);
            }
        }
    }

    Ok(MapImage {
        width,
        height,
        pixels,
    })
}

/// Rasterize a layout and write it as a PNG file.
pub fn render_png<P: AsRef<Path>>(rooms: &[Room], path: P) -> Result<(), RenderError> {
    rasterize(rooms)?.write_png(path.as_ref())
}
