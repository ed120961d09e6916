// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The accumulation canvas.  Every pixel carries two things: the
//! display color that eventually gets written out, and a running
//! tally of the weighted colors of every orbit point that landed in
//! it.  The tally is only ever added to while the orbits are being
//! plotted; the display color is only written by decorations and by
//! the density pass.

use crate::errors::RenderError;
use crate::planes::Pixel;

/// An 8-bit-per-channel display color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Nothing at all.
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    /// Everything at once.
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Constructor.
    pub fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    fn channel_mut(&mut self, channel: usize) -> &mut u8 {
        match channel {
            0 => &mut self.r,
            1 => &mut self.g,
            _ => &mut self.b,
        }
    }

    /// Adds `amount` to red.  Once red can't take the whole amount it
    /// is pinned at 255 and the amount carries over to green, and from
    /// green to blue.  Nothing ever goes past 255.
    pub fn add_with_carry(&mut self, amount: u8) {
        let ceiling = 255u8.saturating_sub(amount);
        for channel in 0..3 {
            let value = self.channel_mut(channel);
            if *value < ceiling {
                *value += amount;
                return;
            }
            *value = 255;
        }
    }
}

/// The running tally for one pixel: the sums of the color weights of
/// every point plotted into it, and how many points that was.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Accum {
    /// Sum of red weights.
    pub red: f64,
    /// Sum of green weights.
    pub green: f64,
    /// Sum of blue weights.
    pub blue: f64,
    /// Number of points plotted here.
    pub hits: f64,
}

impl Accum {
    /// Folds another tally into this one.
    pub fn merge(&mut self, other: &Accum) {
        self.red += other.red;
        self.green += other.green;
        self.blue += other.blue;
        self.hits += other.hits;
    }
}

/// One pixel of the canvas.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Cell {
    /// What gets written to the image.
    pub rgb: Rgb,
    /// What the orbits left behind.
    pub accum: Accum,
}

/// A row-major grid of cells, fixed in size for its whole life.
#[derive(Clone, Debug)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    /// Allocates a zeroed canvas.  Running out of memory here is
    /// reported, not aborted on, since there is no render without it.
    pub fn new(width: usize, height: usize) -> Result<Canvas, RenderError> {
        let failed = || RenderError::Allocation { width, height };
        let len = width.checked_mul(height).ok_or_else(failed)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| failed())?;
        cells.resize(len, Cell::default());
        Ok(Canvas {
            width,
            height,
            cells,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the canvas has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Linear offset of a pixel, if it's on the canvas.
    pub fn offset(&self, pixel: &Pixel) -> Option<usize> {
        if pixel.0 < self.width && pixel.1 < self.height {
            Some(pixel.1 * self.width + pixel.0)
        } else {
            None
        }
    }

    /// The cell at a pixel, if it's on the canvas.
    pub fn cell(&self, pixel: &Pixel) -> Option<&Cell> {
        self.offset(pixel).map(|i| &self.cells[i])
    }

    /// The cell at a pixel, mutably, if it's on the canvas.
    pub fn cell_mut(&mut self, pixel: &Pixel) -> Option<&mut Cell> {
        match self.offset(pixel) {
            Some(i) => Some(&mut self.cells[i]),
            None => None,
        }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// All cells in row-major order, mutably.
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Sums another canvas's tallies into this one.  Tallies are plain
    /// sums, so canvases rendered separately over the same plane can be
    /// combined in any grouping.  Display colors are left alone.
    ///
    /// Panics if the two canvases differ in size.
    pub fn merge(&mut self, other: &Canvas) {
        assert!(
            self.width == other.width && self.height == other.height,
            "cannot merge a {}x{} canvas into a {}x{} canvas",
            other.width,
            other.height,
            self.width,
            self.height
        );
        for (mine, theirs) in self.cells.iter_mut().zip(other.cells.iter()) {
            mine.accum.merge(&theirs.accum);
        }
    }

    /// The display colors as a row-major run of r, g, b bytes, the
    /// shape every 24-bit image writer wants.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.cells.len() * 3);
        for cell in &self.cells {
            bytes.extend_from_slice(&[cell.rgb.r, cell.rgb.g, cell.rgb.b]);
        }
        bytes
    }
}
