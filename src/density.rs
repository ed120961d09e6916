// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns the canvas's tallies into display colors.  A pixel that was
//! hit `n` times has each of its color sums scaled by `log10(n) / n`,
//! which is the average weight damped by a logarithmic density term,
//! then clamped into a byte.  Pixels nobody hit are left as they were.
//!
//! A consequence worth knowing: a pixel hit exactly once comes out
//! black, since `log10(1)` is zero.

use num::clamp;

use crate::canvas::{Canvas, Rgb};

/// What the density pass saw.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DensityStats {
    /// The most hits any one pixel took.
    pub max_hits: f64,
    /// How many pixels were hit at all.
    pub lit: usize,
}

/// The most hits any one pixel took.
pub fn largest_hit_count(canvas: &Canvas) -> f64 {
    canvas
        .cells()
        .iter()
        .map(|cell| cell.accum.hits)
        .fold(0.0, f64::max)
}

fn to_byte(value: f64) -> u8 {
    (clamp(value, 0.0, 1.0) * 255.0) as u8
}

/// Runs the log-density curve over every pixel that was hit.  The
/// largest hit count is reported but does not enter into the curve.
pub fn log_density(canvas: &mut Canvas) -> DensityStats {
    let max_hits = largest_hit_count(canvas);
    info!("largest hit count = {}", max_hits);

    let mut lit = 0;
    for cell in canvas.cells_mut().iter_mut() {
        let accum = cell.accum;
        if accum.hits > 0.0 {
            let dense = accum.hits.log10() / accum.hits;
            cell.rgb = Rgb::new(
                to_byte(accum.red * dense),
                to_byte(accum.green * dense),
                to_byte(accum.blue * dense),
            );
            lit += 1;
        }
    }

    DensityStats { max_hits, lit }
}
