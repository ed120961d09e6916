// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The knobs and dials of a render.  Once a render starts, its
//! configuration should not change.

use num::Complex;

use crate::errors::RenderError;
use crate::planes::Axes;
use crate::plot::Circle;

/// Dots per reference circle.
pub const CIRCLE_POINTS: usize = 2048;

/// Everything needed to produce one image.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Number of steps in the random walk.
    pub samples: u64,
    /// The middle of the region of the complex plane to render.
    pub center: Complex<f64>,
    /// Half the width of the region, before it is stretched to fit the
    /// image's aspect ratio.
    pub radius: f64,
    /// The three Julia parameters the walk moves between.
    pub julia: [Complex<f64>; 3],
    /// Seed for the walk's random source.
    pub seed: u64,
    /// Steps walked before anything is plotted.
    pub warmup: u64,
    /// Length of the forward orbit plotted at each step.
    pub suborbit_steps: usize,
    /// Circles drawn over the finished render.
    pub decorations: Vec<Circle>,
}

impl RenderConfig {
    /// The region of the complex plane the configuration asks for.
    pub fn axes(&self) -> Axes {
        Axes::from_point(self.center, self.radius)
    }

    /// The unit circle and the four radius-2 circles that touch it,
    /// for orientation.
    pub fn reference_circles() -> Vec<Circle> {
        vec![
            Circle::new(Complex::new(0.0, 0.0), 1.0, CIRCLE_POINTS),
            Circle::new(Complex::new(2.0, 0.0), 2.0, CIRCLE_POINTS),
            Circle::new(Complex::new(-2.0, 0.0), 2.0, CIRCLE_POINTS),
            Circle::new(Complex::new(0.0, 2.0), 2.0, CIRCLE_POINTS),
            Circle::new(Complex::new(0.0, -2.0), 2.0, CIRCLE_POINTS),
        ]
    }

    /// Checks that the configuration can produce an image without
    /// tripping over any of the plane's preconditions.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width < 2 || self.height < 2 {
            return Err(RenderError::InvalidConfig(format!(
                "image must be at least 2x2, got {}x{}",
                self.width, self.height
            )));
        }
        if self.samples == 0 {
            return Err(RenderError::InvalidConfig(
                "sample count must be positive".to_string(),
            ));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "radius must be positive and finite, got {}",
                self.radius
            )));
        }
        if !(self.center.re.is_finite() && self.center.im.is_finite()) {
            return Err(RenderError::InvalidConfig(format!(
                "center must be finite, got {}",
                self.center
            )));
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width: 1920,
            height: 1080,
            samples: 10_000_000,
            center: Complex::new(0.0, 0.0),
            radius: 2.0,
            julia: [
                Complex::new(1.0, 1.0),
                Complex::new(-1.0, -1.0),
                Complex::new(0.0, 2.0),
            ],
            seed: 1,
            warmup: 100,
            suborbit_steps: 3,
            decorations: RenderConfig::reference_circles(),
        }
    }
}
