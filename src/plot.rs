// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A Plot binds a Plane to a Canvas and lets callers put complex
//! numbers onto it.  There are three ways to put something there:
//! accumulate a weighted color into the pixel's tally (what the
//! orbits do), overwrite the pixel outright (what decorations do), or
//! bump the pixel's display color with a carry from red to green to
//! blue (a quick heat-map that skips the density pass entirely).
//!
//! Points that land off the canvas are dropped on the floor.  Orbits
//! wander off the canvas constantly, and that's fine.

use num::Complex;
use std::f64::consts::PI;

use crate::canvas::{Accum, Canvas, Cell, Rgb};
use crate::planes::{Axes, Pixel, Plane};

/// The weighted color an orbit point contributes to a pixel's tally.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Weights {
    /// Red weight.
    pub red: f64,
    /// Green weight.
    pub green: f64,
    /// Blue weight.
    pub blue: f64,
}

impl Weights {
    /// Constructor.
    pub fn new(red: f64, green: f64, blue: f64) -> Weights {
        Weights { red, green, blue }
    }
}

/// A circle to be drawn on top of the image, as `points` dots equally
/// spaced around its circumference.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Circle {
    /// Center on the complex plane.
    pub center: Complex<f64>,
    /// Radius on the complex plane.
    pub radius: f64,
    /// How many dots to draw.
    pub points: usize,
}

impl Circle {
    /// Constructor.
    pub fn new(center: Complex<f64>, radius: f64, points: usize) -> Circle {
        Circle {
            center,
            radius,
            points,
        }
    }
}

/// A Plane bound to the Canvas it draws on.
#[derive(Debug)]
pub struct Plot<'a> {
    plane: Plane,
    canvas: &'a mut Canvas,
}

impl<'a> Plot<'a> {
    /// Fits `axes` to the canvas.  The plane is built one pixel
    /// narrower and shorter than the canvas, so the last row and column
    /// are margin: a point sitting exactly on the right or bottom edge
    /// of the region still lands on the canvas.
    ///
    /// Panics if the canvas is smaller than 2x2.
    pub fn new(axes: &Axes, canvas: &'a mut Canvas) -> Plot<'a> {
        let plane = Plane::new(
            axes,
            canvas.width().saturating_sub(1),
            canvas.height().saturating_sub(1),
        );
        Plot { plane, canvas }
    }

    /// The aspect-corrected plane.
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// The canvas being drawn on.
    pub fn canvas(&self) -> &Canvas {
        &*self.canvas
    }

    /// The pixel a complex number lands in, if any.  Coordinates are
    /// truncated toward zero, so anything within a pixel's width of
    /// the left or top edge still lands in the first column or row.
    pub fn point_to_pixel(&self, point: &Complex<f64>) -> Option<Pixel> {
        let (x, y) = self.plane.point_to_coords(point);
        if x > -1.0
            && x < (self.canvas.width() as f64)
            && y > -1.0
            && y < (self.canvas.height() as f64)
        {
            Some(Pixel(x as usize, y as usize))
        } else {
            None
        }
    }

    fn cell_at(&mut self, point: &Complex<f64>) -> Option<&mut Cell> {
        match self.point_to_pixel(point) {
            Some(pixel) => self.canvas.cell_mut(&pixel),
            None => None,
        }
    }

    /// Adds `weights` to the tally of the pixel `point` lands in and
    /// counts one more hit there.  Off-canvas points are ignored.
    pub fn accumulate(&mut self, point: &Complex<f64>, weights: &Weights) {
        if let Some(cell) = self.cell_at(point) {
            cell.accum.merge(&Accum {
                red: weights.red,
                green: weights.green,
                blue: weights.blue,
                hits: 1.0,
            });
        }
    }

    /// Replaces the pixel `point` lands in with a solid color and an
    /// empty tally, so the density pass leaves it as drawn.  Returns
    /// whether anything was drawn.
    pub fn write_direct(&mut self, point: &Complex<f64>, rgb: Rgb) -> bool {
        match self.cell_at(point) {
            Some(cell) => {
                *cell = Cell {
                    rgb,
                    accum: Accum::default(),
                };
                true
            }
            None => false,
        }
    }

    /// Bumps the display color of the pixel `point` lands in by
    /// `amount`, carrying from red to green to blue.
    pub fn saturating_add(&mut self, point: &Complex<f64>, amount: u8) {
        if let Some(cell) = self.cell_at(point) {
            cell.rgb.add_with_carry(amount);
        }
    }

    /// Draws a circle in white.  Returns how many of its dots landed
    /// on the canvas.
    pub fn circle(&mut self, circle: &Circle) -> usize {
        let base = 2.0 * PI / (circle.points as f64);
        (0..circle.points)
            .filter(|&i| {
                let angle = base * (i as f64);
                let point = Complex::new(
                    circle.center.re + angle.cos() * circle.radius,
                    circle.center.im + angle.sin() * circle.radius,
                );
                self.write_direct(&point, Rgb::WHITE)
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::iproduct;

    fn unit_axes() -> Axes {
        Axes::from_point(Complex::new(0.0, 0.0), 1.0)
    }

    #[test]
    fn plane_leaves_a_one_pixel_margin() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        let plot = Plot::new(&unit_axes(), &mut canvas);
        assert!((plot.plane().xstep - 2.0 / 3.0).abs() < 1e-12);
        assert!((plot.plane().ystep - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn pixel_centers_map_back_to_their_pixels() {
        let sizes = [(2, 2), (4, 4), (7, 3), (3, 11), (64, 48)];
        let regions = [
            unit_axes(),
            Axes::from_point(Complex::new(-0.5, 0.25), 2.0),
            Axes {
                xmin: -2.5,
                xmax: 1.0,
                ymin: -1.0,
                ymax: 1.0,
            },
        ];
        for &(w, h) in sizes.iter() {
            for axes in regions.iter() {
                let mut canvas = Canvas::new(w, h).unwrap();
                let plot = Plot::new(axes, &mut canvas);
                for (x, y) in iproduct!(0..w, 0..h) {
                    let point = plot.plane().pixel_to_point(&Pixel(x, y));
                    assert_eq!(plot.point_to_pixel(&point), Some(Pixel(x, y)));
                }
            }
        }
    }

    #[test]
    fn edges_and_margins() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        let plot = Plot::new(&unit_axes(), &mut canvas);
        // Within a pixel of the left and top edges still counts.
        assert_eq!(
            plot.point_to_pixel(&Complex::new(-1.5, 0.0)),
            Some(Pixel(0, 1))
        );
        assert_eq!(
            plot.point_to_pixel(&Complex::new(0.0, 1.5)),
            Some(Pixel(1, 0))
        );
        // The margin column and row.
        assert_eq!(
            plot.point_to_pixel(&Complex::new(1.5, -1.5)),
            Some(Pixel(3, 3))
        );
        assert_eq!(plot.point_to_pixel(&Complex::new(-2.0, 0.0)), None);
        assert_eq!(plot.point_to_pixel(&Complex::new(2.0, 0.0)), None);
        assert_eq!(plot.point_to_pixel(&Complex::new(0.0, 2.0)), None);
        assert_eq!(plot.point_to_pixel(&Complex::new(0.0, -2.0)), None);
        assert_eq!(
            plot.point_to_pixel(&Complex::new(std::f64::NAN, 0.0)),
            None
        );
        assert_eq!(
            plot.point_to_pixel(&Complex::new(std::f64::INFINITY, 0.0)),
            None
        );
    }

    #[test]
    fn single_accumulate_hits_one_central_cell() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        {
            let mut plot = Plot::new(&unit_axes(), &mut canvas);
            plot.accumulate(&Complex::new(0.0, 0.0), &Weights::new(1.0, 0.0, 0.0));
        }
        for (x, y) in iproduct!(0..4, 0..4) {
            let accum = canvas.cell(&Pixel(x, y)).unwrap().accum;
            if (x, y) == (1, 1) {
                assert_eq!(
                    accum,
                    Accum {
                        red: 1.0,
                        green: 0.0,
                        blue: 0.0,
                        hits: 1.0
                    }
                );
            } else {
                assert_eq!(accum, Accum::default());
            }
        }
    }

    #[test]
    fn accumulate_counts_exactly() {
        let mut canvas = Canvas::new(8, 8).unwrap();
        let points = [
            (Complex::new(0.1, 0.1), Weights::new(0.5, 0.25, 0.0)),
            (Complex::new(0.1, 0.1), Weights::new(0.5, 0.0, 1.0)),
            (Complex::new(-0.9, 0.9), Weights::new(0.125, 0.0, 0.0)),
            (Complex::new(5.0, 0.0), Weights::new(1.0, 1.0, 1.0)),
            (Complex::new(0.1, 0.1), Weights::new(0.0, 0.25, 0.0)),
        ];
        let (center, corner) = {
            let mut plot = Plot::new(&unit_axes(), &mut canvas);
            for (z, w) in points.iter() {
                plot.accumulate(z, w);
            }
            (
                plot.point_to_pixel(&Complex::new(0.1, 0.1)).unwrap(),
                plot.point_to_pixel(&Complex::new(-0.9, 0.9)).unwrap(),
            )
        };
        assert_eq!(
            canvas.cell(&center).unwrap().accum,
            Accum {
                red: 1.0,
                green: 0.5,
                blue: 1.0,
                hits: 3.0
            }
        );
        assert_eq!(canvas.cell(&corner).unwrap().accum.hits, 1.0);
        let total: f64 = canvas.cells().iter().map(|c| c.accum.hits).sum();
        assert_eq!(total, 4.0);
        assert!(canvas.cells().iter().all(|c| c.rgb == Rgb::BLACK));
    }

    #[test]
    fn write_direct_reports_whether_it_drew() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        let mut plot = Plot::new(&unit_axes(), &mut canvas);
        plot.accumulate(&Complex::new(0.0, 0.0), &Weights::new(1.0, 1.0, 1.0));
        assert!(plot.write_direct(&Complex::new(0.0, 0.0), Rgb::new(9, 8, 7)));
        assert!(!plot.write_direct(&Complex::new(3.0, 3.0), Rgb::WHITE));
        let cell = plot.canvas().cell(&Pixel(1, 1)).unwrap();
        assert_eq!(cell.rgb, Rgb::new(9, 8, 7));
        assert_eq!(cell.accum, Accum::default());
    }

    #[test]
    fn saturating_add_cascades_and_caps() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        let mut plot = Plot::new(&unit_axes(), &mut canvas);
        let z = Complex::new(0.0, 0.0);
        fn cell(plot: &Plot) -> Rgb {
            plot.canvas().cell(&Pixel(1, 1)).unwrap().rgb
        }
        for _ in 0..84 {
            plot.saturating_add(&z, 3);
        }
        assert_eq!(cell(&plot), Rgb::new(252, 0, 0));
        plot.saturating_add(&z, 3);
        assert_eq!(cell(&plot), Rgb::new(255, 3, 0));
        for _ in 0..84 {
            plot.saturating_add(&z, 3);
        }
        assert_eq!(cell(&plot), Rgb::new(255, 255, 3));
        for _ in 0..500 {
            plot.saturating_add(&z, 3);
        }
        assert_eq!(cell(&plot), Rgb::WHITE);
        plot.saturating_add(&Complex::new(9.0, 9.0), 3);
        let lit = plot
            .canvas()
            .cells()
            .iter()
            .filter(|c| c.rgb != Rgb::BLACK)
            .count();
        assert_eq!(lit, 1);
    }

    #[test]
    fn circles_are_drawn_in_white() {
        let mut canvas = Canvas::new(65, 65).unwrap();
        let mut plot = Plot::new(&Axes::from_point(Complex::new(0.0, 0.0), 2.0), &mut canvas);
        let drawn = plot.circle(&Circle::new(Complex::new(0.0, 0.0), 1.0, 256));
        assert_eq!(drawn, 256);
        let top = plot.point_to_pixel(&Complex::new(0.0, 1.0)).unwrap();
        assert_eq!(plot.canvas().cell(&top).unwrap().rgb, Rgb::WHITE);
        let middle = plot.point_to_pixel(&Complex::new(0.0, 0.0)).unwrap();
        assert_eq!(plot.canvas().cell(&middle).unwrap().rgb, Rgb::BLACK);

        // Half of this one hangs off the right edge.
        let drawn = plot.circle(&Circle::new(Complex::new(2.5, 0.0), 1.0, 360));
        assert!(drawn > 0 && drawn < 360);
    }
}
