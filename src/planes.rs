// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Plane struct, which describes a relationship between
//! a rectangle on the integral plane with an origin at 0,0 in the
//! upper-left corner, and a rectangle on the complex plane described
//! by its real and imaginary extents.  Unlike the integral plane, the
//! complex plane grows "up," so the vertical axis is flipped when
//! mapping from one to the other.

use num::Complex;

/// Describes the x, y of a pixel on the integral plane.  Pixels are
/// counted from the upper-left corner of the image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// The extents of a rectangle on the complex plane, treating the real
/// part as the x-component and the imaginary part as the y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Axes {
    /// Leftmost real value.
    pub xmin: f64,
    /// Rightmost real value.
    pub xmax: f64,
    /// Lowest imaginary value.
    pub ymin: f64,
    /// Highest imaginary value.
    pub ymax: f64,
}

impl Axes {
    /// A square region of the complex plane, `radius` away from
    /// `center` in each of the four directions.
    pub fn from_point(center: Complex<f64>, radius: f64) -> Axes {
        Axes {
            xmin: center.re - radius,
            xmax: center.re + radius,
            ymin: center.im - radius,
            ymax: center.im + radius,
        }
    }

    /// Extent along the real axis.
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Extent along the imaginary axis.
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// The point in the middle of the region.
    pub fn center(&self) -> Complex<f64> {
        Complex::new(
            (self.xmin + self.xmax) / 2.0,
            (self.ymin + self.ymax) / 2.0,
        )
    }
}

/// A region of the complex plane fitted to a raster of a given size.
/// Once built, a Plane is never modified.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    /// The aspect-corrected region.
    pub axes: Axes,
    /// Real distance covered by one pixel.
    pub xstep: f64,
    /// Imaginary distance covered by one pixel.
    pub ystep: f64,
}

impl Plane {
    /// Fits `axes` to a raster of `width` by `height` pixels.  If the
    /// two don't share an aspect ratio, the narrower axis of the
    /// complex region is grown, half on each side, until they do.
    /// The region is never cropped, and its center never moves.
    ///
    /// Panics if either raster dimension is zero or if the region has
    /// no area; those are programming errors, not bad input.
    pub fn new(axes: &Axes, width: usize, height: usize) -> Plane {
        let requested = *axes;
        let mut axes = *axes;
        let awidth = axes.width();
        let aheight = axes.height();

        assert!(
            width > 0 && height > 0,
            "raster must have a positive size, got {}x{}",
            width,
            height
        );
        assert!(
            awidth > 0.0 && aheight > 0.0,
            "complex region must have a positive span, got {}x{}",
            awidth,
            aheight
        );

        let daspect = (height as f64 / width as f64).abs();
        let waspect = (aheight / awidth).abs();

        if daspect > waspect {
            let excess = aheight * (daspect / waspect - 1.0);
            axes.ymax += excess / 2.0;
            axes.ymin -= excess / 2.0;
        } else if daspect < waspect {
            let excess = awidth * (waspect / daspect - 1.0);
            axes.xmax += excess / 2.0;
            axes.xmin -= excess / 2.0;
        }

        if axes != requested {
            debug!(
                "viewport corrected to [{}, {}] x [{}, {}]",
                axes.xmin, axes.xmax, axes.ymin, axes.ymax
            );
        }

        Plane {
            axes,
            xstep: axes.width() / (width as f64),
            ystep: axes.height() / (height as f64),
        }
    }

    /// Given a complex number, return its (unbounded, fractional)
    /// position on the integral plane.  Truncating toward zero gives
    /// the pixel it lands in.
    pub fn point_to_coords(&self, point: &Complex<f64>) -> (f64, f64) {
        (
            (point.re - self.axes.xmin) / self.xstep,
            (self.axes.ymax - point.im) / self.ystep,
        )
    }

    /// Given a pixel, return the complex number at its center.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.axes.xmin + (pixel.0 as f64 + 0.5) * self.xstep,
            self.axes.ymax - (pixel.1 as f64 + 0.5) * self.ystep,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn axes_from_point_is_square() {
        let axes = Axes::from_point(Complex::new(0.5, -1.0), 2.0);
        assert_eq!(
            axes,
            Axes {
                xmin: -1.5,
                xmax: 2.5,
                ymin: -3.0,
                ymax: 1.0
            }
        );
        assert_eq!(axes.center(), Complex::new(0.5, -1.0));
    }

    #[test]
    fn matching_aspect_is_untouched() {
        let axes = Axes::from_point(Complex::new(0.0, 0.0), 1.0);
        let plane = Plane::new(&axes, 4, 4);
        assert_eq!(plane.axes, axes);
        assert!(close(plane.xstep, 0.5));
        assert!(close(plane.ystep, 0.5));
    }

    #[test]
    fn wide_raster_grows_real_axis() {
        let axes = Axes::from_point(Complex::new(0.0, 0.0), 1.0);
        let plane = Plane::new(&axes, 4, 2);
        assert!(close(plane.axes.xmin, -2.0));
        assert!(close(plane.axes.xmax, 2.0));
        assert!(close(plane.axes.ymin, -1.0));
        assert!(close(plane.axes.ymax, 1.0));
        assert!(close(plane.xstep, plane.ystep));
    }

    #[test]
    fn tall_raster_grows_imaginary_axis() {
        let axes = Axes::from_point(Complex::new(1.0, 1.0), 1.0);
        let plane = Plane::new(&axes, 2, 6);
        assert!(close(plane.axes.xmin, 0.0));
        assert!(close(plane.axes.xmax, 2.0));
        assert!(close(plane.axes.ymin, -2.0));
        assert!(close(plane.axes.ymax, 4.0));
    }

    #[test]
    fn corrected_aspect_matches_raster_and_keeps_center() {
        let rasters = [(1919, 1079), (1080, 1920), (3, 7), (640, 480), (1, 1000)];
        let regions = [
            Axes::from_point(Complex::new(0.0, 0.0), 2.0),
            Axes {
                xmin: -2.5,
                xmax: 1.0,
                ymin: -0.25,
                ymax: 0.5,
            },
            Axes {
                xmin: 10.0,
                xmax: 10.5,
                ymin: -7.0,
                ymax: 3.0,
            },
        ];
        for &(w, h) in rasters.iter() {
            for axes in regions.iter() {
                let plane = Plane::new(axes, w, h);
                let ratio = plane.axes.height() / plane.axes.width();
                let expected = h as f64 / w as f64;
                assert!((ratio - expected).abs() < 1e-9 * expected.max(1.0));
                let (before, after) = (axes.center(), plane.axes.center());
                assert!(close(before.re, after.re));
                assert!(close(before.im, after.im));
                assert!(plane.axes.width() >= axes.width() - 1e-12);
                assert!(plane.axes.height() >= axes.height() - 1e-12);
            }
        }
    }

    #[test]
    fn y_axis_is_flipped() {
        let plane = Plane::new(&Axes::from_point(Complex::new(0.0, 0.0), 2.0), 4, 4);
        assert_eq!(plane.point_to_coords(&Complex::new(-2.0, 2.0)), (0.0, 0.0));
        assert_eq!(plane.point_to_coords(&Complex::new(0.0, 0.0)), (2.0, 2.0));
        assert_eq!(plane.point_to_coords(&Complex::new(1.0, -1.0)), (3.0, 3.0));
    }

    #[test]
    fn pixel_to_point_is_the_pixel_center() {
        let plane = Plane::new(&Axes::from_point(Complex::new(0.0, 0.0), 2.0), 4, 4);
        assert_eq!(plane.pixel_to_point(&Pixel(0, 0)), Complex::new(-1.5, 1.5));
        assert_eq!(plane.pixel_to_point(&Pixel(3, 0)), Complex::new(1.5, 1.5));
        assert_eq!(plane.pixel_to_point(&Pixel(0, 3)), Complex::new(-1.5, -1.5));
    }

    #[test]
    #[should_panic]
    fn plane_rejects_empty_raster() {
        Plane::new(&Axes::from_point(Complex::new(0.0, 0.0), 1.0), 0, 4);
    }

    #[test]
    #[should_panic]
    fn plane_rejects_inverted_region() {
        let axes = Axes {
            xmin: 1.0,
            xmax: -1.0,
            ymin: -1.0,
            ymax: 1.0,
        };
        Plane::new(&axes, 4, 4);
    }

    #[test]
    #[should_panic]
    fn plane_rejects_zero_radius() {
        Plane::new(&Axes::from_point(Complex::new(0.0, 0.0), 0.0), 4, 4);
    }
}
