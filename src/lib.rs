#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Multi-Julia Buddhabrot renderer
//!
//! A Buddhabrot colors each pixel by how many orbits pass through it,
//! rather than by how fast any one point escapes.  This one gets its
//! orbits by walking the Julia sets backward: starting anywhere and
//! repeatedly taking a random square root of `z - c`, with `c` chosen
//! at random from three Julia parameters, lands the walk on the
//! boundaries of all three sets at once.  Every point the walk visits
//! is plotted along with a short forward orbit, each carrying a color
//! that drifts according to which parameter and which root the walk
//! took.
//!
//! A render is a pipeline: fit the region of the complex plane to the
//! image ([`planes`]), allocate a canvas of tallies ([`canvas`]), walk
//! millions of steps plotting into it ([`orbit`], through [`plot`]),
//! then squash the unbounded tallies into bytes with a logarithmic
//! curve ([`density`]) and write the bytes out ([`ppm`]).

#[macro_use]
extern crate log;

pub mod canvas;
pub mod config;
pub mod density;
pub mod errors;
pub mod orbit;
pub mod planes;
pub mod plot;
pub mod ppm;

pub use crate::canvas::{Canvas, Rgb};
pub use crate::config::RenderConfig;
pub use crate::errors::RenderError;
pub use crate::orbit::{Cancel, JuliaRenderer};
pub use crate::planes::{Axes, Pixel, Plane};
pub use crate::plot::{Circle, Plot, Weights};
