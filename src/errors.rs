// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can stop a render session short of a finished
//! image.  Points that fall off the canvas are not errors and never
//! show up here.

use failure::Fail;
use std::io;

/// The ways a render session can fail.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The accumulation canvas could not be allocated.
    #[fail(display = "could not allocate a {}x{} canvas", width, height)]
    Allocation {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// The render configuration cannot produce an image.
    #[fail(display = "invalid configuration: {}", _0)]
    InvalidConfig(String),

    /// Somebody asked the walk to stop.
    #[fail(display = "render cancelled after {} samples", completed)]
    Cancelled {
        /// Samples that were walked before the cancellation was seen.
        completed: u64,
    },

    /// One of the accumulation threads died.
    #[fail(display = "a render worker panicked")]
    WorkerPanic,

    /// Writing the finished image failed.
    #[fail(display = "could not write image: {}", _0)]
    Io(#[cause] io::Error),

    /// The image crate refused to encode the finished image.
    #[fail(display = "could not encode image: {}", _0)]
    Encode(String),
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        RenderError::Io(err)
    }
}
