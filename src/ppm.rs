// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writes finished canvases out.  The native format is binary PPM
//! with a comment line in its header; anything else is handed to the
//! image crate, which picks an encoder from the file's extension.

use image::{ImageBuffer, Rgb as ImageRgb};
use std::convert::TryFrom;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::canvas::Canvas;
use crate::errors::RenderError;

/// The comment written into every PPM header unless told otherwise.
pub const DEFAULT_COMMENT: &str = "# julia-buddha multi-Julia orbit plotter";

/// Writes `canvas` as a binary PPM: a `P6` header with `comment` on
/// its own line, then the raw r, g, b bytes row by row.
pub fn write_ppm<W: Write>(canvas: &Canvas, comment: &str, out: &mut W) -> Result<(), RenderError> {
    let comment = comment.replace('\n', " ");
    let marker = if comment.starts_with('#') { "" } else { "# " };
    write!(
        out,
        "P6\n{}{}\n{} {}\n255\n",
        marker,
        comment,
        canvas.width(),
        canvas.height()
    )?;
    out.write_all(&canvas.to_rgb_bytes())?;
    out.flush()?;
    Ok(())
}

/// Writes `canvas` to `path` as a binary PPM with the default comment.
pub fn save_ppm<P: AsRef<Path>>(canvas: &Canvas, path: P) -> Result<(), RenderError> {
    let mut out = BufWriter::new(File::create(path)?);
    write_ppm(canvas, DEFAULT_COMMENT, &mut out)
}

fn is_ppm(path: &Path) -> bool {
    match path.extension().and_then(|ext| ext.to_str()) {
        None => true,
        Some(ext) => {
            let ext = ext.to_ascii_lowercase();
            ext == "ppm" || ext == "pnm"
        }
    }
}

/// The canvas size as the image crate wants it.
fn image_dimensions(canvas: &Canvas) -> Result<(u32, u32), RenderError> {
    match (u32::try_from(canvas.width()), u32::try_from(canvas.height())) {
        (Ok(width), Ok(height)) => Ok((width, height)),
        _ => Err(RenderError::Encode(format!(
            "a {}x{} canvas is too large to encode",
            canvas.width(),
            canvas.height()
        ))),
    }
}

/// Writes `canvas` to `path`, as PPM if the path ends in `.ppm`,
/// `.pnm`, or nothing at all, otherwise in whatever format the image
/// crate associates with the extension.
pub fn save_image<P: AsRef<Path>>(canvas: &Canvas, path: P) -> Result<(), RenderError> {
    let path = path.as_ref();
    if is_ppm(path) {
        return save_ppm(canvas, path);
    }

    let (width, height) = image_dimensions(canvas)?;
    let buffer: ImageBuffer<ImageRgb<u8>, Vec<u8>> =
        ImageBuffer::from_raw(width, height, canvas.to_rgb_bytes())
            .ok_or_else(|| RenderError::Encode("canvas does not fit an RGB image".to_string()))?;
    buffer
        .save(path)
        .map_err(|err| RenderError::Encode(err.to_string()))
}
