// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The JuliaRenderer walks backwards through three Julia sets at once.
//!
//! Running `z = z * z + c` forward sends almost every point off to
//! infinity.  Running it backward, `z = ±sqrt(z - c)`, pulls points
//! onto the Julia set's boundary instead, and if at each step we pick
//! one of the two roots at random (and one of several `c`s at random),
//! the walk spends its time on the boundaries of all of them.  Every
//! point visited is plotted, along with a short forward orbit that
//! uses the point as its own `c`, the way a Buddhabrot plots the
//! orbit of each starting point.
//!
//! Each pixel keeps the sum of the colors plotted into it; the colors
//! themselves drift as the walk goes, pulled toward a different
//! channel by each Julia parameter and each choice of root, so the
//! finished image shows which set each region belongs to.

use crossbeam::thread::ScopedJoinHandle;
use num::Complex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::canvas::Canvas;
use crate::config::RenderConfig;
use crate::density;
use crate::errors::RenderError;
use crate::plot::{Plot, Weights};

const PULL: f64 = 0.681;

/// Moves a weight halfway toward `target`.
#[inline]
fn blend(weight: f64, target: f64) -> f64 {
    (target + weight) / 2.0
}

/// A flag a caller can raise to stop a render.  The walk looks at it
/// once per sample.
#[derive(Clone, Debug, Default)]
pub struct Cancel(Arc<AtomicBool>);

impl Cancel {
    /// A flag that has not been raised.
    pub fn new() -> Cancel {
        Cancel::default()
    }

    /// Raises the flag.  Every clone sees it.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether the flag has been raised.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Given a uniform roll in `[0, 1)`, picks one of the three Julia
/// parameters by index and pulls the walk's color toward that
/// parameter's signature: the first toward yellow, the second toward
/// magenta, the third toward cyan with its red doubled.
pub fn pick_julia(color: &mut Weights, roll: f64) -> usize {
    if roll < 1.0 / 3.0 {
        color.blue = 0.0;
        color.red = blend(color.red, PULL);
        color.green = blend(color.green, PULL);
        0
    } else if roll < 2.0 / 3.0 {
        color.green = 0.0;
        color.red = blend(color.red, PULL);
        color.blue = blend(color.blue, PULL);
        1
    } else {
        color.red /= 0.5;
        color.green = blend(color.green, PULL);
        color.blue = blend(color.blue, PULL);
        2
    }
}

/// Given a uniform roll in `[0, 1)`, picks one of the two square roots
/// and pulls the walk's color toward red for the negative root or
/// toward blue for the principal one.
pub fn pick_root(color: &mut Weights, root: Complex<f64>, roll: f64) -> Complex<f64> {
    if roll > 0.5 {
        color.blue = 0.0;
        color.red = blend(color.red, PULL);
        -root
    } else {
        color.red = 0.0;
        color.blue = blend(color.blue, PULL);
        root
    }
}

/// Plots `steps` iterations of `z = z * z + c` starting from `z`,
/// coloring each step by how far into the orbit it is.  Returns where
/// the orbit ended up.
pub fn plot_suborbit(
    plot: &mut Plot,
    z: Complex<f64>,
    c: Complex<f64>,
    steps: usize,
) -> Complex<f64> {
    let mut z = z;
    let mut color = Weights::default();
    for i in 0..steps {
        z = z * z + c;
        match i {
            0 => {
                color.red = blend(color.red, PULL);
                color.blue = blend(color.blue, 0.581);
            }
            1 => {
                color.green = blend(color.green, PULL);
                color.blue = blend(color.blue, 0.781);
            }
            _ => {
                color.blue = blend(color.blue, PULL);
            }
        }
        plot.accumulate(&z, &color);
    }
    z
}

/// How many of `samples` the given worker walks.
fn share(samples: u64, workers: usize, worker: usize) -> u64 {
    let workers = workers as u64;
    let extra = if (worker as u64) < samples % workers {
        1
    } else {
        0
    };
    samples / workers + extra
}

/// Holds a validated configuration and renders it.
#[derive(Debug)]
pub struct JuliaRenderer {
    config: RenderConfig,
}

impl JuliaRenderer {
    /// Fails if the configuration can't produce an image.
    pub fn new(config: RenderConfig) -> Result<Self, RenderError> {
        config.validate()?;
        Ok(JuliaRenderer { config })
    }

    /// The configuration being rendered.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn blank_canvas(&self) -> Result<Canvas, RenderError> {
        Canvas::new(self.config.width, self.config.height)
    }

    /// Walks `samples` steps from the origin, plotting onto `plot`
    /// once the warm-up has passed.  The random source is only ever
    /// drawn from twice per step, so a seeded source gives the same
    /// plot every time.
    pub fn walk<R: Rng>(
        &self,
        plot: &mut Plot,
        rng: &mut R,
        samples: u64,
        cancel: &Cancel,
    ) -> Result<(), RenderError> {
        let mut z = Complex::new(0.0, 0.0);
        let mut color = Weights::default();
        let report_every = cmp::max(samples / 3, 1);

        for i in 0..samples {
            if cancel.is_cancelled() {
                return Err(RenderError::Cancelled { completed: i });
            }

            let julia_roll: f64 = rng.gen();
            let root_roll: f64 = rng.gen();

            let c = self.config.julia[pick_julia(&mut color, julia_roll)];
            let root = (z - c).sqrt();

            if i > self.config.warmup {
                plot_suborbit(plot, z, z, self.config.suborbit_steps);
                plot.accumulate(&z, &color);
            }

            z = pick_root(&mut color, root, root_roll);

            if i % report_every == 0 {
                info!("rendering: {} of {}", i + 1, samples);
            }
        }

        info!("rendering: {} of {}", samples, samples);
        Ok(())
    }

    /// Walks the whole sample budget on the calling thread.
    pub fn accumulate_single(&self, cancel: &Cancel) -> Result<Canvas, RenderError> {
        let mut canvas = self.blank_canvas()?;
        {
            let mut plot = Plot::new(&self.config.axes(), &mut canvas);
            let mut rng = StdRng::seed_from_u64(self.config.seed);
            self.walk(&mut plot, &mut rng, self.config.samples, cancel)?;
        }
        Ok(canvas)
    }

    /// Splits the sample budget over `threads` independent walks, each
    /// on its own canvas and seeded with `seed + worker`, then sums the
    /// canvases.  The same seed and thread count always give the same
    /// result.  A single thread is exactly `accumulate_single`.
    pub fn accumulate_threaded(
        &self,
        threads: usize,
        cancel: &Cancel,
    ) -> Result<Canvas, RenderError> {
        if threads <= 1 {
            return self.accumulate_single(cancel);
        }

        let mut canvases = (0..threads)
            .map(|_| self.blank_canvas())
            .collect::<Result<Vec<Canvas>, RenderError>>()?;
        let axes = self.config.axes();

        let results = crossbeam::scope(|spawner| {
            let handles: Vec<ScopedJoinHandle<Result<u64, RenderError>>> = canvases
                .iter_mut()
                .enumerate()
                .map(|(worker, canvas)| {
                    let samples = share(self.config.samples, threads, worker);
                    let seed = self.config.seed.wrapping_add(worker as u64);
                    debug!("worker {} walks {} samples from seed {}", worker, samples, seed);
                    spawner.spawn(move |_| {
                        let mut plot = Plot::new(&axes, canvas);
                        let mut rng = StdRng::seed_from_u64(seed);
                        self.walk(&mut plot, &mut rng, samples, cancel)
                            .map(|_| samples)
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|_| Err(RenderError::WorkerPanic))
                })
                .collect::<Vec<Result<u64, RenderError>>>()
        })
        .map_err(|_| RenderError::WorkerPanic)?;

        let mut completed = 0;
        let mut cancelled = false;
        for result in results {
            match result {
                Ok(samples) => completed += samples,
                Err(RenderError::Cancelled { completed: partial }) => {
                    cancelled = true;
                    completed += partial;
                }
                Err(err) => return Err(err),
            }
        }
        if cancelled {
            return Err(RenderError::Cancelled { completed });
        }

        let mut canvases = canvases.into_iter();
        let mut total = match canvases.next() {
            Some(canvas) => canvas,
            None => self.blank_canvas()?,
        };
        for canvas in canvases {
            total.merge(&canvas);
        }
        Ok(total)
    }

    /// Draws the configured decorations.
    pub fn decorate(&self, canvas: &mut Canvas) {
        let mut plot = Plot::new(&self.config.axes(), canvas);
        for circle in &self.config.decorations {
            let drawn = plot.circle(circle);
            debug!("circle at {} r={}: {} dots drawn", circle.center, circle.radius, drawn);
        }
    }

    /// The whole pipeline: walk, decorate, and turn the tallies into
    /// colors.  The returned canvas is ready to be written out.
    pub fn render(&self, threads: usize, cancel: &Cancel) -> Result<Canvas, RenderError> {
        let mut canvas = self.accumulate_threaded(threads, cancel)?;
        self.decorate(&mut canvas);
        let stats = density::log_density(&mut canvas);
        debug!("{} of {} pixels lit", stats.lit, canvas.len());
        Ok(canvas)
    }
}
