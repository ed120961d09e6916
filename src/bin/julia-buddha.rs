// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[macro_use]
extern crate log;

use clap::{App, Arg, ArgMatches};
use julia_buddha::{ppm, Cancel, JuliaRenderer, RenderConfig, RenderError};
use num::Complex;
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const CENTER: &str = "center";
const RADIUS: &str = "radius";
const SAMPLES: &str = "samples";
const SEED: &str = "seed";
const THREADS: &str = "threads";
const NO_CIRCLES: &str = "no-circles";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("julia-buddha")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Multi-Julia Buddhabrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (.ppm, or any format the image crate knows)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1920x1080")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(CENTER)
                .required(false)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .default_value("0,0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse center point"))
                .help("Center of the region of the complex plane to render"),
        )
        .arg(
            Arg::with_name(RADIUS)
                .required(false)
                .long(RADIUS)
                .short("r")
                .takes_value(true)
                .default_value("2.0")
                .validator(|s| {
                    validate_range(
                        &s,
                        std::f64::MIN_POSITIVE,
                        std::f64::MAX,
                        "Could not parse radius",
                        "Radius must be positive",
                    )
                })
                .help("Distance from the center to the edges of the region"),
        )
        .arg(
            Arg::with_name(SAMPLES)
                .required(false)
                .long(SAMPLES)
                .short("n")
                .takes_value(true)
                .default_value("10000000")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        u64::max_value(),
                        "Could not parse sample count",
                        "Sample count must be positive",
                    )
                })
                .help("Number of steps in the random walk"),
        )
        .arg(
            Arg::with_name(SEED)
                .required(false)
                .long(SEED)
                .takes_value(true)
                .default_value("1")
                .validator(|s| {
                    validate_range(
                        &s,
                        0,
                        u64::max_value(),
                        "Could not parse seed",
                        "Seed out of range",
                    )
                })
                .help("Seed for the random walk"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver"),
        )
        .arg(
            Arg::with_name(NO_CIRCLES)
                .long(NO_CIRCLES)
                .help("Do not draw the reference circles"),
        )
        .get_matches()
}

fn config_from<'a>(matches: &'a ArgMatches) -> Option<(RenderConfig, usize, &'a str)> {
    let output = matches.value_of(OUTPUT)?;
    let (width, height) = parse_pair::<u16>(matches.value_of(SIZE)?, 'x')?;
    let center = parse_complex(matches.value_of(CENTER)?)?;
    let radius = f64::from_str(matches.value_of(RADIUS)?).ok()?;
    let samples = u64::from_str(matches.value_of(SAMPLES)?).ok()?;
    let seed = u64::from_str(matches.value_of(SEED)?).ok()?;
    let threads = usize::from_str(matches.value_of(THREADS)?).ok()?;
    let decorations = if matches.is_present(NO_CIRCLES) {
        vec![]
    } else {
        RenderConfig::reference_circles()
    };

    let config = RenderConfig {
        width: usize::from(width),
        height: usize::from(height),
        samples,
        center,
        radius,
        seed,
        decorations,
        ..RenderConfig::default()
    };
    Some((config, threads, output))
}

fn run(matches: &ArgMatches) -> Result<(), RenderError> {
    let (config, threads, output) = config_from(matches)
        .ok_or_else(|| RenderError::InvalidConfig("could not parse arguments".to_string()))?;
    let renderer = JuliaRenderer::new(config)?;
    info!(
        "rendering {}x{} from {} samples on {} thread(s)",
        renderer.config().width,
        renderer.config().height,
        renderer.config().samples,
        threads
    );
    let canvas = renderer.render(threads, &Cancel::new())?;
    ppm::save_image(&canvas, output)?;
    info!("wrote {}", output);
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
