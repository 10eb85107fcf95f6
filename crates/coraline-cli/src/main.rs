//! Command-line front end for Coraline (C10).
//!
//! `coraline <image.ppm> <seg.ppm> <label.ppm> <output.ppm> [-l λ] [-c c]`:
//! loads the image and an annotation mask, runs one graph-cut segmentation
//! pass, and writes an output PPM with the refined boundary drawn in white.
//! The training label mask is only used to print diff diagnostics; it does
//! not influence the segmentation itself, matching the original tool.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use coraline::{Config, Segmenter};
use coraline_core::Mask;

#[derive(Parser)]
#[command(name = "coraline", about = "Interactive mask refinement via band-limited graph-cut")]
struct Args {
    /// Input image, binary PPM (P6)
    image: PathBuf,
    /// Annotation mask overlaid on the image, binary PPM (P6)
    seg: PathBuf,
    /// Training label mask, used only for diff diagnostics
    label: PathBuf,
    /// Output image with the refined boundary drawn in white
    output: PathBuf,

    /// Weight of the foreground/background color likelihood term
    #[arg(short = 'l', default_value_t = 0.1)]
    lambda: f64,

    /// Weight of the boundary-distance penalty
    #[arg(short = 'c', default_value_t = 0.2)]
    conservative: f64,
}

const DEFAULT_RADIUS: f64 = 30.0;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(1);
        }
    };

    if !has_ppm_extension(&args.image) || !has_ppm_extension(&args.seg) {
        eprintln!("coraline only accepts .ppm images");
        return unsupported_format();
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(1)
        }
    }
}

fn has_ppm_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"))
}

/// The original tool reports unsupported file formats via a negative exit
/// code; `ExitCode` only portably represents `0..=255`, so `-1`'s two's
/// complement byte (`255`) is used instead.
fn unsupported_format() -> ExitCode {
    ExitCode::from(255)
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let image = coraline_io::read_ppm(File::open(&args.image)?)?;
    let seg_overlay = coraline_io::read_ppm(File::open(&args.seg)?)?;
    let label_overlay = coraline_io::read_ppm(File::open(&args.label)?)?;

    println!("Image width: {} and image height {}", image.width(), image.height());

    let old_mask = coraline_io::rgb_to_mask(&seg_overlay);
    let label_mask = coraline_io::rgb_to_mask(&label_overlay);

    let config = Config::new()
        .with_radius(DEFAULT_RADIUS)
        .with_lambda(args.lambda)
        .with_conservative(args.conservative);

    let start = Instant::now();
    let result = Segmenter::new(config).segment(&image, &old_mask)?;
    let elapsed = start.elapsed();

    println!("Time: {:.6}", elapsed.as_secs_f64());
    println!("Diff label to result: {}", overlap_ratio(&old_mask, &label_mask));
    println!("Diff segm to result: {}", overlap_ratio(&result, &label_mask));

    let mut annotated = image;
    coraline_io::draw_border(&mut annotated, &result, [255, 255, 255]);

    coraline_io::write_ppm(&annotated, BufWriter::new(File::create(&args.output)?))?;
    Ok(())
}

/// The intersection-over-union of two masks, matching the original tool's
/// `diff()` despite its name (it never differs a byte-for-byte count).
fn overlap_ratio(a: &Mask, b: &Mask) -> f64 {
    let mut intersection = 0u32;
    let mut union = 0u32;
    for i in 0..a.dims().pixel_count() {
        let (x, y) = (a.get(i), b.get(i));
        union += (x | y) as u32;
        intersection += (x & y) as u32;
    }
    if union == 0 { 0.0 } else { intersection as f64 / union as f64 }
}
