//! Command-line interface implementation
//!
//! Standalone-image transform commands over the bitmap JSON form. Mutating
//! entity state is a library concern; the CLI only wraps the pure engine:
//! rotate by angle, rotate to face a point, vertical flip.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::bitmap::Bitmap;
use crate::export::save_png;
use crate::transform::{flip_vertical, rotate_towards_point, rotate_with_margin};

/// Exit codes
const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// Spritespin - rotate and flip palette-indexed bitmaps
#[derive(Parser)]
#[command(name = "spin")]
#[command(about = "Spritespin - rotate and flip palette-indexed bitmaps")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rotate a bitmap by an angle, on a fixed margin canvas
    Rotate {
        /// Input bitmap JSON file
        input: PathBuf,

        /// Rotation angle in degrees (any value, normalized to [0, 360))
        #[arg(short, long, allow_negative_numbers = true)]
        degrees: f64,

        /// Margin in pixels around the source footprint; negative values
        /// are clamped to 0
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        margin: i64,

        /// Output JSON file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also render the result to a PNG file
        #[arg(long)]
        png: Option<PathBuf>,
    },

    /// Rotate a bitmap to face from one point towards another
    Face {
        /// Input bitmap JSON file
        input: PathBuf,

        /// Source point as "x,y"
        #[arg(long, value_parser = parse_point)]
        from: (f64, f64),

        /// Target point as "x,y"
        #[arg(long, value_parser = parse_point)]
        to: (f64, f64),

        /// Extra rotation offset in degrees
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        offset: f64,

        /// Margin in pixels; negative values are clamped to 0
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        margin: i64,

        /// Output JSON file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also render the result to a PNG file
        #[arg(long)]
        png: Option<PathBuf>,
    },

    /// Flip a bitmap top-to-bottom
    Flip {
        /// Input bitmap JSON file
        input: PathBuf,

        /// Output JSON file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also render the result to a PNG file
        #[arg(long)]
        png: Option<PathBuf>,
    },
}

/// Parse an "x,y" coordinate pair.
fn parse_point(value: &str) -> Result<(f64, f64), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got '{value}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    Ok((x, y))
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rotate {
            input,
            degrees,
            margin,
            output,
            png,
        } => {
            let Some(bitmap) = load_bitmap(&input) else {
                return ExitCode::from(EXIT_INVALID_ARGS);
            };
            let result = rotate_with_margin(&bitmap, degrees, clamp_margin(margin));
            write_result(&result, output.as_deref(), png.as_deref())
        }
        Commands::Face {
            input,
            from,
            to,
            offset,
            margin,
            output,
            png,
        } => {
            let Some(bitmap) = load_bitmap(&input) else {
                return ExitCode::from(EXIT_INVALID_ARGS);
            };
            let result = rotate_towards_point(
                &bitmap,
                from.0,
                from.1,
                to.0,
                to.1,
                offset,
                clamp_margin(margin),
            );
            write_result(&result, output.as_deref(), png.as_deref())
        }
        Commands::Flip { input, output, png } => {
            let Some(bitmap) = load_bitmap(&input) else {
                return ExitCode::from(EXIT_INVALID_ARGS);
            };
            let result = flip_vertical(&bitmap);
            write_result(&result, output.as_deref(), png.as_deref())
        }
    }
}

/// Negative margins degrade to zero rather than erroring.
fn clamp_margin(margin: i64) -> u32 {
    margin.clamp(0, i64::from(u32::MAX)) as u32
}

fn load_bitmap(input: &Path) -> Option<Bitmap> {
    let contents = match fs::read_to_string(input) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Error: Cannot open input file '{}': {}", input.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&contents) {
        Ok(bitmap) => Some(bitmap),
        Err(e) => {
            eprintln!("Error: Invalid bitmap in '{}': {}", input.display(), e);
            None
        }
    }
}

fn write_result(result: &Bitmap, output: Option<&Path>, png: Option<&Path>) -> ExitCode {
    let json = match serde_json::to_string(result) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error: Cannot serialize result: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error: Cannot write '{}': {}", path.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
        None => println!("{}", json),
    }

    if let Some(path) = png {
        if let Err(e) = save_png(result, path) {
            eprintln!("Error: Cannot write PNG '{}': {}", path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}
