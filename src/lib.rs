#[macro_use]
extern crate error_chain;
extern crate image;
#[macro_use]
extern crate log;

pub mod config;
pub mod encoder;
pub mod errors;
pub mod ihex;
mod profiler;
pub mod verify;

use config::Config;
use encoder::{EncodeSummary, Encoder};
use errors::*;
use image::{DynamicImage, Rgb, RgbImage};
use profiler::Profiler;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<Rgb<u8>> for Pixel {
    fn from(Rgb([r, g, b]): Rgb<u8>) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub output_path: PathBuf,
    pub summary: EncodeSummary,
    /// Set when the output was verified and removed again (`-r`).
    pub deleted: bool,
}

fn load_image(config: &Config, profiler: &mut Profiler) -> Result<RgbImage> {
    let input_path = config.input();
    let input_image = image::open(&input_path)
        .chain_err(|| format!("Could not open image {}", input_path.display()))?;
    Ok(match input_image {
        DynamicImage::ImageRgb8(img) => img,
        other => {
            profiler.step("Converting input image to RGB", "pixels");
            other.to_rgb8()
        }
    })
}

pub fn run_convert(config: &Config) -> Result<Conversion> {
    let mut profiler = Profiler::new();

    profiler.step("Reading input image", "pixels");
    let input_image = load_image(config, &mut profiler)?;
    profiler.count(input_image.width() as usize * input_image.height() as usize);
    info!(
        "Image size: {}×{}",
        input_image.width(),
        input_image.height()
    );

    profiler.step("Writing hex records", "records");
    let output_path = config.output();
    let file = File::create(&output_path)
        .chain_err(|| format!("Could not create output file {}", output_path.display()))?;
    let mut encoder = Encoder::new(BufWriter::new(file), config.addressing);
    encoder.write_rows(
        input_image
            .rows()
            .map(|row| row.map(|pixel| Pixel::from(*pixel))),
    )?;
    let (_, summary) = encoder
        .finish()
        .chain_err(|| format!("Error writing {}", output_path.display()))?;
    profiler.count(summary.records());

    info!(
        "Wrote {} records ({} pixels, {} padding) to {}",
        summary.records(),
        summary.pixels,
        summary.padding,
        output_path.display()
    );

    let mut deleted = false;
    if config.delete_output {
        profiler.step("Verifying output", "records");
        let records = verify::verify_file(&output_path)?;
        profiler.count(records);
        info!("{} records verified", records);

        profiler.step("Deleting output", "files");
        fs::remove_file(&output_path)
            .chain_err(|| format!("Could not delete {}", output_path.display()))?;
        profiler.count(1);
        deleted = true;
    }

    Ok(Conversion {
        output_path,
        summary,
        deleted,
    })
}
