use image::{Rgb, RgbImage};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Fresh scratch directory under the system temp dir, unique per test.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("img2ihex-{}-{}", name, std::process::id()));
    if dir.exists() {
        fs::remove_dir_all(&dir).expect("clear scratch dir");
    }
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

/// Writes a PNG whose pixel at (x, y) is (x, y, 0x80).
pub fn gradient_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 0x80]));
    let path = dir.join(name);
    img.save(&path).expect("write sample png");
    path
}

pub fn single_pixel_png(dir: &Path, name: &str, rgb: [u8; 3]) -> PathBuf {
    let img = RgbImage::from_pixel(1, 1, Rgb(rgb));
    let path = dir.join(name);
    img.save(&path).expect("write sample png");
    path
}
