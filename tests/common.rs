use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

/// Write a small real PNG and return its path.
pub fn create_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = image::DynamicImage::new_rgb8(width, height);
    let path = dir.join(name);
    img.save_with_format(&path, image::ImageFormat::Png).unwrap();
    path
}

/// Write a small real JPEG and return its path.
pub fn create_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = image::DynamicImage::new_rgb8(width, height);
    let path = dir.join(name);
    img.save_with_format(&path, image::ImageFormat::Jpeg).unwrap();
    path
}

/// Write a minimal SVG document and return its path.
pub fn create_svg(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(
        &path,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"10\" height=\"10\">\n  <!-- test fixture -->\n  <rect width=\"10\" height=\"10\"/>\n</svg>\n",
    )
    .unwrap();
    path
}

/// A file with a JPEG signature but no decodable image behind it.
pub fn create_truncated_jpeg(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0, 0x01, 0x02, 0x03]).unwrap();
    path
}

/// Encoded PNG bytes, for piping through stdin.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::DynamicImage::new_rgb8(width, height);
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}
