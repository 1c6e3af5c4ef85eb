use image::ImageFormat;
use std::path::{Path, PathBuf};

use crate::raster::RasterImage;

/// A raster written to disk for upload; the file is removed on drop.
#[derive(Debug)]
pub struct TempImage {
    path: PathBuf,
}

impl TempImage {
    /// Writes `raster` as BMP to a timestamped, uuid-suffixed file in `dir`
    pub fn write(dir: &Path, raster: &RasterImage) -> Result<Self, image::ImageError> {
        let timestamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        let path = dir.join(format!("temp-{}-{}.bmp", timestamp, &suffix[..8]));

        // Keep the guard alive from here so a failed write doesn't leave a partial file
        let guard = Self { path };
        raster.save(&guard.path, ImageFormat::Bmp)?;
        log::debug!("Wrote temporary sketch to {}", guard.path.display());
        Ok(guard)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempImage {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => log::debug!("Removed temporary sketch {}", self.path.display()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => log::warn!("Failed to remove {}: {}", self.path.display(), err),
        }
    }
}
