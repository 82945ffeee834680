use std::path::PathBuf;

use chrono::Local;
use image::DynamicImage;

/// Write-only store for analyzed images. Files are kept for external
/// inspection; nothing in the service reads them back.
#[derive(Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Encoding error: {0}")]
    Encode(#[from] image::ImageError),
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, UploadError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Save a scan as `scan_<YYYYMMDD_HHMMSS>.jpg` and return the filename.
    /// Second-granularity names can collide under load; the later write wins,
    /// which is acceptable for inspection artifacts.
    pub fn save_scan(&self, image: &DynamicImage) -> Result<String, UploadError> {
        let filename = format!("scan_{}.jpg", Local::now().format("%Y%m%d_%H%M%S"));
        let path = self.dir.join(&filename);
        // JPEG has no alpha channel, so flatten before encoding.
        image
            .to_rgb8()
            .save_with_format(&path, image::ImageFormat::Jpeg)?;
        Ok(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn save_scan_writes_timestamped_jpeg() {
        let dir = std::env::temp_dir().join(format!("uploads_test_{}", std::process::id()));
        let store = UploadStore::new(&dir).unwrap();
        let image = DynamicImage::ImageRgb8(RgbImage::new(16, 16));

        let filename = store.save_scan(&image).unwrap();
        assert!(filename.starts_with("scan_"));
        assert!(filename.ends_with(".jpg"));
        assert!(dir.join(&filename).exists());

        std::fs::remove_dir_all(&dir).ok();
    }
}
