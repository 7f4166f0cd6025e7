// src/core/validate.rs
use std::path::Path;

use image::ImageReader;

use crate::error::{Result, ScrapeError};

/// Decode the whole file at `path` and throw the pixels away.
///
/// Format is sniffed from the content, so a `.jpg` holding an HTML error page
/// or half a JPEG fails here. Read-only.
pub fn validate(path: &Path) -> Result<()> {
    let reader = ImageReader::open(path)?
        .with_guessed_format()
        .map_err(|e| invalid(path, e.to_string()))?;

    if reader.format().is_none() {
        return Err(invalid(path, "unrecognised image format".into()));
    }

    reader.decode().map_err(|e| invalid(path, e.to_string()))?;
    Ok(())
}

fn invalid(path: &Path, reason: String) -> ScrapeError {
    ScrapeError::Validation { path: path.to_path_buf(), reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn jpeg_bytes() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(8, 8, image::Rgb([200, 30, 30]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Jpeg).unwrap();
        buf.into_inner()
    }

    #[test]
    fn accepts_intact_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("ok.jpg");
        std::fs::write(&p, jpeg_bytes()).unwrap();
        assert!(validate(&p).is_ok());
    }

    #[test]
    fn rejects_truncated_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("cut.jpg");
        let bytes = jpeg_bytes();
        std::fs::write(&p, &bytes[..64]).unwrap();
        assert!(matches!(validate(&p), Err(ScrapeError::Validation { .. })));
    }

    #[test]
    fn rejects_html_error_page() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("page.jpg");
        std::fs::write(&p, b"<html><body>Not Found</body></html>").unwrap();
        assert!(matches!(validate(&p), Err(ScrapeError::Validation { .. })));
    }

    #[test]
    fn missing_file_is_io() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(validate(&dir.path().join("nope.jpg")), Err(ScrapeError::Io(_))));
    }
}
