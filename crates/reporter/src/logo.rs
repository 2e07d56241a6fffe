use crate::canvas::RasterImage;
use std::path::Path;

/// Loads the optional institutional logo.
///
/// A missing or unreadable file is not an error: the header is simply drawn
/// without it.
pub fn load_logo(path: &Path) -> Option<RasterImage> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No logo found, rendering header without it.");
        return None;
    }
    match image::open(path) {
        Ok(decoded) => {
            let rgb = decoded.to_rgb8();
            Some(RasterImage {
                width: rgb.width(),
                height: rgb.height(),
                rgb: rgb.into_raw(),
            })
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Logo could not be decoded, skipping it.");
            None
        }
    }
}
