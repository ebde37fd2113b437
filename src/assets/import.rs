use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{SnapError, SnapResult};

/// Formats accepted from the file picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportKind {
    Png,
    Jpeg,
}

impl ImportKind {
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// A user-chosen image, used as a custom template background or a custom sticker.
///
/// Only the container format is checked; decoding happens when the image is drawn.
#[derive(Clone, Debug)]
pub struct ImportedImage {
    pub kind: ImportKind,
    pub bytes: Arc<[u8]>,
}

/// Accept `bytes` if they carry a PNG or JPEG signature.
pub fn import_image_bytes(bytes: Vec<u8>) -> SnapResult<ImportedImage> {
    let kind = match image::guess_format(&bytes) {
        Ok(image::ImageFormat::Png) => ImportKind::Png,
        Ok(image::ImageFormat::Jpeg) => ImportKind::Jpeg,
        Ok(other) => {
            return Err(SnapError::validation(format!(
                "unsupported import format {other:?} (expected image/png or image/jpeg)"
            )));
        }
        Err(_) => {
            return Err(SnapError::validation(
                "unrecognized import format (expected image/png or image/jpeg)",
            ));
        }
    };
    Ok(ImportedImage {
        kind,
        bytes: Arc::from(bytes),
    })
}

pub fn import_image_file(path: &Path) -> SnapResult<ImportedImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    import_image_bytes(bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/import.rs"]
mod tests;
