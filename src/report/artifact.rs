use base64::{engine::general_purpose::STANDARD, Engine};
use log::{error, warn};
use std::path::Path;

/// Encode a screenshot file for inline embedding.
///
/// Returns `None` for every failure shape (absent path, missing file,
/// unreadable or empty file); the caller treats all of them as
/// "no screenshot available" and renders a placeholder. Never errors.
pub fn encode(path: Option<&str>) -> Option<String> {
    let path = match path {
        Some(p) if !p.is_empty() => Path::new(p),
        _ => return None,
    };

    if !path.exists() {
        warn!("Screenshot not found: {}", path.display());
        return None;
    }

    match std::fs::read(path) {
        Ok(bytes) if !bytes.is_empty() => Some(STANDARD.encode(bytes)),
        Ok(_) => {
            error!("Screenshot file is empty: {}", path.display());
            None
        }
        Err(e) => {
            error!("Failed to read screenshot {}: {}", path.display(), e);
            None
        }
    }
}

/// Minimal 1x1 RGBA PNG used as a screenshot stand-in by tests
#[cfg(test)]
pub(crate) const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // signature
    0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15,
    0xC4, 0x89, //
    0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, // IDAT
    0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, //
    0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82, // IEND
];

#[cfg(test)]
pub(crate) fn write_temp_png(name: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("{}_{}.png", name, uuid::Uuid::new_v4()));
    std::fs::write(&path, TINY_PNG).expect("write temp png");
    path
}
