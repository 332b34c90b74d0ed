// crates/trimwire-client/src/preview.rs
//
// Preview staging. A PreviewHandle is an owned temp file holding audio
// bytes rodio can decode: creating the handle writes the file, dropping it
// deletes the file. There is no other delete path for a live handle, so
// every staged file is released exactly once.

use std::io::Write;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Prefix for every file TrimWire stages in the OS temp dir. The release
/// path only touches names carrying it.
const STAGE_PREFIX: &str = "trimwire_preview_";

/// An ownership-scoped, locally playable audio resource.
///
/// The backing file lives at `<tempdir>/trimwire_preview_<uuid>.<ext>`.
/// Slot replacement (selecting a new input, storing a new result) drops
/// the superseded handle, and that drop is the release.
#[derive(Debug)]
pub struct PreviewHandle {
    path:  PathBuf,
    bytes: u64,
}

impl PreviewHandle {
    /// Stage `bytes` into a fresh uniquely named temp file. `ext` picks the
    /// suffix so save-to-disk copies keep a meaningful name; rodio itself
    /// sniffs the codec from content, not the extension.
    pub fn stage(bytes: &[u8], ext: &str) -> std::io::Result<PreviewHandle> {
        let id   = Uuid::new_v4();
        let path = std::env::temp_dir().join(format!("{STAGE_PREFIX}{id}.{ext}"));

        let mut file = std::fs::File::create(&path)?;
        file.write_all(bytes)?;
        file.flush()?;

        log::info!("staged preview ({} bytes) at {}", bytes.len(), path.display());
        Ok(PreviewHandle { path, bytes: bytes.len() as u64 })
    }

    /// Path rodio decodes from (and save-to-disk copies from).
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes
    }
}

impl Drop for PreviewHandle {
    // The release. Only deletes files matching the staged pattern in the
    // OS temp dir, the same guard stage() creates names under.
    fn drop(&mut self) {
        let in_temp = self.path.parent()
            .map(|p| p == std::env::temp_dir())
            .unwrap_or(false);
        let name = self.path.file_name().unwrap_or_default().to_string_lossy();
        if !in_temp || !name.starts_with(STAGE_PREFIX) {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(())  => log::info!("released preview {}", self.path.display()),
            Err(e) => log::warn!("could not release preview {}: {e}", self.path.display()),
        }
    }
}
