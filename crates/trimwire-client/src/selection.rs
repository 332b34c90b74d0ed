// crates/trimwire-client/src/selection.rs
//
// The selection manager: which input file is active, and the local preview
// staged from it. select() and clear() are the only mutations; both drop
// the superseded preview handle, which releases its staged file.

use std::path::Path;

use anyhow::Context;

use trimwire_core::clip::{media_type_for, SourceClip};
use trimwire_core::error::SelectError;

use crate::preview::PreviewHandle;

/// The chosen input clip together with the preview staged from it.
/// The two commit together or not at all, so `preview` is `Some` exactly
/// when `clip` is.
#[derive(Debug, Default)]
pub struct Selection {
    clip:    Option<SourceClip>,
    preview: Option<PreviewHandle>,
}

impl Selection {
    /// Make `candidate` the active selection.
    ///
    /// Rejects non-`audio/*` payloads (`InvalidMediaType`) and staging
    /// failures (`Preview`); in both cases the previous selection stays
    /// exactly as it was. On success the superseded preview handle drops
    /// here, deleting its staged file.
    pub fn select(&mut self, candidate: SourceClip) -> Result<(), SelectError> {
        if !candidate.is_audio() {
            log::warn!("rejected {}: declared type {}", candidate.name, candidate.mime);
            return Err(SelectError::InvalidMediaType { name: candidate.name });
        }

        // Stage first, commit second: a failed stage must not disturb the
        // current selection.
        let staged = PreviewHandle::stage(&candidate.bytes, &candidate.extension())
            .map_err(SelectError::Preview)?;

        log::info!("selected {} ({} bytes)", candidate.name, candidate.size_bytes());
        self.clip    = Some(candidate);
        self.preview = Some(staged);
        Ok(())
    }

    /// Reset to the empty state, releasing the staged preview.
    pub fn clear(&mut self) {
        if let Some(clip) = self.clip.take() {
            log::info!("cleared selection {}", clip.name);
        }
        self.preview = None;
    }

    pub fn clip(&self) -> Option<&SourceClip> {
        self.clip.as_ref()
    }

    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.clip.is_none()
    }
}

/// Read a picked file into a tagged clip. The media-type tag comes from the
/// extension table; the audio gate itself lives in [`Selection::select`] so
/// dialog picks and window drops go through the same check.
pub fn load_clip(path: &Path) -> anyhow::Result<SourceClip> {
    let name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    let bytes = std::fs::read(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    let mime = media_type_for(&name).to_string();
    Ok(SourceClip::new(name, mime, bytes))
}
