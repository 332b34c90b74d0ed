// crates/trimwire-core/src/error.rs
//
// Error taxonomy shared by the client crate and the UI. Selection errors
// and submission errors never mix: a rejected pick leaves the machine
// untouched, while a settled submission always lands in Failed.

use thiserror::Error;

/// Why a candidate file was rejected by the selection manager.
#[derive(Debug, Error)]
pub enum SelectError {
    /// The declared media type is not `audio/*`. The previous selection,
    /// if any, stays in place.
    #[error("{name}: not an audio file")]
    InvalidMediaType { name: String },
    /// Staging the local preview copy failed, so the selection is rejected
    /// whole; a clip without a preview is never stored.
    #[error("could not stage preview: {0}")]
    Preview(std::io::Error),
}

/// Why a submission settled in failure, or why it never started.
///
/// `ProcessingFailed` carries the service's response body verbatim and
/// displays it unmodified; the UI adds nothing to it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProcessError {
    #[error("no audio file selected")]
    NoFileSelected,
    #[error("{0}")]
    ProcessingFailed(String),
    #[error("could not reach the processing service")]
    NetworkFailure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processing_failure_displays_body_verbatim() {
        let err = ProcessError::ProcessingFailed("decode error".into());
        assert_eq!(err.to_string(), "decode error");
    }

    #[test]
    fn invalid_media_type_names_the_file() {
        let err = SelectError::InvalidMediaType { name: "slides.pdf".into() };
        assert_eq!(err.to_string(), "slides.pdf: not an audio file");
    }
}
