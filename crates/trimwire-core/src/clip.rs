// crates/trimwire-core/src/clip.rs
//
// The selected audio payload and the extension → media-type table.
// No I/O here: reading bytes from disk lives in trimwire-client.

use std::path::Path;
use std::sync::Arc;

/// Extensions offered by the import dialog and understood by the loader.
/// One table drives both, so the dialog filter and the media-type tags
/// can never drift apart.
pub const AUDIO_EXTENSIONS: [&str; 6] = ["mp3", "wav", "flac", "aac", "ogg", "m4a"];

/// Declared media type for a file name, keyed on its extension.
///
/// Unknown or missing extensions tag as `application/octet-stream`,
/// which the selection gate then rejects.
///
/// ```
/// use trimwire_core::clip::media_type_for;
/// assert_eq!(media_type_for("take_04.mp3"),  "audio/mpeg");
/// assert_eq!(media_type_for("Master.WAV"),   "audio/wav");
/// assert_eq!(media_type_for("notes.txt"),    "application/octet-stream");
/// ```
pub fn media_type_for(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .unwrap_or_default()
        .to_string_lossy()
        .to_lowercase();

    match ext.as_str() {
        "mp3"  => "audio/mpeg",
        "wav"  => "audio/wav",
        "flac" => "audio/flac",
        "aac"  => "audio/aac",
        "ogg"  => "audio/ogg",
        "m4a"  => "audio/mp4",
        _      => "application/octet-stream",
    }
}

/// The user's chosen input file, held fully in memory.
///
/// `bytes` is an `Arc` slice so the submission snapshot shares the payload
/// without copying: the in-flight request keeps its own clone, and later
/// changes to the live selection can never reach it.
#[derive(Clone, Debug)]
pub struct SourceClip {
    pub name:  String,
    pub mime:  String,
    pub bytes: Arc<[u8]>,
}

impl SourceClip {
    pub fn new(name: String, mime: String, bytes: Vec<u8>) -> Self {
        Self { name, mime, bytes: Arc::from(bytes) }
    }

    /// The selection gate: only `audio/*` payloads are accepted.
    pub fn is_audio(&self) -> bool {
        self.mime.starts_with("audio/")
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Lowercase extension of the original file name ("" when absent).
    /// Used to name the staged preview file so rodio can sniff the codec.
    pub fn extension(&self) -> String {
        Path::new(&self.name)
            .extension()
            .unwrap_or_default()
            .to_string_lossy()
            .to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_tag_as_audio() {
        for ext in AUDIO_EXTENSIONS {
            let name = format!("clip.{ext}");
            assert!(
                media_type_for(&name).starts_with("audio/"),
                "{name} should tag as audio"
            );
        }
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert_eq!(media_type_for("VOICE.MP3"), "audio/mpeg");
        assert_eq!(media_type_for("mix.Flac"),  "audio/flac");
    }

    #[test]
    fn unknown_and_missing_extensions_are_rejected_by_the_gate() {
        for name in ["movie.mp4", "readme", "archive.tar.gz", ""] {
            let clip = SourceClip::new(
                name.to_string(),
                media_type_for(name).to_string(),
                vec![0, 1, 2],
            );
            assert!(!clip.is_audio(), "{name:?} should not pass the audio gate");
        }
    }

    #[test]
    fn audio_gate_accepts_any_audio_subtype() {
        let clip = SourceClip::new("take.oga".into(), "audio/x-vorbis".into(), vec![]);
        assert!(clip.is_audio());
    }

    #[test]
    fn clones_share_the_payload() {
        let clip = SourceClip::new("a.wav".into(), "audio/wav".into(), vec![7; 64]);
        let snapshot = clip.clone();
        assert!(Arc::ptr_eq(&clip.bytes, &snapshot.bytes));
        assert_eq!(snapshot.size_bytes(), 64);
    }
}
