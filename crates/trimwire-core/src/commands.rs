// crates/trimwire-core/src/commands.rs
//
// Every user action in TrimWire is expressed as an EditorCommand.
// Modules emit these; app.rs processes them after the UI pass.
// Adding a new feature = add a variant here + one match arm in app.rs.

use std::path::PathBuf;

use crate::state::{ActionKind, OutputFormat, PreviewSource, TrimBound};

#[derive(Debug, Clone)]
pub enum EditorCommand {
    // ── Source ───────────────────────────────────────────────────────────────
    /// Load the file at this path and make it the active selection. Emitted
    /// by the import button and the drag-and-drop handler; both entry points
    /// share one validation path.
    SelectSource(PathBuf),
    /// Drop the current selection and release its staged preview.
    ClearSource,

    // ── Transform parameters ─────────────────────────────────────────────────
    /// Switch the active action variant; its parameters reset to defaults.
    SetAction(ActionKind),
    /// Nudge one trim bound by `delta` seconds (floored at 0). The numeric
    /// entry field emits this too, with delta = entered - current.
    AdjustTrimBound { bound: TrimBound, delta: i64 },
    SetSpeedFactor(f32),
    SetOutputFormat(OutputFormat),

    // ── Submission ───────────────────────────────────────────────────────────
    /// Freeze the current selection + parameters into a job and hand it to
    /// the worker. Ignored while a submission is already in flight.
    Submit,
    /// Dismiss the success/failure banner and any notice line, returning
    /// the submission machine to Idle.
    DismissStatus,

    // ── Playback ─────────────────────────────────────────────────────────────
    Play(PreviewSource),
    StopPlayback,
    SetVolume(f32),
    ToggleMute,

    // ── Result ───────────────────────────────────────────────────────────────
    /// Open a save dialog and copy the processed audio to the chosen path.
    SaveResult,
}
