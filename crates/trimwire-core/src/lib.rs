// crates/trimwire-core/src/lib.rs
//
// Pure data and state transitions for TrimWire. No I/O and no egui;
// everything here is testable without a window or a network.
//
// To add a new piece of editor state:
//   1. Add the field/variant in state.rs with its transition method
//   2. Add an EditorCommand variant in commands.rs
//   3. Handle it in trimwire-ui's app.rs command match

pub mod clip;
pub mod commands;
pub mod error;
pub mod helpers;
pub mod job;
pub mod state;

// Re-export the types nearly every consumer touches so imports stay short.
pub use clip::SourceClip;
pub use commands::EditorCommand;
pub use error::{ProcessError, SelectError};
pub use job::{ProcessJob, ProcessUpdate};
pub use state::{
    Action, ActionKind, EditorState, OutputFormat, PreviewSource, SubmissionState, TrimBound,
};
