// crates/trimwire-core/src/job.rs
//
// Types that flow across the channel between trimwire-client's worker and
// the UI. No egui or HTTP types, just plain data.

use uuid::Uuid;

use crate::clip::SourceClip;
use crate::error::ProcessError;
use crate::state::{Action, OutputFormat};

/// Frozen snapshot of selection + parameters, taken the moment a submission
/// enters flight. The live model can change freely afterwards; the worker
/// only ever sees this copy.
#[derive(Clone, Debug)]
pub struct ProcessJob {
    pub job_id: Uuid,
    pub clip:   SourceClip,
    pub action: Action,
    pub format: OutputFormat,
}

/// Results sent from the worker threads back to the UI.
#[derive(Debug)]
pub enum ProcessUpdate {
    /// The startup health probe settled.
    ServerStatus { online: bool },
    /// The service returned processed audio for this job.
    Done   { job_id: Uuid, format: OutputFormat, bytes: Vec<u8> },
    /// The submission settled in failure: HTTP error body or transport fault.
    Failed { job_id: Uuid, error: ProcessError },
}
