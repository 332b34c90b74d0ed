// crates/trimwire-client/src/controller.rs
//
// The submission controller: glues the pure submission machine to the
// worker thread and owns the result-preview slot. Every rule about WHEN a
// request may leave lives here; HOW it goes on the wire lives in
// request.rs.

use uuid::Uuid;

use trimwire_core::error::ProcessError;
use trimwire_core::job::{ProcessJob, ProcessUpdate};
use trimwire_core::state::EditorState;

use crate::endpoint::ServerConfig;
use crate::preview::PreviewHandle;
use crate::selection::Selection;
use crate::worker::ProcessWorker;

/// What a submit attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A frozen job left for the worker; its id is now in SubmissionState.
    Dispatched(Uuid),
    /// A submission was already in flight; nothing was sent.
    AlreadyInFlight,
}

pub struct SubmissionController {
    worker: ProcessWorker,
    /// Latest processed audio. Survives later failed submissions; only the
    /// next success replaces (and thereby releases) it.
    result: Option<PreviewHandle>,
    /// Reachability as reported by the startup probe. None until it lands.
    server_online: Option<bool>,
}

impl SubmissionController {
    pub fn new(config: ServerConfig) -> anyhow::Result<Self> {
        Ok(Self {
            worker:        ProcessWorker::new(config)?,
            result:        None,
            server_online: None,
        })
    }

    /// Kick off the health probe; call once at startup. Kept out of new()
    /// so constructing a controller performs no network activity at all.
    pub fn probe_server(&self) {
        self.worker.probe_server();
    }

    /// Submit the current selection + parameters.
    ///
    /// Guards run in machine order: the single-flight check first (a no-op,
    /// not an error), then the no-file precondition. Neither touches the
    /// network. On dispatch, the frozen ProcessJob is the only thing the
    /// worker ever sees; later edits to the live model cannot reach it.
    pub fn submit(
        &self,
        state: &mut EditorState,
        selection: &Selection,
    ) -> Result<SubmitOutcome, ProcessError> {
        if state.submission.is_submitting() {
            log::info!("submit ignored: a submission is already in flight");
            return Ok(SubmitOutcome::AlreadyInFlight);
        }

        let clip = selection.clip().ok_or(ProcessError::NoFileSelected)?;

        let job_id = Uuid::new_v4();
        let job = ProcessJob {
            job_id,
            clip:   clip.clone(),
            action: state.action,
            format: state.format,
        };

        // Cannot refuse here (the in-flight case returned above), but the
        // machine stays the single authority on entering Submitting.
        if !state.begin_submission(job_id) {
            return Ok(SubmitOutcome::AlreadyInFlight);
        }
        self.worker.submit(job);
        Ok(SubmitOutcome::Dispatched(job_id))
    }

    /// Drain settled updates into the state machine. `on_result` fires once
    /// per successful submission, with the freshly staged result handle.
    ///
    /// Settlements are matched against the in-flight job id, so a stale one
    /// from a superseded job changes nothing.
    pub fn ingest_updates(
        &mut self,
        state: &mut EditorState,
        mut on_result: impl FnMut(&PreviewHandle),
    ) {
        while let Ok(update) = self.worker.rx.try_recv() {
            match update {
                ProcessUpdate::ServerStatus { online } => {
                    self.server_online = Some(online);
                }
                ProcessUpdate::Done { job_id, format, bytes } => {
                    if state.submission.in_flight_job() != Some(job_id) {
                        log::info!("stale success for job {job_id} ignored");
                        continue;
                    }
                    match PreviewHandle::stage(&bytes, format.extension()) {
                        Ok(handle) => {
                            state.finish_submission(job_id);
                            // Slot replacement drops (= releases) the
                            // previous result.
                            self.result = Some(handle);
                            if let Some(handle) = &self.result {
                                on_result(handle);
                            }
                        }
                        Err(e) => {
                            log::error!("job {job_id}: could not stage result: {e}");
                            state.fail_submission(
                                job_id,
                                format!("could not stage result: {e}"),
                            );
                        }
                    }
                }
                ProcessUpdate::Failed { job_id, error } => {
                    // A failure never touches self.result: an earlier
                    // success stays staged behind the error banner.
                    if state.fail_submission(job_id, error.to_string()) {
                        log::info!("job {job_id} failed: {error}");
                    } else {
                        log::info!("stale failure for job {job_id} ignored");
                    }
                }
            }
        }
    }

    /// The latest successfully processed audio, if any.
    pub fn result(&self) -> Option<&PreviewHandle> {
        self.result.as_ref()
    }

    pub fn server_online(&self) -> Option<bool> {
        self.server_online
    }

    pub fn shutdown(&self) {
        self.worker.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submitting_without_a_file_never_enters_the_machine() {
        let controller = SubmissionController::new(
            ServerConfig::with_base_url("http://127.0.0.1:9"),
        )
        .expect("controller");
        let mut state = EditorState::default();

        let err = controller
            .submit(&mut state, &Selection::default())
            .unwrap_err();
        assert_eq!(err, ProcessError::NoFileSelected);
        assert_eq!(state.submission, trimwire_core::state::SubmissionState::Idle);
    }
}
