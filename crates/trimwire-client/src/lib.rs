// crates/trimwire-client/src/lib.rs
//
// No egui dependency: talks to trimwire-ui through plain calls and the
// worker's crossbeam channel only.
//
// To add a new service capability:
//   1. Put the wire logic in request.rs
//   2. Expose it as a ProcessWorker method
//   3. Deliver results as a ProcessUpdate variant and handle them in
//      SubmissionController::ingest_updates

pub mod controller;
pub mod endpoint;
pub mod preview;
pub mod request;
pub mod selection;
pub mod worker;

// Re-export the main public API so trimwire-ui imports stay simple.
pub use controller::{SubmissionController, SubmitOutcome};
pub use endpoint::ServerConfig;
pub use preview::PreviewHandle;
pub use selection::{load_clip, Selection};
pub use worker::ProcessWorker;
