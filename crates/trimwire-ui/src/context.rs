// crates/trimwire-ui/src/context.rs
//
// AppContext owns the runtime handles that are not part of EditorState:
// the submission controller (worker thread + staged result) and the rodio
// output. TrimWireApp holds one of these plus the EditorState, the
// Selection, and the module list, nothing else.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;
use eframe::egui;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use trimwire_client::SubmissionController;
use trimwire_core::state::{EditorState, PreviewSource, SubmissionState};

/// One playing sink and what it is playing. Dropping the sink stops it.
struct ActiveSink {
    source: PreviewSource,
    sink:   Sink,
    total:  Option<Duration>,
}

pub struct AppContext {
    pub controller: SubmissionController,

    // OutputStream must outlive every sink; dropping it cuts all audio.
    // Opened lazily on the first play so startup succeeds on machines with
    // no output device attached.
    audio_stream: Option<OutputStream>,
    active:       Option<ActiveSink>,
}

impl AppContext {
    pub fn new(controller: SubmissionController) -> Self {
        Self {
            controller,
            audio_stream: None,
            active:       None,
        }
    }

    /// Drain worker updates into the submission machine. Called once per
    /// frame, before the panels draw.
    pub fn ingest(&mut self, state: &mut EditorState, egui_ctx: &egui::Context) {
        // A settlement replaces the result slot and deletes the superseded
        // staged file during the drain. That file must be closed first: the
        // delete fails on Windows while a sink holds it open, leaking the
        // temp file.
        if must_close_result_sink(self.playing(), &state.submission) {
            self.stop();
        }

        let mut fresh_result = false;
        self.controller.ingest_updates(state, |handle| {
            log::info!("processed audio staged at {}", handle.path().display());
            fresh_result = true;
        });
        if fresh_result {
            egui_ctx.request_repaint();
        }

        // Keep draining while a job is in flight even if no input arrives.
        if state.submission.is_submitting() {
            egui_ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    // ── Playback ─────────────────────────────────────────────────────────────

    /// Decode the staged file at `path` and start playing it, replacing any
    /// current sink.
    pub fn play(&mut self, source: PreviewSource, path: &Path, volume: f32) -> anyhow::Result<()> {
        self.stop();

        if self.audio_stream.is_none() {
            let stream = OutputStreamBuilder::open_default_stream()
                .context("could not open the audio output device")?;
            self.audio_stream = Some(stream);
        }

        let file = File::open(path)
            .with_context(|| format!("could not open {}", path.display()))?;
        let decoder = Decoder::new(BufReader::new(file))
            .context("could not decode the staged audio")?;
        let total = decoder.total_duration();

        if let Some(stream) = self.audio_stream.as_ref() {
            // connect_new takes the &Mixer from OutputStream::mixer(); the
            // stream itself stays alive in this struct.
            let sink = Sink::connect_new(&stream.mixer());
            sink.set_volume(volume);
            sink.append(decoder);
            sink.play();
            log::info!("playing {source:?} preview from {}", path.display());
            self.active = Some(ActiveSink { source, sink, total });
        }
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(active) = self.active.take() {
            active.sink.stop();
        }
    }

    /// Per-frame sink upkeep: drop a finished sink, sync the volume.
    pub fn tick(&mut self, state: &EditorState) {
        if self.active.as_ref().is_some_and(|a| a.sink.empty()) {
            self.active = None;
        }
        if let Some(active) = &self.active {
            active.sink.set_volume(state.effective_volume());
        }
    }

    pub fn playing(&self) -> Option<PreviewSource> {
        self.active.as_ref().map(|a| a.source)
    }

    /// Elapsed and total seconds of the active sink, for the player clock.
    pub fn playback_position(&self) -> Option<(PreviewSource, f64, Option<f64>)> {
        self.active.as_ref().map(|a| {
            (
                a.source,
                a.sink.get_pos().as_secs_f64(),
                a.total.map(|t| t.as_secs_f64()),
            )
        })
    }
}

/// True when the next drain could delete the staged file a sink is reading:
/// settlements only land while a submission is in flight, and only the
/// result slot gets replaced by one.
fn must_close_result_sink(playing: Option<PreviewSource>, submission: &SubmissionState) -> bool {
    submission.is_submitting() && playing == Some(PreviewSource::Result)
}
