// crates/trimwire-ui/src/app.rs
use std::path::Path;

use eframe::egui;
use rfd::FileDialog;

use trimwire_client::{load_clip, Selection, ServerConfig, SubmissionController, SubmitOutcome};
use trimwire_core::commands::EditorCommand;
use trimwire_core::state::{EditorState, PreviewSource};

use crate::context::AppContext;
use crate::modules::{
    player_module::PlayerModule, source::SourceModule, transform_module::TransformModule,
    EditorModule,
};
use crate::theme;

// ── App ───────────────────────────────────────────────────────────────────────

pub struct TrimWireApp {
    state:     EditorState,
    selection: Selection,
    context:   AppContext,
    // Panel modules as concrete types, so a typo'd module is a compile
    // error instead of a silently blank panel.
    source:    SourceModule,
    transform: TransformModule,
    player:    PlayerModule,
    /// Commands emitted by modules each frame, processed after the UI pass
    pending_cmds: Vec<EditorCommand>,
}

impl TrimWireApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> anyhow::Result<Self> {
        theme::configure_style(&cc.egui_ctx);
        // Pin to dark mode so an OS light/dark switch cannot overwrite the theme.
        cc.egui_ctx.options_mut(|o| {
            o.theme_preference = egui::ThemePreference::Dark;
        });

        let controller = SubmissionController::new(ServerConfig::from_env())?;
        // One availability probe at startup; submissions report their own
        // failures, so the dot is informative only.
        controller.probe_server();

        Ok(Self {
            state:        EditorState::default(),
            selection:    Selection::default(),
            context:      AppContext::new(controller),
            source:       SourceModule,
            transform:    TransformModule,
            player:       PlayerModule::default(),
            pending_cmds: Vec::new(),
        })
    }

    fn process_command(&mut self, cmd: EditorCommand) {
        match cmd {
            // ── Source ───────────────────────────────────────────────────────
            EditorCommand::SelectSource(path) => self.import_file(&path),
            EditorCommand::ClearSource => {
                if self.context.playing() == Some(PreviewSource::Input) {
                    self.context.stop();
                }
                self.selection.clear();
            }

            // ── Transform parameters ─────────────────────────────────────────
            EditorCommand::SetAction(kind) => self.state.set_action(kind),
            EditorCommand::AdjustTrimBound { bound, delta } => {
                self.state.adjust_trim_bound(bound, delta);
            }
            EditorCommand::SetSpeedFactor(value) => self.state.set_speed_factor(value),
            EditorCommand::SetOutputFormat(format) => self.state.set_output_format(format),

            // ── Submission ───────────────────────────────────────────────────
            EditorCommand::Submit => {
                match self.context.controller.submit(&mut self.state, &self.selection) {
                    Ok(SubmitOutcome::Dispatched(job)) => log::info!("submitted job {job}"),
                    Ok(SubmitOutcome::AlreadyInFlight) => {}
                    Err(e) => self.state.notice = Some(e.to_string()),
                }
            }
            EditorCommand::DismissStatus => self.state.dismiss_submission(),

            // ── Playback ─────────────────────────────────────────────────────
            EditorCommand::Play(source) => self.play_preview(source),
            EditorCommand::StopPlayback => self.context.stop(),
            EditorCommand::SetVolume(volume) => self.state.set_volume(volume),
            EditorCommand::ToggleMute => self.state.toggle_mute(),

            // ── Result ───────────────────────────────────────────────────────
            EditorCommand::SaveResult => self.save_result(),
        }
    }

    fn import_file(&mut self, path: &Path) {
        // A successful select deletes the old staged preview; make sure no
        // sink is still reading it.
        if self.context.playing() == Some(PreviewSource::Input) {
            self.context.stop();
        }
        match load_clip(path) {
            Ok(clip) => match self.selection.select(clip) {
                Ok(()) => self.state.notice = None,
                Err(e) => self.state.notice = Some(e.to_string()),
            },
            Err(e) => {
                log::warn!("import failed: {e:#}");
                self.state.notice = Some(format!("{e:#}"));
            }
        }
    }

    fn play_preview(&mut self, source: PreviewSource) {
        let path = match source {
            PreviewSource::Input => self.selection.preview().map(|p| p.path().to_path_buf()),
            PreviewSource::Result => {
                self.context.controller.result().map(|r| r.path().to_path_buf())
            }
        };
        let Some(path) = path else { return };
        if let Err(e) = self.context.play(source, &path, self.state.effective_volume()) {
            log::warn!("playback failed: {e:#}");
            self.state.notice = Some(format!("could not play audio: {e}"));
        }
    }

    fn save_result(&mut self) {
        let Some(result) = self.context.controller.result() else { return };

        // The staged result carries the requested output format's extension.
        let extension = result
            .path()
            .extension()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let default_name = format!("processed_audio.{extension}");

        let Some(dest) = FileDialog::new()
            .set_file_name(&default_name)
            .add_filter("Audio", &[extension.as_str()])
            .save_file()
        else {
            return;
        };

        match std::fs::copy(result.path(), &dest) {
            Ok(_) => {
                log::info!("saved processed audio to {}", dest.display());
                let name = dest.file_name().unwrap_or_default().to_string_lossy().to_string();
                self.state.notice = Some(format!("✓ saved {name}"));
            }
            Err(e) => {
                log::error!("save failed for {}: {e}", dest.display());
                self.state.notice = Some(format!("could not save: {e}"));
            }
        }
    }

    fn handle_drag_and_drop(&mut self, ctx: &egui::Context) {
        let files = ctx.input(|i| i.raw.dropped_files.clone());
        for file in files {
            if let Some(path) = file.path {
                self.pending_cmds.push(EditorCommand::SelectSource(path));
            }
        }
    }
}

// ── eframe::App ───────────────────────────────────────────────────────────────

impl eframe::App for TrimWireApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.context.stop();
        self.context.controller.shutdown();
        // Selection and controller drop after this, deleting their staged
        // preview files.
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_drag_and_drop(ctx);
        self.context.ingest(&mut self.state, ctx);

        egui::TopBottomPanel::top("top_panel")
            .exact_height(36.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new("✂ TrimWire")
                            .strong()
                            .size(15.0)
                            .color(theme::ACCENT),
                    );
                    ui.separator();
                    ui.label(
                        egui::RichText::new("Drop an audio file to start").size(12.0).weak(),
                    );

                    let online = self.context.controller.server_online();
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let (color, label) = match online {
                            Some(true)  => (theme::SUCCESS, "service online"),
                            Some(false) => (theme::DANGER, "service unreachable"),
                            None        => (theme::DARK_TEXT_DIM, "checking service…"),
                        };
                        ui.label(egui::RichText::new(label).size(10.0).color(theme::DARK_TEXT_DIM));
                        let (dot, _) =
                            ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
                        ui.painter().circle_filled(dot.center(), 3.5, color);
                    });
                });
            });

        // Player readouts are copied in before the panel draws; the module
        // itself never touches the controller.
        self.player.has_result = self.context.controller.result().is_some();
        self.player.playback   = self.context.playback_position();

        egui::TopBottomPanel::bottom("player_panel")
            .exact_height(52.0)
            .show(ctx, |ui| {
                self.player.ui(ui, &self.state, &self.selection, &mut self.pending_cmds);
            });

        egui::SidePanel::left("source_panel")
            .resizable(true)
            .default_width(250.0)
            .min_width(200.0)
            .show(ctx, |ui| {
                self.source.ui(ui, &self.state, &self.selection, &mut self.pending_cmds);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.transform.ui(ui, &self.state, &self.selection, &mut self.pending_cmds);
        });

        // ── Process commands emitted by modules this frame ────────────────────
        let cmds: Vec<EditorCommand> = self.pending_cmds.drain(..).collect();
        for cmd in cmds {
            self.process_command(cmd);
        }

        // ── Playback upkeep ───────────────────────────────────────────────────
        self.context.tick(&self.state);
        if self.context.playing().is_some() {
            // Keep the clock moving without waiting for input events.
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
