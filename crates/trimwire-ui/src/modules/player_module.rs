// crates/trimwire-ui/src/modules/player_module.rs
//
// PlayerModule: bottom bar for auditioning the input preview and the
// processed result. Playback itself lives in AppContext (which owns the
// rodio stream); app.rs copies the readouts below into the pub fields
// each frame before calling ui().

use super::EditorModule;
use crate::theme::{ACCENT, DARK_TEXT_DIM};
use egui::{Align, Layout, RichText, Ui};
use trimwire_client::Selection;
use trimwire_core::commands::EditorCommand;
use trimwire_core::helpers::time::format_clock;
use trimwire_core::state::{EditorState, PreviewSource};

#[derive(Default)]
pub struct PlayerModule {
    /// Whether a processed result is currently staged.
    pub has_result: bool,
    /// Active playback: what is playing, elapsed secs, total secs if known.
    pub playback:   Option<(PreviewSource, f64, Option<f64>)>,
}

impl EditorModule for PlayerModule {
    fn name(&self) -> &str { "Player" }

    fn ui(&mut self, ui: &mut Ui, state: &EditorState, selection: &Selection, cmd: &mut Vec<EditorCommand>) {
        ui.horizontal_centered(|ui| {
            self.preview_button(ui, cmd, PreviewSource::Input, "Input", !selection.is_empty());
            self.preview_button(ui, cmd, PreviewSource::Result, "Result", self.has_result);

            if ui
                .add_enabled(self.has_result, egui::Button::new(RichText::new("💾 Save").size(11.0)))
                .clicked()
            {
                cmd.push(EditorCommand::SaveResult);
            }

            ui.separator();

            // ── Clock ────────────────────────────────────────────────────────
            let clock = match self.playback {
                Some((source, elapsed, total)) => {
                    let what = match source {
                        PreviewSource::Input  => "input",
                        PreviewSource::Result => "result",
                    };
                    match total {
                        Some(total) => {
                            format!("{what}  {} / {}", format_clock(elapsed), format_clock(total))
                        }
                        None => format!("{what}  {}", format_clock(elapsed)),
                    }
                }
                None => format_clock(0.0),
            };
            ui.label(RichText::new(clock).size(12.0).monospace().color(ACCENT));

            // ── Volume ───────────────────────────────────────────────────────
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.spacing_mut().slider_width = 90.0;
                let mut volume = state.volume;
                if ui
                    .add(
                        egui::Slider::new(&mut volume, 0.0_f32..=1.0_f32)
                            .show_value(false)
                            .trailing_fill(true),
                    )
                    .changed()
                {
                    cmd.push(EditorCommand::SetVolume(volume));
                }
                let speaker = if state.muted { "🔇" } else { "🔊" };
                if ui.button(RichText::new(speaker).size(12.0)).clicked() {
                    cmd.push(EditorCommand::ToggleMute);
                }
                if state.muted {
                    ui.label(RichText::new("muted").size(10.0).color(DARK_TEXT_DIM));
                }
            });
        });
    }
}

impl PlayerModule {
    /// Play/stop toggle for one staged preview. Disabled while that preview
    /// does not exist.
    fn preview_button(
        &self,
        ui:      &mut Ui,
        cmd:     &mut Vec<EditorCommand>,
        source:  PreviewSource,
        label:   &str,
        enabled: bool,
    ) {
        let playing = matches!(self.playback, Some((active, ..)) if active == source);
        let glyph = if playing { "⏹" } else { "▶" };
        let btn = egui::Button::new(RichText::new(format!("{glyph} {label}")).size(11.0));

        if ui.add_enabled(enabled, btn).clicked() {
            if playing {
                cmd.push(EditorCommand::StopPlayback);
            } else {
                cmd.push(EditorCommand::Play(source));
            }
        }
    }
}
