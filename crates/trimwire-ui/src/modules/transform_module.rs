// crates/trimwire-ui/src/modules/transform_module.rs
//
// TransformModule: central panel for configuring a processing request and
// submitting it.
//
// State machine (driven by EditorState::submission, settled by AppContext):
//
//   Idle       → user clicks "Process Audio"
//                → app.rs calls SubmissionController::submit
//                → submission = Submitting { job_id }
//
//   Submitting → submit row shows a spinner; the worker settles the job
//                off-thread and ingest applies the outcome next frame
//
//   Succeeded  → ✓ banner; the result lands in the player bar below
//
//   Failed     → ✗ banner carrying the service's own error text
//
// Dismissing a banner returns the machine to Idle. The panel edits live
// parameters only: a submission snapshots them at dispatch, so changes made
// while one is in flight apply to the next run, never the current one.

use super::EditorModule;
use crate::theme::{ACCENT, DANGER, DARK_BG_2, DARK_BG_3, DARK_BORDER, DARK_TEXT_DIM, SUCCESS};
use egui::{Align, Color32, Layout, Margin, RichText, Stroke, Ui};
use trimwire_client::Selection;
use trimwire_core::commands::EditorCommand;
use trimwire_core::state::{
    Action, ActionKind, EditorState, OutputFormat, SubmissionState, TrimBound,
};

/// Amber used for the transient notice line (prompts, save confirmations).
const NOTICE: Color32 = Color32::from_rgb(230, 180, 80);

pub struct TransformModule;

impl EditorModule for TransformModule {
    fn name(&self) -> &str { "Transform" }

    fn ui(&mut self, ui: &mut Ui, state: &EditorState, selection: &Selection, cmd: &mut Vec<EditorCommand>) {
        ui.vertical(|ui| {
            // ── Header ──────────────────────────────────────────────────────
            egui::Frame::new()
                .fill(DARK_BG_2)
                .inner_margin(Margin { left: 8, right: 8, top: 6, bottom: 6 })
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("✂ Transform").size(12.0).strong());
                    });
                });

            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .scroll_bar_visibility(egui::scroll_area::ScrollBarVisibility::VisibleWhenNeeded)
                .show(ui, |ui| {
                    ui.vertical(|ui| {
                        ui.add_space(4.0);
                        self.show_settings_ui(ui, state, selection, cmd);
                    });
                });
        });
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

impl TransformModule {
    /// Action row / per-action parameters / format / submit row / banners.
    fn show_settings_ui(
        &mut self,
        ui:        &mut Ui,
        state:     &EditorState,
        selection: &Selection,
        cmd:       &mut Vec<EditorCommand>,
    ) {
        ui.add_space(4.0);

        // ── Action ────────────────────────────────────────────────────────────
        ui.label(RichText::new("Action").size(11.0).color(DARK_TEXT_DIM));
        ui.add_space(2.0);
        ui.horizontal(|ui| {
            for kind in ActionKind::ALL {
                let selected = state.action.kind() == kind;
                let btn = egui::Button::new(
                    RichText::new(kind.label())
                        .size(11.0)
                        .color(if selected { ACCENT } else { DARK_TEXT_DIM }),
                )
                .stroke(Stroke::new(1.0, if selected { ACCENT } else { DARK_BORDER }))
                .fill(if selected { DARK_BG_3 } else { DARK_BG_2 });

                // Emit only on an actual switch; the reset-to-defaults rule
                // would otherwise wipe parameters on a stray same-button click.
                if ui.add(btn).clicked() && !selected {
                    cmd.push(EditorCommand::SetAction(kind));
                }
            }
        });

        ui.add_space(10.0);

        // ── Active action's parameters ────────────────────────────────────────
        match state.action {
            Action::Passthrough => {
                ui.label(
                    RichText::new("The file is re-encoded to the output format unchanged.")
                        .size(10.0)
                        .color(DARK_TEXT_DIM),
                );
            }
            Action::Trim { .. } => self.trim_controls(ui, state, cmd),
            Action::Speed { .. } => self.speed_controls(ui, state, cmd),
        }

        ui.add_space(10.0);

        // ── Output format ─────────────────────────────────────────────────────
        ui.label(RichText::new("Output Format").size(11.0).color(DARK_TEXT_DIM));
        ui.add_space(2.0);
        egui::ComboBox::from_id_salt("output_format")
            .selected_text(state.format.label())
            .width(140.0)
            .show_ui(ui, |ui| {
                for format in OutputFormat::ALL {
                    if ui.selectable_label(state.format == format, format.label()).clicked() {
                        cmd.push(EditorCommand::SetOutputFormat(format));
                    }
                }
            });

        ui.add_space(14.0);
        ui.separator();
        ui.add_space(6.0);

        // ── Submit row ────────────────────────────────────────────────────────
        if state.submission.is_submitting() {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new().size(18.0));
                ui.label(RichText::new("Processing…").size(12.0).color(DARK_TEXT_DIM));
            });
        } else {
            let no_file = selection.is_empty();
            let submit_btn = egui::Button::new(
                RichText::new("⚡ Process Audio")
                    .size(13.0)
                    .strong()
                    .color(if no_file { Color32::DARK_GRAY } else { Color32::BLACK }),
            )
            .fill(if no_file { DARK_BG_3 } else { ACCENT })
            .stroke(Stroke::NONE)
            .min_size(egui::vec2(ui.available_width(), 34.0));

            let response = ui.add_enabled(!no_file, submit_btn);
            if response.clicked() {
                cmd.push(EditorCommand::Submit);
            }
            if no_file {
                response.on_hover_text("Import an audio file first");
            }
        }

        // ── Outcome banners ───────────────────────────────────────────────────
        ui.add_space(8.0);
        match &state.submission {
            SubmissionState::Succeeded { .. } => {
                self.banner(ui, cmd, SUCCESS, Color32::from_rgb(26, 56, 40),
                    "🎉 Processing complete. Audition or save it below");
            }
            SubmissionState::Failed { message } => {
                self.banner(ui, cmd, DANGER, Color32::from_rgb(56, 26, 26),
                    &format!("💥 {message}"));
            }
            _ => {}
        }

        if let Some(notice) = &state.notice {
            ui.add_space(4.0);
            ui.label(RichText::new(notice).size(10.0).color(NOTICE));
        }
    }

    fn trim_controls(&mut self, ui: &mut Ui, state: &EditorState, cmd: &mut Vec<EditorCommand>) {
        let (start, end) = state.action.trim_bounds();

        ui.horizontal(|ui| {
            ui.label(RichText::new("Start").size(11.0).color(DARK_TEXT_DIM));
            // DragValue edits a copy; the command carries the difference so
            // typed entry and drag both route through the same floor-at-0 rule.
            let mut start_edit = start as i64;
            if ui
                .add(
                    egui::DragValue::new(&mut start_edit)
                        .range(0..=u32::MAX as i64)
                        .speed(0.1)
                        .suffix(" s"),
                )
                .changed()
            {
                cmd.push(EditorCommand::AdjustTrimBound {
                    bound: TrimBound::Start,
                    delta: start_edit - start as i64,
                });
            }

            ui.add_space(10.0);

            ui.label(RichText::new("End").size(11.0).color(DARK_TEXT_DIM));
            let mut end_edit = end as i64;
            if ui
                .add(
                    egui::DragValue::new(&mut end_edit)
                        .range(0..=u32::MAX as i64)
                        .speed(0.1)
                        .suffix(" s"),
                )
                .changed()
            {
                cmd.push(EditorCommand::AdjustTrimBound {
                    bound: TrimBound::End,
                    delta: end_edit - end as i64,
                });
            }
        });

        ui.add_space(2.0);
        let kept = state.action.effective_trim_secs();
        let hint = if end > 0 && kept == 0 {
            RichText::new("end is not after start, nothing would remain")
                .size(10.0)
                .color(DANGER)
        } else {
            RichText::new(format!("keeps {kept} s of audio"))
                .size(10.0)
                .color(DARK_TEXT_DIM)
        };
        ui.label(hint);
    }

    fn speed_controls(&mut self, ui: &mut Ui, state: &EditorState, cmd: &mut Vec<EditorCommand>) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Factor").size(11.0).color(DARK_TEXT_DIM));
            let mut factor = state.action.speed_factor();
            if ui
                .add(
                    egui::Slider::new(&mut factor, Action::MIN_SPEED..=Action::MAX_SPEED)
                        .step_by(Action::SPEED_STEP as f64)
                        .suffix("×"),
                )
                .changed()
            {
                cmd.push(EditorCommand::SetSpeedFactor(factor));
            }
        });
        ui.add_space(2.0);
        ui.label(
            RichText::new("0.5× half speed · 1.0× unchanged · 2.0× double speed")
                .size(10.0)
                .color(DARK_TEXT_DIM),
        );
    }

    /// Outcome banner: wrapped status text with a dismiss button beneath.
    /// Failure text is the service's words and can be arbitrarily long.
    fn banner(
        &self,
        ui:     &mut Ui,
        cmd:    &mut Vec<EditorCommand>,
        border: Color32,
        fill:   Color32,
        text:   &str,
    ) {
        egui::Frame::new()
            .fill(fill)
            .stroke(Stroke::new(1.0, border))
            .corner_radius(egui::CornerRadius::same(4))
            .inner_margin(Margin::same(8))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(text).size(11.0).color(border));
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button(RichText::new("Dismiss").size(10.0)).clicked() {
                            cmd.push(EditorCommand::DismissStatus);
                        }
                    });
                });
            });
    }
}
