// crates/trimwire-ui/src/modules/source.rs
use super::EditorModule;
use crate::theme::{ACCENT, DARK_BG_2, DARK_BG_3, DARK_BORDER, DARK_TEXT_DIM};
use egui::{Align, Layout, RichText, Stroke, Ui};
use rfd::FileDialog;
use trimwire_client::Selection;
use trimwire_core::clip::AUDIO_EXTENSIONS;
use trimwire_core::commands::EditorCommand;
use trimwire_core::state::EditorState;

pub struct SourceModule;

impl EditorModule for SourceModule {
    fn name(&self) -> &str { "Source" }

    fn ui(&mut self, ui: &mut Ui, _state: &EditorState, selection: &Selection, cmd: &mut Vec<EditorCommand>) {
        ui.vertical(|ui| {
            // ── Header ──────────────────────────────────────────────────────
            egui::Frame::new()
                .fill(DARK_BG_2)
                .inner_margin(egui::Margin { left: 8, right: 8, top: 6, bottom: 6 })
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("🎵 Source").size(12.0).strong());
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            if ui.button(RichText::new("＋ Import").size(11.0)).clicked() {
                                if let Some(path) = FileDialog::new()
                                    .add_filter("Audio", &AUDIO_EXTENSIONS)
                                    .pick_file()
                                {
                                    cmd.push(EditorCommand::SelectSource(path));
                                }
                            }
                        });
                    });
                });

            ui.separator();

            let Some(clip) = selection.clip() else {
                ui.add_space(40.0);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("🎵").size(32.0));
                    ui.add_space(6.0);
                    ui.label(
                        RichText::new("Drop an audio file here\nor use Import")
                            .size(11.0)
                            .color(DARK_TEXT_DIM),
                    );
                });
                return;
            };

            // ── File card ───────────────────────────────────────────────────
            ui.add_space(4.0);
            egui::Frame::new()
                .fill(DARK_BG_3)
                .stroke(Stroke::new(1.0, DARK_BORDER))
                .corner_radius(egui::CornerRadius::same(5))
                .inner_margin(egui::Margin::same(8))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.add(
                        egui::Label::new(RichText::new(&clip.name).size(11.0).strong())
                            .truncate(),
                    );
                    ui.add_space(2.0);
                    ui.label(RichText::new(&clip.mime).size(10.0).color(DARK_TEXT_DIM));
                    ui.label(
                        RichText::new(format_size(clip.size_bytes()))
                            .size(10.0)
                            .color(ACCENT)
                            .monospace(),
                    );
                });

            ui.add_space(6.0);
            // Swapping or clearing the file stays allowed while a submission is
            // in flight; the job already holds its own snapshot.
            if ui.button(RichText::new("🗑 Clear").size(11.0)).clicked() {
                cmd.push(EditorCommand::ClearSource);
            }
        });
    }
}

fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::format_size;

    #[test]
    fn sizes_pick_a_sensible_unit() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }
}
