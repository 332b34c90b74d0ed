// crates/trimwire-ui/src/modules/mod.rs
//
// Module registry. To add a new panel:
//   1. Create modules/mypanel.rs implementing EditorModule
//   2. Add `pub mod mypanel;` below
//   3. Give it a panel in app.rs::update()

pub mod player_module;
pub mod source;
pub mod transform_module;

use egui::Ui;

use trimwire_client::Selection;
use trimwire_core::commands::EditorCommand;
use trimwire_core::state::EditorState;

/// Every editor panel implements this trait.
/// Modules read state and emit commands; only app.rs mutates state or
/// touches the controller.
pub trait EditorModule {
    fn name(&self) -> &str;
    fn ui(
        &mut self,
        ui:        &mut Ui,
        state:     &EditorState,
        selection: &Selection,
        cmd:       &mut Vec<EditorCommand>,
    );
}
