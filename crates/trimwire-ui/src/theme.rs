// crates/trimwire-ui/src/theme.rs
use egui::{Color32, Context, Stroke, Style, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────
pub const ACCENT:       Color32 = Color32::from_rgb( 45, 200, 175);
pub const ACCENT_DIM:   Color32 = Color32::from_rgb( 22, 118, 102);
pub const ACCENT_HOVER: Color32 = Color32::from_rgb( 96, 228, 205);

pub const DARK_BG_0:     Color32 = Color32::from_rgb( 13,  15,  15);
pub const DARK_BG_1:     Color32 = Color32::from_rgb( 19,  22,  22);
pub const DARK_BG_2:     Color32 = Color32::from_rgb( 26,  31,  31);
pub const DARK_BG_3:     Color32 = Color32::from_rgb( 36,  43,  43);
pub const DARK_BG_4:     Color32 = Color32::from_rgb( 48,  57,  57);

pub const DARK_TEXT:     Color32 = Color32::from_rgb(218, 226, 224);
pub const DARK_TEXT_DIM: Color32 = Color32::from_rgb(116, 130, 127);
pub const DARK_BORDER:   Color32 = Color32::from_rgb( 52,  63,  61);

// Status colours shared by the submit banners and the service dot.
pub const SUCCESS: Color32 = Color32::from_rgb( 80, 190, 120);
pub const DANGER:  Color32 = Color32::from_rgb(205,  85,  80);

pub fn configure_style(ctx: &Context) {
    let mut style = Style::default();

    style.spacing.item_spacing     = egui::vec2(6.0, 5.0);
    style.spacing.window_margin    = egui::Margin::same(10);
    style.spacing.button_padding   = egui::vec2(10.0, 5.0);
    style.spacing.scroll.bar_width = 8.0;
    style.spacing.indent           = 12.0;

    let cr = egui::CornerRadius::same(4);

    let mut v = Visuals::dark();
    v.panel_fill             = DARK_BG_1;
    v.window_fill            = DARK_BG_2;
    v.faint_bg_color         = DARK_BG_0;
    v.extreme_bg_color       = DARK_BG_0;
    v.window_stroke          = Stroke::new(1.0, DARK_BORDER);

    v.selection.bg_fill      = ACCENT_DIM;
    v.selection.stroke       = Stroke::new(1.0, ACCENT);
    v.hyperlink_color        = ACCENT_HOVER;

    v.widgets.noninteractive.bg_fill       = DARK_BG_2;
    v.widgets.noninteractive.bg_stroke     = Stroke::new(1.0, DARK_BORDER);
    v.widgets.noninteractive.fg_stroke     = Stroke::new(1.0, DARK_TEXT_DIM);
    v.widgets.noninteractive.corner_radius = cr;

    v.widgets.inactive.bg_fill             = DARK_BG_3;
    v.widgets.inactive.bg_stroke           = Stroke::new(1.0, DARK_BORDER);
    v.widgets.inactive.fg_stroke           = Stroke::new(1.0, DARK_TEXT);
    v.widgets.inactive.corner_radius       = cr;

    v.widgets.hovered.bg_fill              = DARK_BG_4;
    v.widgets.hovered.bg_stroke            = Stroke::new(1.0, ACCENT_DIM);
    v.widgets.hovered.fg_stroke            = Stroke::new(1.5, ACCENT_HOVER);
    v.widgets.hovered.corner_radius        = cr;

    v.widgets.active.bg_fill               = ACCENT_DIM;
    v.widgets.active.bg_stroke             = Stroke::new(1.0, ACCENT);
    v.widgets.active.fg_stroke             = Stroke::new(2.0, Color32::WHITE);
    v.widgets.active.corner_radius         = cr;

    v.widgets.open.bg_fill                 = DARK_BG_4;
    v.widgets.open.bg_stroke               = Stroke::new(1.0, ACCENT_DIM);
    v.widgets.open.fg_stroke               = Stroke::new(1.5, ACCENT_HOVER);
    v.widgets.open.corner_radius           = cr;

    v.override_text_color = Some(DARK_TEXT);

    // Style first, visuals second; set_style would otherwise reset the
    // visuals to stock dark.
    ctx.set_style(style);
    ctx.set_visuals(v);

    ctx.style_mut(|s| {
        s.visuals.window_corner_radius = cr;
        s.visuals.menu_corner_radius   = cr;
    });
}
