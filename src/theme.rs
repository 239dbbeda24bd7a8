//! Centralized theme constants for Stock History Viewer
//! All colors, sizes, and styling should reference these constants

use egui::Color32;

// =============================================================================
// COLORS - Backgrounds
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0x09, 0x09, 0x0b); // zinc-950
pub const BG_ELEVATED: Color32 = Color32::from_rgb(0x18, 0x18, 0x1b); // zinc-900
pub const BG_INPUT: Color32 = Color32::from_rgb(0x14, 0x14, 0x18); // input field background
pub const BG_SURFACE: Color32 = Color32::from_rgb(0x27, 0x27, 0x2a); // zinc-800
pub const BG_HOVER: Color32 = Color32::from_rgb(0x0f, 0x1a, 0x19); // subtle teal hover
pub const BG_CODE: Color32 = Color32::from_rgb(0x11, 0x11, 0x14); // JSON dump block

// =============================================================================
// COLORS - Accent (Teal)
// =============================================================================
pub const ACCENT: Color32 = Color32::from_rgb(0x2d, 0xd4, 0xbf); // teal-400

// =============================================================================
// COLORS - Text
// =============================================================================
pub const TEXT_PRIMARY: Color32 = Color32::WHITE;
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0xe4, 0xe4, 0xe7); // zinc-200
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0xa1, 0xa1, 0xaa); // zinc-400
pub const TEXT_DIM: Color32 = Color32::from_rgb(0x71, 0x71, 0x7a); // zinc-500

// =============================================================================
// COLORS - Borders
// =============================================================================
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0x27, 0x27, 0x2a); // zinc-800 - faint gray for outlines
pub const BORDER_DEFAULT: Color32 = Color32::from_rgb(0x3f, 0x3f, 0x46); // zinc-700

// =============================================================================
// COLORS - Status
// =============================================================================
pub const STATUS_SUCCESS: Color32 = Color32::from_rgb(0x34, 0xd3, 0x99); // emerald-400
pub const STATUS_ERROR: Color32 = Color32::from_rgb(0xf8, 0x71, 0x71); // red-400
pub const STATUS_ERROR_BG: Color32 = Color32::from_rgb(0x2a, 0x10, 0x12); // red-950-ish
pub const STATUS_ERROR_BORDER: Color32 = Color32::from_rgb(0x99, 0x1b, 0x1b); // red-800
pub const STATUS_SUCCESS_BG: Color32 = Color32::from_rgb(0x0b, 0x1f, 0x18); // emerald-950-ish

// =============================================================================
// COLORS - Buttons
// =============================================================================
pub const BTN_ACCENT: Color32 = Color32::from_rgb(0x2d, 0xd4, 0xbf); // teal-400
pub const BTN_ACCENT_TEXT: Color32 = Color32::from_rgb(0x04, 0x2f, 0x2e); // teal-950

// Disabled state
pub const BTN_DISABLED: Color32 = Color32::from_rgb(0x27, 0x27, 0x2a); // zinc-800
pub const BTN_DISABLED_TEXT: Color32 = Color32::from_rgb(0x71, 0x71, 0x7a); // zinc-500

// =============================================================================
// TYPOGRAPHY - Font Sizes
// =============================================================================
pub const FONT_TITLE: f32 = 24.0;
pub const FONT_HEADING: f32 = 16.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_LABEL: f32 = 13.0;
pub const FONT_SMALL: f32 = 11.0;
pub const FONT_MONO: f32 = 12.0;

// =============================================================================
// DIMENSIONS - Layout
// =============================================================================
pub const CONTENT_MAX_WIDTH: f32 = 960.0;
pub const FIELD_WIDTH: f32 = 240.0;
pub const RESULT_MAX_HEIGHT: f32 = 420.0;

// =============================================================================
// DIMENSIONS - Components
// =============================================================================
pub const BUTTON_HEIGHT_LARGE: f32 = 36.0;
pub const INPUT_HEIGHT: f32 = 28.0;

// =============================================================================
// CORNER RADIUS
// =============================================================================
pub const RADIUS_DEFAULT: f32 = 4.0;
pub const RADIUS_LARGE: f32 = 8.0;

// =============================================================================
// STROKE WIDTHS
// =============================================================================
pub const STROKE_DEFAULT: f32 = 1.0;
pub const STROKE_MEDIUM: f32 = 1.5;

// =============================================================================
// SPACING
// =============================================================================
pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 12.0;
pub const SPACING_XL: f32 = 16.0;
pub const SPACING_XXL: f32 = 32.0;

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = BG_BASE;
    visuals.faint_bg_color = BG_ELEVATED;
    // Text edit background
    visuals.extreme_bg_color = BG_INPUT;
    // Date picker popup
    visuals.window_fill = BG_SURFACE;
    visuals.window_stroke = egui::Stroke::new(STROKE_DEFAULT, BORDER_DEFAULT);
    visuals.hyperlink_color = ACCENT;
    visuals.interact_cursor = Some(egui::CursorIcon::PointingHand);

    // Focused text fields get the accent outline
    visuals.selection.bg_fill = Color32::from_rgb(0x3a, 0x3a, 0x3f);
    visuals.selection.stroke = egui::Stroke::new(STROKE_DEFAULT, ACCENT);

    let widgets = &mut visuals.widgets;
    widgets.noninteractive.bg_stroke = egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE);
    widgets.noninteractive.fg_stroke = egui::Stroke::new(STROKE_DEFAULT, TEXT_SECONDARY);
    widgets.inactive.weak_bg_fill = BG_ELEVATED;
    widgets.inactive.bg_stroke = egui::Stroke::new(STROKE_DEFAULT, BORDER_DEFAULT);
    widgets.inactive.fg_stroke = egui::Stroke::new(STROKE_DEFAULT, TEXT_SECONDARY);
    widgets.hovered.bg_fill = BG_HOVER;
    widgets.hovered.bg_stroke = egui::Stroke::new(STROKE_DEFAULT, ACCENT);
    widgets.hovered.fg_stroke = egui::Stroke::new(STROKE_MEDIUM, TEXT_PRIMARY);
    for w in [
        &mut widgets.noninteractive,
        &mut widgets.inactive,
        &mut widgets.hovered,
        &mut widgets.active,
        &mut widgets.open,
    ] {
        w.corner_radius = RADIUS_DEFAULT.into();
    }

    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
    });
}

// =============================================================================
// HELPER - Frames
// =============================================================================
pub fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_ELEVATED)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_LARGE)
        .inner_margin(egui::Margin::same(SPACING_XXL as i8))
}

/// Creates a section panel frame with fill and border
pub fn section_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_INPUT)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_DEFAULT)
        .inner_margin(egui::Margin::same(SPACING_XL as i8))
}

/// Red alert block for failed fetches
pub fn error_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(STATUS_ERROR_BG)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, STATUS_ERROR_BORDER))
        .corner_radius(RADIUS_DEFAULT)
        .inner_margin(egui::Margin::symmetric(SPACING_XL as i8, SPACING_LG as i8))
}

pub fn success_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(STATUS_SUCCESS_BG)
        .corner_radius(RADIUS_DEFAULT)
        .inner_margin(egui::Margin::same(SPACING_XL as i8))
}

pub fn code_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_CODE)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_DEFAULT)
        .inner_margin(egui::Margin::same(SPACING_LG as i8))
}

// =============================================================================
// HELPER - Button styles
// =============================================================================

/// Accent teal button (for the primary fetch action)
pub fn button_accent(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).size(FONT_BODY).color(BTN_ACCENT_TEXT).strong())
        .fill(BTN_ACCENT)
        .corner_radius(RADIUS_DEFAULT)
}

/// Greyed-out variant shown while the action is unavailable
pub fn button_disabled(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).size(FONT_BODY).color(BTN_DISABLED_TEXT))
        .fill(BTN_DISABLED)
        .corner_radius(RADIUS_DEFAULT)
}
