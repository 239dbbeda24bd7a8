//! Reusable UI components
//!
//! This module contains standalone UI components that can be used
//! throughout the application.

use crate::theme;
use chrono::NaiveDate;
use eframe::egui;
use serde_json::Value;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of entries, when the payload is a list
pub fn entry_count(data: &Value) -> Option<usize> {
    data.as_array().map(Vec::len)
}

/// Payload dump with two-space indentation
pub fn pretty_json(data: &Value) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string())
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Small muted label above an input
pub fn field_label(ui: &mut egui::Ui, text: &str) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(text)
                .size(theme::FONT_LABEL)
                .color(theme::TEXT_MUTED),
        )
        .selectable(false),
    );
}

/// Date text field with a calendar button next to it.
/// Picking a date overwrites the text; typing stays free-form.
/// Returns the text field's response.
pub fn date_field(ui: &mut egui::Ui, id: &str, text: &mut String) -> egui::Response {
    ui.horizontal(|ui| {
        let response = ui.add_sized(
            [theme::FIELD_WIDTH - 48.0, theme::INPUT_HEIGHT],
            egui::TextEdit::singleline(text)
                .hint_text("YYYY-MM-DD")
                .vertical_align(egui::Align::Center),
        );

        let mut picked = parse_date(text).unwrap_or_else(|| chrono::Local::now().date_naive());
        let picker = ui.add(
            egui_extras::DatePickerButton::new(&mut picked)
                .id_salt(id)
                .format("")
                .calendar_week(false),
        );
        if picker.changed() {
            *text = format_date(picked);
        }

        response
    })
    .inner
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_only_lists() {
        assert_eq!(entry_count(&json!([1, 2, 3])), Some(3));
        assert_eq!(entry_count(&json!([])), Some(0));
        assert_eq!(entry_count(&json!({"rows": [1]})), None);
        assert_eq!(entry_count(&json!("text")), None);
    }

    #[test]
    fn pretty_json_uses_two_space_indent() {
        let text = pretty_json(&json!([{"close": 100}]));
        assert_eq!(text, "[\n  {\n    \"close\": 100\n  }\n]");
    }

    #[test]
    fn dates_use_iso_format() {
        let date = parse_date(" 2023-01-31 ").unwrap();
        assert_eq!(format_date(date), "2023-01-31");
        assert!(parse_date("31/01/2023").is_none());
        assert!(parse_date("").is_none());
    }
}
