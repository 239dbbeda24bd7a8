//! View rendering (header, input form, result area, footer)

use super::App;
use crate::constants::*;
use crate::theme;
use crate::types::ViewState;
use crate::ui::components::{date_field, entry_count, field_label};
use eframe::egui;
use egui_phosphor::regular as icons;

fn enter_pressed(ui: &egui::Ui, response: &egui::Response) -> bool {
    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}

impl App {
    pub(crate) fn render_page(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(theme::SPACING_XXL);
                ui.vertical_centered(|ui| {
                    ui.set_max_width(theme::CONTENT_MAX_WIDTH);
                    theme::card_frame().show(ui, |ui| {
                        ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                            self.render_header(ui);
                            let mut submit = self.render_form(ui);
                            submit |= self.render_submit_button(ui);
                            if submit {
                                self.submit(ctx);
                            }
                            self.render_result(ui);
                            self.render_footer(ui);
                        });
                    });
                });
                ui.add_space(theme::SPACING_XXL);
            });
    }

    fn render_header(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add(
                egui::Label::new(
                    egui::RichText::new(TITLE)
                        .size(theme::FONT_TITLE)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                )
                .selectable(false),
            );
        });
        ui.add_space(theme::SPACING_XXL);
    }

    /// Returns true when Enter was pressed in one of the fields.
    fn render_form(&mut self, ui: &mut egui::Ui) -> bool {
        let form = &mut self.form;
        let mut enter = false;

        theme::section_frame().show(ui, |ui| {
            ui.columns(3, |cols| {
                field_label(&mut cols[0], "Stock Symbol (e.g., TCS, INFY)");
                let symbol = cols[0].add_sized(
                    [theme::FIELD_WIDTH, theme::INPUT_HEIGHT],
                    egui::TextEdit::singleline(&mut form.stock_symbol)
                        .hint_text("e.g., RELIANCE")
                        .vertical_align(egui::Align::Center),
                );
                if symbol.changed() {
                    form.normalize_symbol();
                }
                enter |= enter_pressed(&cols[0], &symbol);

                field_label(&mut cols[1], "Historical Start Date");
                let start = date_field(&mut cols[1], "start_date_picker", &mut form.start_date);
                enter |= enter_pressed(&cols[1], &start);

                field_label(&mut cols[2], "Historical End Date");
                let end = date_field(&mut cols[2], "end_date_picker", &mut form.end_date);
                enter |= enter_pressed(&cols[2], &end);
            });
        });
        ui.add_space(theme::SPACING_XL);

        enter && self.form.can_submit()
    }

    /// Returns true when the button was clicked.
    fn render_submit_button(&self, ui: &mut egui::Ui) -> bool {
        let enabled = self.form.can_submit();
        let loading = self.form.is_loading();
        let label = if loading {
            format!("{}  Fetching Data...", icons::HOURGLASS)
        } else {
            format!("{}  Fetch Historical Data", icons::DOWNLOAD_SIMPLE)
        };
        let button = if enabled {
            theme::button_accent(label)
        } else {
            theme::button_disabled(label)
        };

        let clicked = ui
            .vertical_centered(|ui| {
                let response = ui.add_enabled(
                    enabled,
                    button.min_size(egui::vec2(240.0, theme::BUTTON_HEIGHT_LARGE)),
                );
                if loading {
                    ui.add_space(theme::SPACING_SM);
                    ui.add(egui::Spinner::new().color(theme::ACCENT));
                }
                response.clicked()
            })
            .inner;
        ui.add_space(theme::SPACING_XL);
        clicked
    }

    fn render_result(&self, ui: &mut egui::Ui) {
        match self.form.state() {
            ViewState::Idle | ViewState::Loading => {}
            ViewState::Error(message) => {
                theme::error_frame().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal_wrapped(|ui| {
                        ui.label(
                            egui::RichText::new(format!("{} Error!", icons::WARNING_CIRCLE))
                                .strong()
                                .color(theme::STATUS_ERROR),
                        );
                        ui.label(egui::RichText::new(message).color(theme::STATUS_ERROR));
                    });
                });
                ui.add_space(theme::SPACING_XL);
            }
            ViewState::Success { symbol, data } => {
                theme::success_frame().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(
                        egui::RichText::new(format!("{} Data Fetched Successfully!", icons::CHECK_CIRCLE))
                            .size(theme::FONT_HEADING)
                            .strong()
                            .color(theme::STATUS_SUCCESS),
                    );
                    if let Some(count) = entry_count(data) {
                        ui.label(
                            egui::RichText::new(format!("Received {} entries for {}.", count, symbol))
                                .size(theme::FONT_BODY)
                                .color(theme::TEXT_SECONDARY),
                        );
                    }
                    ui.add_space(theme::SPACING_MD);

                    theme::code_frame().show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        egui::ScrollArea::both()
                            .id_salt("historical_data_dump")
                            .max_height(theme::RESULT_MAX_HEIGHT)
                            .auto_shrink([false, true])
                            .show(ui, |ui| {
                                ui.add(
                                    egui::Label::new(
                                        egui::RichText::new(self.result_text.as_deref().unwrap_or_default())
                                            .monospace()
                                            .size(theme::FONT_MONO)
                                            .color(theme::TEXT_SECONDARY),
                                    )
                                    .selectable(true)
                                    .extend(),
                                );
                            });
                    });
                });
                ui.add_space(theme::SPACING_XL);
            }
        }
    }

    fn render_footer(&self, ui: &mut egui::Ui) {
        ui.add_space(theme::SPACING_LG);
        theme::section_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("Disclaimer:")
                        .size(theme::FONT_LABEL)
                        .strong()
                        .color(theme::TEXT_MUTED),
                );
                ui.label(
                    egui::RichText::new(DISCLAIMER)
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                );
                ui.add_space(theme::SPACING_MD);
                ui.label(
                    egui::RichText::new(format!("{} Backend: {}", icons::LINK, self.backend_url))
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                );
            });
        });
    }
}
