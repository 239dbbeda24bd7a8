//! App module - contains the main application state and logic

mod form;
mod views;

use form::FetchForm;

use crate::constants::*;
use crate::settings::Settings;
use crate::theme;
use crate::types::ViewState;
use crate::ui::components::pretty_json;
use crate::utils::endpoint_url;
use eframe::egui;
use std::path::PathBuf;
use tracing::info;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) form: FetchForm,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) client: reqwest::Client,
    pub(crate) backend_url: String,
    // Pretty-printed payload of the current success state
    pub(crate) result_text: Option<String>,
    // Settings
    pub(crate) settings: Settings,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        // Apply theme from theme.rs
        theme::apply_visuals(&cc.egui_ctx);

        let runtime = tokio::runtime::Runtime::new()?;
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let backend_url = settings.resolve_backend_url();
        info!(backend = %backend_url, "Backend configured");

        Ok(Self {
            form: FetchForm::default(),
            runtime,
            client,
            backend_url,
            result_text: None,
            settings,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        })
    }

    /// Kick off a fetch with the current form contents.
    pub fn submit(&mut self, ctx: &egui::Context) {
        let url = endpoint_url(&self.backend_url);
        self.form.submit(self.runtime.handle(), &self.client, url, ctx);
    }

    /// Pick up a finished request and refresh the cached payload dump.
    pub fn poll_fetch_result(&mut self) {
        if self.form.poll() {
            self.result_text = match self.form.state() {
                ViewState::Success { data, .. } => Some(pretty_json(data)),
                _ => None,
            };
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            ..self.settings.clone()
        };
        settings.save(&self.data_dir);
    }

    pub fn app_title() -> String {
        format!("{} v{}", APP_NAME, APP_VERSION)
    }
}
