use eframe::egui::{
    self,
    containers,
};

use crate::{
    gui::{
        about::AboutModal,
        settings::{
            SettingsData,
            SettingsModal,
        },
        theme::Theme,
    },
    persistence::store::{
        self,
        StateStore,
        LESSON_COLUMNS_KEY,
    },
};

pub const DEFAULT_COLUMNS: u32 = 3;
pub const MAX_COLUMNS: u32 = 4;

/// Column-count preference, clamped to the 1..=4 layouts the grid supports.
pub fn lesson_columns(state_store: &dyn StateStore) -> u32 {
    store::get_json::<u32>(state_store, LESSON_COLUMNS_KEY)
        .unwrap_or(DEFAULT_COLUMNS)
        .clamp(1, MAX_COLUMNS)
}

pub struct TopBar;

impl TopBar {
    /// Draws the menu bar. Returns true when the hamburger was clicked, so
    /// the app can raise the panel toggle with the frame's other requests.
    pub fn show(
        ctx: &egui::Context,
        section_title: &str,
        state_store: &dyn StateStore,
        settings_modal: &mut SettingsModal,
        about_modal: &mut AboutModal,
        current_settings: &SettingsData,
        theme: &Theme,
    ) -> bool {
        let mut toggle_clicked = false;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                if ui.button("☰").on_hover_text("Lessons").clicked() {
                    toggle_clicked = true;
                }

                egui::widgets::global_theme_preference_switch(ui);

                ui.menu_button("View", |ui| {
                    let current = lesson_columns(state_store);
                    ui.label("Card columns");
                    ui.horizontal(|ui| {
                        for columns in 1..=MAX_COLUMNS {
                            if ui
                                .selectable_label(current == columns, columns.to_string())
                                .clicked()
                            {
                                store::set_json(state_store, LESSON_COLUMNS_KEY, &columns);
                                ui.close();
                            }
                        }
                    });
                });

                ui.menu_button("Settings", |ui| {
                    if ui.button("Lesson Settings").clicked() {
                        settings_modal.open_settings(current_settings.clone());
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        about_modal.open();
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(theme.heading(ctx, section_title));
                });
            });
        });

        toggle_clicked
    }
}
