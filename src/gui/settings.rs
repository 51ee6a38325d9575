use eframe::egui;
use serde::{
    Deserialize,
    Serialize,
};

/// Used until the user points the app somewhere else: a `lessons` directory
/// next to the working directory, laid out as `<section>/data/<topic>.json`.
pub const DEFAULT_LESSON_BASE: &str = "lessons";

pub const DEFAULT_MARKUP_TITLE: &str = "Lesson 31: Position of Adverbs";

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsData {
    /// Lesson location: a local directory or an http(s) URL.
    pub lesson_base: String,
    /// Titles of documents that predate the allowHtml flag but still carry
    /// inline markup in their text.
    pub markup_titles: Vec<String>,
    pub dark_mode: bool,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            lesson_base: DEFAULT_LESSON_BASE.to_string(),
            markup_titles: vec![DEFAULT_MARKUP_TITLE.to_string()],
            dark_mode: true,
        }
    }
}

pub struct SettingsModal {
    open: bool,
    temp: SettingsData,
    original: SettingsData,
}

impl SettingsModal {
    pub fn new() -> Self {
        Self { open: false, temp: SettingsData::default(), original: SettingsData::default() }
    }

    pub fn open_settings(&mut self, current_settings: SettingsData) {
        self.temp = current_settings.clone();
        self.original = current_settings;
        self.open = true;
    }

    fn is_dirty(&self) -> bool {
        self.temp != self.original
    }

    pub fn show(&mut self, ctx: &egui::Context) -> Option<SettingsData> {
        if !self.open {
            return None;
        }

        let mut result: Option<SettingsData> = None;

        let modal = egui::Modal::new(egui::Id::new("settings_modal")).show(ctx, |ui| {
            ui.heading("Settings");
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                ui.label("Lesson base:");
                ui.add(egui::TextEdit::singleline(&mut self.temp.lesson_base).desired_width(320.0));
            });
            ui.weak("A lessons folder on disk, or an http(s) URL.");
            ui.add_space(10.0);
            ui.separator();

            let can_save = self.is_dirty() && !self.temp.lesson_base.trim().is_empty();
            if self.temp.lesson_base.trim().is_empty() {
                ui.colored_label(egui::Color32::RED, "⚠ Lesson base must not be empty");
                ui.add_space(5.0);
            }

            ui.horizontal(|ui| {
                let save_clicked = ui.add_enabled(can_save, egui::Button::new("Save")).clicked();
                let cancel_clicked = ui.button("Cancel").clicked();

                let mut reset_clicked = false;
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    reset_clicked = ui.button("Restore Default").clicked();
                });

                if save_clicked {
                    let mut settings = self.temp.clone();
                    settings.lesson_base = settings.lesson_base.trim().to_string();
                    self.original = settings.clone();
                    result = Some(settings);
                    ui.close();
                } else if cancel_clicked {
                    self.temp = self.original.clone();
                    ui.close();
                } else if reset_clicked {
                    let dark_mode = self.temp.dark_mode;
                    self.temp = SettingsData { dark_mode, ..SettingsData::default() };
                }
            });
        });

        if modal.should_close() {
            self.open = false;
        }

        result
    }
}

impl Default for SettingsModal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = SettingsData::default();
        assert_eq!(settings.lesson_base, "lessons");
        assert_eq!(settings.markup_titles, vec![DEFAULT_MARKUP_TITLE.to_string()]);
        assert!(settings.dark_mode);
    }

    #[test]
    fn test_settings_fill_missing_fields() {
        // Older settings files without the newer fields still load.
        let settings: SettingsData =
            serde_json::from_str(r#"{"lesson_base": "/data/lessons"}"#).unwrap();
        assert_eq!(settings.lesson_base, "/data/lessons");
        assert_eq!(settings.markup_titles, vec![DEFAULT_MARKUP_TITLE.to_string()]);
        assert!(settings.dark_mode);
    }
}
