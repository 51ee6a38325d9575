use eframe::egui;

use crate::gui::theme::Theme;

pub struct AboutModal {
    open: bool,
}

impl AboutModal {
    pub fn new() -> Self {
        Self { open: false }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn show(&mut self, ctx: &egui::Context, theme: &Theme) {
        if !self.open {
            return;
        }

        let modal = egui::Modal::new(egui::Id::new("credits_modal")).show(ctx, |ui| {
            ui.set_width(360.0);

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("単語帳").size(24.0));
                ui.label(
                    egui::RichText::new(format!("Tangocho {}", env!("CARGO_PKG_VERSION")))
                        .size(18.0)
                        .strong(),
                );
            });

            ui.add_space(10.0);

            ui.label("A Japanese vocabulary course viewer: sections of lesson cards with readings, romaji, and pronunciation audio.");

            ui.add_space(10.0);
            ui.separator();
            ui.add_space(10.0);

            ui.colored_label(
                theme.comment(ctx),
                "Lesson data and sounds load from the lesson base configured in Settings.",
            );

            ui.add_space(5.0);

            ui.horizontal(|ui| {
                ui.colored_label(theme.comment(ctx), "Interface built with");
                ui.hyperlink_to("egui", "https://github.com/emilk/egui");
            });

            ui.add_space(15.0);

            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Close").clicked() {
                        ui.close();
                    }
                });
            });
        });

        if modal.should_close() {
            self.open = false;
        }
    }
}

impl Default for AboutModal {
    fn default() -> Self {
        Self::new()
    }
}
