use eframe::egui;

use crate::{
    core::{
        nav::{
            is_desktop,
            NavState,
            OpenRequests,
            Selection,
        },
        taxonomy::{
            self,
            Taxonomy,
        },
    },
    gui::theme::Theme,
    persistence::store::StateStore,
};

pub struct NavPanel;

impl NavPanel {
    /// Draws the lesson tree when the panel is open. Returns the topic the
    /// user clicked this frame, if any.
    pub fn show(
        ctx: &egui::Context,
        taxonomy: &Taxonomy,
        nav: &mut NavState,
        requests: &mut OpenRequests,
        state_store: &dyn StateStore,
        theme: &Theme,
    ) -> Option<Selection> {
        if !nav.open {
            return None;
        }

        let mut clicked: Option<Selection> = None;

        let panel = egui::SidePanel::left("side_nav")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                ui.heading(theme.heading(ctx, "Lessons"));
                ui.separator();

                egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                    for (index, section) in taxonomy.sections.iter().enumerate() {
                        let section_key = Taxonomy::section_key(index);
                        let expanded = nav.expanded.contains(&index);

                        let header = egui::CollapsingHeader::new(&section.name)
                            .id_salt(index)
                            .open(Some(expanded))
                            .show(ui, |ui| {
                                for topic in &section.topics {
                                    let active = nav.is_active(&section_key, topic);
                                    let response =
                                        ui.selectable_label(active, taxonomy::topic_label(topic));

                                    if active && nav.pending_scroll {
                                        response.scroll_to_me(Some(egui::Align::Center));
                                        nav.pending_scroll = false;
                                    }

                                    if response.clicked() {
                                        clicked = Some(Selection::new(
                                            section_key.clone(),
                                            topic.clone(),
                                        ));
                                    }
                                }
                            });

                        if header.header_response.clicked() {
                            nav.toggle_expanded(index, state_store);
                        }
                    }
                });
            });

        // Tapping outside the open panel on a narrow window closes it. The
        // hamburger lands out here too; its toggle outranks the dismissal
        // when the frame's requests are resolved.
        if !is_desktop(ctx.screen_rect().width()) {
            let clicked_outside = ctx.input(|i| {
                i.pointer.any_click()
                    && i.pointer
                        .interact_pos()
                        .is_none_or(|pos| !panel.response.rect.contains(pos))
            });
            if clicked_outside {
                requests.dismiss = true;
            }
        }

        clicked
    }
}
