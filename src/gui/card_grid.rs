use std::time::{
    Duration,
    Instant,
};

use eframe::egui::{
    self,
    text::LayoutJob,
    TextFormat,
};

use crate::{
    core::{
        lesson::{
            self,
            DocumentShape,
            LessonPhase,
            LessonView,
            VocabularyEntry,
        },
        markup::{
            self,
            Span,
        },
    },
    gui::theme::{
        self,
        Theme,
    },
};

const PULSE_DURATION: Duration = Duration::from_millis(200);

/// (group index, entry index) of a card within the rendered document.
type CardKey = (usize, usize);

struct CardRef<'a> {
    key: CardKey,
    group_label: Option<&'a str>,
    entry: &'a VocabularyEntry,
}

pub struct CardGrid {
    pulse: Option<(CardKey, Instant)>,
}

impl CardGrid {
    pub fn new() -> Self {
        Self { pulse: None }
    }

    /// Draws the central panel for the current lesson phase. Returns the
    /// sound file of the card the user clicked this frame, if it has one.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        phase: &LessonPhase,
        columns: u32,
        theme: &Theme,
    ) -> Option<String> {
        if let Some((_, started)) = self.pulse {
            if started.elapsed() >= PULSE_DURATION {
                self.pulse = None;
            } else {
                ctx.request_repaint_after(Duration::from_millis(16));
            }
        }

        let mut clicked_sound = None;

        egui::CentralPanel::default().show(ctx, |ui| match phase {
            LessonPhase::Idle => {
                ui.centered_and_justified(|ui| {
                    ui.label("Pick a topic from the lesson list.");
                });
            }
            LessonPhase::Loading { .. } => {
                ui.centered_and_justified(|ui| {
                    ui.add(egui::Spinner::new());
                });
            }
            LessonPhase::Failed { topic } => {
                ui.colored_label(theme.red(ctx), lesson::failure_message(topic));
            }
            LessonPhase::Rendered { view } => {
                clicked_sound = self.show_lesson(ui, ctx, view, columns, theme);
            }
        });

        clicked_sound
    }

    fn show_lesson(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        view: &LessonView,
        columns: u32,
        theme: &Theme,
    ) -> Option<String> {
        if matches!(view.shape, DocumentShape::Empty) {
            ui.label(lesson::EMPTY_MESSAGE);
            return None;
        }

        ui.heading(theme.heading(ctx, &view.title));
        ui.add_space(10.0);

        let mut cards: Vec<CardRef> = Vec::new();
        match &view.shape {
            DocumentShape::Flat(entries) => {
                for (index, entry) in entries.iter().enumerate() {
                    cards.push(CardRef { key: (0, index), group_label: None, entry });
                }
            }
            DocumentShape::Grouped(groups) => {
                for (group_index, group) in groups.iter().enumerate() {
                    for (index, entry) in group.entries.iter().enumerate() {
                        cards.push(CardRef {
                            key: (group_index, index),
                            group_label: (index == 0).then_some(group.label.as_str()),
                            entry,
                        });
                    }
                }
            }
            DocumentShape::Empty => {}
        }

        let mut clicked_sound = None;
        let mut clicked_key = None;
        let column_count = columns.max(1) as usize;

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.columns(column_count, |columns_ui| {
                for (index, card) in cards.iter().enumerate() {
                    let column = &mut columns_ui[index % column_count];
                    let response = self.draw_card(column, card, view.allow_markup, theme);

                    if response.hovered() {
                        column.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                    }

                    if response.clicked() {
                        clicked_key = Some(card.key);
                        clicked_sound = card
                            .entry
                            .sound
                            .as_deref()
                            .filter(|sound| !sound.is_empty())
                            .map(|sound| sound.to_string());
                    }
                }
            });
        });

        if let Some(key) = clicked_key {
            self.pulse = Some((key, Instant::now()));
        }

        clicked_sound
    }

    fn draw_card(
        &self,
        ui: &mut egui::Ui,
        card: &CardRef,
        allow_markup: bool,
        theme: &Theme,
    ) -> egui::Response {
        let ctx = ui.ctx().clone();
        let base_fill = ui.visuals().widgets.inactive.bg_fill;
        let fill = match self.pulse_factor(card.key) {
            Some(t) => theme::blend_colors(base_fill, theme.highlight(&ctx), t),
            None => base_fill,
        };

        let response = egui::Frame::new()
            .fill(fill)
            .stroke(ui.visuals().widgets.inactive.bg_stroke)
            .corner_radius(6.0)
            .inner_margin(10.0)
            .outer_margin(4.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());

                if let Some(label) = card.group_label {
                    ui.label(
                        egui::RichText::new(label).size(12.0).strong().color(theme.cyan(&ctx)),
                    );
                    ui.add_space(4.0);
                }

                let entry = card.entry;
                let strong_color = ui.visuals().strong_text_color();
                ui.label(styled_job(
                    &markup::spans(&entry.en, allow_markup),
                    20.0,
                    theme.foreground(&ctx),
                    strong_color,
                ));
                ui.label(styled_job(
                    &markup::spans(&entry.jp, allow_markup),
                    18.0,
                    theme.red(&ctx),
                    strong_color,
                ));
                if !entry.romaji.is_empty() {
                    ui.label(
                        egui::RichText::new(&entry.romaji)
                            .size(13.0)
                            .italics()
                            .color(theme.comment(&ctx)),
                    );
                }
            })
            .response;

        response.interact(egui::Sense::click())
    }

    fn pulse_factor(&self, key: CardKey) -> Option<f32> {
        let (pulse_key, started) = self.pulse?;
        if pulse_key != key {
            return None;
        }

        let elapsed = started.elapsed().as_secs_f32();
        let total = PULSE_DURATION.as_secs_f32();
        (elapsed < total).then(|| 1.0 - elapsed / total)
    }
}

impl Default for CardGrid {
    fn default() -> Self {
        Self::new()
    }
}

/// One text line mixing the styles the markup pass produced.
fn styled_job(
    spans: &[Span],
    size: f32,
    color: egui::Color32,
    strong_color: egui::Color32,
) -> LayoutJob {
    let mut job = LayoutJob::default();

    for span in spans {
        let mut format = TextFormat {
            font_id: egui::FontId::proportional(size),
            color: if span.strong { strong_color } else { color },
            italics: span.emphasis,
            ..Default::default()
        };
        if span.underline {
            format.underline = egui::Stroke::new(1.0, format.color);
        }
        job.append(&span.text, 0.0, format);
    }

    job
}
