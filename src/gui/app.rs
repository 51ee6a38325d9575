use eframe::egui;

use super::{
    about::AboutModal,
    card_grid::CardGrid,
    nav_panel::NavPanel,
    settings::{
        SettingsData,
        SettingsModal,
    },
    theme::{
        set_theme,
        Theme,
    },
    top_bar::{
        self,
        TopBar,
    },
};
use crate::{
    audio::AudioPlayer,
    core::{
        fetch,
        lesson::{
            LessonSlot,
            LessonView,
        },
        nav::{
            NavState,
            OpenRequests,
            Selection,
        },
        tasks::{
            TaskManager,
            TaskResult,
        },
        taxonomy::Taxonomy,
    },
    persistence::{
        load_json_or_default,
        save_json,
        store::DiskStore,
    },
};

pub struct TangochoApp {
    settings: SettingsData,
    taxonomy: Taxonomy,
    store: DiskStore,
    nav: NavState,
    slot: LessonSlot,
    rendered_selection: Option<Selection>,
    card_grid: CardGrid,
    settings_modal: SettingsModal,
    about_modal: AboutModal,
    theme: Theme,
    task_manager: TaskManager,
    audio: AudioPlayer,
}

impl TangochoApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let task_manager = TaskManager::new();
        let settings = load_json_or_default::<SettingsData>("settings.json");
        let taxonomy = Taxonomy::load();
        let store = DiskStore::load();
        let nav = NavState::load(&store, &taxonomy, cc.egui_ctx.screen_rect().width());

        let mut app = Self {
            settings,
            taxonomy,
            store,
            nav,
            slot: LessonSlot::new(),
            rendered_selection: None,
            card_grid: CardGrid::new(),
            settings_modal: SettingsModal::new(),
            about_modal: AboutModal::new(),
            theme: Theme::default(),
            task_manager,
            audio: AudioPlayer::new(),
        };

        setup_fonts(&cc.egui_ctx);
        cc.egui_ctx.set_zoom_factor(cc.egui_ctx.zoom_factor() + 0.2);
        set_theme(&cc.egui_ctx, app.theme.clone());

        cc.egui_ctx.set_theme(if app.settings.dark_mode {
            egui::ThemePreference::Dark
        } else {
            egui::ThemePreference::Light
        });

        // Resume where the user left off, or start at the top of the course.
        let start = app.nav.active.clone().or_else(|| {
            app.taxonomy.first_selection().map(|(section, topic)| Selection::new(section, topic))
        });
        if let Some(selection) = start {
            app.begin_lesson_load(selection);
        }

        app
    }

    fn begin_lesson_load(&mut self, selection: Selection) {
        let request_id = self.slot.begin(selection.clone());
        self.task_manager.load_lesson(request_id, selection, self.settings.lesson_base.clone());
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::LessonLoaded { request_id, selection, result } => {
                let outcome = match result {
                    Ok(document) => Ok(LessonView::from_document(
                        &document,
                        &selection.topic,
                        &self.settings.markup_titles,
                    )),
                    Err(error) => {
                        eprintln!("[Lesson] Error loading {}: {}", selection.topic, error);
                        Err(selection.topic.clone())
                    }
                };

                if self.slot.complete(request_id, outcome) {
                    self.rendered_selection = Some(selection);
                } else {
                    println!("[Lesson] Stale result for {} ignored", selection.topic);
                }
            }
        }
    }

    fn activate(&mut self, selection: Selection) {
        self.nav.activate(selection.clone(), &self.taxonomy, &self.store);
        self.begin_lesson_load(selection);
    }

    fn section_title(&self) -> String {
        let active_section = self.nav.active.as_ref().map(|selection| selection.section.as_str());
        match active_section.and_then(|key| self.taxonomy.section_name(key)) {
            Some(name) => name.to_string(),
            None => self
                .taxonomy
                .sections
                .first()
                .map(|section| section.name.clone())
                .unwrap_or_else(|| "Tangocho".to_string()),
        }
    }

    fn play_card_sound(&self, sound: &str) {
        let Some(selection) = self.rendered_selection.as_ref() else {
            return;
        };

        let location =
            fetch::sound_location(&self.settings.lesson_base, &selection.section, sound);
        self.audio.play(location);
    }

    fn apply_settings(&mut self, settings: SettingsData) {
        let base_changed = settings.lesson_base != self.settings.lesson_base;
        self.settings = settings;
        self.save_settings();

        if base_changed {
            let reload = self.nav.active.clone().or_else(|| self.rendered_selection.clone());
            if let Some(selection) = reload {
                self.begin_lesson_load(selection);
            }
        }
    }

    fn save_settings(&self) {
        if let Err(e) = save_json(&self.settings, "settings.json") {
            eprintln!("Failed to save settings: {}", e);
        }
    }
}

impl eframe::App for TangochoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.nav.on_viewport_change(ctx.screen_rect().width());

        let task_results = self.task_manager.poll_results();
        for result in task_results {
            self.handle_task_result(result);
        }

        // Keep the persisted preference in sync with the theme switch.
        let dark_mode = ctx.style().visuals.dark_mode;
        if dark_mode != self.settings.dark_mode {
            self.settings.dark_mode = dark_mode;
            self.save_settings();
        }

        let mut requests = OpenRequests::default();
        let section_title = self.section_title();

        if TopBar::show(
            ctx,
            &section_title,
            &self.store,
            &mut self.settings_modal,
            &mut self.about_modal,
            &self.settings,
            &self.theme,
        ) {
            requests.toggle = true;
        }

        let clicked = NavPanel::show(
            ctx,
            &self.taxonomy,
            &mut self.nav,
            &mut requests,
            &self.store,
            &self.theme,
        );
        if let Some(selection) = clicked {
            requests.activation = true;
            self.activate(selection);
        }

        let columns = top_bar::lesson_columns(&self.store);
        let clicked_sound = self.card_grid.show(ctx, self.slot.phase(), columns, &self.theme);
        if let Some(sound) = clicked_sound {
            self.play_card_sound(&sound);
        }

        self.about_modal.show(ctx, &self.theme);

        if let Some(settings) = self.settings_modal.show(ctx) {
            self.apply_settings(settings);
        }

        // Every open/close request this frame resolves in one place, so an
        // activation outranks the outside-click that came with it.
        self.nav.resolve(requests, &self.store);
    }
}

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/fonts-japanese-gothic.ttf",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\meiryo.ttc",
    "C:\\Windows\\Fonts\\YuGothM.ttc",
    "C:\\Windows\\Fonts\\msgothic.ttc",
];

/// Puts a system Japanese font in front of egui's defaults. Kana and kanji
/// show up as boxes without one; the app stays usable either way.
fn setup_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();

    let Some((path, bytes)) = FONT_CANDIDATES
        .iter()
        .find_map(|path| std::fs::read(path).ok().map(|bytes| (*path, bytes)))
    else {
        eprintln!("[Fonts] No Japanese font found on this system, using the built-in set");
        return;
    };
    println!("[Fonts] Japanese text uses {}", path);

    fonts
        .font_data
        .insert("japanese".to_owned(), std::sync::Arc::new(egui::FontData::from_owned(bytes)));

    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, "japanese".to_owned());

    fonts.families.entry(egui::FontFamily::Monospace).or_default().push("japanese".to_owned());

    ctx.set_fonts(fonts);
}
