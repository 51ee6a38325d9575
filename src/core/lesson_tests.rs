#[cfg(test)]
mod tests {
    use serde_json::{
        json,
        Value,
    };

    use crate::core::{
        lesson::{
            document_title,
            failure_message,
            normalize,
            DocumentShape,
            LessonPhase,
            LessonSlot,
            LessonView,
            VocabularyEntry,
            EMPTY_MESSAGE,
        },
        nav::Selection,
    };

    fn entry(en: &str, jp: &str) -> VocabularyEntry {
        VocabularyEntry {
            en: en.to_string(),
            jp: jp.to_string(),
            romaji: String::new(),
            sound: None,
        }
    }

    fn doc(raw: &str) -> Value {
        serde_json::from_str(raw).expect("test document must parse")
    }

    fn entries(shape: &DocumentShape) -> usize {
        match shape {
            DocumentShape::Flat(entries) => entries.len(),
            DocumentShape::Grouped(groups) => groups.iter().map(|g| g.entries.len()).sum(),
            DocumentShape::Empty => 0,
        }
    }

    #[test]
    fn test_flat_document_with_topic_field() {
        let document = json!({
            "title": "Lesson: numbers",
            "numbers": [{"en": "One", "jp": "一", "romaji": "Ichi"}]
        });

        let view = LessonView::from_document(&document, "numbers", &[]);
        assert_eq!(view.title, "Lesson: numbers");
        assert!(!view.allow_markup);

        let DocumentShape::Flat(entries) = &view.shape else {
            panic!("Expected Flat, got {:?}", view.shape);
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].en, "One");
        assert_eq!(entries[0].jp, "一");
        assert_eq!(entries[0].romaji, "Ichi");
        assert_eq!(entries[0].sound, None);
    }

    #[test]
    fn test_top_level_array_document() {
        let document = json!([
            {"en": "Spring", "jp": "春"},
            {"en": "Summer", "jp": "夏"}
        ]);

        let shape = normalize(&document, "seasons");
        assert_eq!(shape, DocumentShape::Flat(vec![entry("Spring", "春"), entry("Summer", "夏")]));
    }

    #[test]
    fn test_array_field_priority() {
        // The topic-named field wins over conventional names.
        let document = json!({
            "words": [{"en": "wrong", "jp": "誤"}],
            "numbers": [{"en": "One", "jp": "一"}]
        });
        let shape = normalize(&document, "numbers");
        assert_eq!(shape, DocumentShape::Flat(vec![entry("One", "一")]));

        // Conventional names win over other array fields.
        let document = json!({
            "misc": [{"en": "wrong", "jp": "誤"}],
            "entries": [{"en": "Right", "jp": "正"}]
        });
        let shape = normalize(&document, "numbers");
        assert_eq!(shape, DocumentShape::Flat(vec![entry("Right", "正")]));

        // Otherwise the first array field in document order is used, not
        // the first alphabetically.
        let document = doc(r#"{
            "title": "x",
            "zeta": [{"en": "First", "jp": "一"}],
            "alpha": [{"en": "Second", "jp": "二"}, {"en": "Third", "jp": "三"}]
        }"#);
        let shape = normalize(&document, "numbers");
        assert_eq!(shape, DocumentShape::Flat(vec![entry("First", "一")]));
    }

    #[test]
    fn test_grouped_document() {
        let document = doc(r#"{
            "title": "Glossary",
            "glossary": {
                "B": [{"en": "Bath", "jp": "風呂"}],
                "A": [{"en": "Ant", "jp": "蟻"}, {"en": "Autumn", "jp": "秋"}],
                "note": "not a group"
            }
        }"#);

        let shape = normalize(&document, "glossary_of_conversational_vocabulary_and_short_phrases");
        let DocumentShape::Grouped(groups) = shape else {
            panic!("Expected Grouped, got {:?}", shape);
        };

        // Groups keep document order; the non-array member is skipped.
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "B");
        assert_eq!(groups[0].entries.len(), 1);
        assert_eq!(groups[1].label, "A");
        assert_eq!(groups[1].entries.len(), 2);
    }

    #[test]
    fn test_grouping_requires_exactly_one_nested_object() {
        let document = json!({
            "first": {"A": [{"en": "One", "jp": "一"}]},
            "second": {"B": [{"en": "Two", "jp": "二"}]}
        });

        assert_eq!(normalize(&document, "numbers"), DocumentShape::Empty);
    }

    #[test]
    fn test_empty_results() {
        assert_eq!(normalize(&json!({}), "numbers"), DocumentShape::Empty);
        assert_eq!(normalize(&json!({"title": "Lesson"}), "numbers"), DocumentShape::Empty);
        assert_eq!(normalize(&json!({"numbers": []}), "numbers"), DocumentShape::Empty);
        assert_eq!(normalize(&json!([]), "numbers"), DocumentShape::Empty);
        assert_eq!(normalize(&json!(["just", "strings"]), "numbers"), DocumentShape::Empty);
        assert_eq!(normalize(&json!(null), "numbers"), DocumentShape::Empty);
        assert_eq!(normalize(&json!({"nested": {"note": "no arrays"}}), "numbers"), DocumentShape::Empty);
    }

    #[test]
    fn test_entry_field_aliases() {
        let document = json!({
            "numbers": [
                {"english": "One", "japanese": "一"},
                {"en": "Two", "jp": "二", "sound": "two.mp3"}
            ]
        });

        let DocumentShape::Flat(entries) = normalize(&document, "numbers") else {
            panic!("Expected Flat");
        };
        assert_eq!(entries[0].en, "One");
        assert_eq!(entries[0].jp, "一");
        assert_eq!(entries[0].romaji, "");
        assert_eq!(entries[1].sound.as_deref(), Some("two.mp3"));
    }

    #[test]
    fn test_malformed_entries_skipped() {
        let document = json!({
            "numbers": [
                {"en": "One", "jp": "一"},
                42,
                "stray",
                {"en": "Two", "jp": "二"}
            ]
        });

        let shape = normalize(&document, "numbers");
        assert_eq!(entries(&shape), 2);
    }

    #[test]
    fn test_title_synthesis() {
        assert_eq!(document_title(&json!({"title": "Lesson 1"}), "numbers"), "Lesson 1");
        assert_eq!(document_title(&json!({}), "numbers"), "Lesson: numbers");
        assert_eq!(document_title(&json!({"title": ""}), "numbers"), "Lesson: numbers");
        assert_eq!(document_title(&json!({"title": 31}), "numbers"), "Lesson: numbers");
        assert_eq!(document_title(&json!([1, 2]), "numbers"), "Lesson: numbers");
    }

    #[test]
    fn test_markup_gating() {
        let flagged = json!({"title": "Anything", "allowHtml": true, "numbers": []});
        assert!(LessonView::from_document(&flagged, "numbers", &[]).allow_markup);

        let legacy = json!({"title": "Lesson 31: Position of Adverbs", "numbers": []});
        let configured = vec!["Lesson 31: Position of Adverbs".to_string()];
        assert!(LessonView::from_document(&legacy, "numbers", &configured).allow_markup);
        assert!(!LessonView::from_document(&legacy, "numbers", &[]).allow_markup);

        let plain = json!({"title": "Lesson 5", "allowHtml": false, "numbers": []});
        assert!(!LessonView::from_document(&plain, "numbers", &configured).allow_markup);
    }

    #[test]
    fn test_slot_last_write_wins() {
        let mut slot = LessonSlot::new();
        assert_eq!(*slot.phase(), LessonPhase::Idle);

        let first = slot.begin(Selection::new("section1", "numbers"));
        let second = slot.begin(Selection::new("section1", "seasons"));
        assert_ne!(first, second);

        // The overtaken load finishes late and must not be displayed.
        let stale_view =
            LessonView { title: "stale".into(), allow_markup: false, shape: DocumentShape::Empty };
        assert!(!slot.complete(first, Ok(stale_view)));
        assert!(matches!(slot.phase(), LessonPhase::Loading { selection } if selection.topic == "seasons"));

        let fresh_view = LessonView {
            title: "Lesson: seasons".into(),
            allow_markup: false,
            shape: DocumentShape::Flat(vec![entry("Spring", "春")]),
        };
        assert!(slot.complete(second, Ok(fresh_view.clone())));
        assert_eq!(*slot.phase(), LessonPhase::Rendered { view: fresh_view });

        // A stale failure is also dropped.
        let third = slot.begin(Selection::new("section1", "metals"));
        assert!(!slot.complete(second, Err("seasons".to_string())));
        assert!(slot.complete(third, Err("metals".to_string())));
        assert_eq!(*slot.phase(), LessonPhase::Failed { topic: "metals".to_string() });
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(failure_message("numbers"), "Failed to load: numbers");
        assert_eq!(EMPTY_MESSAGE, "No data found.");
    }
}
