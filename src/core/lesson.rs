use serde::Deserialize;
use serde_json::Value;

use crate::core::nav::Selection;

pub const EMPTY_MESSAGE: &str = "No data found.";

/// Field names tried, in order, when a document is an object rather than a
/// plain entry list. The topic's own name is tried first, before these.
const ARRAY_FIELD_PRIORITY: &[&str] = &["entries", "items", "words"];

pub fn failure_message(topic: &str) -> String {
    format!("Failed to load: {}", topic)
}

/// A single vocabulary card. Missing text fields deserialize to empty
/// strings; only `sound` keeps its absence, since it gates playback.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VocabularyEntry {
    #[serde(default, alias = "english")]
    pub en: String,
    #[serde(default, alias = "japanese")]
    pub jp: String,
    #[serde(default)]
    pub romaji: String,
    pub sound: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub label: String,
    pub entries: Vec<VocabularyEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentShape {
    Flat(Vec<VocabularyEntry>),
    Grouped(Vec<Group>),
    Empty,
}

/// Collapses a fetched document into one of the supported shapes.
///
/// Detection order: the document itself is an array; an array-valued field
/// (topic name first, then the conventional list names, then document
/// order); exactly one object-valued field whose members are the groups.
/// Anything that yields no entries at all is Empty.
pub fn normalize(document: &Value, topic: &str) -> DocumentShape {
    if let Value::Array(items) = document {
        return flat(parse_entries(items));
    }

    let Value::Object(fields) = document else {
        return DocumentShape::Empty;
    };

    for name in std::iter::once(topic).chain(ARRAY_FIELD_PRIORITY.iter().copied()) {
        if let Some(Value::Array(items)) = fields.get(name) {
            return flat(parse_entries(items));
        }
    }
    if let Some(items) = fields.values().find_map(|value| value.as_array()) {
        return flat(parse_entries(items));
    }

    let mut nested = fields.values().filter(|value| value.is_object());
    if let (Some(Value::Object(members)), None) = (nested.next(), nested.next()) {
        let groups: Vec<Group> = members
            .iter()
            .filter_map(|(label, value)| {
                let items = value.as_array()?;
                let entries = parse_entries(items);
                if entries.is_empty() {
                    None
                } else {
                    Some(Group { label: label.clone(), entries })
                }
            })
            .collect();

        if !groups.is_empty() {
            return DocumentShape::Grouped(groups);
        }
    }

    DocumentShape::Empty
}

fn flat(entries: Vec<VocabularyEntry>) -> DocumentShape {
    if entries.is_empty() {
        DocumentShape::Empty
    } else {
        DocumentShape::Flat(entries)
    }
}

fn parse_entries(items: &[Value]) -> Vec<VocabularyEntry> {
    items
        .iter()
        .filter_map(|item| match VocabularyEntry::deserialize(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                eprintln!("[Lesson] Skipping malformed entry: {}", e);
                None
            }
        })
        .collect()
}

/// The document's own title when it carries a non-empty one, otherwise a
/// title synthesized from the topic id.
pub fn document_title(document: &Value, topic: &str) -> String {
    match document.get("title").and_then(|t| t.as_str()).filter(|t| !t.is_empty()) {
        Some(title) => title.to_string(),
        None => format!("Lesson: {}", topic),
    }
}

pub fn document_allows_markup(document: &Value) -> bool {
    document.get("allowHtml").and_then(|v| v.as_bool()).unwrap_or(false)
}

#[derive(Debug, Clone, PartialEq)]
pub struct LessonView {
    pub title: String,
    pub allow_markup: bool,
    pub shape: DocumentShape,
}

impl LessonView {
    /// `markup_titles` keeps documents that predate the allowHtml flag
    /// rendering their inline formatting.
    pub fn from_document(document: &Value, topic: &str, markup_titles: &[String]) -> Self {
        let title = document_title(document, topic);
        let allow_markup =
            document_allows_markup(document) || markup_titles.iter().any(|t| t == &title);

        Self { title, allow_markup, shape: normalize(document, topic) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LessonPhase {
    Idle,
    Loading { selection: Selection },
    Rendered { view: LessonView },
    Failed { topic: String },
}

/// One lesson display slot. Every load gets a fresh request id and only the
/// most recently issued id may publish its outcome, so overlapping loads
/// always resolve to the newest selection.
#[derive(Debug)]
pub struct LessonSlot {
    phase: LessonPhase,
    current_request: u64,
}

impl LessonSlot {
    pub fn new() -> Self {
        Self { phase: LessonPhase::Idle, current_request: 0 }
    }

    pub fn phase(&self) -> &LessonPhase {
        &self.phase
    }

    pub fn begin(&mut self, selection: Selection) -> u64 {
        self.current_request += 1;
        self.phase = LessonPhase::Loading { selection };
        self.current_request
    }

    /// Applies a finished load. Returns false (leaving the phase untouched)
    /// when `request_id` is not the most recent, so a stale response can
    /// never replace a newer one.
    pub fn complete(&mut self, request_id: u64, outcome: Result<LessonView, String>) -> bool {
        if request_id != self.current_request {
            return false;
        }

        self.phase = match outcome {
            Ok(view) => LessonPhase::Rendered { view },
            Err(topic) => LessonPhase::Failed { topic },
        };
        true
    }
}

impl Default for LessonSlot {
    fn default() -> Self {
        Self::new()
    }
}
