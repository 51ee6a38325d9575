use std::{
    fs,
    path::Path,
};

use serde::Deserialize;

use crate::persistence::get_app_data_dir;

pub const COURSE: &[(&str, &[&str])] = &[
    (
        "Section 1 — Basic Vocabulary",
        &[
            "numbers",
            "ordinal_numbers",
            "fractions",
            "multiple_numbers",
            "month",
            "weekdays",
            "seasons",
            "time",
            "nature",
            "metals",
        ],
    ),
    ("Section 2 — People and Pronouns", &["titles_of_address", "pronouns"]),
    (
        "Section 3 — Grammar and Structure",
        &[
            "prepositions",
            "this_and_that",
            "suffix_in_subjective_case",
            "interrogatives",
            "suffix_in_objective_case",
            "ta",
            "su",
            "sho",
            "past_and_present",
            "auxiliary_is_being",
            "auxiliary_is_action",
        ],
    ),
    (
        "Section 4 — Adjectives and Adverbs",
        &[
            "adjectives",
            "adverbs_of_time",
            "adverbs_of_place",
            "adverbs_of_direction",
            "adverbs_of_quantity_and_degree",
            "adverbs_of_quantity_and_manner",
            "adverbs_of_certainty_and_necessity",
            "position_of_adverbs",
        ],
    ),
    (
        "Section 5 — Common Expressions and Phrases",
        &[
            "useful_phrases",
            "embassies_legations_and_consulates",
            "short_phrases_in_common_use",
            "meetings_and_convention",
            "interjectional_words_commonly_used",
        ],
    ),
    (
        "Section 6 — Food and Daily Life",
        &[
            "food",
            "vegetables",
            "fruits",
            "house",
            "house_work",
            "housework_equipment",
            "table_serving",
        ],
    ),
    ("Section 7 — Occupations and Commerce", &["tradesman", "household_trades", "stores"]),
    ("Section 8 — Glossary", &["glossary_of_conversational_vocabulary_and_short_phrases"]),
];

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Section {
    pub name: String,
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Taxonomy {
    pub sections: Vec<Section>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::built_in()
    }
}

impl Taxonomy {
    pub fn built_in() -> Self {
        let sections = COURSE
            .iter()
            .map(|(name, topics)| Section {
                name: name.to_string(),
                topics: topics.iter().map(|t| t.to_string()).collect(),
            })
            .collect();

        Self { sections }
    }

    /// Loads the course override from the data directory if one is present,
    /// falling back to the built-in course when it is absent or unreadable.
    pub fn load() -> Self {
        Self::load_from(&get_app_data_dir().join("taxonomy.json"))
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::built_in();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Taxonomy>(&content) {
                Ok(taxonomy) => {
                    println!("[Taxonomy] Loaded course override from {:?}", path);
                    taxonomy
                }
                Err(e) => {
                    eprintln!("[Taxonomy] Ignoring unparseable override {:?}: {}", path, e);
                    Self::built_in()
                }
            },
            Err(e) => {
                eprintln!("[Taxonomy] Failed to read override {:?}: {}", path, e);
                Self::built_in()
            }
        }
    }

    pub fn section_key(index: usize) -> String {
        format!("section{}", index + 1)
    }

    pub fn section_index(&self, key: &str) -> Option<usize> {
        (0..self.sections.len()).find(|&i| Self::section_key(i) == key)
    }

    pub fn section(&self, key: &str) -> Option<&Section> {
        self.section_index(key).map(|i| &self.sections[i])
    }

    pub fn section_name(&self, key: &str) -> Option<&str> {
        self.section(key).map(|s| s.name.as_str())
    }

    pub fn contains(&self, section_key: &str, topic: &str) -> bool {
        self.section(section_key).is_some_and(|s| s.topics.iter().any(|t| t == topic))
    }

    pub fn first_selection(&self) -> Option<(String, String)> {
        self.sections
            .iter()
            .enumerate()
            .find(|(_, s)| !s.topics.is_empty())
            .map(|(i, s)| (Self::section_key(i), s.topics[0].clone()))
    }
}

pub fn topic_label(topic: &str) -> String {
    topic.replace('_', " ")
}
