pub mod errors;
pub mod fetch;
pub mod lesson;
pub mod markup;
pub mod nav;
pub mod tasks;
pub mod taxonomy;

pub use errors::TangochoError;
pub use lesson::{
    DocumentShape,
    LessonPhase,
    LessonSlot,
    LessonView,
    VocabularyEntry,
};
pub use nav::{
    NavState,
    OpenRequests,
    Selection,
};
pub use taxonomy::Taxonomy;

#[cfg(test)]
mod lesson_tests;
