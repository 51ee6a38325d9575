use serde_json::Value;

use crate::core::nav::Selection;

#[derive(Debug, Clone)]
pub enum TaskResult {
    LessonLoaded { request_id: u64, selection: Selection, result: Result<Value, String> },
}
