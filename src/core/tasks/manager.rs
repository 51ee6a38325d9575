use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use tokio::runtime::Runtime;

use super::TaskResult;
use crate::core::{
    fetch,
    nav::Selection,
};

pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
}

impl TaskManager {
    pub fn new() -> Self {
        let runtime = Arc::new(Runtime::new().expect("Failed to create TaskManager runtime"));

        let (sender, receiver) = mpsc::channel();

        Self { runtime, receiver, sender }
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>) {
        (self.sender.clone(), self.runtime.clone())
    }

    /// Fetches the document for `selection` in the background. The result
    /// comes back through poll_results carrying `request_id`, so the app can
    /// tell a stale completion from the current one.
    pub fn load_lesson(&self, request_id: u64, selection: Selection, base: String) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let location = fetch::document_location(&base, &selection.section, &selection.topic);
            println!("[Lesson] Loading JSON: {}", location);

            let result = runtime
                .block_on(async {
                    let client = fetch::http_client()?;
                    fetch::fetch_document(&client, &location).await
                })
                .map_err(|e| e.to_string());

            let _ = sender.send(TaskResult::LessonLoaded { request_id, selection, result });
        });
    }
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::new()
    }
}
