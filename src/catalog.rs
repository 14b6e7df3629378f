//! Static catalogs of supported languages and tasks.
//!
//! Both sets are fixed for the lifetime of the process and exposed read-only,
//! so handlers can share them without synchronization.

/// Languages the prompt templates know how to talk about.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "python",
    "javascript",
    "typescript",
    "java",
    "cpp",
    "rust",
    "go",
];

pub fn language_supported(language: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&language)
}

/// The three operations a client can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Debug,
    Correct,
    Generate,
}

impl Task {
    pub const ALL: &'static [Task] = &[Task::Debug, Task::Correct, Task::Generate];

    /// Looks up a task by its wire name. Unknown names are a validation
    /// failure for the caller, not a parse panic.
    pub fn parse(s: &str) -> Option<Task> {
        match s {
            "debug" => Some(Task::Debug),
            "correct" => Some(Task::Correct),
            "generate" => Some(Task::Generate),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Task::Debug => "debug",
            Task::Correct => "correct",
            Task::Generate => "generate",
        }
    }
}
