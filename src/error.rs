//! Error types for the quiz core

use thiserror::Error;

/// Failures while reading or writing a JSON store.
///
/// These never leave the `store` module: every load/save absorbs them into a
/// fallback value and a log entry.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// User input errors, surfaced to the action that triggered them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("{field} darf nicht leer sein.")]
    Validation { field: &'static str },
    #[error("'{entry}' ist bereits im Katalog vorhanden.")]
    Duplicate { entry: String },
    #[error("Keine Frage wartet auf eine Antwort.")]
    NoActiveRound,
    #[error("Antwort {index} wird nicht angezeigt.")]
    InvalidOption { index: usize },
}

/// Conditions under which no round can be played.
///
/// These are states, not failures: the caller disables the answer options
/// and shows the message instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoundError {
    #[error("Keine Fragen vorhanden. Bitte fügen Sie Fragen hinzu.")]
    NoQuestions,
    #[error("Antwortkatalog hat zu wenige Einträge ({available}, mindestens 2). Bitte ergänzen.")]
    InsufficientCatalog { available: usize },
    #[error("Nicht genug Distraktoren für Frage: '{prompt}' ({available} verfügbar, benötigt 2). Katalog erweitern.")]
    InsufficientDistractors { prompt: String, available: usize },
}
