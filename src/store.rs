//! JSON persistence for the question collection and the answer catalog
//!
//! Every function here degrades to a usable value instead of failing: a broken
//! questions file reads as an empty collection, a broken catalog is reseeded
//! from [`DEFAULT_CATALOG`], and write failures are logged and reported as `false`.

use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::error::StoreError;

/// Seed catalog written whenever the catalog store is missing or unusable.
pub const DEFAULT_CATALOG: [&str; 26] = [
    "Polyethylen (PE)",
    "Polytetrafluorethylen (PTFE)",
    "Aluminiumoxid (Al2O3)",
    "Siliciumcarbid (SiC)",
    "Baustahl (S235JR)",
    "Messing (CuZn37)",
    "Titan Grad 5 (Ti-6Al-4V)",
    "Glasfaserverstärkter Kunststoff (GFK)",
    "Kohlenstofffaserverstärkter Kunststoff (CFK)",
    "Holz (Fichte)",
    "Beton C25/30",
    "Kupfer (Cu)",
    "Magnesium (Mg)",
    "Zink (Zn)",
    "Nickel (Ni)",
    "Chrom (Cr)",
    "Wolfram (W)",
    "Keramik",
    "Gummi",
    "Leder",
    "Stahl",
    "Gusseisen",
    "Bronze",
    "Aluminium",
    "Polypropylen (PP)",
    "Polyvinylchlorid (PVC)",
];

/// A quiz question as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionEntry {
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: String,
    /// Fields this crate does not interpret; written back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuestionEntry {
    pub fn new(prompt: impl Into<String>, correct_answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            correct_answer: correct_answer.into(),
            extra: Map::new(),
        }
    }

    fn is_complete(&self) -> bool {
        !self.prompt.trim().is_empty() && !self.correct_answer.trim().is_empty()
    }
}

/// Fresh owned copy of [`DEFAULT_CATALOG`]
pub fn default_catalog() -> Vec<String> {
    DEFAULT_CATALOG.iter().map(|s| s.to_string()).collect()
}

/// Load questions; a missing, unreadable or malformed file yields an empty list.
pub fn load_questions(path: &Path) -> Vec<QuestionEntry> {
    if !path.exists() {
        return Vec::new();
    }

    let items = match read_json(path) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            warn!("{} does not contain a list, treating it as empty", path.display());
            return Vec::new();
        }
        Err(e) => {
            error!("{}; treating questions as empty", e);
            return Vec::new();
        }
    };

    let mut questions = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<QuestionEntry>(item.clone()) {
            Ok(entry) if entry.is_complete() => questions.push(entry),
            _ => warn!("Skipping invalid question entry in {}: {}", path.display(), item),
        }
    }
    questions
}

/// Overwrite the questions file. Returns `false` (after logging) if the write failed.
pub fn save_questions(path: &Path, questions: &[QuestionEntry]) -> bool {
    match write_json(path, questions) {
        Ok(()) => true,
        Err(e) => {
            error!("Failed to save questions: {}", e);
            false
        }
    }
}

/// Load the answer catalog, reseeding the default whenever the file is unusable.
///
/// Non-string elements are dropped; duplicates are kept as they are.
pub fn load_catalog(path: &Path) -> Vec<String> {
    if !path.exists() {
        info!("{} not found, initialising default catalog", path.display());
        return reseed_catalog(path);
    }

    let items = match read_json(path) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            warn!("{} does not contain a list, reseeding default catalog", path.display());
            return reseed_catalog(path);
        }
        Err(e) => {
            warn!("{}; reseeding default catalog", e);
            return reseed_catalog(path);
        }
    };

    if items.is_empty() {
        warn!("{} is empty, reseeding default catalog", path.display());
        return reseed_catalog(path);
    }

    let total = items.len();
    let catalog: Vec<String> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect();

    if catalog.len() < total {
        warn!(
            "Dropped {} non-string entries from {}",
            total - catalog.len(),
            path.display()
        );
    }
    if catalog.is_empty() {
        return reseed_catalog(path);
    }
    catalog
}

/// Overwrite the catalog file. Returns `false` (after logging) if the write failed.
pub fn save_catalog(path: &Path, catalog: &[String]) -> bool {
    match write_json(path, catalog) {
        Ok(()) => true,
        Err(e) => {
            error!("Failed to save answer catalog: {}", e);
            false
        }
    }
}

fn reseed_catalog(path: &Path) -> Vec<String> {
    let catalog = default_catalog();
    save_catalog(path, &catalog);
    catalog
}

fn read_json(path: &Path) -> Result<Value, StoreError> {
    let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| StoreError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.display().to_string(),
        source,
    };

    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser).map_err(|source| StoreError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    buf.push(b'\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, buf).map_err(io_err)
}

// ============= Python Bindings =============

#[cfg(feature = "python")]
pub(crate) mod python {
    use pyo3::prelude::*;
    use std::path::Path;

    use super::QuestionEntry;

    pub(crate) fn to_entries(questions: Vec<(String, String)>) -> Vec<QuestionEntry> {
        questions
            .into_iter()
            .map(|(prompt, answer)| QuestionEntry::new(prompt, answer))
            .collect()
    }

    #[pyfunction]
    #[pyo3(name = "load_questions")]
    pub fn py_load_questions(path: &str) -> Vec<(String, String)> {
        super::load_questions(Path::new(path))
            .into_iter()
            .map(|q| (q.prompt, q.correct_answer))
            .collect()
    }

    #[pyfunction]
    #[pyo3(name = "save_questions")]
    pub fn py_save_questions(path: &str, questions: Vec<(String, String)>) -> bool {
        super::save_questions(Path::new(path), &to_entries(questions))
    }

    #[pyfunction]
    #[pyo3(name = "load_catalog")]
    pub fn py_load_catalog(path: &str) -> Vec<String> {
        super::load_catalog(Path::new(path))
    }

    #[pyfunction]
    #[pyo3(name = "save_catalog")]
    pub fn py_save_catalog(path: &str, catalog: Vec<String>) -> bool {
        super::save_catalog(Path::new(path), &catalog)
    }

    #[pyfunction]
    #[pyo3(name = "default_catalog")]
    pub fn py_default_catalog() -> Vec<String> {
        super::default_catalog()
    }
}
