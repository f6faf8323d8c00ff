//! Adding questions and catalog entries

use log::info;

use crate::error::QuizError;
use crate::store::QuestionEntry;

/// Comparable form of a catalog label; all catalog matching goes through this.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// Case-insensitive membership test
pub fn contains_ignore_case(catalog: &[String], text: &str) -> bool {
    let needle = fold(text);
    catalog.iter().any(|entry| fold(entry) == needle)
}

/// Trim and check the add-question form values.
pub fn validate_question(prompt: &str, correct_answer: &str) -> Result<QuestionEntry, QuizError> {
    let prompt = prompt.trim();
    let correct_answer = correct_answer.trim();

    if prompt.is_empty() {
        return Err(QuizError::Validation { field: "Frage" });
    }
    if correct_answer.is_empty() {
        return Err(QuizError::Validation { field: "Korrekte Antwort" });
    }
    Ok(QuestionEntry::new(prompt, correct_answer))
}

/// Append `answer` to the catalog unless a case-insensitive match exists.
/// Returns whether the catalog grew.
pub fn backfill_catalog(catalog: &mut Vec<String>, answer: &str) -> bool {
    if contains_ignore_case(catalog, answer) {
        return false;
    }
    catalog.push(answer.to_string());
    info!("'{}' added to the answer catalog", answer);
    true
}

/// Validate, append the question, then back-fill its answer into the catalog.
///
/// Nothing is modified on error. Returns whether the catalog grew; the caller
/// persists both collections.
pub fn add_question(
    questions: &mut Vec<QuestionEntry>,
    catalog: &mut Vec<String>,
    prompt: &str,
    correct_answer: &str,
) -> Result<bool, QuizError> {
    let entry = validate_question(prompt, correct_answer)?;
    let answer = entry.correct_answer.clone();
    questions.push(entry);
    Ok(backfill_catalog(catalog, &answer))
}

/// Add a distractor candidate, keeping the user's casing.
pub fn add_catalog_entry(catalog: &mut Vec<String>, text: &str) -> Result<(), QuizError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(QuizError::Validation { field: "Antwort" });
    }
    if contains_ignore_case(catalog, text) {
        return Err(QuizError::Duplicate { entry: text.to_string() });
    }
    catalog.push(text.to_string());
    Ok(())
}

/// Catalog listing ordered by folded form; ties keep catalog order.
pub fn sorted_catalog(catalog: &[String]) -> Vec<&str> {
    let mut listing: Vec<&str> = catalog.iter().map(String::as_str).collect();
    listing.sort_by_cached_key(|entry| fold(entry));
    listing
}
