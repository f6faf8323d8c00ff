//! Answer checking and per-option feedback

#[cfg(feature = "python")]
use pyo3::prelude::*;

use crate::error::QuizError;
use crate::questions::Round;

/// How an option is shown once the round is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    /// The correct answer, always highlighted.
    Correct,
    /// The option the user picked, when it was wrong.
    Incorrect,
    Neutral,
}

impl OptionMark {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionMark::Correct => "correct",
            OptionMark::Incorrect => "incorrect",
            OptionMark::Neutral => "neutral",
        }
    }
}

/// Outcome of answering a round
#[cfg_attr(feature = "python", pyclass)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    pub is_correct: bool,
    pub correct_answer: String,
    pub selected: String,
    pub marks: Vec<OptionMark>,
}

impl AnswerResult {
    /// Feedback line for the UI
    pub fn feedback(&self) -> String {
        if self.is_correct {
            "Richtig!".to_string()
        } else {
            format!("Falsch! Richtig wäre: {}", self.correct_answer)
        }
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl AnswerResult {
    #[getter(is_correct)]
    fn py_is_correct(&self) -> bool {
        self.is_correct
    }

    #[getter(correct_answer)]
    fn py_correct_answer(&self) -> String {
        self.correct_answer.clone()
    }

    #[getter(selected)]
    fn py_selected(&self) -> String {
        self.selected.clone()
    }

    #[getter(marks)]
    fn py_marks(&self) -> Vec<&'static str> {
        self.marks.iter().map(OptionMark::as_str).collect()
    }

    #[pyo3(name = "feedback")]
    fn py_feedback(&self) -> String {
        self.feedback()
    }

    fn __repr__(&self) -> String {
        format!("AnswerResult(is_correct={}, correct_answer='{}')",
                self.is_correct, self.correct_answer)
    }
}

/// Check a selection by its displayed text.
///
/// Comparison is exact and case-sensitive: options come verbatim from the
/// catalog, so "stahl" is not an answer for "Stahl".
pub fn check_answer(round: &Round, selected: &str) -> AnswerResult {
    let slot = round.options.iter().position(|o| o == selected);
    evaluate(round, selected, slot)
}

/// Check a selection by option slot. A slot that is not on screen is not a
/// selection and is rejected.
pub fn check_option(round: &Round, index: usize) -> Result<AnswerResult, QuizError> {
    let text = round
        .options
        .get(index)
        .ok_or(QuizError::InvalidOption { index })?;
    Ok(evaluate(round, text, Some(index)))
}

fn evaluate(round: &Round, selected: &str, slot: Option<usize>) -> AnswerResult {
    let is_correct = selected == round.correct_answer;
    let marks = round
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            if *option == round.correct_answer {
                OptionMark::Correct
            } else if !is_correct && slot == Some(i) {
                OptionMark::Incorrect
            } else {
                OptionMark::Neutral
            }
        })
        .collect();

    AnswerResult {
        is_correct,
        correct_answer: round.correct_answer.clone(),
        selected: selected.to_string(),
        marks,
    }
}

// ============= Python Binding =============

#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "check_answer")]
pub fn py_check_answer(round: Round, selected: &str) -> AnswerResult {
    check_answer(&round, selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round() -> Round {
        Round {
            question_index: 0,
            prompt: "Welcher Werkstoff?".to_string(),
            correct_answer: "Stahl".to_string(),
            options: vec!["Holz".to_string(), "Stahl".to_string(), "Glas".to_string()],
            correct_index: 1,
        }
    }

    #[test]
    fn correct_selection() {
        let result = check_answer(&round(), "Stahl");
        assert!(result.is_correct);
        assert_eq!(result.feedback(), "Richtig!");
        assert_eq!(
            result.marks,
            vec![OptionMark::Neutral, OptionMark::Correct, OptionMark::Neutral]
        );
    }

    #[test]
    fn wrong_selection_marks_both() {
        let result = check_answer(&round(), "Glas");
        assert!(!result.is_correct);
        assert_eq!(result.correct_answer, "Stahl");
        assert_eq!(result.feedback(), "Falsch! Richtig wäre: Stahl");
        assert_eq!(
            result.marks,
            vec![OptionMark::Neutral, OptionMark::Correct, OptionMark::Incorrect]
        );
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let result = check_answer(&round(), "stahl");
        assert!(!result.is_correct);
        // The lowercase text is not on screen, so only the correct slot is marked.
        assert_eq!(
            result.marks,
            vec![OptionMark::Neutral, OptionMark::Correct, OptionMark::Neutral]
        );
    }

    #[test]
    fn slot_selection_distinguishes_identical_texts() {
        let mut round = round();
        round.options = vec!["Glas".to_string(), "Stahl".to_string(), "Glas".to_string()];

        let result = check_option(&round, 2).unwrap();
        assert!(!result.is_correct);
        assert_eq!(
            result.marks,
            vec![OptionMark::Neutral, OptionMark::Correct, OptionMark::Incorrect]
        );

        assert!(check_option(&round, 1).unwrap().is_correct);
    }

    #[test]
    fn slot_outside_the_options_is_rejected() {
        assert_eq!(
            check_option(&round(), 3),
            Err(QuizError::InvalidOption { index: 3 })
        );
        assert_eq!(
            check_option(&round(), 7),
            Err(QuizError::InvalidOption { index: 7 })
        );
    }
}
