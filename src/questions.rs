//! Round generation: question pick, distractor draw and option shuffle

#[cfg(feature = "python")]
use pyo3::prelude::*;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::fold;
use crate::error::RoundError;
use crate::store::QuestionEntry;

/// Number of options shown per round
pub const OPTION_COUNT: usize = 3;

/// Distractors needed to fill a round
pub const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;

/// One presented question with its shuffled options
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub question_index: usize,
    pub prompt: String,
    pub correct_answer: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

#[cfg(feature = "python")]
#[pymethods]
impl Round {
    fn __repr__(&self) -> String {
        format!("Round(prompt='{}...', options={:?})",
                &self.prompt.chars().take(40).collect::<String>(), self.options)
    }
}

/// Draws question indices without replacement, refilling once every
/// question has been asked.
#[derive(Debug, Clone, Default)]
pub struct QuestionDeck {
    remaining: Vec<usize>,
    size: usize,
}

impl QuestionDeck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the current pass; the next draw starts a full one.
    pub fn reset(&mut self) {
        self.remaining.clear();
        self.size = 0;
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Next question index for a collection of `len` questions, `None` if `len == 0`.
    pub fn draw<R: Rng + ?Sized>(&mut self, len: usize, rng: &mut R) -> Option<usize> {
        if len == 0 {
            return None;
        }
        if self.size != len || self.remaining.is_empty() {
            self.size = len;
            self.remaining = (0..len).collect();
        }
        let pos = rng.gen_range(0..self.remaining.len());
        Some(self.remaining.swap_remove(pos))
    }
}

/// Pick a question uniformly at random and build its round.
pub fn select_round<R: Rng + ?Sized>(
    questions: &[QuestionEntry],
    catalog: &[String],
    rng: &mut R,
) -> Result<Round, RoundError> {
    check_playable(questions, catalog)?;
    let index = rng.gen_range(0..questions.len());
    build_round(questions, index, catalog, rng)
}

/// Same as [`select_round`], but the question comes from `deck` so no
/// question repeats until all have been shown.
pub fn select_round_from_deck<R: Rng + ?Sized>(
    questions: &[QuestionEntry],
    catalog: &[String],
    deck: &mut QuestionDeck,
    rng: &mut R,
) -> Result<Round, RoundError> {
    check_playable(questions, catalog)?;
    let index = deck.draw(questions.len(), rng).ok_or(RoundError::NoQuestions)?;
    build_round(questions, index, catalog, rng)
}

/// Catalog entries usable as distractors for `correct_answer`.
///
/// Exclusion is case-insensitive, so "STAHL" never appears next to "Stahl".
pub fn distractor_pool<'a>(catalog: &'a [String], correct_answer: &str) -> Vec<&'a str> {
    let correct = fold(correct_answer);
    catalog
        .iter()
        .filter(|entry| fold(entry) != correct)
        .map(String::as_str)
        .collect()
}

fn check_playable(questions: &[QuestionEntry], catalog: &[String]) -> Result<(), RoundError> {
    if questions.is_empty() {
        return Err(RoundError::NoQuestions);
    }
    if catalog.len() < DISTRACTOR_COUNT {
        return Err(RoundError::InsufficientCatalog { available: catalog.len() });
    }
    Ok(())
}

fn build_round<R: Rng + ?Sized>(
    questions: &[QuestionEntry],
    index: usize,
    catalog: &[String],
    rng: &mut R,
) -> Result<Round, RoundError> {
    let question = &questions[index];

    let mut pool = distractor_pool(catalog, &question.correct_answer);
    if pool.len() < DISTRACTOR_COUNT {
        return Err(RoundError::InsufficientDistractors {
            prompt: question.prompt.clone(),
            available: pool.len(),
        });
    }

    pool.shuffle(rng);
    let mut options: Vec<String> = pool
        .into_iter()
        .take(DISTRACTOR_COUNT)
        .map(str::to_string)
        .collect();
    options.push(question.correct_answer.clone());
    options.shuffle(rng);

    // Distractors never fold-equal the answer, so the exact match is unique.
    let correct_index = options
        .iter()
        .position(|o| *o == question.correct_answer)
        .unwrap_or(DISTRACTOR_COUNT);

    debug!("Round for question #{}: {:?}", index, options);

    Ok(Round {
        question_index: index,
        prompt: question.prompt.clone(),
        correct_answer: question.correct_answer.clone(),
        options,
        correct_index,
    })
}

// ============= Python Binding =============

#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "select_round")]
pub fn py_select_round(questions: Vec<(String, String)>, catalog: Vec<String>) -> PyResult<Round> {
    let questions = crate::store::python::to_entries(questions);
    select_round(&questions, &catalog, &mut rand::thread_rng())
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}
