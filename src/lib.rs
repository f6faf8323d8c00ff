//! Werkstoffquiz Core - Rust core for the materials-science terminology quiz
//!
//! Provides JSON persistence for questions and the answer catalog, random round
//! generation with catalog distractors, answer checking and a session type that
//! owns all quiz state. Built with the `python` feature it doubles as a Python
//! extension module for a desktop front-end.

mod answer;
mod catalog;
mod config;
mod error;
mod questions;
mod session;
mod store;

#[cfg(feature = "python")]
use pyo3::prelude::*;

pub use answer::{check_answer, check_option, AnswerResult, OptionMark};
pub use catalog::{
    add_catalog_entry, add_question, backfill_catalog, contains_ignore_case, fold, sorted_catalog,
    validate_question,
};
pub use config::{QuizConfig, CATALOG_FILE, QUESTIONS_FILE};
pub use error::{QuizError, RoundError, StoreError};
pub use questions::{
    distractor_pool, select_round, select_round_from_deck, QuestionDeck, Round, DISTRACTOR_COUNT,
    OPTION_COUNT,
};
pub use session::{QuizSession, RoundState};
pub use store::{
    default_catalog, load_catalog, load_questions, save_catalog, save_questions, QuestionEntry,
    DEFAULT_CATALOG,
};

/// Werkstoffquiz Core Python Module
#[cfg(feature = "python")]
#[pymodule]
fn werkstoffquiz_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Stores
    m.add_function(wrap_pyfunction!(store::python::py_load_questions, m)?)?;
    m.add_function(wrap_pyfunction!(store::python::py_save_questions, m)?)?;
    m.add_function(wrap_pyfunction!(store::python::py_load_catalog, m)?)?;
    m.add_function(wrap_pyfunction!(store::python::py_save_catalog, m)?)?;
    m.add_function(wrap_pyfunction!(store::python::py_default_catalog, m)?)?;

    // Rounds
    m.add_function(wrap_pyfunction!(questions::py_select_round, m)?)?;
    m.add_function(wrap_pyfunction!(answer::py_check_answer, m)?)?;

    // Register classes
    m.add_class::<questions::Round>()?;
    m.add_class::<answer::AnswerResult>()?;
    m.add_class::<session::PyQuizSession>()?;

    Ok(())
}
