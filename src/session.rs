//! Quiz session: single owner of both collections and the current round

#[cfg(feature = "python")]
use pyo3::prelude::*;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::answer::{check_answer, check_option, AnswerResult};
use crate::catalog;
use crate::config::QuizConfig;
use crate::error::{QuizError, RoundError};
use crate::questions::{select_round, select_round_from_deck, QuestionDeck, Round};
use crate::store::{self, QuestionEntry};

/// Where the quiz view currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundState {
    NoQuestions,
    InsufficientCatalog { available: usize },
    InsufficientDistractors { prompt: String, available: usize },
    /// Options shown, waiting for a click.
    Ready(Round),
    /// Options locked, feedback shown.
    Answered { round: Round, result: AnswerResult },
}

impl RoundState {
    fn from_selection(selection: Result<Round, RoundError>) -> Self {
        match selection {
            Ok(round) => RoundState::Ready(round),
            Err(RoundError::NoQuestions) => RoundState::NoQuestions,
            Err(RoundError::InsufficientCatalog { available }) => {
                RoundState::InsufficientCatalog { available }
            }
            Err(RoundError::InsufficientDistractors { prompt, available }) => {
                RoundState::InsufficientDistractors { prompt, available }
            }
        }
    }

    /// The round on screen, answered or not
    pub fn round(&self) -> Option<&Round> {
        match self {
            RoundState::Ready(round) | RoundState::Answered { round, .. } => Some(round),
            _ => None,
        }
    }

    /// Why no round can be played, for the guidance message
    pub fn blocked_reason(&self) -> Option<RoundError> {
        match self {
            RoundState::NoQuestions => Some(RoundError::NoQuestions),
            RoundState::InsufficientCatalog { available } => {
                Some(RoundError::InsufficientCatalog { available: *available })
            }
            RoundState::InsufficientDistractors { prompt, available } => {
                Some(RoundError::InsufficientDistractors {
                    prompt: prompt.clone(),
                    available: *available,
                })
            }
            _ => None,
        }
    }

    /// Options accept clicks only while a round is pending.
    pub fn accepts_answer(&self) -> bool {
        matches!(self, RoundState::Ready(_))
    }
}

pub struct QuizSession<R = StdRng> {
    config: QuizConfig,
    questions: Vec<QuestionEntry>,
    catalog: Vec<String>,
    deck: Option<QuestionDeck>,
    rng: R,
    state: RoundState,
}

impl QuizSession<StdRng> {
    pub fn open(config: QuizConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> QuizSession<R> {
    /// Load both stores and present the first round.
    pub fn with_rng(config: QuizConfig, rng: R) -> Self {
        let questions = store::load_questions(&config.questions_path);
        let catalog = store::load_catalog(&config.catalog_path);
        info!(
            "Quiz started: {} questions, {} catalog entries",
            questions.len(),
            catalog.len()
        );

        let deck = config.no_repeat.then(QuestionDeck::new);
        let mut session = Self {
            config,
            questions,
            catalog,
            deck,
            rng,
            state: RoundState::NoQuestions,
        };
        session.next_round();
        session
    }

    /// Replace the current round with a freshly selected one.
    pub fn next_round(&mut self) -> &RoundState {
        let selection = match self.deck.as_mut() {
            Some(deck) => select_round_from_deck(&self.questions, &self.catalog, deck, &mut self.rng),
            None => select_round(&self.questions, &self.catalog, &mut self.rng),
        };
        if let Err(reason) = &selection {
            debug!("No round available: {}", reason);
        }
        self.state = RoundState::from_selection(selection);
        &self.state
    }

    /// Answer the pending round by option text.
    pub fn answer(&mut self, selected: &str) -> Result<AnswerResult, QuizError> {
        self.resolve(|round| Ok(check_answer(round, selected)))
    }

    /// Answer the pending round by option slot. An out-of-range slot is
    /// rejected and the round stays pending.
    pub fn answer_option(&mut self, index: usize) -> Result<AnswerResult, QuizError> {
        self.resolve(|round| check_option(round, index))
    }

    fn resolve(
        &mut self,
        check: impl FnOnce(&Round) -> Result<AnswerResult, QuizError>,
    ) -> Result<AnswerResult, QuizError> {
        let round = match &self.state {
            RoundState::Ready(round) => round,
            _ => return Err(QuizError::NoActiveRound),
        };
        let result = check(round)?;
        let round = round.clone();
        self.state = RoundState::Answered {
            round,
            result: result.clone(),
        };
        Ok(result)
    }

    /// Add a question and back-fill its answer into the catalog, persisting
    /// whatever changed. Returns whether the catalog grew.
    pub fn add_question(&mut self, prompt: &str, correct_answer: &str) -> Result<bool, QuizError> {
        let grew = catalog::add_question(&mut self.questions, &mut self.catalog, prompt, correct_answer)?;

        store::save_questions(&self.config.questions_path, &self.questions);
        if grew {
            store::save_catalog(&self.config.catalog_path, &self.catalog);
        }
        if let Some(deck) = self.deck.as_mut() {
            deck.reset();
        }
        if self.state.round().is_none() {
            self.next_round();
        }
        Ok(grew)
    }

    /// Add a catalog entry and persist the catalog. A session blocked on the
    /// catalog retries selection afterwards.
    pub fn add_catalog_entry(&mut self, text: &str) -> Result<(), QuizError> {
        catalog::add_catalog_entry(&mut self.catalog, text)?;
        store::save_catalog(&self.config.catalog_path, &self.catalog);

        if matches!(
            self.state,
            RoundState::InsufficientCatalog { .. } | RoundState::InsufficientDistractors { .. }
        ) {
            self.next_round();
        }
        Ok(())
    }

    /// Write both stores. Returns `false` if either write failed.
    pub fn save(&self) -> bool {
        let questions_ok = store::save_questions(&self.config.questions_path, &self.questions);
        let catalog_ok = store::save_catalog(&self.config.catalog_path, &self.catalog);
        questions_ok && catalog_ok
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn questions(&self) -> &[QuestionEntry] {
        &self.questions
    }

    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    pub fn sorted_catalog(&self) -> Vec<&str> {
        catalog::sorted_catalog(&self.catalog)
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }
}

// ============= Python Binding =============

#[cfg(feature = "python")]
#[pyclass(name = "QuizSession")]
pub struct PyQuizSession {
    inner: QuizSession,
}

#[cfg(feature = "python")]
#[pymethods]
impl PyQuizSession {
    #[new]
    #[pyo3(signature = (questions_path=None, catalog_path=None, no_repeat=None))]
    fn new(questions_path: Option<String>, catalog_path: Option<String>, no_repeat: Option<bool>) -> Self {
        let mut config = QuizConfig::from_env();
        if let Some(path) = questions_path {
            config.questions_path = path.into();
        }
        if let Some(path) = catalog_path {
            config.catalog_path = path.into();
        }
        if let Some(flag) = no_repeat {
            config.no_repeat = flag;
        }
        Self { inner: QuizSession::open(config) }
    }

    fn next_round(&mut self) -> PyResult<Round> {
        self.inner.next_round();
        self.current_round()
    }

    fn current_round(&self) -> PyResult<Round> {
        let state = self.inner.state();
        match (state.round(), state.blocked_reason()) {
            (Some(round), _) => Ok(round.clone()),
            (None, Some(reason)) => Err(pyo3::exceptions::PyValueError::new_err(reason.to_string())),
            (None, None) => Err(pyo3::exceptions::PyRuntimeError::new_err("no round")),
        }
    }

    fn accepts_answer(&self) -> bool {
        self.inner.state().accepts_answer()
    }

    fn answer(&mut self, selected: &str) -> PyResult<AnswerResult> {
        self.inner
            .answer(selected)
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }

    fn answer_option(&mut self, index: usize) -> PyResult<AnswerResult> {
        self.inner
            .answer_option(index)
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }

    fn add_question(&mut self, prompt: &str, correct_answer: &str) -> PyResult<bool> {
        self.inner
            .add_question(prompt, correct_answer)
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }

    fn add_catalog_entry(&mut self, text: &str) -> PyResult<()> {
        self.inner
            .add_catalog_entry(text)
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }

    fn sorted_catalog(&self) -> Vec<String> {
        self.inner.sorted_catalog().into_iter().map(str::to_string).collect()
    }

    fn question_count(&self) -> usize {
        self.inner.questions().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn seeded(config: QuizConfig) -> QuizSession<StdRng> {
        QuizSession::with_rng(config, StdRng::seed_from_u64(17))
    }

    #[test]
    fn fresh_directory_has_no_questions() {
        let dir = tempdir().unwrap();
        let session = seeded(QuizConfig::in_dir(dir.path()));

        assert_eq!(session.state(), &RoundState::NoQuestions);
        assert_eq!(session.catalog().len(), store::DEFAULT_CATALOG.len());
        assert!(session.config().catalog_path.exists());
        assert!(!session.config().questions_path.exists());
    }

    #[test]
    fn first_question_starts_a_round() {
        let dir = tempdir().unwrap();
        let mut session = seeded(QuizConfig::in_dir(dir.path()));

        let grew = session.add_question("Was ist hart?", "Diamant").unwrap();
        assert!(grew);
        assert!(session.state().accepts_answer());

        let round = session.state().round().unwrap();
        assert_eq!(round.prompt, "Was ist hart?");
        assert!(round.options.contains(&"Diamant".to_string()));
    }

    #[test]
    fn answering_locks_the_round() {
        let dir = tempdir().unwrap();
        let mut session = seeded(QuizConfig::in_dir(dir.path()));
        session.add_question("Was ist hart?", "Diamant").unwrap();

        let result = session.answer("Diamant").unwrap();
        assert!(result.is_correct);
        assert!(matches!(session.state(), RoundState::Answered { .. }));
        assert_eq!(session.answer("Diamant"), Err(QuizError::NoActiveRound));

        assert!(session.next_round().accepts_answer());
    }

    #[test]
    fn answer_without_round_is_rejected() {
        let dir = tempdir().unwrap();
        let mut session = seeded(QuizConfig::in_dir(dir.path()));
        assert_eq!(session.answer_option(0), Err(QuizError::NoActiveRound));
        assert_eq!(session.state(), &RoundState::NoQuestions);
    }

    #[test]
    fn unknown_slot_keeps_the_round_pending() {
        let dir = tempdir().unwrap();
        let mut session = seeded(QuizConfig::in_dir(dir.path()));
        session.add_question("Was ist hart?", "Diamant").unwrap();
        let round = session.state().round().unwrap().clone();

        assert_eq!(session.answer_option(7), Err(QuizError::InvalidOption { index: 7 }));
        assert_eq!(session.state(), &RoundState::Ready(round.clone()));

        let result = session.answer_option(round.correct_index).unwrap();
        assert!(result.is_correct);
        assert!(matches!(session.state(), RoundState::Answered { .. }));
    }

    #[test]
    fn unknown_text_still_counts_as_wrong() {
        let dir = tempdir().unwrap();
        let mut session = seeded(QuizConfig::in_dir(dir.path()));
        session.add_question("Was ist hart?", "Diamant").unwrap();

        let result = session.answer("diamant").unwrap();
        assert!(!result.is_correct);
        assert!(!session.state().accepts_answer());
    }

    #[test]
    fn catalog_entry_unblocks_distractor_shortage() {
        let dir = tempdir().unwrap();
        let config = QuizConfig::in_dir(dir.path());
        fs::write(&config.catalog_path, r#"["Diamant", "Glas"]"#).unwrap();
        fs::write(
            &config.questions_path,
            r#"[{"question": "Was ist hart?", "correctAnswer": "Diamant"}]"#,
        )
        .unwrap();

        let mut session = seeded(config);
        assert_eq!(
            session.state().blocked_reason(),
            Some(RoundError::InsufficientDistractors {
                prompt: "Was ist hart?".to_string(),
                available: 1,
            })
        );

        session.add_catalog_entry("Holz").unwrap();
        assert!(session.state().accepts_answer());
    }

    #[test]
    fn rejected_input_leaves_stores_untouched() {
        let dir = tempdir().unwrap();
        let config = QuizConfig::in_dir(dir.path());
        let mut session = seeded(config.clone());
        let before = fs::read_to_string(&config.catalog_path).unwrap();

        assert_eq!(
            session.add_catalog_entry("stahl"),
            Err(QuizError::Duplicate { entry: "stahl".to_string() })
        );
        assert!(session.add_question("", "Diamant").is_err());

        assert_eq!(fs::read_to_string(&config.catalog_path).unwrap(), before);
        assert!(!config.questions_path.exists());
        assert!(session.questions().is_empty());
    }
}
