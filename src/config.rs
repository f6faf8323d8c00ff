//! Store locations and selection options

use std::env;
use std::path::{Path, PathBuf};

pub const QUESTIONS_FILE: &str = "questions.json";
pub const CATALOG_FILE: &str = "answer_catalog.json";

const QUESTIONS_ENV: &str = "WERKSTOFFQUIZ_QUESTIONS";
const CATALOG_ENV: &str = "WERKSTOFFQUIZ_CATALOG";
const NO_REPEAT_ENV: &str = "WERKSTOFFQUIZ_NO_REPEAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    pub questions_path: PathBuf,
    pub catalog_path: PathBuf,
    /// Ask every question once before repeating any.
    pub no_repeat: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions_path: PathBuf::from(QUESTIONS_FILE),
            catalog_path: PathBuf::from(CATALOG_FILE),
            no_repeat: false,
        }
    }
}

impl QuizConfig {
    /// Both stores under `dir`, default file names
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            questions_path: dir.join(QUESTIONS_FILE),
            catalog_path: dir.join(CATALOG_FILE),
            no_repeat: false,
        }
    }

    /// Defaults overridden by `WERKSTOFFQUIZ_QUESTIONS`, `WERKSTOFFQUIZ_CATALOG`
    /// and `WERKSTOFFQUIZ_NO_REPEAT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = lookup(QUESTIONS_ENV).filter(|v| !v.trim().is_empty()) {
            config.questions_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(CATALOG_ENV).filter(|v| !v.trim().is_empty()) {
            config.catalog_path = PathBuf::from(path);
        }
        if let Some(flag) = lookup(NO_REPEAT_ENV) {
            config.no_repeat = parse_flag(&flag);
        }
        config
    }

    pub fn with_no_repeat(mut self, no_repeat: bool) -> Self {
        self.no_repeat = no_repeat;
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        assert_eq!(QuizConfig::from_lookup(lookup(&[])), QuizConfig::default());
    }

    #[test]
    fn environment_overrides() {
        let config = QuizConfig::from_lookup(lookup(&[
            ("WERKSTOFFQUIZ_QUESTIONS", "/data/fragen.json"),
            ("WERKSTOFFQUIZ_CATALOG", "/data/katalog.json"),
            ("WERKSTOFFQUIZ_NO_REPEAT", "True"),
        ]));
        assert_eq!(config.questions_path, PathBuf::from("/data/fragen.json"));
        assert_eq!(config.catalog_path, PathBuf::from("/data/katalog.json"));
        assert!(config.no_repeat);
    }

    #[test]
    fn blank_paths_and_unknown_flags_fall_back() {
        let config = QuizConfig::from_lookup(lookup(&[
            ("WERKSTOFFQUIZ_QUESTIONS", "  "),
            ("WERKSTOFFQUIZ_NO_REPEAT", "maybe"),
        ]));
        assert_eq!(config.questions_path, PathBuf::from(QUESTIONS_FILE));
        assert!(!config.no_repeat);
    }

    #[test]
    fn in_dir_joins_file_names() {
        let config = QuizConfig::in_dir("/tmp/quiz");
        assert_eq!(config.catalog_path, PathBuf::from("/tmp/quiz/answer_catalog.json"));
    }
}
