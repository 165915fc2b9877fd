//! Keyword-per-line config files.
//!
//! The classic format used by the ensemble tooling:
//!
//! ```text
//! -- Iterated smoother setup
//! ITER_COUNT     6
//! ITER_CASE      it_%d
//! ITER_RUNPATH   simulations/iter%d     -- relative to the case root
//! INCLUDE        shared/analysis.conf
//! ENKF_ALPHA     __RESET__
//! ```
//!
//! Rules:
//!
//! - Tokens are separated by spaces or tabs; the first is the keyword.
//! - A token starting with `--` begins a comment. A token containing `--`
//!   later on is kept whole and ends the line.
//! - `INCLUDE path` parses another file, relative to the including file.
//!   Including a file that is already being parsed is an error.
//! - The last occurrence of a keyword wins. `__RESET__` as the only
//!   argument restores the library default.
//! - Wrong argument counts and unparsable values are collected and
//!   reported together once the whole file has been read.
//! - Unknown keywords are warned about and ignored.

use enkf_iter_domain::{ConfigIssue, ConfigIssueCode, FieldValue, IterField, IterSettings, Severity};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const COMMENT: &str = "--";
const INCLUDE_KEYWORD: &str = "INCLUDE";
const RESET_VALUE: &str = "__RESET__";

/// Errors from reading keyword config files.
#[derive(Error, Debug)]
pub enum KeywordFileError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: already parsed - circular include?", .path.display())]
    CircularInclude { path: PathBuf },

    #[error("Errors when parsing config file:\n  {}", .errors.join("\n  "))]
    Parse { errors: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
enum Assignment {
    Value(FieldValue),
    Reset,
}

/// Values collected from one keyword config file and its includes.
#[derive(Debug, Clone, Default)]
pub struct KeywordConfig {
    assignments: HashMap<IterField, Assignment>,
    /// Non-fatal findings, e.g. unknown keywords.
    pub warnings: Vec<ConfigIssue>,
}

impl KeywordConfig {
    /// Parse a file (and everything it includes).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, KeywordFileError> {
        let mut parser = Parser::default();
        parser.parse_file(path.as_ref())?;
        parser.finish()
    }

    /// Parse text directly. `INCLUDE` paths resolve against `base_dir`.
    pub fn from_str_in(content: &str, base_dir: &Path) -> Result<Self, KeywordFileError> {
        let mut parser = Parser::default();
        parser.parse_content(content, "<string>", base_dir)?;
        parser.finish()
    }

    /// The value set for `field`, if any. A reset field reports `None`.
    pub fn get(&self, field: IterField) -> Option<&FieldValue> {
        match self.assignments.get(&field) {
            Some(Assignment::Value(value)) => Some(value),
            _ => None,
        }
    }

    pub fn is_reset(&self, field: IterField) -> bool {
        matches!(self.assignments.get(&field), Some(Assignment::Reset))
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Overlay the collected keywords onto `settings`.
    pub fn apply_to(&self, settings: &mut IterSettings) {
        for (&field, assignment) in &self.assignments {
            match assignment {
                Assignment::Value(value) => {
                    // Values were parsed with the field's own kind
                    if let Err(e) = settings.set(field, value.clone()) {
                        warn!("Ignoring {}: {}", field.keyword(), e);
                    }
                }
                Assignment::Reset => settings.reset(field),
            }
        }
    }
}

#[derive(Default)]
struct Parser {
    /// Files currently on the include stack.
    active: Vec<PathBuf>,
    errors: Vec<String>,
    config: KeywordConfig,
}

impl Parser {
    fn parse_file(&mut self, path: &Path) -> Result<(), KeywordFileError> {
        let canonical = std::fs::canonicalize(path).map_err(|source| KeywordFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if self.active.contains(&canonical) {
            return Err(KeywordFileError::CircularInclude { path: canonical });
        }

        let content =
            std::fs::read_to_string(&canonical).map_err(|source| KeywordFileError::Io {
                path: canonical.clone(),
                source,
            })?;

        debug!("Parsing keyword config {}", canonical.display());
        let base_dir = canonical
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let origin = canonical.display().to_string();

        self.active.push(canonical);
        let result = self.parse_content(&content, &origin, &base_dir);
        self.active.pop();
        result
    }

    fn parse_content(
        &mut self,
        content: &str,
        origin: &str,
        base_dir: &Path,
    ) -> Result<(), KeywordFileError> {
        for (index, line) in content.lines().enumerate() {
            let tokens = active_tokens(line);
            let Some((&keyword, args)) = tokens.split_first() else {
                continue;
            };
            let location = format!("{}:{}", origin, index + 1);

            if keyword == INCLUDE_KEYWORD {
                if args.len() != 1 {
                    self.errors.push(format!(
                        "{}: keyword {} must have exactly one argument",
                        location, INCLUDE_KEYWORD
                    ));
                    continue;
                }
                self.parse_file(&base_dir.join(args[0]))?;
                continue;
            }

            let Some(field) = IterField::from_keyword(keyword) else {
                warn!(
                    "Keyword {} not recognized when parsing {} - ignored",
                    keyword, location
                );
                self.config.warnings.push(ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::UnknownKeyword {
                        keyword: keyword.to_string(),
                    },
                    message: format!("{}: unknown keyword {} ignored", location, keyword),
                });
                continue;
            };

            if args.len() != 1 {
                self.errors.push(format!(
                    "{}: keyword {} must have exactly one argument, got {}",
                    location,
                    keyword,
                    args.len()
                ));
                continue;
            }

            let assignment = if args[0] == RESET_VALUE {
                Assignment::Reset
            } else {
                match FieldValue::parse(field.kind(), args[0]) {
                    Ok(value) => Assignment::Value(value),
                    Err(e) => {
                        self.errors.push(format!("{}: {}: {}", location, keyword, e));
                        continue;
                    }
                }
            };
            self.config.assignments.insert(field, assignment);
        }
        Ok(())
    }

    fn finish(self) -> Result<KeywordConfig, KeywordFileError> {
        if self.errors.is_empty() {
            Ok(self.config)
        } else {
            Err(KeywordFileError::Parse {
                errors: self.errors,
            })
        }
    }
}

/// Split a line into tokens, dropping everything from the comment on.
fn active_tokens(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for token in line.split([' ', '\t']).filter(|t| !t.is_empty()) {
        if token.starts_with(COMMENT) {
            break;
        }
        tokens.push(token);
        if token.contains(COMMENT) {
            break;
        }
    }
    tokens
}
