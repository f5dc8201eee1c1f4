use std::io::Read;
use std::str::SplitWhitespace;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use stunt_core::{MAX_TRICKS, Problem, ProblemError, Stage, Trick};
use thiserror::Error;

/// Encoding of the problem read from the input stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// Whitespace-separated integers: stage count, trick count, then
    /// `bonus max_time` per stage and `points time` per trick.
    #[default]
    Text,
    /// A serialized problem document (`{"stages": [...], "tricks": [...]}`).
    Json,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("unexpected end of input while reading {field}")]
    MissingToken { field: String },
    #[error("{field}: '{token}' is not a valid integer")]
    InvalidNumber { field: String, token: String },
    #[error("{field}: {value} must not be negative")]
    Negative { field: String, value: i64 },
    #[error("{field}: {value} is out of range")]
    OutOfRange { field: String, value: i64 },
    #[error("{count} tricks exceeds the configured limit of {max}")]
    TooManyTricks { count: usize, max: usize },
    #[error("invalid problem document: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Problem(#[from] ProblemError),
}

/// Reads a whole problem from `reader`, rejecting more than `max_tricks` tricks.
pub fn read_problem<R: Read>(
    mut reader: R,
    format: InputFormat,
    max_tricks: usize,
) -> Result<Problem, InputError> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;
    match format {
        InputFormat::Text => parse_text(&buffer, max_tricks),
        InputFormat::Json => parse_json(&buffer, max_tricks),
    }
}

pub fn parse_json(json: &str, max_tricks: usize) -> Result<Problem, InputError> {
    let problem = Problem::from_json(json)?;
    check_trick_limit(problem.trick_count(), max_tricks)?;
    Ok(problem)
}

pub fn parse_text(text: &str, max_tricks: usize) -> Result<Problem, InputError> {
    let mut tokens = Tokens::new(text);

    let stage_count = tokens.count("stage count")?;
    let trick_count = tokens.count("trick count")?;
    check_trick_limit(trick_count, max_tricks)?;

    let mut stages = Vec::new();
    for number in 1..=stage_count {
        let bonus_multiplier = tokens.bounded(|| format!("stage {number} bonus multiplier"))?;
        let max_time = tokens.unsigned(|| format!("stage {number} max time"))?;
        stages.push(Stage::new(bonus_multiplier, max_time));
    }

    let mut tricks = Vec::with_capacity(trick_count);
    for number in 1..=trick_count {
        let base_points = tokens.bounded(|| format!("trick {number} points"))?;
        let time_required = tokens.unsigned(|| format!("trick {number} time"))?;
        tricks.push(Trick::new(base_points, time_required));
    }

    let trailing = tokens.remaining();
    if trailing > 0 {
        tracing::warn!(
            target: "stunt_cli::input",
            trailing,
            "ignoring tokens after the last trick"
        );
    }

    Ok(Problem::new(stages, tricks)?)
}

fn check_trick_limit(count: usize, max_tricks: usize) -> Result<(), InputError> {
    let max = max_tricks.min(MAX_TRICKS);
    if count > max {
        return Err(InputError::TooManyTricks { count, max });
    }
    Ok(())
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
        }
    }

    fn signed(&mut self, field: impl FnOnce() -> String) -> Result<i64, InputError> {
        let Some(token) = self.inner.next() else {
            return Err(InputError::MissingToken { field: field() });
        };
        token.parse::<i64>().map_err(|_| InputError::InvalidNumber {
            field: field(),
            token: token.to_string(),
        })
    }

    /// Signed value limited to the 32-bit range accepted for points and multipliers.
    fn bounded(&mut self, field: impl Fn() -> String) -> Result<i64, InputError> {
        let value = self.signed(&field)?;
        if i32::try_from(value).is_err() {
            return Err(InputError::OutOfRange {
                field: field(),
                value,
            });
        }
        Ok(value)
    }

    fn unsigned(&mut self, field: impl Fn() -> String) -> Result<u32, InputError> {
        let value = self.signed(&field)?;
        if value < 0 {
            return Err(InputError::Negative {
                field: field(),
                value,
            });
        }
        u32::try_from(value).map_err(|_| InputError::OutOfRange {
            field: field(),
            value,
        })
    }

    fn count(&mut self, field: &str) -> Result<usize, InputError> {
        let value = self.signed(|| field.to_string())?;
        if value < 0 {
            return Err(InputError::Negative {
                field: field.to_string(),
                value,
            });
        }
        usize::try_from(value).map_err(|_| InputError::OutOfRange {
            field: field.to_string(),
            value,
        })
    }

    fn remaining(self) -> usize {
        self.inner.count()
    }
}
