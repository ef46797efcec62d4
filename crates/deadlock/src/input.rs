// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Decoding of external representations into a [`SystemState`].
//!
//! Two representations are understood: a JSON document with the nested
//! matrices, and the flat form fields the web front end posts (`n`, `m`,
//! `alloc_i_j`, `req_i_j`, `avail_j`). Any failure here is an [`InputError`];
//! shape and sign problems are left to validation.

use clap::ValueEnum;
use deadlock_types::{Matrix, ResourceCount, ResourceVector, SystemState};
use std::collections::BTreeMap;
use thiserror::Error;

/// Largest `n` or `m` accepted from form fields.
pub const MAX_FORM_DIMENSION: usize = 10_000;

#[derive(Debug, Error)]
#[error("Invalid input. Enter integers only. {detail}")]
pub struct InputError {
    pub detail: InputErrorDetail,
}

#[derive(Debug, Error)]
pub enum InputErrorDetail {
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Field '{0}' is missing")]
    MissingField(String),
    #[error("Field '{field}' has non-integer value '{value}'")]
    NotAnInteger { field: String, value: String },
    #[error("Field '{0}' is given more than once")]
    DuplicateField(String),
    #[error("Expected KEY=VALUE but got '{0}'")]
    MalformedPair(String),
    #[error("Dimension '{field}' = {value} exceeds {max}")]
    DimensionTooLarge {
        field: &'static str,
        value: usize,
        max: usize,
    },
}

impl From<InputErrorDetail> for InputError {
    fn from(detail: InputErrorDetail) -> Self {
        Self { detail }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum InputFormat {
    /// `{"n":..,"m":..,"allocation":[[..]],"request":[[..]],"available":[..]}`
    #[default]
    Json,
    /// One `key=value` form field per line
    Form,
}

pub fn decode(contents: &str, format: InputFormat) -> Result<SystemState, InputError> {
    match format {
        InputFormat::Json => decode_json(contents),
        InputFormat::Form => decode_form_text(contents),
    }
}

pub fn decode_json(contents: &str) -> Result<SystemState, InputError> {
    serde_json::from_str(contents).map_err(|e| InputErrorDetail::Json(e).into())
}

/// Decodes `key=value` lines. Blank lines and lines starting with `#` are skipped.
pub fn decode_form_text(contents: &str) -> Result<SystemState, InputError> {
    let lines = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'));
    decode_form_pairs(lines)
}

/// Decodes form fields given as `key=value` strings.
pub fn decode_form_pairs<'a>(
    pairs: impl IntoIterator<Item = &'a str>,
) -> Result<SystemState, InputError> {
    let mut fields = BTreeMap::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| InputErrorDetail::MalformedPair(pair.to_string()))?;
        let key = key.trim();
        if fields.insert(key.to_string(), value.trim().to_string()).is_some() {
            return Err(InputErrorDetail::DuplicateField(key.to_string()).into());
        }
    }
    FormFields { fields }.decode()
}

struct FormFields {
    fields: BTreeMap<String, String>,
}

impl FormFields {
    fn decode(&self) -> Result<SystemState, InputError> {
        let n = self.dimension("n")?;
        let m = self.dimension("m")?;
        let allocation = self.matrix("alloc", n, m)?;
        let request = self.matrix("req", n, m)?;
        let available = self.vector("avail", m)?;
        Ok(SystemState::new(n, m, allocation, request, available))
    }

    fn raw(&self, field: &str) -> Result<&str, InputErrorDetail> {
        self.fields
            .get(field)
            .map(String::as_str)
            .ok_or_else(|| InputErrorDetail::MissingField(field.to_string()))
    }

    fn dimension(&self, field: &'static str) -> Result<usize, InputErrorDetail> {
        let value = self.raw(field)?;
        let dimension: usize = value.parse().map_err(|_| InputErrorDetail::NotAnInteger {
            field: field.to_string(),
            value: value.to_string(),
        })?;
        if dimension > MAX_FORM_DIMENSION {
            return Err(InputErrorDetail::DimensionTooLarge {
                field,
                value: dimension,
                max: MAX_FORM_DIMENSION,
            });
        }
        Ok(dimension)
    }

    fn count(&self, field: &str) -> Result<ResourceCount, InputErrorDetail> {
        let value = self.raw(field)?;
        value.parse().map_err(|_| InputErrorDetail::NotAnInteger {
            field: field.to_string(),
            value: value.to_string(),
        })
    }

    fn vector(&self, prefix: &str, m: usize) -> Result<ResourceVector, InputErrorDetail> {
        (0..m)
            .map(|j| self.count(&format!("{}_{}", prefix, j)))
            .collect()
    }

    fn matrix(&self, prefix: &str, n: usize, m: usize) -> Result<Matrix, InputErrorDetail> {
        (0..n)
            .map(|i| self.vector(&format!("{}_{}", prefix, i), m))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_matches, assert_ok};

    #[test]
    fn test_json() {
        let state = assert_ok!(decode_json(
            r#"{"n":2,"m":1,"allocation":[[1],[0]],"request":[[0],[1]],"available":[0]}"#
        ));
        assert_eq!(state.num_processes, 2);
        assert_eq!(state.request, vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_json_keeps_negative_and_ragged_input_for_validation() {
        let state = assert_ok!(decode_json(
            r#"{"n":1,"m":2,"allocation":[[-1]],"request":[[0,0]],"available":[0,0]}"#
        ));
        assert_eq!(state.allocation, vec![vec![-1]]);
    }

    #[test]
    fn test_json_rejects_non_integers() {
        let error = decode_json(
            r#"{"n":1,"m":1,"allocation":[[1.5]],"request":[[0]],"available":[0]}"#,
        )
        .unwrap_err();
        assert_matches!(error.detail, InputErrorDetail::Json(_));
        assert!(error
            .to_string()
            .starts_with("Invalid input. Enter integers only."));
    }

    #[test]
    fn test_form_fields() {
        let contents = "\
            # circular wait\n\
            n=2\nm=2\n\
            alloc_0_0=1\nalloc_0_1=0\nalloc_1_0=0\nalloc_1_1=1\n\
            req_0_0=0\nreq_0_1=1\nreq_1_0=1\nreq_1_1=0\n\
            avail_0=0\navail_1=0\n";
        let state = assert_ok!(decode(contents, InputFormat::Form));
        assert_eq!(
            state,
            SystemState::new(
                2,
                2,
                vec![vec![1, 0], vec![0, 1]],
                vec![vec![0, 1], vec![1, 0]],
                vec![0, 0],
            )
        );
    }

    #[test]
    fn test_form_negative_values_pass_through() {
        let state = assert_ok!(decode_form_pairs([
            "n=1", "m=1", "alloc_0_0=-2", "req_0_0=0", "avail_0=1"
        ]));
        assert_eq!(state.allocation, vec![vec![-2]]);
    }

    #[test]
    fn test_form_errors() {
        match decode_form_pairs(["n=1", "m=1", "alloc_0_0=1", "avail_0=1"])
            .unwrap_err()
            .detail
        {
            InputErrorDetail::MissingField(field) => assert_eq!(field, "req_0_0"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_matches!(
            decode_form_pairs(["n=two", "m=1"]).unwrap_err().detail,
            InputErrorDetail::NotAnInteger { .. }
        );
        assert_matches!(
            decode_form_pairs(["n=-1", "m=0"]).unwrap_err().detail,
            InputErrorDetail::NotAnInteger { .. }
        );
        assert_matches!(
            decode_form_pairs(["n=0", "n=1"]).unwrap_err().detail,
            InputErrorDetail::DuplicateField(_)
        );
        assert_matches!(
            decode_form_pairs(["n"]).unwrap_err().detail,
            InputErrorDetail::MalformedPair(_)
        );
        assert_matches!(
            decode_form_pairs(["n=99999999", "m=0"]).unwrap_err().detail,
            InputErrorDetail::DimensionTooLarge { field: "n", .. }
        );
    }

    #[test]
    fn test_form_empty_system() {
        let state = assert_ok!(decode_form_pairs(["n=0", "m=0"]));
        assert_eq!(state, SystemState::empty());
    }
}
