// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{
    common::types::{CliError, CliResult, CliTypedResult, OutputFormat},
    render::RenderText,
};
use deadlock_config::config::{LogFormat, LoggerConfig};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::{
    fs,
    io::Read,
    path::Path,
    time::{Duration, Instant},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

static LOGGER: OnceCell<()> = OnceCell::new();

/// Installs the global subscriber once per process. Logs go to stderr so that
/// stdout only carries command output.
pub fn start_logger(config: &LoggerConfig) {
    LOGGER.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.as_directive()));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);
        let result = match config.format {
            LogFormat::Text => builder.try_init(),
            LogFormat::Json => builder.json().try_init(),
        };
        if let Err(error) = result {
            eprintln!("Global logger has already been set: {}", error);
        }
    });
}

/// Renders a command result and logs how it went
pub fn to_common_result<T: Serialize + RenderText>(
    command: &str,
    start_time: Instant,
    result: CliTypedResult<T>,
    output: OutputFormat,
) -> CliResult {
    let latency = start_time.elapsed();
    let error = result.as_ref().err().map(|error| error.to_str());
    log_command(command, latency, error);

    let is_err = result.is_err();
    let rendered = match output {
        OutputFormat::Json => {
            let result: ResultWrapper<T> = result.into();
            serde_json::to_string_pretty(&result)
                .unwrap_or_else(|error| format!("{{\"Error\":\"{}\"}}", error))
        },
        OutputFormat::Text => match result {
            Ok(inner) => inner.render_text(),
            Err(inner) => format!("Error: {}", inner),
        },
    };
    if is_err {
        Err(rendered)
    } else {
        Ok(rendered)
    }
}

fn log_command(command: &str, latency: Duration, error: Option<&str>) {
    match error {
        Some(error) => info!(
            command = command,
            latency_ms = latency.as_millis() as u64,
            error = error,
            "Command failed"
        ),
        None => info!(
            command = command,
            latency_ms = latency.as_millis() as u64,
            "Command succeeded"
        ),
    }
}

/// A result wrapper for displaying either a correct execution result or an error.
///
/// The purpose of this is to have a pretty easy to recognize JSON output format e.g.
///
/// {
///   "Result":{
///     "is_deadlock": false, ...
///   }
/// }
///
/// {
///   "Error":"Input error: Allocation matrix must be n x m."
/// }
///
#[derive(Debug, Serialize)]
enum ResultWrapper<T> {
    Result(T),
    Error(String),
}

impl<T> From<CliTypedResult<T>> for ResultWrapper<T> {
    fn from(result: CliTypedResult<T>) -> Self {
        match result {
            Ok(inner) => ResultWrapper::Result(inner),
            Err(inner) => ResultWrapper::Error(inner.to_string()),
        }
    }
}

/// Reads a file into a string, `-` meaning stdin
pub fn read_input(path: &Path) -> CliTypedResult<String> {
    if path == Path::new("-") {
        let mut contents = String::new();
        std::io::stdin()
            .read_to_string(&mut contents)
            .map_err(|e| CliError::UnableToReadFile("<stdin>".to_string(), e.to_string()))?;
        return Ok(contents);
    }
    fs::read_to_string(path)
        .map_err(|e| CliError::UnableToReadFile(path.display().to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Answer {
        value: u8,
    }

    impl RenderText for Answer {
        fn render_text(&self) -> String {
            format!("value is {}", self.value)
        }
    }

    #[test]
    fn test_json_wrapper() {
        let ok = to_common_result(
            "Test",
            Instant::now(),
            Ok(Answer { value: 7 }),
            OutputFormat::Json,
        );
        let ok: serde_json::Value = serde_json::from_str(&ok.unwrap()).unwrap();
        assert_eq!(ok, serde_json::json!({"Result": {"value": 7}}));

        let err = to_common_result::<Answer>(
            "Test",
            Instant::now(),
            Err(CliError::HistoryDisabled),
            OutputFormat::Json,
        );
        let err: serde_json::Value = serde_json::from_str(&err.unwrap_err()).unwrap();
        assert_eq!(
            err,
            serde_json::json!({"Error": "History is disabled in the config"})
        );
    }

    #[test]
    fn test_text_output() {
        let ok = to_common_result("Test", Instant::now(), Ok(Answer { value: 1 }), OutputFormat::Text);
        assert_eq!(ok, Ok("value is 1".to_string()));
        let err = to_common_result::<Answer>(
            "Test",
            Instant::now(),
            Err(CliError::CommandArgumentError("missing".to_string())),
            OutputFormat::Text,
        );
        assert_eq!(err, Err("Error: Invalid arguments: missing".to_string()));
    }
}
