//! Violation records and batch line resolution.
//!
//! A policy engine reports each violation with the file it was found in, the
//! path of the offending field and the line the resource starts on. This
//! module resolves those records to field lines before they reach a report
//! writer. Each file is loaded once no matter how many violations it holds.

use crate::config::Config;
use crate::file::loader::normalize_line_endings;
use crate::resolver::resolve_line;
use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A policy violation as reported by the evaluation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule_id: String,
    pub file: String,
    /// Path of the violating field inside the normalized resource
    pub path: String,
    /// Line the resource starts on; the config default is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub category: String,
}

/// A violation with its resolved source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedViolation {
    #[serde(flatten)]
    pub violation: Violation,
    /// `None` only when resolution failed and fallback is disabled
    pub resolved_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Parses a JSON array of violation records.
pub fn read_violations(data: &[u8]) -> Result<Vec<Violation>> {
    serde_json::from_slice(data).context("Failed to parse violation records")
}

/// Resolves the source line of every violation.
///
/// `load` is called once per distinct file name. Load failures, malformed
/// paths and unparsable documents are recorded in `error`; with
/// `config.fallback_on_error` the start line is still reported for them.
pub fn resolve_violations<F>(
    violations: &[Violation],
    mut load: F,
    config: &Config,
) -> Vec<ResolvedViolation>
where
    F: FnMut(&str) -> Result<Vec<u8>>,
{
    let mut sources: HashMap<&str, std::result::Result<Vec<u8>, String>> = HashMap::new();

    violations
        .iter()
        .map(|violation| {
            let source = sources
                .entry(violation.file.as_str())
                .or_insert_with(|| match load(&violation.file) {
                    Ok(data) if config.normalize_line_endings => {
                        Ok(normalize_line_endings(&data))
                    }
                    Ok(data) => Ok(data),
                    Err(err) => Err(format!("{:#}", err)),
                });

            let start_line = violation.line.unwrap_or(config.default_start_line);
            let outcome = match source {
                Ok(data) => {
                    resolve_line(data, &violation.path, start_line).map_err(|err| err.to_string())
                }
                Err(err) => Err(err.clone()),
            };

            match outcome {
                Ok(line) => {
                    debug!(
                        "{} {} '{}' resolved to line {}",
                        violation.rule_id, violation.file, violation.path, line
                    );
                    ResolvedViolation {
                        violation: violation.clone(),
                        resolved_line: Some(line),
                        error: None,
                    }
                }
                Err(err) => {
                    warn!(
                        "{} {} '{}': {}",
                        violation.rule_id, violation.file, violation.path, err
                    );
                    ResolvedViolation {
                        violation: violation.clone(),
                        resolved_line: config.fallback_on_error.then_some(start_line),
                        error: Some(err),
                    }
                }
            }
        })
        .collect()
}

/// Renders resolved violations as `file:line rule severity category` lines.
pub fn render_text(resolved: &[ResolvedViolation]) -> String {
    let mut out = String::new();
    for item in resolved {
        let v = &item.violation;
        let line = item
            .resolved_line
            .map(|line| line.to_string())
            .unwrap_or_else(|| "?".to_string());

        let mut fields = vec![format!("{}:{}", v.file, line), v.rule_id.clone()];
        if !v.severity.is_empty() {
            fields.push(v.severity.clone());
        }
        if !v.category.is_empty() {
            fields.push(v.category.clone());
        }
        if let Some(err) = &item.error {
            fields.push(format!("({})", err));
        }
        out.push_str(&fields.join(" "));
        out.push('\n');
    }
    out
}
