//! Typed simulation parameters and the log-artifact parser.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, PottsError};

/// Marker line separating the log header from the parameter block.
pub const PARAMS_MARKER: &str = "PARAMS";

/// Field names as the simulator writes them, in canonical flag order.
pub const REQUIRED_FIELDS: [&str; 11] = [
    "N",
    "M",
    "q",
    "steps",
    "recordFreq",
    "randomSeed",
    "J",
    "B",
    "T",
    "tau",
    "jobName",
];

fn format_error(code: &str, message: impl Into<String>) -> PottsError {
    PottsError::Format(ErrorInfo::new(code, message))
}

/// Complete, validated parameter set for one simulation run.
///
/// Immutable once constructed: the fallible log parse and the
/// defaults-filling override constructor are the only ways to obtain one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    /// Lattice width (number of rows).
    #[serde(rename = "N")]
    pub n: usize,
    /// Lattice height (number of columns).
    #[serde(rename = "M")]
    pub m: usize,
    /// Number of spin states; lattice cells take values in `[0, q)`.
    pub q: usize,
    /// Total number of kinetic Monte Carlo steps in the run.
    pub steps: usize,
    /// Interval in steps between recorded frames.
    #[serde(rename = "recordFreq")]
    pub record_freq: usize,
    /// Seed the simulator was launched with.
    #[serde(rename = "randomSeed")]
    pub random_seed: u64,
    /// Spin-spin coupling constant J.
    #[serde(rename = "J")]
    pub coupling_j: f64,
    /// External field strength B.
    #[serde(rename = "B")]
    pub field_b: f64,
    /// Bath temperature T.
    #[serde(rename = "T")]
    pub temperature: f64,
    /// Attempt-rate relaxation time tau.
    pub tau: f64,
    /// Job identifier naming the artifact pair.
    #[serde(rename = "jobName")]
    pub job_name: String,
}

/// Partial parameter assignment used for explicit construction and sweeps.
///
/// Every field is optional; [`RunParameters::from_overrides`] fills the gaps
/// with the documented defaults. Unknown keys in a serialized override map
/// are ignored during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterOverrides {
    /// Lattice width override.
    #[serde(rename = "N", skip_serializing_if = "Option::is_none")]
    pub n: Option<usize>,
    /// Lattice height override.
    #[serde(rename = "M", skip_serializing_if = "Option::is_none")]
    pub m: Option<usize>,
    /// Spin-state count override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<usize>,
    /// Step count override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
    /// Record frequency override.
    #[serde(rename = "recordFreq", skip_serializing_if = "Option::is_none")]
    pub record_freq: Option<usize>,
    /// Seed override.
    #[serde(rename = "randomSeed", skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<u64>,
    /// Coupling override.
    #[serde(rename = "J", skip_serializing_if = "Option::is_none")]
    pub coupling_j: Option<f64>,
    /// Field override.
    #[serde(rename = "B", skip_serializing_if = "Option::is_none")]
    pub field_b: Option<f64>,
    /// Temperature override.
    #[serde(rename = "T", skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Relaxation time override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tau: Option<f64>,
    /// Job name override.
    #[serde(rename = "jobName", skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
}

impl ParameterOverrides {
    fn assign(&mut self, key: &str, value: &str) -> Result<bool, PottsError> {
        match key {
            "N" => self.n = Some(parse_int(key, value)?),
            "M" => self.m = Some(parse_int(key, value)?),
            "q" => self.q = Some(parse_int(key, value)?),
            "steps" => self.steps = Some(parse_int(key, value)?),
            "recordFreq" => self.record_freq = Some(parse_int(key, value)?),
            "randomSeed" => self.random_seed = Some(parse_int(key, value)?),
            "J" => self.coupling_j = Some(parse_float(key, value)?),
            "B" => self.field_b = Some(parse_float(key, value)?),
            "T" => self.temperature = Some(parse_float(key, value)?),
            "tau" => self.tau = Some(parse_float(key, value)?),
            "jobName" => self.job_name = Some(value.to_string()),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.n.is_none() {
            missing.push("N");
        }
        if self.m.is_none() {
            missing.push("M");
        }
        if self.q.is_none() {
            missing.push("q");
        }
        if self.steps.is_none() {
            missing.push("steps");
        }
        if self.record_freq.is_none() {
            missing.push("recordFreq");
        }
        if self.random_seed.is_none() {
            missing.push("randomSeed");
        }
        if self.coupling_j.is_none() {
            missing.push("J");
        }
        if self.field_b.is_none() {
            missing.push("B");
        }
        if self.temperature.is_none() {
            missing.push("T");
        }
        if self.tau.is_none() {
            missing.push("tau");
        }
        if self.job_name.is_none() {
            missing.push("jobName");
        }
        missing
    }
}

fn parse_int<T>(key: &str, value: &str) -> Result<T, PottsError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|err| {
        PottsError::Format(
            ErrorInfo::new("param-value", format!("integer parameter failed to parse: {err}"))
                .with_context("field", key)
                .with_context("value", value),
        )
    })
}

fn parse_float(key: &str, value: &str) -> Result<f64, PottsError> {
    value.parse().map_err(|err| {
        PottsError::Format(
            ErrorInfo::new("param-value", format!("float parameter failed to parse: {err}"))
                .with_context("field", key)
                .with_context("value", value),
        )
    })
}

/// Splits a candidate `identifier = value` assignment line.
///
/// Mirrors the simulator log grammar: the identifier starts in the first
/// column and is a bare word, whitespace around `=` is tolerated, and the
/// value must be non-empty. Lines of any other shape are not assignments.
/// A second `=` inside the value is a hard error rather than silence, since
/// the grammar forbids embedded `=`.
fn split_assignment(line: &str) -> Result<Option<(&str, &str)>, PottsError> {
    let Some((lhs, rhs)) = line.split_once('=') else {
        return Ok(None);
    };
    if lhs.starts_with(char::is_whitespace) {
        return Ok(None);
    }
    let key = lhs.trim_end();
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Ok(None);
    }
    let value = rhs.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if value.contains('=') {
        return Err(PottsError::Format(
            ErrorInfo::new("param-line", "parameter value contains an embedded '='")
                .with_context("line", line.trim()),
        ));
    }
    Ok(Some((key, value)))
}

impl RunParameters {
    /// Parses the parameter block from a simulator log file.
    pub fn from_log(path: &Path) -> Result<Self, PottsError> {
        let text = fs::read_to_string(path).map_err(|err| {
            PottsError::Format(
                ErrorInfo::new("log-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_log_text(&text).map_err(|err| match err {
            PottsError::Format(info) => {
                PottsError::Format(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    /// Parses the parameter block from log text already in memory.
    ///
    /// Scans forward for the `PARAMS` marker line, then collects every
    /// `identifier = value` assignment after it. The parse fails unless the
    /// assignments cover the required field set exactly; unrecognized
    /// identifiers are ignored.
    pub fn from_log_text(text: &str) -> Result<Self, PottsError> {
        let mut lines = text.lines();
        let mut found_marker = false;
        for line in lines.by_ref() {
            if line.trim() == PARAMS_MARKER {
                found_marker = true;
                break;
            }
        }
        if !found_marker {
            return Err(format_error(
                "params-marker",
                "log ended before the PARAMS marker",
            ));
        }

        let mut collected = ParameterOverrides::default();
        for line in lines {
            if let Some((key, value)) = split_assignment(line)? {
                collected.assign(key, value)?;
            }
        }

        let missing = collected.missing_fields();
        if !missing.is_empty() {
            return Err(PottsError::Format(
                ErrorInfo::new("param-missing", "missing parameter in log file")
                    .with_context("missing", missing.join(",")),
            ));
        }
        Ok(Self::from_overrides(&collected))
    }

    /// Builds a parameter set from explicit overrides, filling the documented
    /// defaults for absent fields.
    pub fn from_overrides(overrides: &ParameterOverrides) -> Self {
        let defaults = Self::default();
        Self {
            n: overrides.n.unwrap_or(defaults.n),
            m: overrides.m.unwrap_or(defaults.m),
            q: overrides.q.unwrap_or(defaults.q),
            steps: overrides.steps.unwrap_or(defaults.steps),
            record_freq: overrides.record_freq.unwrap_or(defaults.record_freq),
            random_seed: overrides.random_seed.unwrap_or(defaults.random_seed),
            coupling_j: overrides.coupling_j.unwrap_or(defaults.coupling_j),
            field_b: overrides.field_b.unwrap_or(defaults.field_b),
            temperature: overrides.temperature.unwrap_or(defaults.temperature),
            tau: overrides.tau.unwrap_or(defaults.tau),
            job_name: overrides
                .job_name
                .clone()
                .unwrap_or_else(|| defaults.job_name.clone()),
        }
    }

    /// Number of lattice sites, `N * M`.
    pub fn site_count(&self) -> usize {
        self.n * self.m
    }

    /// Applies a second layer of overrides on top of this parameter set.
    pub fn with_overrides(&self, overrides: &ParameterOverrides) -> Self {
        Self {
            n: overrides.n.unwrap_or(self.n),
            m: overrides.m.unwrap_or(self.m),
            q: overrides.q.unwrap_or(self.q),
            steps: overrides.steps.unwrap_or(self.steps),
            record_freq: overrides.record_freq.unwrap_or(self.record_freq),
            random_seed: overrides.random_seed.unwrap_or(self.random_seed),
            coupling_j: overrides.coupling_j.unwrap_or(self.coupling_j),
            field_b: overrides.field_b.unwrap_or(self.field_b),
            temperature: overrides.temperature.unwrap_or(self.temperature),
            tau: overrides.tau.unwrap_or(self.tau),
            job_name: overrides
                .job_name
                .clone()
                .unwrap_or_else(|| self.job_name.clone()),
        }
    }
}

impl Default for RunParameters {
    fn default() -> Self {
        Self {
            n: 1,
            m: 1,
            q: 2,
            steps: 2,
            record_freq: 1,
            random_seed: 1234,
            coupling_j: 1.0,
            field_b: 0.0,
            temperature: 1.0,
            tau: 10.0,
            job_name: "potts".to_string(),
        }
    }
}
