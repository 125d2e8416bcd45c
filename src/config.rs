use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;

use crate::predict::PredictOptions;
use crate::ratings::{loader, reference, RatingMatrix};
use crate::similarity::{Imputation, Metric, SimilarityOptions};

/// Which metric(s) a command should report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodSelection {
    Single(Metric),
    Both,
}

impl MethodSelection {
    pub fn metrics(&self) -> Vec<Metric> {
        match self {
            MethodSelection::Single(m) => vec![*m],
            MethodSelection::Both => Metric::ALL.to_vec(),
        }
    }
}

impl fmt::Display for MethodSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodSelection::Single(m) => write!(f, "{m}"),
            MethodSelection::Both => f.write_str("both"),
        }
    }
}

impl FromStr for MethodSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("both") {
            Ok(MethodSelection::Both)
        } else {
            s.parse::<Metric>()
                .map(MethodSelection::Single)
                .map_err(|_| format!("unknown method '{s}' (expected cosine, pearson or both)"))
        }
    }
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy. Command-line flags
/// override whatever is set here.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON rating matrix (USERCF_MATRIX_PATH). Unset means the built-in reference data.
    pub matrix_path: Option<PathBuf>,
    /// Default method for commands that don't pass --method (USERCF_METHOD)
    pub method: MethodSelection,
    /// How missing ratings become vector entries (USERCF_IMPUTATION)
    pub imputation: Imputation,
    /// Whether a user's own rating feeds their prediction (USERCF_INCLUDE_SELF)
    pub include_self: bool,
    /// Accepted rating range when loading a matrix (USERCF_RATING_MIN / _MAX)
    pub rating_min: f64,
    pub rating_max: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matrix_path: None,
            method: MethodSelection::Single(Metric::Cosine),
            imputation: Imputation::Zero,
            include_self: true,
            rating_min: 0.0,
            rating_max: 5.0,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Unset keys fall back to defaults; set-but-invalid values are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let method = match lookup("USERCF_METHOD") {
            Some(v) => v
                .parse::<MethodSelection>()
                .map_err(|e| anyhow::anyhow!("USERCF_METHOD: {e}"))?,
            None => defaults.method,
        };

        let imputation = match lookup("USERCF_IMPUTATION") {
            Some(v) => v
                .parse::<Imputation>()
                .map_err(|e| anyhow::anyhow!("USERCF_IMPUTATION: {e}"))?,
            None => defaults.imputation,
        };

        let include_self = match lookup("USERCF_INCLUDE_SELF").as_deref() {
            Some("true") | Some("1") | Some("yes") => true,
            Some("false") | Some("0") | Some("no") => false,
            Some(other) => {
                anyhow::bail!("USERCF_INCLUDE_SELF: expected true or false, got '{other}'")
            }
            None => defaults.include_self,
        };

        let rating_min = parse_f64(&lookup, "USERCF_RATING_MIN", defaults.rating_min)?;
        let rating_max = parse_f64(&lookup, "USERCF_RATING_MAX", defaults.rating_max)?;
        if rating_min > rating_max {
            anyhow::bail!(
                "USERCF_RATING_MIN ({rating_min}) is greater than USERCF_RATING_MAX ({rating_max})"
            );
        }

        Ok(Self {
            matrix_path: lookup("USERCF_MATRIX_PATH")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            method,
            imputation,
            include_self,
            rating_min,
            rating_max,
        })
    }

    pub fn similarity_options(&self) -> SimilarityOptions {
        SimilarityOptions {
            imputation: self.imputation,
        }
    }

    pub fn predict_options(&self) -> PredictOptions {
        PredictOptions {
            include_self: self.include_self,
        }
    }

    /// Load the configured rating matrix, or the reference dataset if none is set.
    pub fn load_matrix(&self) -> Result<RatingMatrix> {
        match &self.matrix_path {
            Some(path) => loader::load_file(path, self.rating_min, self.rating_max),
            None => reference::reference_matrix(),
        }
    }
}

fn parse_f64(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: f64) -> Result<f64> {
    match lookup(key) {
        Some(v) => {
            let parsed: f64 = v
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("{key}: expected a number, got '{v}'"))?;
            if !parsed.is_finite() {
                anyhow::bail!("{key}: expected a finite number, got '{v}'");
            }
            Ok(parsed)
        }
        None => Ok(default),
    }
}
