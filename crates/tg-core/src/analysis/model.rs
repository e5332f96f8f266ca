//! Analysis domain models.

use serde::{Deserialize, Serialize};

/// Upper bound for confidence and category scores.
pub const MAX_SCORE: u8 = 100;

/// The model's categorical claim about a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Real,
    Fake,
    Misleading,
    Unverified,
}

impl Verdict {
    /// Convert to the wire literal.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Real => "REAL",
            Self::Fake => "FAKE",
            Self::Misleading => "MISLEADING",
            Self::Unverified => "UNVERIFIED",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A grounding source cited by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub uri: String,
    pub verified: bool,
}

/// Category scores, each in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Categories {
    pub bias: u8,
    pub sensationalism: u8,
    pub logical_consistency: u8,
}

/// The decoded outcome of one analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub verdict: Verdict,
    pub confidence: u8,
    pub explanation: String,
    pub key_points: Vec<String>,
    pub sources: Vec<Source>,
    pub categories: Categories,
}

impl AnalysisResult {
    /// Check the invariants serde cannot express.
    ///
    /// Returns a description of the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        check_score("confidence", self.confidence)?;
        check_score("categories.bias", self.categories.bias)?;
        check_score("categories.sensationalism", self.categories.sensationalism)?;
        check_score(
            "categories.logicalConsistency",
            self.categories.logical_consistency,
        )?;

        if self.explanation.trim().is_empty() {
            return Err("explanation is empty".to_string());
        }

        for (i, source) in self.sources.iter().enumerate() {
            match reqwest::Url::parse(&source.uri) {
                Ok(url) if url.has_host() => {}
                _ => return Err(format!("sources[{}].uri is not a valid URL: {}", i, source.uri)),
            }
        }

        Ok(())
    }
}

fn check_score(field: &str, value: u8) -> Result<(), String> {
    if value > MAX_SCORE {
        return Err(format!("{} out of range: {}", field, value));
    }
    Ok(())
}
