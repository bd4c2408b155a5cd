//! Completed DIY project records, difficulty tiers and the point table.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ProjectId = i64;

/// The only status value the ledger treats as meaningful.
pub const STATUS_COMPLETED: &str = "Completed";

// ── Difficulty ───────────────────────────────────────────────

/// Ordinal difficulty label attached to a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// Highest tier; completing one of these earns "Tackled the Hardest".
    pub const TOP: Difficulty = Difficulty::Expert;

    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Base reward before failure penalties.
    pub fn base_points(self) -> i64 {
        match self {
            Difficulty::Easy => 25,
            Difficulty::Medium => 50,
            Difficulty::Hard => 100,
            Difficulty::Expert => 200,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
            Difficulty::Expert => write!(f, "Expert"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "Easy" | "easy" => Ok(Difficulty::Easy),
            "Medium" | "medium" => Ok(Difficulty::Medium),
            "Hard" | "hard" => Ok(Difficulty::Hard),
            "Expert" | "expert" => Ok(Difficulty::Expert),
            other => Err(format!("unknown difficulty: '{}'", other)),
        }
    }
}

// ── Failures ─────────────────────────────────────────────────

/// Known setbacks and their (non-positive) point penalties.
pub const FAILURE_CATALOG: &[(&str, i64)] = &[
    ("Forgot tool", -5),
    ("Dead battery", -8),
    ("Wrong part", -10),
    ("Broke something", -15),
    ("Called professional", -20),
    ("Trip to hardware store", -5),
    ("Started over", -12),
];

/// Penalty for a catalogued failure label.
pub fn catalog_penalty(label: &str) -> Option<i64> {
    FAILURE_CATALOG
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(label.trim()))
        .map(|(_, penalty)| *penalty)
}

/// A setback recorded against a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FailureRecord")]
pub struct Failure {
    pub label: String,
    pub penalty: i64,
}

impl Failure {
    /// Build a failure, taking the penalty from the catalog (0 if unknown).
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        let penalty = catalog_penalty(&label).unwrap_or(0);
        Self { label, penalty }
    }
}

/// Older records stored failures as bare labels.
#[derive(Deserialize)]
#[serde(untagged)]
enum FailureRecord {
    Label(String),
    Full {
        label: String,
        #[serde(default)]
        penalty: Option<i64>,
    },
}

impl From<FailureRecord> for Failure {
    fn from(record: FailureRecord) -> Self {
        match record {
            FailureRecord::Label(label) => Failure::from_label(label),
            FailureRecord::Full {
                label,
                penalty: Some(penalty),
            } => Failure {
                label,
                penalty: penalty.min(0),
            },
            FailureRecord::Full {
                label,
                penalty: None,
            } => Failure::from_label(label),
        }
    }
}

/// Points for a project: difficulty base plus the sum of failure penalties.
///
/// Unrecognised difficulty labels contribute a base of 0. The result may be
/// negative.
pub fn project_points(difficulty: Option<Difficulty>, failures: &[Failure]) -> i64 {
    let base = difficulty.map(Difficulty::base_points).unwrap_or(0);
    base + failures.iter().map(|f| f.penalty).sum::<i64>()
}

// ── Project ──────────────────────────────────────────────────

/// A logged DIY project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Opaque ordinal label; see [`Project::difficulty_tier`].
    pub difficulty: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub failures: Vec<Failure>,
    pub points: i64,
    /// Absent on records that predate the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub shared: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Project {
    /// Parsed difficulty, if the label is one of the known tiers.
    pub fn difficulty_tier(&self) -> Option<Difficulty> {
        self.difficulty.parse().ok()
    }

    /// Whether this project counts as completed. A missing status is
    /// treated as completed.
    pub fn is_completed(&self) -> bool {
        match self.status.as_deref() {
            None => true,
            Some(status) => status == STATUS_COMPLETED,
        }
    }

    /// Distinct category labels: the category followed by any tags not equal to it.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        let candidates = self
            .category
            .as_deref()
            .into_iter()
            .chain(self.tags.iter().map(String::as_str));
        for label in candidates {
            let label = label.trim();
            if !label.is_empty() && !labels.contains(&label) {
                labels.push(label);
            }
        }
        labels
    }
}
