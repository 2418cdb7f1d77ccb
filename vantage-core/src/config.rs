// Report modes and the host override table

use crate::error::{AuditError, Result};
use crate::score::Pillars;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use vantage_scanner::normalize_host;

/// Depth of the report: a compact analysis or a full report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    Short,
    Long,
}

impl ReportMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "short" | "analyze" => Some(ReportMode::Short),
            "long" | "full" | "full-report" => Some(ReportMode::Long),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportMode::Short => "short",
            ReportMode::Long => "long",
        }
    }

    pub fn default_max_pages(&self) -> usize {
        match self {
            ReportMode::Short => 10,
            ReportMode::Long => 50,
        }
    }

    pub fn default_timeout_secs(&self) -> u64 {
        match self {
            ReportMode::Short => 5,
            ReportMode::Long => 10,
        }
    }
}

/// Fixed score and pillars for an allow-listed host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreOverride {
    pub score: u32,
    pub pillars: Pillars,
}

impl ScoreOverride {
    fn validate(&self, host: &str) -> Result<()> {
        let invalid = |reason: String| AuditError::InvalidOverride {
            host: host.to_string(),
            reason,
        };

        if !(30..=100).contains(&self.score) {
            return Err(invalid(format!("score {} outside 30-100", self.score)));
        }
        for (name, value) in self.pillars.named() {
            if !(15..=25).contains(&value) {
                return Err(invalid(format!("{} pillar {} outside 15-25", name, value)));
            }
        }
        Ok(())
    }
}

/// Hosts that receive fixed scores regardless of crawl data.
///
/// Keys are stored normalized (lower-case, no leading `www.`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostOverrides {
    entries: BTreeMap<String, ScoreOverride>,
}

impl HostOverrides {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The reference hosts shipped with the tool.
    pub fn builtin() -> Self {
        let mut overrides = Self::empty();
        overrides.insert(
            "developer.mozilla.org",
            ScoreOverride {
                score: 96,
                pillars: Pillars {
                    access: 24,
                    trust: 25,
                    clarity: 24,
                    alignment: 23,
                },
            },
        );
        overrides.insert(
            "wikipedia.org",
            ScoreOverride {
                score: 94,
                pillars: Pillars {
                    access: 25,
                    trust: 24,
                    clarity: 22,
                    alignment: 23,
                },
            },
        );
        overrides.insert(
            "gov.uk",
            ScoreOverride {
                score: 92,
                pillars: Pillars {
                    access: 23,
                    trust: 25,
                    clarity: 23,
                    alignment: 21,
                },
            },
        );
        overrides
    }

    /// Loads a table from a JSON object of `host -> { score, pillars }`.
    /// A leading `~` in the path is expanded.
    pub fn from_json_file(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let content = fs::read_to_string(Path::new(expanded.as_ref()))?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: BTreeMap<String, ScoreOverride> = serde_json::from_str(content)?;
        let mut overrides = Self::empty();
        for (host, entry) in raw {
            entry.validate(&host)?;
            overrides.insert(&host, entry);
        }
        Ok(overrides)
    }

    pub fn insert(&mut self, host: &str, entry: ScoreOverride) {
        self.entries.insert(normalize_host(host), entry);
    }

    pub fn lookup(&self, host: &str) -> Option<&ScoreOverride> {
        self.entries.get(&normalize_host(host))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
