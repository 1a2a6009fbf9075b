//! The consent record — the value being protected by the token envelope.

use serde::{Deserialize, Serialize};

/// Consent categories a visitor can grant or withhold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentCategory {
    Necessary,
    Preferences,
    Statistics,
    Marketing,
}

impl ConsentCategory {
    pub fn all() -> &'static [ConsentCategory] {
        &[
            Self::Necessary,
            Self::Preferences,
            Self::Statistics,
            Self::Marketing,
        ]
    }
}

/// A visitor's consent selection across the four categories.
///
/// `necessary` is always granted; toggles never touch it. The wire shape is
/// strict: decoding rejects unknown or missing fields so a token that does
/// not carry exactly these four booleans is not a valid record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsentRecord {
    pub necessary: bool,
    pub preferences: bool,
    pub statistics: bool,
    pub marketing: bool,
}

impl Default for ConsentRecord {
    fn default() -> Self {
        Self {
            necessary: true,
            preferences: false,
            statistics: false,
            marketing: false,
        }
    }
}

impl ConsentRecord {
    /// Flip one category. `Necessary` is locked on and ignored.
    pub fn toggle(&mut self, category: ConsentCategory) {
        match category {
            ConsentCategory::Necessary => {}
            ConsentCategory::Preferences => self.preferences = !self.preferences,
            ConsentCategory::Statistics => self.statistics = !self.statistics,
            ConsentCategory::Marketing => self.marketing = !self.marketing,
        }
    }

    /// Whether the record satisfies the server-side invariant.
    pub fn is_valid(&self) -> bool {
        self.necessary
    }
}
