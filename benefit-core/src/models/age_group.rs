use serde::{Deserialize, Serialize};

/// Age of the employee at the start of the tax year.
///
/// Informational only: no step of the calculation reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    #[default]
    UnderPensionAge,
    PensionAgeOrOlder,
}

impl AgeGroup {
    pub fn all() -> &'static [AgeGroup] {
        &[AgeGroup::UnderPensionAge, AgeGroup::PensionAgeOrOlder]
    }

    /// Form code used by the input collaborator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnderPensionAge => "under66",
            Self::PensionAgeOrOlder => "66plus",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "under66" => Some(Self::UnderPensionAge),
            "66plus" => Some(Self::PensionAgeOrOlder),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::UnderPensionAge => "Under 66",
            Self::PensionAgeOrOlder => "66 or older",
        }
    }
}
