use std::{fmt, str::FromStr};

use super::ScenarioError;

/// The three transmission scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    /// Constant transmission rate.
    Static,
    /// Transmission rate stepped at fixed times.
    #[serde(alias = "nonstationary")]
    Scheduled,
    /// Transmission rate under infection-level feedback.
    Adaptive,
}

impl ScenarioKind {
    pub const ALL: [Self; 3] = [Self::Static, Self::Scheduled, Self::Adaptive];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Scheduled => "scheduled",
            Self::Adaptive => "adaptive",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenarioKind {
    type Err = ScenarioError;

    /// Parses a scenario name. `nonstationary` is accepted for `scheduled`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "static" => Ok(Self::Static),
            "scheduled" | "nonstationary" => Ok(Self::Scheduled),
            "adaptive" => Ok(Self::Adaptive),
            other => Err(ScenarioError::UnknownKind(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names() {
        for kind in ScenarioKind::ALL {
            assert_eq!(kind.name().parse::<ScenarioKind>().unwrap(), kind);
        }
    }

    #[test]
    fn accepts_nonstationary_alias() {
        assert_eq!(
            "nonstationary".parse::<ScenarioKind>().unwrap(),
            ScenarioKind::Scheduled
        );
    }

    #[test]
    fn unknown_name_is_invalid_argument() {
        let err = "stochastic".parse::<ScenarioKind>().unwrap_err();
        assert!(matches!(err, ScenarioError::UnknownKind(name) if name == "stochastic"));
    }
}
