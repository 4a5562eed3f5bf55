//! Model specifications understood by forecast checkers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CheckLastError, Result};

/// Predefined modelling specification, from the simplest (`TR0`) to the
/// fully automatic one (`TRfull`).
///
/// Checkers decide how each preset maps onto an actual model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ModelSpecification {
    Tr0,
    Tr1,
    Tr2,
    Tr3,
    Tr4,
    Tr5,
    #[default]
    TrFull,
}

impl ModelSpecification {
    pub const ALL: [ModelSpecification; 7] = [
        ModelSpecification::Tr0,
        ModelSpecification::Tr1,
        ModelSpecification::Tr2,
        ModelSpecification::Tr3,
        ModelSpecification::Tr4,
        ModelSpecification::Tr5,
        ModelSpecification::TrFull,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ModelSpecification::Tr0 => "TR0",
            ModelSpecification::Tr1 => "TR1",
            ModelSpecification::Tr2 => "TR2",
            ModelSpecification::Tr3 => "TR3",
            ModelSpecification::Tr4 => "TR4",
            ModelSpecification::Tr5 => "TR5",
            ModelSpecification::TrFull => "TRfull",
        }
    }
}

impl fmt::Display for ModelSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelSpecification {
    type Err = CheckLastError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|spec| spec.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CheckLastError::Parse(format!("unknown specification '{}'", s)))
    }
}

impl TryFrom<String> for ModelSpecification {
    type Error = CheckLastError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ModelSpecification> for String {
    fn from(spec: ModelSpecification) -> Self {
        spec.name().to_string()
    }
}
