use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{NumlabError, NumlabResult};

/// Which client surface is exposed.
///
/// `Legacy` is the narrow surface the first clients shipped with; views
/// written against it keep working unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiMode {
    #[default]
    Extended,
    Legacy,
}

impl ApiMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Extended => "extended",
            Self::Legacy => "legacy",
        }
    }
}

impl fmt::Display for ApiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiMode {
    type Err = NumlabError;

    fn from_str(s: &str) -> NumlabResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "extended" => Ok(Self::Extended),
            "legacy" => Ok(Self::Legacy),
            other => Err(NumlabError::Config(format!(
                "unknown api mode `{other}` (expected `extended` or `legacy`)"
            ))),
        }
    }
}

/// Backend operation, identified on the wire by its resource path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FixedPoint,
    NewtonRaphson,
    MultipleRoots,
    FalsePosition,
    Bisection,
    Interpolation,
    SystemsEquations,
}

impl Operation {
    pub const ALL: [Self; 7] = [
        Self::FixedPoint,
        Self::NewtonRaphson,
        Self::MultipleRoots,
        Self::FalsePosition,
        Self::Bisection,
        Self::Interpolation,
        Self::SystemsEquations,
    ];

    #[must_use]
    pub const fn resource_path(self) -> &'static str {
        match self {
            Self::FixedPoint => "fixed-point",
            Self::NewtonRaphson => "newton-raphson",
            Self::MultipleRoots => "multiple-roots",
            Self::FalsePosition => "false-position",
            Self::Bisection => "bisection",
            Self::Interpolation => "interpolation",
            Self::SystemsEquations => "systems-equations",
        }
    }

    #[must_use]
    pub const fn is_available_in(self, mode: ApiMode) -> bool {
        match mode {
            ApiMode::Extended => true,
            ApiMode::Legacy => matches!(
                self,
                Self::FixedPoint
                    | Self::FalsePosition
                    | Self::Interpolation
                    | Self::SystemsEquations
            ),
        }
    }

    /// Root-finding operations answer with an iteration table.
    #[must_use]
    pub const fn is_root_finding(self) -> bool {
        !matches!(self, Self::Interpolation | Self::SystemsEquations)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource_path())
    }
}

impl FromStr for Operation {
    type Err = NumlabError;

    fn from_str(s: &str) -> NumlabResult<Self> {
        let wanted = s.trim().trim_start_matches('/');
        Self::ALL
            .into_iter()
            .find(|operation| operation.resource_path() == wanted)
            .ok_or_else(|| NumlabError::InvalidData(format!("unknown operation `{s}`")))
    }
}
