//! Option values and engine configuration shared by the subcommands.

use std::num::NonZeroUsize;
use std::time::Duration;

use clap::ValueEnum;
use maraude_core::{LocationFilter, ResolvedLocation};
use maraude_pairing::{PairingConfig, SearchLimits, SectorRule};
use maraude_routing::RoutingConfig;
use serde::{Deserialize, Serialize};

/// How sector tags restrict pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum SectorMode {
    /// Restrict when any volunteer carries a sector.
    #[default]
    WhenTagged,
    /// Always restrict; untagged volunteers only pair with each other.
    Always,
    /// Pair across sectors.
    Ignore,
}

impl From<SectorMode> for SectorRule {
    fn from(mode: SectorMode) -> Self {
        match mode {
            SectorMode::WhenTagged => Self::WhenTagged,
            SectorMode::Always => Self::Always,
            SectorMode::Ignore => Self::Ignore,
        }
    }
}

/// What to do with hotels lacking a usable coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum UnresolvedPolicy {
    /// Route the others and report the dropped ones.
    #[default]
    Drop,
    /// Refuse to route.
    Strict,
}

impl UnresolvedPolicy {
    pub(crate) fn apply(
        self,
        filter: LocationFilter,
    ) -> Result<Vec<ResolvedLocation>, maraude_core::LocationError> {
        match self {
            Self::Drop => Ok(filter.into_resolved()),
            Self::Strict => filter.into_strict(),
        }
    }
}

pub(crate) fn pairing_config(
    solution_limit: Option<NonZeroUsize>,
    sectors: Option<SectorMode>,
    time_limit_ms: Option<u64>,
) -> PairingConfig {
    let defaults = PairingConfig::default();
    PairingConfig {
        solution_limit: solution_limit.unwrap_or(defaults.solution_limit),
        sectors: sectors.unwrap_or_default().into(),
        limits: SearchLimits {
            time_limit: time_limit_ms.map(Duration::from_millis),
            ..defaults.limits
        },
    }
}

pub(crate) fn routing_config(
    max_route_distance: Option<u64>,
    span_coefficient: Option<u64>,
) -> RoutingConfig {
    let defaults = RoutingConfig::default();
    RoutingConfig {
        max_route_distance: max_route_distance.unwrap_or(defaults.max_route_distance),
        global_span_coefficient: span_coefficient.unwrap_or(defaults.global_span_coefficient),
    }
}
