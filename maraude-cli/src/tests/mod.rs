//! Shared test harness modules for the maraude CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod assign_steps;
mod helpers;
mod plan_unit;
mod route_unit;
