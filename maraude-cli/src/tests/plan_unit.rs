//! Unit tests for turning a pairing report into routing crews.

use super::*;
use crate::plan::crews_from;
use maraude_core::{
    Enumeration, Exploration, Pairing, PairingReport, PairingSolution, SolverStatus,
};
use rstest::rstest;

fn report(status: SolverStatus, solutions: Vec<PairingSolution>) -> PairingReport {
    PairingReport {
        exploration: Exploration {
            status: SolverStatus::Optimal,
            best_score: 8,
        },
        enumeration: Enumeration { status, solutions },
    }
}

fn crew(first: &str, second: &str) -> Pairing {
    Pairing {
        first: first.to_owned(),
        second: second.to_owned(),
        shared: Vec::new(),
    }
}

#[rstest]
#[case(SolverStatus::Optimal)]
#[case(SolverStatus::Feasible)]
fn crews_come_from_the_first_solution(#[case] status: SolverStatus) {
    let first = PairingSolution::new(vec![crew("Em", "Pop"), crew("E", "Palpal")], Vec::new());
    let second = PairingSolution::new(vec![crew("Em", "E"), crew("Pop", "Palpal")], Vec::new());
    let crews = crews_from(&report(status, vec![first, second])).expect("usable pairing");
    assert_eq!(crews, vec![crew("Em", "Pop"), crew("E", "Palpal")]);
}

#[rstest]
#[case(SolverStatus::Unknown)]
#[case(SolverStatus::ModelInvalid)]
#[case(SolverStatus::Infeasible)]
fn failed_enumeration_stops_the_plan(#[case] status: SolverStatus) {
    let err = crews_from(&report(status, Vec::new())).expect_err("no crews");
    match err {
        CliError::PairingIncomplete { status: reported } => assert_eq!(reported, status),
        other => panic!("expected PairingIncomplete, found {other:?}"),
    }
}
