//! Behaviour-driven step definitions for the assign CLI scenarios.

use super::helpers::write_json;
use super::*;
use crate::assign::{AssignReport, AssignStatus, run_assign_with};
use crate::request::AssignRequest;
use camino::Utf8PathBuf;
use maraude_pairing::CostMatrixError;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use tempfile::TempDir;

#[derive(Debug)]
struct AssignWorld {
    _tmp: TempDir,
    request_path: Utf8PathBuf,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl AssignWorld {
    fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        let request_path = root.join("assign.json");
        Self {
            _tmp: tmp,
            request_path,
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn write(&self, costs: Vec<Vec<Option<u64>>>) {
        let request = AssignRequest {
            workers: vec!["Em".to_owned(), "Pop".to_owned()],
            tasks: vec!["Nord".to_owned(), "Lyon".to_owned()],
            costs,
        };
        write_json(&self.request_path, &request);
    }

    fn report(&self) -> AssignReport {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        result.as_ref().expect("expected success");
        serde_json::from_slice(&self.stdout.borrow()).expect("output should be an assign report")
    }
}

#[fixture]
fn world() -> AssignWorld {
    AssignWorld::new()
}

#[given("an assign request for two volunteers and two hotels")]
fn two_by_two(#[from(world)] world: &AssignWorld) {
    world.write(vec![vec![Some(4), Some(1)], vec![Some(2), Some(6)]]);
}

#[given("an assign request where the first volunteer may not visit Lyon")]
fn forbidden_arc(#[from(world)] world: &AssignWorld) {
    world.write(vec![vec![Some(9), None], vec![Some(1), Some(3)]]);
}

#[given("an assign request whose cost rows are too short")]
fn short_rows(#[from(world)] world: &AssignWorld) {
    world.write(vec![vec![Some(1)], vec![Some(2)]]);
}

#[when("I run the assign command")]
fn run_assign_command(#[from(world)] world: &AssignWorld) {
    let invocation = ["maraude", "assign", world.request_path.as_str()];
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Assign(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_assign_with(args, &mut *buffer)
        }
        other => panic!("expected assign command, found {other:?}"),
    });
    world.result.replace(Some(outcome));
}

#[then("every volunteer gets a distinct hotel at the lowest total cost")]
fn lowest_total(#[from(world)] world: &AssignWorld) {
    let report = world.report();
    assert_eq!(report.status, AssignStatus::Optimal);
    assert_eq!(report.total_cost, 3);
    let pairs: Vec<(&str, &str)> = report
        .assignments
        .iter()
        .map(|a| (a.worker.as_str(), a.task.as_str()))
        .collect();
    assert_eq!(pairs, vec![("Em", "Lyon"), ("Pop", "Nord")]);
}

#[then("the first volunteer is sent to Nord")]
fn first_volunteer_to_nord(#[from(world)] world: &AssignWorld) {
    let report = world.report();
    assert_eq!(report.total_cost, 12);
    let first = report.assignments.first().expect("one assignment per volunteer");
    assert_eq!(first.task, "Nord");
}

#[then("the command fails because the cost table is invalid")]
fn command_fails_invalid_costs(#[from(world)] world: &AssignWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    match result {
        Err(CliError::InvalidCostMatrix { source, .. }) => assert_eq!(
            *source,
            CostMatrixError::Ragged {
                row: 0,
                len: 1,
                expected: 2
            }
        ),
        other => panic!("expected InvalidCostMatrix, found {other:?}"),
    }
}

macro_rules! register_assign_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/assign_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: AssignWorld) {
            let _ = world;
        }
    };
}

register_assign_scenario!(assign_happy_path, "assigning volunteers to hotels");
register_assign_scenario!(assign_forbidden_arc, "avoiding forbidden hotels");
register_assign_scenario!(assign_invalid_costs, "rejecting a cost table of the wrong width");
