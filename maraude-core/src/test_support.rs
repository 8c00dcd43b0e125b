//! Fixtures shared by unit, behaviour and property tests.
//!
//! The scenario rosters use four volunteers and four half-day slots on
//! 1 and 2 January 2024. Their pairwise shared counts are all two, except
//! `Em`/`Palpal` which share a single slot.

use std::collections::HashMap;

use geo::Coord;

use crate::{
    Address, DistanceMatrix, DistanceMatrixError, GeocodeError, Geocoder, ResolvedLocation,
    Roster, RosterError,
};

/// 2024-01-01 morning.
pub const DAY1_MORNING: u32 = 202_401_010;
/// 2024-01-01 afternoon.
pub const DAY1_AFTERNOON: u32 = 202_401_011;
/// 2024-01-02 morning.
pub const DAY2_MORNING: u32 = 202_401_020;
/// 2024-01-02 afternoon.
pub const DAY2_AFTERNOON: u32 = 202_401_021;

/// Names of the scenario volunteers, in roster order.
pub const SCENARIO_NAMES: [&str; 4] = ["Em", "Pop", "E", "Palpal"];

fn scenario_availability() -> [Vec<u32>; 4] {
    [
        vec![DAY1_MORNING, DAY1_AFTERNOON, DAY2_MORNING],
        vec![DAY1_MORNING, DAY2_MORNING, DAY2_AFTERNOON],
        vec![DAY1_AFTERNOON, DAY2_MORNING, DAY2_AFTERNOON],
        vec![DAY2_MORNING, DAY2_AFTERNOON],
    ]
}

/// Build the scenario roster, optionally tagging each volunteer with the
/// sector at the same position.
pub fn scenario_roster(sectors: Option<[i32; 4]>) -> Result<Roster, RosterError> {
    let names: Vec<String> = SCENARIO_NAMES.iter().map(|&n| n.to_owned()).collect();
    let availability: HashMap<String, Vec<u32>> = names
        .iter()
        .cloned()
        .zip(scenario_availability())
        .collect();
    let sector_map: Option<HashMap<String, i32>> =
        sectors.map(|tags| names.iter().cloned().zip(tags).collect());
    Roster::from_maps(&names, &availability, sector_map.as_ref())
}

/// No sectors.
pub fn scenario_a() -> Result<Roster, RosterError> {
    scenario_roster(None)
}

/// Everybody in sector 1.
pub fn scenario_b() -> Result<Roster, RosterError> {
    scenario_roster(Some([1, 1, 1, 1]))
}

/// `Em` and `E` in sector 2, `Pop` and `Palpal` in sector 1.
pub fn scenario_c() -> Result<Roster, RosterError> {
    scenario_roster(Some([2, 1, 2, 1]))
}

/// Matrix for points on a line: the distance is the absolute difference of
/// positions. Position 0 is the depot.
pub fn line_matrix(positions: &[u64]) -> Result<DistanceMatrix, DistanceMatrixError> {
    let rows = positions
        .iter()
        .map(|from| positions.iter().map(|to| from.abs_diff(*to)).collect())
        .collect();
    DistanceMatrix::from_rows(rows)
}

/// Labels `depot`, `hotel-1`, `hotel-2`, ... at arbitrary but valid
/// coordinates.
#[must_use]
pub fn labelled_locations(count: usize) -> Vec<ResolvedLocation> {
    (0..count)
        .map(|index| ResolvedLocation {
            label: if index == 0 {
                "depot".to_owned()
            } else {
                format!("hotel-{index}")
            },
            position: Coord { x: 2.35, y: 48.85 },
        })
        .collect()
}

/// Geocoder answering from a fixed postcode table.
#[derive(Debug, Default, Clone)]
pub struct TableGeocoder {
    table: HashMap<String, Coord<f64>>,
}

impl TableGeocoder {
    /// Register `postcode` at `position`.
    #[must_use]
    pub fn with(mut self, postcode: &str, position: Coord<f64>) -> Self {
        self.table.insert(postcode.to_owned(), position);
        self
    }
}

impl Geocoder for TableGeocoder {
    fn geocode(&self, address: &Address) -> Result<Option<Coord<f64>>, GeocodeError> {
        Ok(self.table.get(&address.postcode).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn scenario_rosters_are_valid() {
        let roster = scenario_c().expect("valid roster");
        assert_eq!(roster.len(), 4);
        assert!(roster.has_sectors());
        assert!(!scenario_a().expect("valid roster").has_sectors());
    }

    #[rstest]
    fn line_matrix_is_symmetric() {
        let matrix = line_matrix(&[0, 3, 10]).expect("square");
        assert_eq!(matrix.get(1, 2), Some(7));
        assert_eq!(matrix.get(2, 1), Some(7));
    }
}
