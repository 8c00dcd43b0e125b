//! Volunteers and their availability.

use std::collections::HashMap;

use thiserror::Error;

use crate::SlotCode;

/// Integer affinity tag grouping persons by preferred area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Sector(pub i32);

/// A volunteer who may be paired with another.
///
/// # Examples
///
/// ```
/// use maraude_core::{Person, Sector, SlotCode};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let slot = SlotCode::try_from(202_401_010)?;
/// let person = Person::new("Ada", vec![slot], Some(Sector(2)))?;
/// assert_eq!(person.name(), "Ada");
/// assert_eq!(person.sector(), Some(Sector(2)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "PersonRecord"))]
pub struct Person {
    name: String,
    availability: Vec<SlotCode>,
    sector: Option<Sector>,
}

/// Unvalidated wire form of a [`Person`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PersonRecord {
    name: String,
    availability: Vec<SlotCode>,
    #[serde(default)]
    sector: Option<Sector>,
}

#[cfg(feature = "serde")]
impl TryFrom<PersonRecord> for Person {
    type Error = PersonError;

    fn try_from(record: PersonRecord) -> Result<Self, Self::Error> {
        Self::new(record.name, record.availability, record.sector)
    }
}

/// Errors returned by [`Person::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersonError {
    /// The name was empty or whitespace.
    #[error("person name must not be empty")]
    EmptyName,
}

impl Person {
    /// Validates and constructs a [`Person`].
    pub fn new(
        name: impl Into<String>,
        availability: Vec<SlotCode>,
        sector: Option<Sector>,
    ) -> Result<Self, PersonError> {
        let owned: String = name.into();
        if owned.trim().is_empty() {
            return Err(PersonError::EmptyName);
        }
        Ok(Self {
            name: owned,
            availability,
            sector,
        })
    }

    /// Identifier of the person.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Availability slots in the order they were supplied.
    #[must_use]
    pub fn availability(&self) -> &[SlotCode] {
        &self.availability
    }

    /// Optional sector tag.
    #[must_use]
    pub const fn sector(&self) -> Option<Sector> {
        self.sector
    }
}

/// Slots present in both sequences, in `a`'s order.
///
/// Repeated slots are matched as a multiset: a slot listed twice by `a` and
/// once by `b` contributes once.
///
/// # Examples
///
/// ```
/// use maraude_core::{shared_slots, SlotCode};
///
/// # fn main() -> Result<(), maraude_core::SlotCodeError> {
/// let monday = SlotCode::try_from(202_401_010)?;
/// let tuesday = SlotCode::try_from(202_401_020)?;
/// let shared = shared_slots(&[monday, tuesday], &[tuesday]);
/// assert_eq!(shared, vec![tuesday]);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn shared_slots(a: &[SlotCode], b: &[SlotCode]) -> Vec<SlotCode> {
    let mut remaining: HashMap<SlotCode, usize> = HashMap::new();
    for slot in b {
        *remaining.entry(*slot).or_default() += 1;
    }
    a.iter()
        .filter(|slot| match remaining.get_mut(*slot) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        })
        .copied()
        .collect()
}
