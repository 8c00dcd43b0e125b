//! Validated person lists handed to the pairing engine.
//!
//! Ingestion hands over three loosely coupled collections: the ordered list of
//! names, a name-to-slots map and an optional name-to-sector map. The
//! [`Roster`] joins them, rejecting inconsistent input before any model is
//! built.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::{Person, PersonError, Sector, SlotCode, SlotCodeError};

/// Errors returned while assembling a [`Roster`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// A person failed validation.
    #[error(transparent)]
    Person(#[from] PersonError),
    /// The same name appears more than once.
    #[error("person {name:?} is listed more than once")]
    DuplicateName {
        /// Repeated identifier.
        name: String,
    },
    /// A listed person has no availability entry.
    #[error("person {name:?} has no availability entry")]
    MissingAvailability {
        /// Person without availability.
        name: String,
    },
    /// A person's availability contains an undecodable slot code.
    #[error("person {name:?} has a malformed slot code: {source}")]
    MalformedSlot {
        /// Person owning the slot.
        name: String,
        /// Decoding failure.
        #[source]
        source: SlotCodeError,
    },
}

/// Ordered set of persons with unique names.
///
/// Roster order is significant: realised pairs are reported with the person
/// listed first in the roster as the first tuple element.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use maraude_core::Roster;
///
/// # fn main() -> Result<(), maraude_core::RosterError> {
/// let names = vec!["Ada".to_owned(), "Grace".to_owned()];
/// let availability = HashMap::from([
///     ("Ada".to_owned(), vec![202_401_010]),
///     ("Grace".to_owned(), vec![202_401_010, 202_401_011]),
/// ]);
/// let roster = Roster::from_maps(&names, &availability, None)?;
/// assert_eq!(roster.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    persons: Vec<Person>,
}

impl Roster {
    /// Build a roster from already validated persons.
    pub fn new(persons: Vec<Person>) -> Result<Self, RosterError> {
        let mut seen = HashSet::with_capacity(persons.len());
        for person in &persons {
            if !seen.insert(person.name()) {
                return Err(RosterError::DuplicateName {
                    name: person.name().to_owned(),
                });
            }
        }
        Ok(Self { persons })
    }

    /// Join the raw ingestion collections into a roster.
    ///
    /// Every name needs an availability entry. Sectors are optional per
    /// person: a name absent from `sectors` simply carries no sector.
    pub fn from_maps<S>(
        names: &[String],
        availabilities: &HashMap<String, Vec<u32>, S>,
        sectors: Option<&HashMap<String, i32, S>>,
    ) -> Result<Self, RosterError>
    where
        S: std::hash::BuildHasher,
    {
        let persons = names
            .iter()
            .map(|name| {
                let raw = availabilities
                    .get(name)
                    .ok_or_else(|| RosterError::MissingAvailability { name: name.clone() })?;
                let slots = raw
                    .iter()
                    .map(|code| SlotCode::try_from(*code))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|source| RosterError::MalformedSlot {
                        name: name.clone(),
                        source,
                    })?;
                let sector = sectors.and_then(|map| map.get(name)).copied().map(Sector);
                Ok(Person::new(name.clone(), slots, sector)?)
            })
            .collect::<Result<Vec<_>, RosterError>>()?;
        Self::new(persons)
    }

    /// Persons in roster order.
    #[must_use]
    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    /// Person at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Person> {
        self.persons.get(index)
    }

    /// Number of persons.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.persons.len()
    }

    /// Whether the roster is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Whether any person carries a sector tag.
    #[must_use]
    pub fn has_sectors(&self) -> bool {
        self.persons.iter().any(|p| p.sector().is_some())
    }
}
