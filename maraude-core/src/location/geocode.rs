//! Address-to-coordinate lookup contract.

use geo::Coord;
use thiserror::Error;

use super::Location;

/// Postal address of a hotel or of the depot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address {
    /// Street line.
    pub street: String,
    /// Postal code.
    pub postcode: String,
}

/// Errors raised by a [`Geocoder`] backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The lookup service failed; the address may still be valid.
    #[error("geocoding service failed: {message}")]
    Service {
        /// Backend-provided detail.
        message: String,
    },
}

/// Resolve addresses to coordinates.
///
/// `Ok(None)` means the service answered but knows no such address; errors
/// are reserved for service failures.
pub trait Geocoder {
    /// Look up `address`.
    fn geocode(&self, address: &Address) -> Result<Option<Coord<f64>>, GeocodeError>;
}

/// Geocode every labelled address, keeping unknown addresses as unresolved
/// locations so the pre-filter can report them.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use maraude_core::{Address, GeocodeError, Geocoder, geocode_all};
///
/// struct OnlyHq;
///
/// impl Geocoder for OnlyHq {
///     fn geocode(&self, address: &Address) -> Result<Option<Coord<f64>>, GeocodeError> {
///         Ok((address.postcode == "75012").then_some(Coord { x: 2.39, y: 48.84 }))
///     }
/// }
///
/// let entries = vec![
///     ("HQ".to_owned(), Address { street: "35 av Courteline".into(), postcode: "75012".into() }),
///     ("Hotel".to_owned(), Address { street: "1 rue Nulle".into(), postcode: "00000".into() }),
/// ];
/// let locations = geocode_all(&OnlyHq, &entries)?;
/// assert!(locations[0].position.is_some());
/// assert!(locations[1].position.is_none());
/// # Ok::<(), GeocodeError>(())
/// ```
pub fn geocode_all<G>(
    geocoder: &G,
    entries: &[(String, Address)],
) -> Result<Vec<Location>, GeocodeError>
where
    G: Geocoder + ?Sized,
{
    entries
        .iter()
        .map(|(label, address)| {
            let position = geocoder.geocode(address)?;
            if position.is_none() {
                log::debug!("no coordinate for {label:?} ({})", address.postcode);
            }
            Ok(Location {
                label: label.clone(),
                position,
            })
        })
        .collect()
}
