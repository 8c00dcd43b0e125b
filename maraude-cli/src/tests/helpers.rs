//! Test helpers for writing request files into temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use tempfile::TempDir;

use crate::request::{LocationEntry, PersonEntry};

/// Temporary directory exposed as a UTF-8 path.
pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

pub(super) fn write_json<T: Serialize>(path: &Utf8Path, value: &T) {
    let payload = serde_json::to_string_pretty(value).expect("serialize request");
    write_utf8(path, payload.as_bytes());
}

fn person(name: &str, availability: &[u32], sector: Option<i32>) -> PersonEntry {
    PersonEntry {
        name: name.to_owned(),
        availability: availability.to_vec(),
        sector,
    }
}

/// Four volunteers over two days; the best pairing pairs everyone.
pub(super) fn volunteers() -> Vec<PersonEntry> {
    vec![
        person("Em", &[202_401_010, 202_401_011, 202_401_020], None),
        person("Pop", &[202_401_010, 202_401_020, 202_401_021], None),
        person("E", &[202_401_011, 202_401_020, 202_401_021], None),
        person("Palpal", &[202_401_020, 202_401_021], None),
    ]
}

fn location(label: &str, coordinate: Option<(f64, f64)>) -> LocationEntry {
    LocationEntry {
        label: label.to_owned(),
        latitude: coordinate.map(|(latitude, _)| latitude),
        longitude: coordinate.map(|(_, longitude)| longitude),
    }
}

/// A depot in central Paris, three hotels and one hotel without coordinates.
pub(super) fn hotels() -> Vec<LocationEntry> {
    vec![
        location("Depot", Some((48.8566, 2.3522))),
        location("Hotel Nord", Some((48.8809, 2.3553))),
        location("Hotel Lyon", Some((48.8443, 2.3744))),
        location("Hotel Etoile", Some((48.8738, 2.2950))),
        location("Hotel Inconnu", None),
    ]
}
