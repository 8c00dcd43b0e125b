//! Half-day availability slots.
//!
//! A slot code packs a calendar date and a half-day flag into one integer,
//! `YYYYMMDDx`, where `x` is `0` for the morning and `1` for the afternoon.
//! Persons advertise their availability as a sequence of slot codes and the
//! pairing engine compares them by equality only.

use std::fmt;

use thiserror::Error;

/// Morning or afternoon half of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HalfDay {
    /// First half of the day, flag `0`.
    Morning,
    /// Second half of the day, flag `1`.
    Afternoon,
}

impl HalfDay {
    const fn flag(self) -> u32 {
        match self {
            Self::Morning => 0,
            Self::Afternoon => 1,
        }
    }
}

/// Errors returned when decoding a [`SlotCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SlotCodeError {
    /// The trailing half-day digit was neither `0` nor `1`.
    #[error("slot code {code} has half-day flag {flag}, expected 0 or 1")]
    InvalidHalfDay {
        /// Raw code that failed validation.
        code: u32,
        /// Offending trailing digit.
        flag: u32,
    },
    /// The month component was outside `1..=12`.
    #[error("slot code {code} has month {month}, expected 1..=12")]
    InvalidMonth {
        /// Raw code that failed validation.
        code: u32,
        /// Offending month.
        month: u32,
    },
    /// The day component was outside `1..=31`.
    #[error("slot code {code} has day {day}, expected 1..=31")]
    InvalidDay {
        /// Raw code that failed validation.
        code: u32,
        /// Offending day.
        day: u32,
    },
    /// The year component was not a four-digit year.
    #[error("slot code {code} has year {year}, expected a four-digit year")]
    InvalidYear {
        /// Raw code that failed validation.
        code: u32,
        /// Offending year.
        year: u32,
    },
}

/// A validated `YYYYMMDDx` availability slot.
///
/// # Examples
///
/// ```
/// use maraude_core::{HalfDay, SlotCode};
///
/// # fn main() -> Result<(), maraude_core::SlotCodeError> {
/// let slot = SlotCode::try_from(202_403_151)?;
/// assert_eq!(slot.date_key(), 20_240_315);
/// assert_eq!(slot.half_day(), HalfDay::Afternoon);
/// assert_eq!(slot, SlotCode::from_parts(2024, 3, 15, HalfDay::Afternoon)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct SlotCode(u32);

#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "slot codes are decimal-packed and decoded digit by digit"
)]
impl SlotCode {
    /// Build a slot from its calendar parts.
    ///
    /// Parts are range-checked before packing, so an oversized day cannot
    /// carry into the month.
    pub fn from_parts(year: u32, month: u32, day: u32, half: HalfDay) -> Result<Self, SlotCodeError> {
        let code = year
            .saturating_mul(100_000)
            .saturating_add(month.saturating_mul(1_000))
            .saturating_add(day.saturating_mul(10))
            .saturating_add(half.flag());
        check_date(code, year, month, day)?;
        Ok(Self(code))
    }

    /// Raw `YYYYMMDDx` value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// The `YYYYMMDD` date part, shared by both halves of a day.
    #[must_use]
    pub const fn date_key(self) -> u32 {
        self.0 / 10
    }

    /// Morning or afternoon.
    #[must_use]
    pub const fn half_day(self) -> HalfDay {
        if self.0 % 10 == 0 {
            HalfDay::Morning
        } else {
            HalfDay::Afternoon
        }
    }

    fn validate(code: u32) -> Result<Self, SlotCodeError> {
        let flag = code % 10;
        if flag > 1 {
            return Err(SlotCodeError::InvalidHalfDay { code, flag });
        }
        let day = (code / 10) % 100;
        let month = (code / 1_000) % 100;
        let year = code / 100_000;
        check_date(code, year, month, day)?;
        Ok(Self(code))
    }
}

fn check_date(code: u32, year: u32, month: u32, day: u32) -> Result<(), SlotCodeError> {
    if !(1_000..=9_999).contains(&year) {
        return Err(SlotCodeError::InvalidYear { code, year });
    }
    if !(1..=12).contains(&month) {
        return Err(SlotCodeError::InvalidMonth { code, month });
    }
    if !(1..=31).contains(&day) {
        return Err(SlotCodeError::InvalidDay { code, day });
    }
    Ok(())
}

impl TryFrom<u32> for SlotCode {
    type Error = SlotCodeError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::validate(code)
    }
}

impl From<SlotCode> for u32 {
    fn from(slot: SlotCode) -> Self {
        slot.0
    }
}

impl fmt::Display for SlotCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(202_401_010, 20_240_101, HalfDay::Morning)]
    #[case(202_412_311, 20_241_231, HalfDay::Afternoon)]
    fn decodes_valid_codes(#[case] raw: u32, #[case] date: u32, #[case] half: HalfDay) {
        let slot = SlotCode::try_from(raw).expect("valid slot code");
        assert_eq!(slot.date_key(), date);
        assert_eq!(slot.half_day(), half);
        assert_eq!(u32::from(slot), raw);
    }

    #[rstest]
    #[case(202_401_012, SlotCodeError::InvalidHalfDay { code: 202_401_012, flag: 2 })]
    #[case(202_413_010, SlotCodeError::InvalidMonth { code: 202_413_010, month: 13 })]
    #[case(202_401_000, SlotCodeError::InvalidDay { code: 202_401_000, day: 0 })]
    #[case(1_010, SlotCodeError::InvalidYear { code: 1_010, year: 0 })]
    fn rejects_malformed_codes(#[case] raw: u32, #[case] expected: SlotCodeError) {
        assert_eq!(SlotCode::try_from(raw), Err(expected));
    }

    #[rstest]
    fn from_parts_matches_packed_value() {
        let slot = SlotCode::from_parts(2019, 2, 7, HalfDay::Morning).expect("valid parts");
        assert_eq!(slot.value(), 201_902_070);
    }

    #[rstest]
    #[case(2024, 1, 131, SlotCodeError::InvalidDay { code: 202_402_310, day: 131 })]
    #[case(2024, 13, 1, SlotCodeError::InvalidMonth { code: 202_413_010, month: 13 })]
    #[case(2024, 112, 1, SlotCodeError::InvalidMonth { code: 202_512_010, month: 112 })]
    #[case(20_240, 1, 1, SlotCodeError::InvalidYear { code: 2_024_001_010, year: 20_240 })]
    fn from_parts_rejects_parts_that_would_carry(
        #[case] year: u32,
        #[case] month: u32,
        #[case] day: u32,
        #[case] expected: SlotCodeError,
    ) {
        assert_eq!(
            SlotCode::from_parts(year, month, day, HalfDay::Morning),
            Err(expected)
        );
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialisation_validates_codes() {
        let ok: Result<SlotCode, _> = serde_json::from_str("202401011");
        assert!(ok.is_ok());
        let bad: Result<SlotCode, _> = serde_json::from_str("202401015");
        assert!(bad.is_err());
    }
}
