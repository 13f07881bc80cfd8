#![no_std]
// Copyright (C) 2025 Paul Hampson
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License version 3 as  published by the
// Free Software Foundation.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <https://www.gnu.org/licenses/>.

//! Date/time codec for the mbed RTC.
//!
//! Converts between the two external representations of a calendar time (the
//! `dd/mm/yyyy hh:mm:ss` string and a record keyed by field name) and the six
//! integer fields held by the RTC counter registers. Nothing in here touches
//! hardware.

use core::fmt;

pub mod field;
pub mod fields;
pub mod record;
pub mod text;

pub use chrono::NaiveDateTime;
pub use field::Field;
pub use fields::{AlarmFields, DateTimeFields, PartialDateTime};
pub use record::{DateTimeRecord, FieldSource, FieldValue, RecordSink};
pub use text::DateTimeString;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DateTimeError {
    /// Input does not follow the `dd/mm/yyyy hh:mm:ss` grammar, or an unknown output format was
    /// requested
    Format,
    /// The value given for the field is outside the range the RTC accepts
    Range(Field),
    /// A field required by the operation was not supplied
    MissingField(Field),
    /// The output record had no room left for the field
    RecordFull(Field),
}

impl fmt::Display for DateTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTimeError::Format => f.write_str("invalid datetime format"),
            DateTimeError::Range(field) => write!(f, "invalid {field}"),
            DateTimeError::MissingField(field) => write!(f, "missing {field}"),
            DateTimeError::RecordFull(field) => write!(f, "no room in record for {field}"),
        }
    }
}

impl core::error::Error for DateTimeError {}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn error_messages_name_the_field() {
        assert_eq!(DateTimeError::Range(Field::Hour).to_string(), "invalid hour");
        assert_eq!(DateTimeError::Range(Field::Minute).to_string(), "invalid minute");
        assert_eq!(DateTimeError::MissingField(Field::Year).to_string(), "missing year");
        assert_eq!(DateTimeError::Format.to_string(), "invalid datetime format");
        assert_eq!(
            DateTimeError::RecordFull(Field::Second).to_string(),
            "no room in record for second"
        );
    }
}
