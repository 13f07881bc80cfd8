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

use crate::DateTimeError;
use core::ops::RangeInclusive;
use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

/// One of the six date/time fields held by the RTC. Variants are declared in canonical order,
/// which is the order used for parsing, formatting and iterating records.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumCount, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Day = 0,
    Month = 1,
    Year = 2,
    Hour = 3,
    Minute = 4,
    Second = 5,
}

impl Field {
    /// Position of the field in canonical order.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Key used for the field in structured records.
    pub const fn key(self) -> &'static str {
        match self {
            Field::Day => "day",
            Field::Month => "month",
            Field::Year => "year",
            Field::Hour => "hour",
            Field::Minute => "min",
            Field::Second => "sec",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::iter().find(|field| field.key() == key)
    }

    pub const fn min(self) -> u16 {
        match self {
            Field::Day | Field::Month => 1,
            _ => 0,
        }
    }

    // hour 24 and minute/second 60 are accepted, the registers hold them
    pub const fn max(self) -> u16 {
        match self {
            Field::Day => 31,
            Field::Month => 12,
            Field::Year => 9999,
            Field::Hour => 24,
            Field::Minute | Field::Second => 60,
        }
    }

    pub const fn range(self) -> RangeInclusive<u16> {
        self.min()..=self.max()
    }

    /// Check a candidate value against the field's range, returning it narrowed to `u16`.
    pub fn validate(self, value: i64) -> Result<u16, DateTimeError> {
        u16::try_from(value)
            .ok()
            .filter(|v| self.range().contains(v))
            .ok_or(DateTimeError::Range(self))
    }
}
