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

//! The `dd/mm/yyyy hh:mm:ss` string form.

use crate::{DateTimeError, DateTimeFields, Field};
use core::fmt::{self, Write};
use core::str::FromStr;
use strum::EnumCount;

/// Room for the formatted string with every field at its widest storage value.
pub const DATETIME_STRING_CAPACITY: usize = 32;

pub type DateTimeString = heapless::String<DATETIME_STRING_CAPACITY>;

// Separator preceding each field after the first
const SEPARATORS: [u8; Field::COUNT - 1] = [b'/', b'/', b' ', b':', b':'];

struct Scanner<'a> {
    rest: &'a [u8],
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            rest: input.as_bytes(),
        }
    }

    fn literal(&mut self, expected: u8) -> Result<(), DateTimeError> {
        match self.rest.split_first() {
            Some((&b, rest)) if b == expected => {
                self.rest = rest;
                Ok(())
            }
            _ => Err(DateTimeError::Format),
        }
    }

    fn integer(&mut self) -> Result<i64, DateTimeError> {
        let negative = match self.rest.first() {
            Some(b'-') => true,
            Some(b'+') => false,
            _ => {
                return self.digits();
            }
        };
        self.rest = &self.rest[1..];
        let value = self.digits()?;
        Ok(if negative { -value } else { value })
    }

    fn digits(&mut self) -> Result<i64, DateTimeError> {
        let count = self.rest.iter().take_while(|b| b.is_ascii_digit()).count();
        if count == 0 {
            return Err(DateTimeError::Format);
        }
        let (digits, rest) = self.rest.split_at(count);
        self.rest = rest;
        digits.iter().try_fold(0i64, |acc, d| {
            acc.checked_mul(10)
                .and_then(|acc| acc.checked_add(i64::from(d - b'0')))
                .ok_or(DateTimeError::Format)
        })
    }

    fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }
}

/// Split `D/M/Y H:Min:Sec` into its six numeric tokens, in canonical order.
///
/// All six tokens must be present and the whole input must be consumed. The values are not range
/// checked.
pub fn parse(input: &str) -> Result<[i64; Field::COUNT], DateTimeError> {
    let mut scanner = Scanner::new(input);
    let mut values = [0i64; Field::COUNT];

    values[0] = scanner.integer()?;
    for (value, separator) in values[1..].iter_mut().zip(SEPARATORS) {
        scanner.literal(separator)?;
        *value = scanner.integer()?;
    }

    if !scanner.is_empty() {
        return Err(DateTimeError::Format);
    }
    Ok(values)
}

pub fn format(fields: &DateTimeFields) -> DateTimeString {
    let mut out = DateTimeString::new();
    // cannot overflow, the widest u8/u16 rendering is shorter than the capacity
    let _ = write!(out, "{fields}");
    out
}

impl fmt::Display for DateTimeFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}/{:02}/{:04} {:02}:{:02}:{:02}",
            self.day, self.month, self.year, self.hour, self.minute, self.second
        )
    }
}

impl FromStr for DateTimeFields {
    type Err = DateTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateTimeFields::try_from_values(parse(s)?)
    }
}
