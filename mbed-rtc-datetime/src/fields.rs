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

use crate::{DateTimeError, Field};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use strum::{EnumCount, IntoEnumIterator};

/// A complete set of date/time fields, stored at the width of the matching RTC register.
///
/// Values built through [`DateTimeFields::new`], parsing or [`PartialDateTime::complete`] are
/// always within range. [`DateTimeFields::from_raw`] skips the checks and is meant for values read
/// straight back from the hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTimeFields {
    pub day: u8,
    pub month: u8,
    pub year: u16,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Alarm time. Same shape as the clock time, written to the alarm register bank.
pub type AlarmFields = DateTimeFields;

impl DateTimeFields {
    pub fn new(
        day: u8,
        month: u8,
        year: u16,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, DateTimeError> {
        let fields = Self::from_raw([
            day.into(),
            month.into(),
            year,
            hour.into(),
            minute.into(),
            second.into(),
        ]);
        fields.validate()?;
        Ok(fields)
    }

    /// Build from values in canonical order without any range check. Byte-wide fields keep only
    /// their low eight bits.
    pub fn from_raw(values: [u16; Field::COUNT]) -> Self {
        let [day, month, year, hour, minute, second] = values;
        Self {
            day: day as u8,
            month: month as u8,
            year,
            hour: hour as u8,
            minute: minute as u8,
            second: second as u8,
        }
    }

    /// Validate candidate values given in canonical order. The first out of range field is
    /// reported.
    pub fn try_from_values(values: [i64; Field::COUNT]) -> Result<Self, DateTimeError> {
        let mut checked = [0u16; Field::COUNT];
        for field in Field::iter() {
            checked[field.index()] = field.validate(values[field.index()])?;
        }
        Ok(Self::from_raw(checked))
    }

    pub fn validate(&self) -> Result<(), DateTimeError> {
        Field::iter().try_for_each(|field| field.validate(self.get(field).into()).map(|_| ()))
    }

    pub fn get(&self, field: Field) -> u16 {
        match field {
            Field::Day => self.day.into(),
            Field::Month => self.month.into(),
            Field::Year => self.year,
            Field::Hour => self.hour.into(),
            Field::Minute => self.minute.into(),
            Field::Second => self.second.into(),
        }
    }

    /// Values in canonical order.
    pub fn values(&self) -> [u16; Field::COUNT] {
        [
            self.day.into(),
            self.month.into(),
            self.year,
            self.hour.into(),
            self.minute.into(),
            self.second.into(),
        ]
    }
}

/// Fields staged from a structured record. Any subset may be present. Values staged through
/// [`PartialDateTime::set`] or a record have passed their range check; conversion from
/// [`DateTimeFields`] carries the values over as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PartialDateTime {
    values: [Option<u16>; Field::COUNT],
}

impl PartialDateTime {
    pub const fn new() -> Self {
        Self {
            values: [None; Field::COUNT],
        }
    }

    pub fn get(&self, field: Field) -> Option<u16> {
        self.values[field.index()]
    }

    pub fn set(&mut self, field: Field, value: u16) -> Result<(), DateTimeError> {
        self.values[field.index()] = Some(field.validate(value.into())?);
        Ok(())
    }

    pub fn clear(&mut self, field: Field) {
        self.values[field.index()] = None;
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Present fields with their values, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, u16)> + '_ {
        Field::iter().filter_map(|field| self.get(field).map(|value| (field, value)))
    }

    /// Promote to a full set of fields, failing on the first absent one.
    pub fn complete(&self) -> Result<DateTimeFields, DateTimeError> {
        let mut values = [0u16; Field::COUNT];
        for field in Field::iter() {
            values[field.index()] = self.get(field).ok_or(DateTimeError::MissingField(field))?;
        }
        Ok(DateTimeFields::from_raw(values))
    }
}

impl From<DateTimeFields> for PartialDateTime {
    fn from(fields: DateTimeFields) -> Self {
        Self {
            values: fields.values().map(Some),
        }
    }
}

impl TryFrom<DateTimeFields> for NaiveDateTime {
    type Error = DateTimeError;

    fn try_from(fields: DateTimeFields) -> Result<Self, Self::Error> {
        fields.validate()?;

        let date = NaiveDate::from_ymd_opt(
            fields.year.into(),
            fields.month.into(),
            fields.day.into(),
        )
        .ok_or(DateTimeError::Range(Field::Day))?;

        let time = NaiveTime::from_hms_opt(
            fields.hour.into(),
            fields.minute.into(),
            fields.second.into(),
        )
        .ok_or(if fields.hour > 23 {
            DateTimeError::Range(Field::Hour)
        } else if fields.minute > 59 {
            DateTimeError::Range(Field::Minute)
        } else {
            DateTimeError::Range(Field::Second)
        })?;

        Ok(NaiveDateTime::new(date, time))
    }
}

impl TryFrom<NaiveDateTime> for DateTimeFields {
    type Error = DateTimeError;

    fn try_from(dt: NaiveDateTime) -> Result<Self, Self::Error> {
        let year = Field::Year.validate(dt.year().into())?;
        Ok(Self::from_raw([
            dt.day() as u16,
            dt.month() as u16,
            year,
            dt.hour() as u16,
            dt.minute() as u16,
            dt.second() as u16,
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_reports_first_invalid_field() {
        assert_eq!(
            DateTimeFields::new(0, 13, 2024, 9, 30, 45),
            Err(DateTimeError::Range(Field::Day))
        );
        assert_eq!(
            DateTimeFields::new(1, 13, 2024, 9, 30, 45),
            Err(DateTimeError::Range(Field::Month))
        );
        assert_eq!(
            DateTimeFields::new(1, 1, 2024, 9, 61, 45),
            Err(DateTimeError::Range(Field::Minute))
        );
    }

    #[test]
    fn no_cross_field_checks() {
        // 31st of February passes, only per-field ranges apply
        assert!(DateTimeFields::new(31, 2, 2023, 24, 60, 60).is_ok());
    }

    #[test]
    fn try_from_values_keeps_canonical_order() {
        let fields = DateTimeFields::try_from_values([15, 6, 2024, 9, 30, 45]).unwrap();
        assert_eq!(fields.day, 15);
        assert_eq!(fields.month, 6);
        assert_eq!(fields.year, 2024);
        assert_eq!(fields.hour, 9);
        assert_eq!(fields.minute, 30);
        assert_eq!(fields.second, 45);
        assert_eq!(fields.values(), [15, 6, 2024, 9, 30, 45]);
        assert_eq!(fields.get(Field::Minute), 30);
    }

    #[test]
    fn try_from_values_rejects_out_of_range() {
        assert_eq!(
            DateTimeFields::try_from_values([15, 6, 2024, 25, 30, 45]),
            Err(DateTimeError::Range(Field::Hour))
        );
        assert_eq!(
            DateTimeFields::try_from_values([15, 6, -1, 9, 30, 45]),
            Err(DateTimeError::Range(Field::Year))
        );
    }

    #[test]
    fn partial_staging() {
        let mut partial = PartialDateTime::new();
        assert!(partial.is_empty());
        assert!(!partial.is_complete());

        partial.set(Field::Hour, 10).unwrap();
        partial.set(Field::Second, 0).unwrap();
        assert_eq!(partial.set(Field::Minute, 75), Err(DateTimeError::Range(Field::Minute)));
        assert_eq!(partial.get(Field::Minute), None);

        let staged: heapless::Vec<(Field, u16), 6> = partial.iter().collect();
        assert_eq!(staged.as_slice(), &[(Field::Hour, 10), (Field::Second, 0)]);

        partial.clear(Field::Hour);
        assert_eq!(partial.get(Field::Hour), None);
    }

    #[test]
    fn complete_reports_first_missing_field() {
        let mut partial = PartialDateTime::from(DateTimeFields::new(15, 6, 2024, 9, 30, 45).unwrap());
        assert!(partial.is_complete());
        partial.clear(Field::Year);
        partial.clear(Field::Second);
        assert_eq!(partial.complete(), Err(DateTimeError::MissingField(Field::Year)));
    }

    #[test]
    fn converts_to_chrono() {
        let fields = DateTimeFields::new(15, 6, 2024, 9, 30, 45).unwrap();
        let dt = NaiveDateTime::try_from(fields).unwrap();
        assert_eq!(
            dt,
            NaiveDate::from_ymd_opt(2024, 6, 15)
                .unwrap()
                .and_hms_opt(9, 30, 45)
                .unwrap()
        );
        assert_eq!(DateTimeFields::try_from(dt), Ok(fields));
    }

    #[test]
    fn chrono_rejects_what_the_registers_allow() {
        let fields = DateTimeFields::new(1, 1, 2024, 24, 0, 0).unwrap();
        assert_eq!(NaiveDateTime::try_from(fields), Err(DateTimeError::Range(Field::Hour)));
        let fields = DateTimeFields::new(1, 1, 2024, 23, 60, 0).unwrap();
        assert_eq!(NaiveDateTime::try_from(fields), Err(DateTimeError::Range(Field::Minute)));
        let fields = DateTimeFields::new(1, 1, 2024, 23, 59, 60).unwrap();
        assert_eq!(NaiveDateTime::try_from(fields), Err(DateTimeError::Range(Field::Second)));
        let fields = DateTimeFields::new(31, 2, 2024, 0, 0, 0).unwrap();
        assert_eq!(NaiveDateTime::try_from(fields), Err(DateTimeError::Range(Field::Day)));
    }

    #[test]
    fn chrono_year_outside_register_range() {
        let dt = NaiveDate::from_ymd_opt(10_000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(DateTimeFields::try_from(dt), Err(DateTimeError::Range(Field::Year)));
    }
}
