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

//! The structured record form: a mapping from the keys `day, month, year, hour, min, sec` to
//! integers.

use crate::{DateTimeError, DateTimeFields, Field, PartialDateTime};
use heapless::LinearMap;
use strum::{EnumCount, IntoEnumIterator};

/// Value found under a record key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldValue {
    Absent,
    Integer(i64),
    /// Present, but not a number
    NonNumeric,
}

/// Read access to a host record by field name.
pub trait FieldSource {
    fn field(&self, key: &str) -> FieldValue;
}

/// Write access to a host record being built. Implementations store the value under
/// [`Field::key`].
pub trait RecordSink {
    fn put(&mut self, field: Field, value: i64) -> Result<(), DateTimeError>;
}

pub type DateTimeRecord = LinearMap<&'static str, i64, { Field::COUNT }>;

impl<const N: usize> FieldSource for LinearMap<&str, i64, N> {
    fn field(&self, key: &str) -> FieldValue {
        self.get(key)
            .map_or(FieldValue::Absent, |v| FieldValue::Integer(*v))
    }
}

impl<const N: usize> FieldSource for LinearMap<&str, FieldValue, N> {
    fn field(&self, key: &str) -> FieldValue {
        self.get(key).copied().unwrap_or(FieldValue::Absent)
    }
}

impl FieldSource for [(&str, FieldValue)] {
    fn field(&self, key: &str) -> FieldValue {
        self.iter()
            .find(|(k, _)| *k == key)
            .map_or(FieldValue::Absent, |(_, v)| *v)
    }
}

impl<const N: usize> FieldSource for [(&str, FieldValue); N] {
    fn field(&self, key: &str) -> FieldValue {
        self.as_slice().field(key)
    }
}

impl<const N: usize> RecordSink for LinearMap<&'static str, i64, N> {
    fn put(&mut self, field: Field, value: i64) -> Result<(), DateTimeError> {
        self.insert(field.key(), value)
            .map(|_| ())
            .map_err(|_| DateTimeError::RecordFull(field))
    }
}

impl PartialDateTime {
    /// Stage every numeric field found in the record. Absent and non-numeric entries are left
    /// unset. Present values are range checked, the first failure is returned.
    pub fn from_record<S: FieldSource + ?Sized>(source: &S) -> Result<Self, DateTimeError> {
        let mut partial = PartialDateTime::new();
        for field in Field::iter() {
            if let FieldValue::Integer(value) = source.field(field.key()) {
                partial.set(field, field.validate(value)?)?;
            }
        }
        Ok(partial)
    }
}

impl DateTimeFields {
    /// Read all six fields from the record. Each field must be present and numeric.
    pub fn from_record<S: FieldSource + ?Sized>(source: &S) -> Result<Self, DateTimeError> {
        let mut values = [0i64; Field::COUNT];
        for field in Field::iter() {
            values[field.index()] = match source.field(field.key()) {
                FieldValue::Integer(value) => i64::from(field.validate(value)?),
                FieldValue::Absent | FieldValue::NonNumeric => {
                    return Err(DateTimeError::MissingField(field));
                }
            };
        }
        DateTimeFields::try_from_values(values)
    }
}

/// Emit the six keys, in canonical order, into a host record.
pub fn write_record<S: RecordSink + ?Sized>(
    fields: &DateTimeFields,
    sink: &mut S,
) -> Result<(), DateTimeError> {
    for field in Field::iter() {
        sink.put(field, fields.get(field).into())?;
    }
    Ok(())
}

pub fn to_record(fields: &DateTimeFields) -> DateTimeRecord {
    // exactly one slot per field, collecting cannot overflow
    Field::iter()
        .map(|field| (field.key(), i64::from(fields.get(field))))
        .collect()
}
