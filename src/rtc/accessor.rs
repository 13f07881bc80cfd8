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

use crate::rtc::interrupt::InterruptLine;
use crate::rtc::registers::RegisterAccess;
use crate::rtc::RtcControl;
use mbed_rtc_datetime::{record, text};
use mbed_rtc_datetime::{
    DateTimeError, DateTimeFields, DateTimeRecord, DateTimeString, FieldSource, NaiveDateTime,
    PartialDateTime,
};
use strum::EnumString;

/// Date/time argument as handed over by the scripting host.
#[derive(Clone, Copy)]
pub enum DateTimeArg<'a> {
    /// `dd/mm/yyyy hh:mm:ss`
    Text(&'a str),
    /// Record keyed by `day, month, year, hour, min, sec`
    Record(&'a dyn FieldSource),
}

/// Shape requested from [`RtcAccessor::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputFormat {
    #[strum(serialize = "string", serialize = "*s")]
    Text,
    #[strum(serialize = "record", serialize = "*t")]
    Record,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DateTimeValue {
    Text(DateTimeString),
    Record(DateTimeRecord),
}

/// The RTC operations offered to the scripting host. Input is fully validated before anything
/// reaches the registers.
pub struct RtcAccessor<R, I> {
    control: RtcControl<R, I>,
}

impl<R, I> RtcAccessor<R, I>
where
    R: RegisterAccess,
    I: InterruptLine,
{
    pub fn new(control: RtcControl<R, I>) -> Self {
        Self { control }
    }

    /// Set the clock. A string must carry all six fields; a record may carry any subset and the
    /// missing fields keep their current register values.
    pub fn set(&mut self, arg: DateTimeArg<'_>) -> Result<(), DateTimeError> {
        match arg {
            DateTimeArg::Text(input) => {
                let fields: DateTimeFields = input.parse()?;
                self.control.commit_time(&fields)
            }
            DateTimeArg::Record(source) => {
                let fields = PartialDateTime::from_record(source)?;
                self.control.commit_partial_time(&fields)
            }
        }
    }

    pub fn get(&mut self, format: OutputFormat) -> DateTimeValue {
        let now = self.control.read_time();
        match format {
            OutputFormat::Text => DateTimeValue::Text(text::format(&now)),
            OutputFormat::Record => DateTimeValue::Record(record::to_record(&now)),
        }
    }

    /// [`RtcAccessor::get`] with the format named by the host (`"string"`/`"*s"` or
    /// `"record"`/`"*t"`).
    pub fn get_with_selector(&mut self, selector: &str) -> Result<DateTimeValue, DateTimeError> {
        let format = selector.parse::<OutputFormat>().map_err(|_| {
            warn!("Unknown datetime output format {}", selector);
            DateTimeError::Format
        })?;
        Ok(self.get(format))
    }

    /// Program the alarm. All six fields are required whatever the shape of the argument.
    pub fn set_alarm(&mut self, arg: DateTimeArg<'_>) -> Result<(), DateTimeError> {
        let alarm = match arg {
            DateTimeArg::Text(input) => input.parse()?,
            DateTimeArg::Record(source) => DateTimeFields::from_record(source)?,
        };
        self.control.commit_alarm(&alarm)
    }

    /// Read-and-clear of the alarm flag.
    pub fn alarmed(&mut self) -> bool {
        self.control.alarm_fired()
    }

    pub fn get_date_time(&mut self) -> Result<NaiveDateTime, DateTimeError> {
        NaiveDateTime::try_from(self.control.read_time())
    }

    pub fn set_date_time(&mut self, dt: &NaiveDateTime) -> Result<(), DateTimeError> {
        let fields = DateTimeFields::try_from(*dt)?;
        self.control.commit_time(&fields)
    }

    pub fn into_control(self) -> RtcControl<R, I> {
        self.control
    }
}
