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

pub mod accessor;
pub mod interrupt;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod registers;

use crate::rtc::interrupt::{InterruptLine, RTC_IRQ_PRIORITY};
use crate::rtc::registers::{
    alarm_register, clock_register, Register, RegisterAccess, AMR, AMR_DOW, AMR_DOY, CCR,
    CCR_CCALEN, CCR_CLKEN, ILR, ILR_ALARM, ILR_COUNTER_INCREMENT,
};
use mbed_rtc_datetime::{AlarmFields, DateTimeError, DateTimeFields, Field, PartialDateTime};
use strum::{EnumCount, IntoEnumIterator};

/// Order the counter registers are written in when the time is set. Time of day goes first so it
/// is settled before the date.
pub const COMMIT_ORDER: [Field; Field::COUNT] = [
    Field::Hour,
    Field::Minute,
    Field::Second,
    Field::Year,
    Field::Month,
    Field::Day,
];

const ALARM_ORDER: [Field; Field::COUNT] = [
    Field::Year,
    Field::Month,
    Field::Day,
    Field::Hour,
    Field::Minute,
    Field::Second,
];

/// Alarm comparison ignores day of week and day of year, only the six fields are matched.
pub const ALARM_MASK: u16 = AMR_DOW | AMR_DOY;

pub struct RtcControl<R, I> {
    registers: R,
    irq: I,
}

impl<R, I> RtcControl<R, I>
where
    R: RegisterAccess,
    I: InterruptLine,
{
    pub fn new(registers: R, irq: I) -> Self {
        Self { registers, irq }
    }

    /// Read the six counter registers. The reads are not atomic as a group, a second boundary
    /// between them can give a torn value.
    pub fn read_time(&mut self) -> DateTimeFields {
        let mut values = [0u16; Field::COUNT];
        for field in Field::iter() {
            values[field.index()] = self.registers.read(clock_register(field));
        }
        let dt = DateTimeFields::from_raw(values);
        trace!("RTC time read: {}", dt);
        dt
    }

    /// Stop the clock, write all six counters and restart it with calibration disabled.
    pub fn commit_time(&mut self, fields: &DateTimeFields) -> Result<(), DateTimeError> {
        self.commit_partial_time(&PartialDateTime::from(*fields))
    }

    /// Like [`RtcControl::commit_time`], but only the present fields are written. The clock is
    /// still stopped for the write window; the counter registers of absent fields are not written
    /// and resume from their current values. Nothing is written unless every present field passes
    /// the range check.
    pub fn commit_partial_time(&mut self, fields: &PartialDateTime) -> Result<(), DateTimeError> {
        for (field, value) in fields.iter() {
            check_register_value(clock_register(field), field, value)?;
        }
        if fields.is_empty() {
            debug!("No time fields to set");
            return Ok(());
        }

        self.registers.write(CCR, 0);
        for field in COMMIT_ORDER {
            if let Some(value) = fields.get(field) {
                self.registers.write(clock_register(field), value);
            }
        }
        self.registers.write(CCR, CCR_CLKEN | CCR_CCALEN);

        debug!("Time set to {:?}", fields);
        Ok(())
    }

    /// Program the alarm registers and prepare the interrupt line. The line itself is enabled by
    /// the platform.
    pub fn commit_alarm(&mut self, alarm: &AlarmFields) -> Result<(), DateTimeError> {
        for field in Field::iter() {
            check_register_value(alarm_register(field), field, alarm.get(field))?;
        }

        for field in ALARM_ORDER {
            self.registers.write(alarm_register(field), alarm.get(field));
        }
        self.registers.write(AMR, ALARM_MASK);
        self.registers.write(ILR, ILR_COUNTER_INCREMENT | ILR_ALARM);
        self.irq.unpend();
        self.irq.set_priority(RTC_IRQ_PRIORITY);

        debug!("Alarm set to {}", alarm);
        Ok(())
    }

    /// Whether the alarm matched since the last call. Reading consumes the flag, so each match is
    /// reported once.
    pub fn alarm_fired(&mut self) -> bool {
        let fired = self.registers.read(ILR) & ILR_ALARM != 0;
        if fired {
            // write one to clear, the counter increment flag is left alone
            self.registers.write(ILR, ILR_ALARM);
            trace!("RTC alarm flag consumed");
        }
        fired
    }

    pub fn release(self) -> (R, I) {
        (self.registers, self.irq)
    }
}

fn check_register_value(register: Register, field: Field, value: u16) -> Result<(), DateTimeError> {
    if field.range().contains(&value) && register.fits(value) {
        Ok(())
    } else {
        warn!("Refusing to write {} to {}", value, register.name);
        Err(DateTimeError::Range(field))
    }
}

#[cfg(test)]
pub(crate) fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rtc::mock::{FakeInterruptLine, FakeRtc};
    use crate::rtc::registers::{DOM, HOUR, MIN, MONTH, SEC, YEAR};

    fn control(rtc: FakeRtc) -> RtcControl<FakeRtc, FakeInterruptLine> {
        init_test_logger();
        RtcControl::new(rtc, FakeInterruptLine::default())
    }

    fn sample() -> DateTimeFields {
        DateTimeFields::new(15, 6, 2024, 9, 30, 45).unwrap()
    }

    #[test]
    fn read_time_returns_register_values() {
        let mut rtc = control(FakeRtc::with_time(&sample()));
        assert_eq!(rtc.read_time(), sample());
    }

    #[test]
    fn read_time_does_not_validate() {
        let mut fake = FakeRtc::new();
        fake.poke(DOM, 0);
        fake.poke(MONTH, 15);
        let mut rtc = control(fake);
        let dt = rtc.read_time();
        assert_eq!(dt.day, 0);
        assert_eq!(dt.month, 15);
    }

    #[test]
    fn commit_time_stops_writes_and_restarts() {
        let mut rtc = control(FakeRtc::new());
        rtc.commit_time(&sample()).unwrap();
        let (fake, _) = rtc.release();
        assert_eq!(
            fake.writes(),
            &[
                (CCR, 0),
                (HOUR, 9),
                (MIN, 30),
                (SEC, 45),
                (YEAR, 2024),
                (MONTH, 6),
                (DOM, 15),
                (CCR, CCR_CLKEN | CCR_CCALEN),
            ]
        );
        assert_eq!(fake.clock(), sample());
    }

    #[test]
    fn partial_commit_leaves_absent_fields_untouched() {
        let mut rtc = control(FakeRtc::with_time(&sample()));
        let mut partial = PartialDateTime::new();
        partial.set(Field::Hour, 10).unwrap();
        partial.set(Field::Minute, 0).unwrap();
        partial.set(Field::Second, 0).unwrap();
        rtc.commit_partial_time(&partial).unwrap();

        let (fake, _) = rtc.release();
        assert_eq!(
            fake.clock(),
            DateTimeFields::new(15, 6, 2024, 10, 0, 0).unwrap()
        );
        assert!(
            fake.writes()
                .iter()
                .all(|(register, _)| ![DOM, MONTH, YEAR].contains(register))
        );
    }

    #[test]
    fn partial_commit_stops_the_clock_around_the_write() {
        let mut rtc = control(FakeRtc::with_time(&sample()));
        let mut partial = PartialDateTime::new();
        partial.set(Field::Minute, 5).unwrap();
        rtc.commit_partial_time(&partial).unwrap();

        let (fake, _) = rtc.release();
        assert_eq!(
            fake.writes(),
            &[(CCR, 0), (MIN, 5), (CCR, CCR_CLKEN | CCR_CCALEN)]
        );
        assert_eq!(fake.clock().minute, 5);
    }

    #[test]
    fn empty_partial_commit_writes_nothing() {
        let mut rtc = control(FakeRtc::with_time(&sample()));
        rtc.commit_partial_time(&PartialDateTime::new()).unwrap();
        let (fake, _) = rtc.release();
        assert!(fake.writes().is_empty());
    }

    #[test]
    fn safety_net_rejects_before_any_write() {
        let mut rtc = control(FakeRtc::with_time(&sample()));
        let bad = DateTimeFields::from_raw([15, 6, 2024, 9, 30, 61]);
        assert_eq!(rtc.commit_time(&bad), Err(DateTimeError::Range(Field::Second)));
        assert_eq!(rtc.commit_alarm(&bad), Err(DateTimeError::Range(Field::Second)));
        let (fake, irq) = rtc.release();
        assert!(fake.writes().is_empty());
        assert_eq!(irq.unpend_count, 0);
        assert_eq!(fake.clock(), sample());
    }

    #[test]
    fn commit_alarm_programs_bank_mask_and_line() {
        let mut fake = FakeRtc::new();
        fake.trigger_alarm_match();
        let mut rtc = control(fake);
        rtc.commit_alarm(&sample()).unwrap();

        let (fake, irq) = rtc.release();
        assert_eq!(fake.alarm(), sample());
        assert_eq!(fake.clock(), DateTimeFields::from_raw([0; 6]));
        assert_eq!(fake.peek(AMR), AMR_DOW | AMR_DOY);
        assert_eq!(fake.peek(ILR), 0);
        assert!(fake.writes().contains(&(ILR, ILR_COUNTER_INCREMENT | ILR_ALARM)));
        assert!(!fake.writes().iter().any(|(register, _)| *register == CCR));
        assert_eq!(irq.unpend_count, 1);
        assert_eq!(irq.priority, Some(RTC_IRQ_PRIORITY));
    }

    #[test]
    fn alarm_flag_is_consumed_once() {
        let mut rtc = control(FakeRtc::new());
        rtc.commit_alarm(&sample()).unwrap();
        assert!(!rtc.alarm_fired());

        let (mut fake, irq) = rtc.release();
        fake.trigger_alarm_match();
        let mut rtc = RtcControl::new(fake, irq);
        assert!(rtc.alarm_fired());
        assert!(!rtc.alarm_fired());
    }

    #[test]
    fn alarm_query_keeps_counter_flag() {
        let mut fake = FakeRtc::new();
        fake.poke(ILR, ILR_COUNTER_INCREMENT);
        fake.trigger_alarm_match();
        let mut rtc = control(fake);
        assert!(rtc.alarm_fired());
        let (fake, _) = rtc.release();
        assert_eq!(fake.peek(ILR), ILR_COUNTER_INCREMENT);
    }

    #[test]
    fn idle_query_writes_nothing() {
        let mut rtc = control(FakeRtc::new());
        assert!(!rtc.alarm_fired());
        let (fake, _) = rtc.release();
        assert!(fake.writes().is_empty());
    }
}
