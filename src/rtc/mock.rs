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

//! In-memory stand-ins for the RTC block and its interrupt line, for host-side tests.

use crate::rtc::interrupt::InterruptLine;
use crate::rtc::registers::{
    alarm_register, clock_register, Register, RegisterAccess, ILR, ILR_ALARM, REGISTER_SPAN,
};
use heapless::Vec;
use mbed_rtc_datetime::{DateTimeFields, Field};
use strum::IntoEnumIterator;

const WRITE_LOG_CAPACITY: usize = 64;

/// Register file backed by plain memory. Every write is logged, and ILR clears on a written one
/// like the real block does.
pub struct FakeRtc {
    memory: [u16; REGISTER_SPAN / 4],
    writes: Vec<(Register, u16), WRITE_LOG_CAPACITY>,
}

impl FakeRtc {
    pub fn new() -> Self {
        Self {
            memory: [0; REGISTER_SPAN / 4],
            writes: Vec::new(),
        }
    }

    /// A register file whose counters already hold `fields`.
    pub fn with_time(fields: &DateTimeFields) -> Self {
        let mut rtc = Self::new();
        for field in Field::iter() {
            rtc.poke(clock_register(field), fields.get(field));
        }
        rtc
    }

    pub fn peek(&self, register: Register) -> u16 {
        self.memory[register.offset / 4] & register.width.max()
    }

    /// Set a register behind the driver's back, without logging.
    pub fn poke(&mut self, register: Register, value: u16) {
        self.memory[register.offset / 4] = value & register.width.max();
    }

    /// What the hardware does when the alarm registers match the counters.
    pub fn trigger_alarm_match(&mut self) {
        let ilr = self.peek(ILR);
        self.poke(ILR, ilr | ILR_ALARM);
    }

    pub fn clock(&self) -> DateTimeFields {
        self.bank(clock_register)
    }

    pub fn alarm(&self) -> DateTimeFields {
        self.bank(alarm_register)
    }

    fn bank(&self, register: fn(Field) -> Register) -> DateTimeFields {
        let mut values = [0u16; 6];
        for field in Field::iter() {
            values[field.index()] = self.peek(register(field));
        }
        DateTimeFields::from_raw(values)
    }

    /// Every write since creation or the last [`FakeRtc::clear_writes`], oldest first.
    pub fn writes(&self) -> &[(Register, u16)] {
        &self.writes
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }
}

impl Default for FakeRtc {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterAccess for FakeRtc {
    fn read(&mut self, register: Register) -> u16 {
        self.peek(register)
    }

    fn write(&mut self, register: Register, value: u16) {
        // an overflowing log only loses the newest entries
        let _ = self.writes.push((register, value));
        if register == ILR {
            let ilr = self.peek(ILR);
            self.poke(ILR, ilr & !value);
        } else {
            self.poke(register, value);
        }
    }
}

#[derive(Debug, Default)]
pub struct FakeInterruptLine {
    pub unpend_count: usize,
    pub priority: Option<u8>,
}

impl InterruptLine for FakeInterruptLine {
    fn unpend(&mut self) {
        self.unpend_count += 1;
    }

    fn set_priority(&mut self, priority: u8) {
        self.priority = Some(priority);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rtc::registers::{ILR_COUNTER_INCREMENT, SEC, YEAR};

    #[test]
    fn ilr_is_write_one_to_clear() {
        let mut rtc = FakeRtc::new();
        rtc.poke(ILR, ILR_ALARM | ILR_COUNTER_INCREMENT);
        rtc.write(ILR, ILR_ALARM);
        assert_eq!(rtc.read(ILR), ILR_COUNTER_INCREMENT);
    }

    #[test]
    fn writes_are_truncated_to_register_width() {
        let mut rtc = FakeRtc::new();
        rtc.write(SEC, 0x1FF);
        rtc.write(YEAR, 0xFFFF);
        assert_eq!(rtc.read(SEC), 0xFF);
        assert_eq!(rtc.read(YEAR), 0xFFFF);
        assert_eq!(rtc.writes(), &[(SEC, 0x1FF), (YEAR, 0xFFFF)]);
    }
}
