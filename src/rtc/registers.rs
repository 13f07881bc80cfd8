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

//! Register map of the LPC17xx RTC block.

use mbed_rtc_datetime::Field;

pub const LPC_RTC_BASE: usize = 0x4002_4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Width {
    Byte,
    HalfWord,
}

impl Width {
    pub const fn max(self) -> u16 {
        match self {
            Width::Byte => u8::MAX as u16,
            Width::HalfWord => u16::MAX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Register {
    pub name: &'static str,
    /// Byte offset from [`LPC_RTC_BASE`]
    pub offset: usize,
    pub width: Width,
}

impl Register {
    const fn byte(name: &'static str, offset: usize) -> Self {
        Self {
            name,
            offset,
            width: Width::Byte,
        }
    }

    const fn half_word(name: &'static str, offset: usize) -> Self {
        Self {
            name,
            offset,
            width: Width::HalfWord,
        }
    }

    pub const fn fits(&self, value: u16) -> bool {
        value <= self.width.max()
    }
}

pub const ILR: Register = Register::byte("ILR", 0x000);
pub const CCR: Register = Register::byte("CCR", 0x008);
pub const AMR: Register = Register::byte("AMR", 0x010);

pub const SEC: Register = Register::byte("SEC", 0x020);
pub const MIN: Register = Register::byte("MIN", 0x024);
pub const HOUR: Register = Register::byte("HOUR", 0x028);
pub const DOM: Register = Register::byte("DOM", 0x02C);
pub const MONTH: Register = Register::byte("MONTH", 0x038);
pub const YEAR: Register = Register::half_word("YEAR", 0x03C);

pub const ALSEC: Register = Register::byte("ALSEC", 0x060);
pub const ALMIN: Register = Register::byte("ALMIN", 0x064);
pub const ALHOUR: Register = Register::byte("ALHOUR", 0x068);
pub const ALDOM: Register = Register::byte("ALDOM", 0x06C);
pub const ALMON: Register = Register::byte("ALMON", 0x078);
pub const ALYEAR: Register = Register::half_word("ALYEAR", 0x07C);

/// End of the register block, relative to [`LPC_RTC_BASE`].
pub const REGISTER_SPAN: usize = 0x080;

// ILR, write one to clear
pub const ILR_COUNTER_INCREMENT: u16 = 1 << 0;
pub const ILR_ALARM: u16 = 1 << 1;

pub const CCR_CLKEN: u16 = 1 << 0;
// set = calibration counter disabled
pub const CCR_CCALEN: u16 = 1 << 4;

// AMR, set = field ignored in the alarm comparison
pub const AMR_DOW: u16 = 1 << 4;
pub const AMR_DOY: u16 = 1 << 5;

pub const fn clock_register(field: Field) -> Register {
    match field {
        Field::Day => DOM,
        Field::Month => MONTH,
        Field::Year => YEAR,
        Field::Hour => HOUR,
        Field::Minute => MIN,
        Field::Second => SEC,
    }
}

pub const fn alarm_register(field: Field) -> Register {
    match field {
        Field::Day => ALDOM,
        Field::Month => ALMON,
        Field::Year => ALYEAR,
        Field::Hour => ALHOUR,
        Field::Minute => ALMIN,
        Field::Second => ALSEC,
    }
}

/// Access to the RTC register block.
///
/// Implemented over the memory-mapped peripheral by [`Lpc17xxRtc`] and over plain memory by the
/// test fake.
pub trait RegisterAccess {
    fn read(&mut self, register: Register) -> u16;
    fn write(&mut self, register: Register, value: u16);
}

/// The memory-mapped RTC peripheral.
pub struct Lpc17xxRtc {
    base: usize,
}

impl Lpc17xxRtc {
    /// # Safety
    ///
    /// Only one handle to the RTC may exist, and the code must run on an LPC17xx part where
    /// [`LPC_RTC_BASE`] maps the RTC block.
    pub unsafe fn steal() -> Self {
        Self { base: LPC_RTC_BASE }
    }

    fn address(&self, register: Register) -> usize {
        self.base + register.offset
    }
}

impl RegisterAccess for Lpc17xxRtc {
    fn read(&mut self, register: Register) -> u16 {
        let address = self.address(register);
        // SAFETY: the address lies inside the RTC block and is aligned for the register width
        unsafe {
            match register.width {
                Width::Byte => core::ptr::read_volatile(address as *const u8).into(),
                Width::HalfWord => core::ptr::read_volatile(address as *const u16),
            }
        }
    }

    fn write(&mut self, register: Register, value: u16) {
        let address = self.address(register);
        // SAFETY: see `read`
        unsafe {
            match register.width {
                Width::Byte => core::ptr::write_volatile(address as *mut u8, value as u8),
                Width::HalfWord => core::ptr::write_volatile(address as *mut u16, value),
            }
        }
    }
}
