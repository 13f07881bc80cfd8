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

use cortex_m::interrupt::InterruptNumber;
use cortex_m::peripheral::NVIC;

/// External interrupt number of the RTC on LPC17xx parts.
pub const RTC_IRQ_NUMBER: u16 = 17;

/// Priority bits implemented by the LPC17xx NVIC.
pub const NVIC_PRIO_BITS: u8 = 5;

/// Priority given to the RTC line when an alarm is armed, already shifted into the implemented
/// (most significant) priority bits.
pub const RTC_IRQ_PRIORITY: u8 = ((0x01 << 3) | 0x01) << (8 - NVIC_PRIO_BITS);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtcIrq;

// SAFETY: 17 is the RTC entry in the LPC17xx vector table
unsafe impl InterruptNumber for RtcIrq {
    fn number(self) -> u16 {
        RTC_IRQ_NUMBER
    }
}

/// The interrupt controller line the RTC alarm is routed to. Enabling the line is left to the
/// platform code.
pub trait InterruptLine {
    fn unpend(&mut self);
    fn set_priority(&mut self, priority: u8);
}

/// RTC line on the Cortex-M NVIC.
pub struct NvicRtcLine {
    nvic: NVIC,
}

impl NvicRtcLine {
    pub fn new(nvic: NVIC) -> Self {
        Self { nvic }
    }

    pub fn into_inner(self) -> NVIC {
        self.nvic
    }
}

impl InterruptLine for NvicRtcLine {
    fn unpend(&mut self) {
        NVIC::unpend(RtcIrq);
    }

    fn set_priority(&mut self, priority: u8) {
        // SAFETY: the RTC handler shares no priority-based critical sections with this crate
        unsafe { self.nvic.set_priority(RtcIrq, priority) }
    }
}
