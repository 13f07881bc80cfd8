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

#![cfg_attr(not(test), no_std)]

//! Real-time clock support for LPC17xx (mbed) boards.
//!
//! [`rtc::RtcControl`] owns the RTC peripheral and commits validated date/time fields to its
//! counter and alarm registers. [`rtc::accessor::RtcAccessor`] sits on top and offers the
//! operations a scripting host exposes: `set`, `get`, `set_alarm` and `alarmed`. Parsing and
//! formatting live in the `mbed-rtc-datetime` crate, re-exported here as [`datetime`].

#[macro_use]
mod fmt;

pub mod rtc;

pub use mbed_rtc_datetime as datetime;
pub use mbed_rtc_datetime::DateTimeError as Error;
