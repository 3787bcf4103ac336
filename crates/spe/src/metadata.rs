/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoded header metadata.
//!
//! Every field the format can produce is named and typed here ahead of
//! time; nothing is attached dynamically and unknown header regions are
//! simply never read.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{Display, Formatter};

/// Sizes decoded from the header.
///
/// `frames * height * width * sample-width` always equals the payload
/// length of the file this came from; that is checked at decode time.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Dimensions {
    /// Number of frames recorded, may be zero
    pub frames:              usize,
    /// Rows per frame (1 for a simple spectrum)
    pub height:              usize,
    /// Columns per frame
    pub width:               usize,
    /// Physical detector chip rows
    pub chip_height:         usize,
    /// Physical detector chip columns
    pub chip_width:          usize,
    /// Logically reported chip rows when binning/cropping is used
    pub virtual_chip_height: usize,
    /// Logically reported chip columns when binning/cropping is used
    pub virtual_chip_width:  usize
}

/// One stored region-of-interest slot.
///
/// Descriptive metadata only: the pixel payload is never reshaped or
/// cropped from these, multi-ROI capture was never exercised by the
/// controller software this decoder targets.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RoiDescriptor {
    pub start_x: u16,
    pub end_x:   u16,
    pub group_x: u16,
    pub start_y: u16,
    pub end_y:   u16,
    pub group_y: u16
}

/// Acquisition timestamp stored as two fixed-format strings in the header.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CaptureDateTime {
    pub year:   u16,
    pub month:  u8,
    pub day:    u8,
    pub hour:   u8,
    pub minute: u8,
    pub second: u8
}

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec"
];

impl CaptureDateTime {
    /// Parse the header's `ddMmmyyyy` date and `HHMMSS` time strings,
    /// e.g. `17Oct2017` + `193935`.
    ///
    /// Returns `None` for anything malformed; the format gives no
    /// guarantee the strings are well formed so callers treat this as
    /// best effort.
    pub fn parse(date: &str, time: &str) -> Option<CaptureDateTime> {
        let date = date.as_bytes();
        let time = time.as_bytes();

        if date.len() < 9 || time.len() < 6 {
            return None;
        }

        let day = parse_digits(&date[0..2])? as u8;
        let month_name = core::str::from_utf8(&date[2..5]).ok()?;
        let month = MONTHS
            .iter()
            .position(|m| month_name.eq_ignore_ascii_case(m))?
            as u8
            + 1;
        let year = parse_digits(&date[5..9])?;

        let hour = parse_digits(&time[0..2])? as u8;
        let minute = parse_digits(&time[2..4])? as u8;
        let second = parse_digits(&time[4..6])? as u8;

        if day == 0 || day > 31 || hour > 23 || minute > 59 || second > 59 {
            return None;
        }

        Some(CaptureDateTime {
            year,
            month,
            day,
            hour,
            minute,
            second
        })
    }
}

fn parse_digits(bytes: &[u8]) -> Option<u16> {
    let mut value: u16 = 0;
    for b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value.checked_mul(10)?.checked_add(u16::from(b - b'0'))?;
    }
    Some(value)
}

impl Display for CaptureDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Full decoded header record.
///
/// Field meanings follow the controller vendor's file specification; most
/// mode fields are opaque enumerations surfaced as the raw stored integer.
/// Immutable after construction, offered as a read-only snapshot by the
/// map.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InstrumentMetadata {
    /// Controller hardware version
    pub controller_version:   i16,
    /// Definition of the output BNC
    pub logic_output:         i16,
    /// Amp switching mode
    pub amp_hi_cap_low_noise: u16,
    /// Timing mode
    pub timing_mode:          i16,
    /// Exposure time of each frame in seconds
    pub exposure_sec:         f32,
    /// Detector temperature set point, degrees C
    pub detector_temperature: f32,
    /// CCD/diode-array type
    pub detector_type:        i16,
    /// Trigger diode
    pub trigger_diode:        i16,
    /// Delay time used with async mode, seconds
    pub delay_time:           f32,
    /// Shutter control: normal, disabled open, disabled closed
    pub shutter_control:      u16,
    /// Absorbance live on/off
    pub absorb_live:          i16,
    /// Absorbance mode: reference strip or file
    pub absorb_mode:          u16,
    /// Whether the controller/chip can do a virtual chip
    pub can_do_virtual_chip:  i16,
    pub threshold_min_live:   i16,
    pub threshold_min:        f32,
    pub threshold_max_live:   i16,
    pub threshold_max:        f32,
    pub adc_offset:           u16,
    pub adc_rate:             u16,
    pub adc_type:             u16,
    pub adc_resolution:       u16,
    pub adc_bit_adjust:       u16,
    pub adc_gain:             u16,
    /// Geometric operations: rotate 0x01, reverse 0x02, flip 0x04
    pub geometric_ops:        u16,
    /// Number of ROIs used; a stored zero means one
    pub num_roi:              usize,
    /// ROIs in the experiment, may exceed the stored slots; stored zero
    /// means one
    pub num_roi_experiment:   usize,
    /// All stored ROI slots, used or not
    pub rois:                 Vec<RoiDescriptor>,
    /// The five free-text comment fields, NUL padding stripped
    pub comments:             Vec<String>,
    /// Acquisition timestamp, absent when the header strings fail to parse
    pub captured_at:          Option<CaptureDateTime>,
    /// File-version float from the header tail; only the newer revision
    /// stores one
    pub file_version:         Option<f32>
}
