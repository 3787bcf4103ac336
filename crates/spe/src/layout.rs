/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Static header layout tables for the two binary revisions.
//!
//! A [`Layout`] names the byte offset, element count and encoding of every
//! header field the decoder consumes. The tables are pure data; the decoder
//! never hard codes an offset.
//!
//! The two revisions share every offset up to and including the ROI table.
//! The newer revision grew the header from 2222 to 4100 bytes, moved the
//! wavelength-calibration block to the new tail and added an explicit
//! file-version float.

use spe_core::bytestream::{FieldDescriptor, FieldKind};
use spe_core::version::FormatVersion;

/// Number of free-text comment slots in the header
pub const NUM_COMMENTS: usize = 5;
/// Width in bytes of one comment slot
pub const TEXT_COMMENT_MAX: usize = 80;
/// Width in bytes of the acquisition-date string
pub const DATE_MAX: usize = 10;
/// Width in bytes of the acquisition-time string
pub const TIME_MAX: usize = 7;
/// Number of ROI slots stored, regardless of how many were used
pub const ROI_SLOTS: usize = 10;
/// WORDs per stored ROI: start/end/group along x, then along y
pub const ROI_WORDS: usize = 6;
/// Number of wavelength-calibration polynomial coefficients
pub const CALIB_COEFFS: usize = 6;

/// Byte layout of one header revision.
pub struct Layout {
    pub version:    FormatVersion,
    /// Total header size; pixel data begins here
    pub header_len: usize,

    pub controller_version:   FieldDescriptor,
    pub logic_output:         FieldDescriptor,
    pub amp_hi_cap_low_noise: FieldDescriptor,
    pub chip_width:           FieldDescriptor,
    pub timing_mode:          FieldDescriptor,
    pub exposure_sec:         FieldDescriptor,
    pub virtual_chip_width:   FieldDescriptor,
    pub virtual_chip_height:  FieldDescriptor,
    pub chip_height:          FieldDescriptor,
    pub date:                 FieldDescriptor,
    pub detector_temperature: FieldDescriptor,
    pub detector_type:        FieldDescriptor,
    pub frame_width:          FieldDescriptor,
    pub trigger_diode:        FieldDescriptor,
    pub delay_time:           FieldDescriptor,
    pub shutter_control:      FieldDescriptor,
    pub absorb_live:          FieldDescriptor,
    pub absorb_mode:          FieldDescriptor,
    pub can_do_virtual_chip:  FieldDescriptor,
    pub threshold_min_live:   FieldDescriptor,
    pub threshold_min:        FieldDescriptor,
    pub threshold_max_live:   FieldDescriptor,
    pub threshold_max:        FieldDescriptor,
    pub data_type:            FieldDescriptor,
    pub time:                 FieldDescriptor,
    pub adc_offset:           FieldDescriptor,
    pub adc_rate:             FieldDescriptor,
    pub adc_type:             FieldDescriptor,
    pub adc_resolution:       FieldDescriptor,
    pub adc_bit_adjust:       FieldDescriptor,
    pub adc_gain:             FieldDescriptor,
    pub comments:             FieldDescriptor,
    pub geometric_ops:        FieldDescriptor,
    pub frame_height:         FieldDescriptor,
    pub frame_count:          FieldDescriptor,
    pub num_roi_experiment:   FieldDescriptor,
    pub num_roi:              FieldDescriptor,
    pub roi_table:            FieldDescriptor,
    /// Only present in the newer revision
    pub file_version:         Option<FieldDescriptor>,
    pub calibration:          FieldDescriptor
}

const fn field(offset: usize, count: usize, kind: FieldKind) -> FieldDescriptor {
    FieldDescriptor::new(offset, count, kind)
}

/// Shared skeleton for both revisions; only the header length, the
/// calibration offset and the version field ever differed on disk.
const fn layout(
    version: FormatVersion, header_len: usize, calibration_offset: usize,
    file_version: Option<FieldDescriptor>
) -> Layout {
    Layout {
        version,
        header_len,

        controller_version: field(0, 1, FieldKind::I16),
        logic_output: field(2, 1, FieldKind::I16),
        amp_hi_cap_low_noise: field(4, 1, FieldKind::U16),
        chip_width: field(6, 1, FieldKind::U16),
        timing_mode: field(8, 1, FieldKind::I16),
        exposure_sec: field(10, 1, FieldKind::F32),
        virtual_chip_width: field(14, 1, FieldKind::U16),
        virtual_chip_height: field(16, 1, FieldKind::U16),
        chip_height: field(18, 1, FieldKind::U16),
        date: field(20, DATE_MAX, FieldKind::Ascii),
        detector_temperature: field(36, 1, FieldKind::F32),
        detector_type: field(40, 1, FieldKind::I16),
        frame_width: field(42, 1, FieldKind::U16),
        trigger_diode: field(44, 1, FieldKind::I16),
        delay_time: field(46, 1, FieldKind::F32),
        shutter_control: field(50, 1, FieldKind::U16),
        absorb_live: field(52, 1, FieldKind::I16),
        absorb_mode: field(54, 1, FieldKind::U16),
        can_do_virtual_chip: field(56, 1, FieldKind::I16),
        threshold_min_live: field(58, 1, FieldKind::I16),
        threshold_min: field(60, 1, FieldKind::F32),
        threshold_max_live: field(64, 1, FieldKind::I16),
        threshold_max: field(66, 1, FieldKind::F32),
        data_type: field(108, 1, FieldKind::I16),
        time: field(172, TIME_MAX, FieldKind::Ascii),
        adc_offset: field(188, 1, FieldKind::U16),
        adc_rate: field(190, 1, FieldKind::U16),
        adc_type: field(192, 1, FieldKind::U16),
        adc_resolution: field(194, 1, FieldKind::U16),
        adc_bit_adjust: field(196, 1, FieldKind::U16),
        adc_gain: field(198, 1, FieldKind::U16),
        comments: field(200, NUM_COMMENTS * TEXT_COMMENT_MAX, FieldKind::Ascii),
        geometric_ops: field(600, 1, FieldKind::U16),
        frame_height: field(656, 1, FieldKind::U16),
        frame_count: field(1446, 1, FieldKind::U32),
        num_roi_experiment: field(1488, 1, FieldKind::I16),
        num_roi: field(1510, 1, FieldKind::I16),
        roi_table: field(1512, ROI_SLOTS * ROI_WORDS, FieldKind::U16),
        file_version,
        calibration: field(calibration_offset, CALIB_COEFFS, FieldKind::F64)
    }
}

/// Newer binary revision, 4100 byte header
pub static CURRENT: Layout = layout(
    FormatVersion::Current,
    4100,
    3263,
    Some(field(1992, 1, FieldKind::F32))
);

/// Older binary revision, 2222 byte header
pub static LEGACY: Layout = layout(FormatVersion::Legacy, 2222, 2076, None);

impl Layout {
    pub const fn for_version(version: FormatVersion) -> &'static Layout {
        match version {
            FormatVersion::Legacy => &LEGACY,
            FormatVersion::Current => &CURRENT
        }
    }

    /// Every descriptor of this layout, for bounds auditing
    pub fn field_descriptors(&self) -> alloc::vec::Vec<FieldDescriptor> {
        let mut fields = alloc::vec![
            self.controller_version,
            self.logic_output,
            self.amp_hi_cap_low_noise,
            self.chip_width,
            self.timing_mode,
            self.exposure_sec,
            self.virtual_chip_width,
            self.virtual_chip_height,
            self.chip_height,
            self.date,
            self.detector_temperature,
            self.detector_type,
            self.frame_width,
            self.trigger_diode,
            self.delay_time,
            self.shutter_control,
            self.absorb_live,
            self.absorb_mode,
            self.can_do_virtual_chip,
            self.threshold_min_live,
            self.threshold_min,
            self.threshold_max_live,
            self.threshold_max,
            self.data_type,
            self.time,
            self.adc_offset,
            self.adc_rate,
            self.adc_type,
            self.adc_resolution,
            self.adc_bit_adjust,
            self.adc_gain,
            self.comments,
            self.geometric_ops,
            self.frame_height,
            self.frame_count,
            self.num_roi_experiment,
            self.num_roi,
            self.roi_table,
            self.calibration
        ];
        if let Some(version) = self.file_version {
            fields.push(version);
        }
        fields
    }
}
