/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! End-to-end tests for the SPE decoder.
//!
//! The format has no public corpus, so fixtures are synthesized in memory
//! through [`SpeFileBuilder`], which writes fields through the same layout
//! tables the decoder reads them from.

#![allow(unused_imports, unused)]

use spe::layout::{Layout, CALIB_COEFFS, NUM_COMMENTS, TEXT_COMMENT_MAX};
use spe::{FormatVersion, PixelDataType};

mod decode;
mod fallback;

/// Builds one synthetic capture file, header plus payload.
pub struct SpeFileBuilder {
    layout:       &'static Layout,
    frames:       u32,
    height:       u16,
    width:        u16,
    data_type:    i16,
    coefficients: [f64; CALIB_COEFFS],
    exposure:     f32,
    date:         String,
    time:         String,
    comments:     Vec<String>,
    num_roi:      i16,
    payload:      Vec<u8>
}

impl SpeFileBuilder {
    pub fn new(version: FormatVersion) -> SpeFileBuilder {
        SpeFileBuilder {
            layout:       Layout::for_version(version),
            frames:       1,
            height:       1,
            width:        4,
            data_type:    PixelDataType::U16 as i16,
            coefficients: [0.0; CALIB_COEFFS],
            exposure:     1.0,
            date:         String::from("17Oct2017"),
            time:         String::from("193935"),
            comments:     vec![String::new(); NUM_COMMENTS],
            num_roi:      0,
            payload:      Vec::new()
        }
    }

    pub fn dimensions(mut self, frames: u32, height: u16, width: u16) -> Self {
        self.frames = frames;
        self.height = height;
        self.width = width;
        self
    }

    pub fn data_type_code(mut self, code: i16) -> Self {
        self.data_type = code;
        self
    }

    pub fn coefficients(mut self, coefficients: [f64; CALIB_COEFFS]) -> Self {
        self.coefficients = coefficients;
        self
    }

    pub fn exposure(mut self, seconds: f32) -> Self {
        self.exposure = seconds;
        self
    }

    pub fn date_time(mut self, date: &str, time: &str) -> Self {
        self.date = String::from(date);
        self.time = String::from(time);
        self
    }

    pub fn comment(mut self, index: usize, text: &str) -> Self {
        self.comments[index] = String::from(text);
        self
    }

    pub fn num_roi(mut self, num_roi: i16) -> Self {
        self.num_roi = num_roi;
        self
    }

    pub fn raw_payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn u16_samples(mut self, samples: &[u16]) -> Self {
        self.data_type = PixelDataType::U16 as i16;
        self.payload = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        self
    }

    pub fn i16_samples(mut self, samples: &[i16]) -> Self {
        self.data_type = PixelDataType::I16 as i16;
        self.payload = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        self
    }

    pub fn i32_samples(mut self, samples: &[i32]) -> Self {
        self.data_type = PixelDataType::I32 as i16;
        self.payload = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        self
    }

    pub fn f32_samples(mut self, samples: &[f32]) -> Self {
        self.data_type = PixelDataType::F32 as i16;
        self.payload = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        self
    }

    /// A payload of zero bytes sized exactly to the declared dimensions
    pub fn zero_payload(mut self) -> Self {
        let sample_width = PixelDataType::from_code(self.data_type)
            .map(|t| t.size_of())
            .unwrap_or(2);
        let len = self.frames as usize * self.height as usize * self.width as usize * sample_width;
        self.payload = vec![0; len];
        self
    }

    pub fn build(self) -> Vec<u8> {
        let layout = self.layout;
        let mut out = vec![0_u8; layout.header_len];

        write_i16(&mut out, layout.data_type.offset, self.data_type);
        write_u16(&mut out, layout.frame_width.offset, self.width);
        write_u16(&mut out, layout.frame_height.offset, self.height);
        write_u32(&mut out, layout.frame_count.offset, self.frames);

        write_u16(&mut out, layout.chip_width.offset, self.width);
        write_u16(&mut out, layout.chip_height.offset, self.height);
        write_u16(&mut out, layout.virtual_chip_width.offset, self.width);
        write_u16(&mut out, layout.virtual_chip_height.offset, self.height);

        write_f32(&mut out, layout.exposure_sec.offset, self.exposure);
        write_i16(&mut out, layout.num_roi.offset, self.num_roi);

        write_ascii(&mut out, layout.date.offset, layout.date.count, &self.date);
        write_ascii(&mut out, layout.time.offset, layout.time.count, &self.time);

        for (n, comment) in self.comments.iter().enumerate() {
            write_ascii(
                &mut out,
                layout.comments.offset + n * TEXT_COMMENT_MAX,
                TEXT_COMMENT_MAX,
                comment
            );
        }

        for (n, coefficient) in self.coefficients.iter().enumerate() {
            write_f64(&mut out, layout.calibration.offset + n * 8, *coefficient);
        }

        if let Some(desc) = layout.file_version {
            write_f32(&mut out, desc.offset, 2.5);
        }

        out.extend_from_slice(&self.payload);
        out
    }
}

fn write_i16(out: &mut [u8], offset: usize, value: i16) {
    out[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

fn write_u16(out: &mut [u8], offset: usize, value: u16) {
    out[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

fn write_u32(out: &mut [u8], offset: usize, value: u32) {
    out[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn write_f32(out: &mut [u8], offset: usize, value: f32) {
    out[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn write_f64(out: &mut [u8], offset: usize, value: f64) {
    out[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
}

fn write_ascii(out: &mut [u8], offset: usize, width: usize, text: &str) {
    let bytes = text.as_bytes();
    assert!(bytes.len() <= width, "fixture text too long for field");
    out[offset..offset + bytes.len()].copy_from_slice(bytes);
}

#[cfg(test)]
mod builder_tests {
    use spe_core::bytestream::ByteReader;

    use super::*;

    #[test]
    fn builder_writes_through_the_layout_tables() {
        let file = SpeFileBuilder::new(FormatVersion::Current)
            .dimensions(7, 3, 5)
            .exposure(2.5)
            .zero_payload()
            .build();

        let layout = Layout::for_version(FormatVersion::Current);
        let reader = ByteReader::new(&file);

        assert_eq!(reader.read_u16_le(layout.frame_width.offset).unwrap(), 5);
        assert_eq!(reader.read_u16_le(layout.frame_height.offset).unwrap(), 3);
        assert_eq!(reader.read_u32_le(layout.frame_count.offset).unwrap(), 7);
        assert_eq!(reader.read_f32_le(layout.exposure_sec.offset).unwrap(), 2.5);
        assert_eq!(file.len(), layout.header_len + 7 * 3 * 5 * 2);
    }
}
