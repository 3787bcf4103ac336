/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The capture-file decoder.
//!
//! Decoding is a single pass: resolve the header revision, pull every
//! header field through the layout table, verify the payload accounts for
//! the declared dimensions, then materialize the pixel payload. A file
//! either decodes completely or the whole decode fails; partially decoded
//! maps are never surfaced.

use alloc::string::String;
use alloc::vec::Vec;

use spe_core::bytestream::ByteReader;
use spe_core::log::{trace, warn};
use spe_core::options::DecoderOptions;
use spe_core::pixel_type::PixelDataType;
use spe_core::version::FormatVersion;

use crate::errors::SpeDecodeErrors;
use crate::layout::{Layout, CURRENT, LEGACY, NUM_COMMENTS, ROI_WORDS, TEXT_COMMENT_MAX};
use crate::map::{FrameStore, SpeMap};
use crate::metadata::{CaptureDateTime, Dimensions, InstrumentMetadata, RoiDescriptor};

/// Header facts needed beyond the metadata record itself
struct ParsedHeader {
    version:     FormatVersion,
    pixel_type:  PixelDataType,
    dimensions:  Dimensions,
    metadata:    InstrumentMetadata,
    wavelengths: Vec<f64>
}

/// An instance of the capture-file decoder.
///
/// The decoder borrows the raw bytes of a whole file. Header parsing and
/// payload materialization are split so callers that only need metadata
/// never touch the payload.
pub struct SpeDecoder<'a> {
    stream:  ByteReader<'a>,
    options: DecoderOptions,
    header:  Option<ParsedHeader>
}

impl<'a> SpeDecoder<'a> {
    /// Create a new decoder with default options
    ///
    /// # Arguments
    /// - data: the complete contents of one capture file
    pub fn new(data: &'a [u8]) -> SpeDecoder<'a> {
        Self::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new decoder with custom options, e.g. a pinned format
    /// revision or tighter dimension limits
    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> SpeDecoder<'a> {
        SpeDecoder {
            stream: ByteReader::new(data),
            options,
            header: None
        }
    }

    /// Parse the header, resolving which of the two binary revisions the
    /// file uses.
    ///
    /// With a version hint in the options only that revision is tried.
    /// Otherwise the newer revision is probed first and any fatal failure
    /// retries the older one; if both fail the second attempt's error is
    /// returned so genuine corruption is not masked as a version issue.
    pub fn decode_headers(&mut self) -> Result<(), SpeDecodeErrors> {
        if self.header.is_some() {
            return Ok(());
        }

        let header = match self.options.version_hint() {
            Some(version) => self.parse_header(Layout::for_version(version))?,
            None => match self.parse_header(&CURRENT) {
                Ok(header) => header,
                Err(first) => {
                    trace!("newer revision rejected ({:?}), retrying older", first);
                    self.parse_header(&LEGACY)?
                }
            }
        };

        trace!("format revision: {:?}", header.version);
        trace!("frames: {}", header.dimensions.frames);
        trace!(
            "frame size: {}x{}",
            header.dimensions.height,
            header.dimensions.width
        );
        trace!("pixel type: {:?}", header.pixel_type);

        self.header = Some(header);

        Ok(())
    }

    /// Run the full decode and assemble the immutable map
    pub fn decode(&mut self) -> Result<SpeMap, SpeDecodeErrors> {
        self.decode_headers()?;

        // decode_headers above guarantees the header is present
        let header = self.header.as_ref().ok_or("headers not decoded")?;

        let layout = Layout::for_version(header.version);
        let payload = self.stream.slice_from(layout.header_len)?;
        let frames = read_samples(payload, header.pixel_type);

        Ok(SpeMap::from_parts(
            header.version,
            header.dimensions,
            header.metadata.clone(),
            header.wavelengths.clone(),
            frames
        ))
    }

    /// One full header parse against a specific layout table.
    ///
    /// Order matters: data type, sizes and the payload length check are
    /// the structural gates; everything after them is metadata that can
    /// only fail for encoding reasons.
    fn parse_header(&self, layout: &'static Layout) -> Result<ParsedHeader, SpeDecodeErrors> {
        let stream = &self.stream;

        if !stream.has(layout.header_len) {
            return Err(SpeDecodeErrors::Truncated(layout.header_len, stream.len()));
        }

        let code = stream.read_i16_le(layout.data_type.offset)?;
        let pixel_type =
            PixelDataType::from_code(code).ok_or(SpeDecodeErrors::UnknownDataType(code))?;

        let dimensions = self.read_dimensions(layout)?;

        // the format has no checksum; the only structural integrity check
        // is that the declared sizes account for every payload byte
        let expected = dimensions.frames
            * dimensions.height
            * dimensions.width
            * pixel_type.size_of();
        let found = stream.len() - layout.header_len;

        if expected != found {
            return Err(SpeDecodeErrors::SizeMismatch(expected, found));
        }

        let coefficients = stream.read_array(&layout.calibration)?;
        let wavelengths = evaluate_axis(&coefficients, dimensions.width);

        let metadata = self.read_metadata(layout)?;

        Ok(ParsedHeader {
            version: layout.version,
            pixel_type,
            dimensions,
            metadata,
            wavelengths
        })
    }

    fn read_dimensions(&self, layout: &'static Layout) -> Result<Dimensions, SpeDecodeErrors> {
        let stream = &self.stream;

        let width = usize::from(stream.read_u16_le(layout.frame_width.offset)?);
        let height = usize::from(stream.read_u16_le(layout.frame_height.offset)?);
        let frames = stream.read_u32_le(layout.frame_count.offset)? as usize;

        if width == 0 || height == 0 {
            return Err(SpeDecodeErrors::ZeroDimensions);
        }
        if width > self.options.max_width() {
            return Err(SpeDecodeErrors::LargeDimensions(
                self.options.max_width(),
                width
            ));
        }
        if height > self.options.max_height() {
            return Err(SpeDecodeErrors::LargeDimensions(
                self.options.max_height(),
                height
            ));
        }
        if frames > self.options.max_frames() {
            return Err(SpeDecodeErrors::LargeDimensions(
                self.options.max_frames(),
                frames
            ));
        }

        Ok(Dimensions {
            frames,
            height,
            width,
            chip_height: usize::from(stream.read_u16_le(layout.chip_height.offset)?),
            chip_width: usize::from(stream.read_u16_le(layout.chip_width.offset)?),
            virtual_chip_height: usize::from(stream.read_u16_le(layout.virtual_chip_height.offset)?),
            virtual_chip_width: usize::from(stream.read_u16_le(layout.virtual_chip_width.offset)?)
        })
    }

    fn read_metadata(&self, layout: &'static Layout) -> Result<InstrumentMetadata, SpeDecodeErrors> {
        let stream = &self.stream;

        let comments = self.read_comments(layout)?;
        let rois = self.read_roi_table(layout)?;

        // zero is the format's encoding for "use the default single region"
        let num_roi = stream.read_i16_le(layout.num_roi.offset)?.max(0) as usize;
        let num_roi = if num_roi == 0 { 1 } else { num_roi };
        let num_roi_experiment =
            stream.read_i16_le(layout.num_roi_experiment.offset)?.max(0) as usize;
        let num_roi_experiment = if num_roi_experiment == 0 {
            1
        } else {
            num_roi_experiment
        };

        let captured_at = self.read_capture_date(layout)?;

        let file_version = match layout.file_version {
            Some(desc) => Some(stream.read_f32_le(desc.offset)?),
            None => None
        };

        Ok(InstrumentMetadata {
            controller_version: stream.read_i16_le(layout.controller_version.offset)?,
            logic_output: stream.read_i16_le(layout.logic_output.offset)?,
            amp_hi_cap_low_noise: stream.read_u16_le(layout.amp_hi_cap_low_noise.offset)?,
            timing_mode: stream.read_i16_le(layout.timing_mode.offset)?,
            exposure_sec: stream.read_f32_le(layout.exposure_sec.offset)?,
            detector_temperature: stream.read_f32_le(layout.detector_temperature.offset)?,
            detector_type: stream.read_i16_le(layout.detector_type.offset)?,
            trigger_diode: stream.read_i16_le(layout.trigger_diode.offset)?,
            delay_time: stream.read_f32_le(layout.delay_time.offset)?,
            shutter_control: stream.read_u16_le(layout.shutter_control.offset)?,
            absorb_live: stream.read_i16_le(layout.absorb_live.offset)?,
            absorb_mode: stream.read_u16_le(layout.absorb_mode.offset)?,
            can_do_virtual_chip: stream.read_i16_le(layout.can_do_virtual_chip.offset)?,
            threshold_min_live: stream.read_i16_le(layout.threshold_min_live.offset)?,
            threshold_min: stream.read_f32_le(layout.threshold_min.offset)?,
            threshold_max_live: stream.read_i16_le(layout.threshold_max_live.offset)?,
            threshold_max: stream.read_f32_le(layout.threshold_max.offset)?,
            adc_offset: stream.read_u16_le(layout.adc_offset.offset)?,
            adc_rate: stream.read_u16_le(layout.adc_rate.offset)?,
            adc_type: stream.read_u16_le(layout.adc_type.offset)?,
            adc_resolution: stream.read_u16_le(layout.adc_resolution.offset)?,
            adc_bit_adjust: stream.read_u16_le(layout.adc_bit_adjust.offset)?,
            adc_gain: stream.read_u16_le(layout.adc_gain.offset)?,
            geometric_ops: stream.read_u16_le(layout.geometric_ops.offset)?,
            num_roi,
            num_roi_experiment,
            rois,
            comments,
            captured_at,
            file_version
        })
    }

    fn read_comments(&self, layout: &'static Layout) -> Result<Vec<String>, SpeDecodeErrors> {
        let mut comments = Vec::with_capacity(NUM_COMMENTS);

        for n in 0..NUM_COMMENTS {
            let offset = layout.comments.offset + n * TEXT_COMMENT_MAX;
            comments.push(self.stream.read_ascii(offset, TEXT_COMMENT_MAX)?);
        }
        Ok(comments)
    }

    fn read_roi_table(&self, layout: &'static Layout) -> Result<Vec<RoiDescriptor>, SpeDecodeErrors> {
        let words = self.stream.read_array(&layout.roi_table)?;

        let rois = words
            .chunks_exact(ROI_WORDS)
            .map(|chunk| RoiDescriptor {
                start_x: chunk[0] as u16,
                end_x:   chunk[1] as u16,
                group_x: chunk[2] as u16,
                start_y: chunk[3] as u16,
                end_y:   chunk[4] as u16,
                group_y: chunk[5] as u16
            })
            .collect();

        Ok(rois)
    }

    /// Best-effort timestamp extraction.
    ///
    /// The format gives no guarantee the date strings are well formed, so
    /// a failed parse leaves the timestamp absent instead of failing the
    /// decode (unless strict mode asks otherwise).
    fn read_capture_date(
        &self, layout: &'static Layout
    ) -> Result<Option<CaptureDateTime>, SpeDecodeErrors> {
        let date = self.stream.read_ascii(layout.date.offset, layout.date.count)?;
        let time = self.stream.read_ascii(layout.time.offset, layout.time.count)?;

        match CaptureDateTime::parse(&date, &time) {
            Some(parsed) => Ok(Some(parsed)),
            None => {
                if self.options.strict_mode() {
                    return Err(SpeDecodeErrors::GenericStatic(
                        "unparsable acquisition date/time"
                    ));
                }
                warn!("unparsable acquisition date {date:?} {time:?}, leaving timestamp absent");
                Ok(None)
            }
        }
    }

    /// Format revision resolved by `decode_headers`, `None` before then
    pub fn version(&self) -> Option<FormatVersion> {
        self.header.as_ref().map(|h| h.version)
    }

    /// Pixel sample type, `None` before the headers are decoded
    pub fn pixel_type(&self) -> Option<PixelDataType> {
        self.header.as_ref().map(|h| h.pixel_type)
    }

    /// Decoded sizes, `None` before the headers are decoded
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.header.as_ref().map(|h| h.dimensions)
    }

    /// Decoded header record, `None` before the headers are decoded
    pub fn metadata(&self) -> Option<&InstrumentMetadata> {
        self.header.as_ref().map(|h| &h.metadata)
    }

    /// Calibrated wavelength axis, `None` before the headers are decoded
    pub fn wavelengths(&self) -> Option<&[f64]> {
        self.header.as_ref().map(|h| h.wavelengths.as_slice())
    }
}

/// Evaluate the calibration polynomial at every column index.
///
/// Coefficients are stored lowest-degree-first on disk: the first read
/// coefficient is the degree-0 term. Horner's method walks them in the
/// reversed, highest-first order.
fn evaluate_axis(coefficients: &[f64], width: usize) -> Vec<f64> {
    (0..width)
        .map(|column| {
            let x = column as f64;
            coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
        })
        .collect()
}

/// Materialize the payload into its declared sample type.
///
/// The payload length was already verified to be an exact multiple of the
/// sample width, and the samples stay in on-disk order.
fn read_samples(payload: &[u8], pixel_type: PixelDataType) -> FrameStore {
    match pixel_type {
        PixelDataType::F32 => FrameStore::F32(
            payload
                .chunks_exact(4)
                .map(|c| f32::from_le_bytes(c.try_into().unwrap()))
                .collect()
        ),
        PixelDataType::I32 => FrameStore::I32(
            payload
                .chunks_exact(4)
                .map(|c| i32::from_le_bytes(c.try_into().unwrap()))
                .collect()
        ),
        PixelDataType::I16 => FrameStore::I16(
            payload
                .chunks_exact(2)
                .map(|c| i16::from_le_bytes(c.try_into().unwrap()))
                .collect()
        ),
        PixelDataType::U16 => FrameStore::U16(
            payload
                .chunks_exact(2)
                .map(|c| u16::from_le_bytes(c.try_into().unwrap()))
                .collect()
        )
    }
}
