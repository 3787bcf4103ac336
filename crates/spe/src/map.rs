/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The normalized in-memory view of one decoded capture file.
//!
//! A map is a series of frames with one active region of interest: all
//! frames plus metadata plus the calibrated wavelength axis. Maps are
//! constructed in one pass by the decoder and immutable afterwards;
//! re-reading a file means re-opening it.

use alloc::vec::Vec;

use spe_core::options::DecoderOptions;
use spe_core::pixel_type::PixelDataType;
use spe_core::version::FormatVersion;

use crate::decoder::SpeDecoder;
use crate::errors::SpeDecodeErrors;
use crate::metadata::{Dimensions, InstrumentMetadata};

/// The decoded pixel payload of a whole file.
///
/// A dense array indexed `[frame][row][column]`, row-major, in on-disk
/// order, under the sample type the header declared.
pub enum FrameStore {
    F32(Vec<f32>),
    I32(Vec<i32>),
    I16(Vec<i16>),
    U16(Vec<u16>)
}

impl FrameStore {
    /// Total number of samples across all frames
    pub fn len(&self) -> usize {
        match self {
            FrameStore::F32(v) => v.len(),
            FrameStore::I32(v) => v.len(),
            FrameStore::I16(v) => v.len(),
            FrameStore::U16(v) => v.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn pixel_type(&self) -> PixelDataType {
        match self {
            FrameStore::F32(_) => PixelDataType::F32,
            FrameStore::I32(_) => PixelDataType::I32,
            FrameStore::I16(_) => PixelDataType::I16,
            FrameStore::U16(_) => PixelDataType::U16
        }
    }

    fn slice(&self, start: usize, len: usize) -> FrameSamples<'_> {
        match self {
            FrameStore::F32(v) => FrameSamples::F32(&v[start..start + len]),
            FrameStore::I32(v) => FrameSamples::I32(&v[start..start + len]),
            FrameStore::I16(v) => FrameSamples::I16(&v[start..start + len]),
            FrameStore::U16(v) => FrameSamples::U16(&v[start..start + len])
        }
    }
}

/// Borrowed samples of one frame under their stored type
#[derive(Copy, Clone)]
pub enum FrameSamples<'a> {
    F32(&'a [f32]),
    I32(&'a [i32]),
    I16(&'a [i16]),
    U16(&'a [u16])
}

impl<'a> FrameSamples<'a> {
    pub fn len(&self) -> usize {
        match self {
            FrameSamples::F32(v) => v.len(),
            FrameSamples::I32(v) => v.len(),
            FrameSamples::I16(v) => v.len(),
            FrameSamples::U16(v) => v.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One frame of the map: a 2D `[height][width]` view over the store.
#[derive(Copy, Clone)]
pub struct Frame<'a> {
    height:  usize,
    width:   usize,
    samples: FrameSamples<'a>
}

impl<'a> Frame<'a> {
    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    /// The frame's samples under their stored type, row-major
    pub const fn samples(&self) -> FrameSamples<'a> {
        self.samples
    }

    /// The frame's samples widened to `f64`, row-major.
    ///
    /// Convenient for plotting front ends that do not care about the
    /// stored sample type.
    pub fn samples_f64(&self) -> Vec<f64> {
        match self.samples {
            FrameSamples::F32(v) => v.iter().map(|s| f64::from(*s)).collect(),
            FrameSamples::I32(v) => v.iter().map(|s| f64::from(*s)).collect(),
            FrameSamples::I16(v) => v.iter().map(|s| f64::from(*s)).collect(),
            FrameSamples::U16(v) => v.iter().map(|s| f64::from(*s)).collect()
        }
    }
}

/// An entire decoded capture file: frames, metadata and the calibrated
/// wavelength axis, immutable once constructed.
pub struct SpeMap {
    version:     FormatVersion,
    dimensions:  Dimensions,
    metadata:    InstrumentMetadata,
    wavelengths: Vec<f64>,
    frames:      FrameStore
}

impl SpeMap {
    pub(crate) fn from_parts(
        version: FormatVersion, dimensions: Dimensions, metadata: InstrumentMetadata,
        wavelengths: Vec<f64>, frames: FrameStore
    ) -> SpeMap {
        SpeMap {
            version,
            dimensions,
            metadata,
            wavelengths,
            frames
        }
    }

    /// Decode a map from the complete contents of one file
    pub fn from_bytes(data: &[u8]) -> Result<SpeMap, SpeDecodeErrors> {
        SpeDecoder::new(data).decode()
    }

    /// Decode a map from bytes with custom options
    pub fn from_bytes_with_options(
        data: &[u8], options: DecoderOptions
    ) -> Result<SpeMap, SpeDecodeErrors> {
        SpeDecoder::new_with_options(data, options).decode()
    }

    /// Read and decode the file at `path`
    #[cfg(feature = "std")]
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<SpeMap, SpeDecodeErrors> {
        Self::open_with_options(path, DecoderOptions::default())
    }

    /// Read and decode the file at `path` with custom options
    #[cfg(feature = "std")]
    pub fn open_with_options<P: AsRef<std::path::Path>>(
        path: P, options: DecoderOptions
    ) -> Result<SpeMap, SpeDecodeErrors> {
        let contents = std::fs::read(path)?;

        Self::from_bytes_with_options(&contents, options)
    }

    /// Number of frames recorded in the file
    pub const fn frame_count(&self) -> usize {
        self.dimensions.frames
    }

    /// The `index`th frame as a 2D view, on-disk order
    pub fn frame(&self, index: usize) -> Result<Frame<'_>, SpeDecodeErrors> {
        if index >= self.dimensions.frames {
            return Err(SpeDecodeErrors::IndexOutOfRange(
                index,
                self.dimensions.frames
            ));
        }
        let len = self.dimensions.height * self.dimensions.width;

        Ok(Frame {
            height:  self.dimensions.height,
            width:   self.dimensions.width,
            samples: self.frames.slice(index * len, len)
        })
    }

    /// The calibrated wavelength axis, one value per pixel column
    pub fn wavelengths(&self) -> &[f64] {
        &self.wavelengths
    }

    /// Exposure time of each frame in seconds
    pub const fn exposure_time_seconds(&self) -> f32 {
        self.metadata.exposure_sec
    }

    /// Read-only snapshot of every decoded header field
    pub const fn metadata(&self) -> &InstrumentMetadata {
        &self.metadata
    }

    pub const fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    /// The binary revision the file was decoded under
    pub const fn version(&self) -> FormatVersion {
        self.version
    }

    pub const fn pixel_type(&self) -> PixelDataType {
        self.frames.pixel_type()
    }

    /// The whole payload across all frames
    pub const fn frames(&self) -> &FrameStore {
        &self.frames
    }
}
