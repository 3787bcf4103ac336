/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoding of binary SPE capture files.
//!
//! SPE files are produced by CCD spectrometer controller software: a
//! fixed-size little-endian header followed by a flat array of pixel
//! samples, `frames x height x width`, row-major, with no padding between
//! frames. Two binary revisions of the header exist; both are supported
//! and auto-detected (the XML-footer third generation is a different
//! format and not handled here).
//!
//! The entry point is [`SpeMap`], an immutable view over one decoded file:
//!
//! ```no_run
//! use spe::SpeMap;
//!
//! let map = SpeMap::open("capture.spe").unwrap();
//!
//! for i in 0..map.frame_count() {
//!     let frame = map.frame(i).unwrap();
//!     assert_eq!(frame.samples_f64().len(), frame.width() * frame.height());
//! }
//! println!("axis from {:?} to {:?}", map.wavelengths().first(), map.wavelengths().last());
//! ```
//!
//! # Features
//! - `std` (default): file-path loading and `std::error::Error` impls
//! - `log` (default): decode tracing through the `log` crate
//! - `serde`: `Serialize` on the metadata snapshot
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub use decoder::SpeDecoder;
pub use errors::SpeDecodeErrors;
pub use map::{Frame, FrameSamples, FrameStore, SpeMap};
pub use metadata::{CaptureDateTime, Dimensions, InstrumentMetadata, RoiDescriptor};
pub use spe_core;
pub use spe_core::options::DecoderOptions;
pub use spe_core::pixel_type::PixelDataType;
pub use spe_core::version::FormatVersion;

pub mod decoder;
mod errors;
pub mod layout;
pub mod map;
pub mod metadata;
