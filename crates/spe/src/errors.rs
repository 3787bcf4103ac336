/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use spe_core::bytestream::ReadError;

/// Possible errors that may occur during decoding
pub enum SpeDecodeErrors {
    /// The byte source ends before a required field or the header itself.
    ///
    /// # Arguments
    /// - 1st argument is the byte offset the decode needed to reach
    /// - 2nd argument is the actual length of the source
    Truncated(usize, usize),
    /// Bytes where text was expected were not valid ASCII/UTF-8
    /// after stripping NUL padding; argument is the byte offset
    InvalidEncoding(usize),
    /// The pixel data-type code is outside the four known values 0..=3
    UnknownDataType(i16),
    /// The declared dimensions do not account for the bytes that follow
    /// the header.
    ///
    /// # Arguments
    /// - 1st argument is the payload length the header promises
    /// - 2nd argument is the payload length actually present
    SizeMismatch(usize, usize),
    /// A frame index at or past the frame count was requested
    IndexOutOfRange(usize, usize),
    /// A caller-supplied file-version hint maps to no known revision
    UnsupportedVersion(f32),
    /// Frame height or width of zero
    ZeroDimensions,
    /// A dimension is larger than the configured decoder limit.
    ///
    /// # Arguments
    /// - 1st argument is the configured limit
    /// - 2nd argument is the value found in the header
    LargeDimensions(usize, usize),
    /// Generic message that does not need heap allocation
    GenericStatic(&'static str),
    /// Error originating from the filesystem when opening by path
    #[cfg(feature = "std")]
    IoError(std::io::Error)
}

impl Debug for SpeDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            SpeDecodeErrors::Truncated(wanted, len) => {
                writeln!(
                    f,
                    "Truncated file, decode requires bytes up to offset {wanted} but file has {len}"
                )
            }
            SpeDecodeErrors::InvalidEncoding(offset) => {
                writeln!(f, "Invalid text bytes at offset {offset}")
            }
            SpeDecodeErrors::UnknownDataType(code) => {
                writeln!(f, "Unknown pixel data-type code {code}, expected 0..=3")
            }
            SpeDecodeErrors::SizeMismatch(expected, found) => {
                writeln!(
                    f,
                    "Header dimensions promise a {expected} byte payload but {found} bytes follow the header"
                )
            }
            SpeDecodeErrors::IndexOutOfRange(index, count) => {
                writeln!(f, "Frame index {index} out of range, file has {count} frames")
            }
            SpeDecodeErrors::UnsupportedVersion(version) => {
                writeln!(f, "File-version hint {version} maps to no supported revision")
            }
            SpeDecodeErrors::ZeroDimensions => {
                writeln!(f, "Frame height and width must be non-zero")
            }
            SpeDecodeErrors::LargeDimensions(limit, found) => {
                writeln!(
                    f,
                    "Too large dimensions, expected a value less than {limit} but found {found}"
                )
            }
            SpeDecodeErrors::GenericStatic(val) => writeln!(f, "{val}"),
            #[cfg(feature = "std")]
            SpeDecodeErrors::IoError(err) => {
                writeln!(f, "I/O error: {err}")
            }
        }
    }
}

impl Display for SpeDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl From<ReadError> for SpeDecodeErrors {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::Truncated(wanted, len) => SpeDecodeErrors::Truncated(wanted, len),
            ReadError::InvalidEncoding(offset) => SpeDecodeErrors::InvalidEncoding(offset)
        }
    }
}

impl From<&'static str> for SpeDecodeErrors {
    fn from(value: &'static str) -> Self {
        SpeDecodeErrors::GenericStatic(value)
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for SpeDecodeErrors {
    fn from(value: std::io::Error) -> Self {
        SpeDecodeErrors::IoError(value)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SpeDecodeErrors {}
