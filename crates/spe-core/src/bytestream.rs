/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! An offset-addressed byte reader for fixed-layout binary headers.
//!
//! Capture files place every header field at a fixed byte offset, so the
//! reader here is random access rather than cursor based: every read names
//! the absolute position it wants, the source is never advanced or mutated.
//!
//! All multi-byte reads are little-endian, matching the platform that
//! produced the files.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{Debug, Display, Formatter};

/// Errors returned by [`ByteReader`] operations.
pub enum ReadError {
    /// The source is too short for the requested read.
    ///
    /// # Arguments
    /// - 1st argument is the end position the read required
    /// - 2nd argument is the actual length of the source
    Truncated(usize, usize),
    /// Bytes at the given offset were not valid text after
    /// stripping trailing NUL padding
    InvalidEncoding(usize)
}

impl Debug for ReadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ReadError::Truncated(wanted, len) => {
                writeln!(
                    f,
                    "Truncated source, read requires bytes up to offset {wanted} but source has {len}"
                )
            }
            ReadError::InvalidEncoding(offset) => {
                writeln!(f, "Invalid text bytes at offset {offset}")
            }
        }
    }
}

impl Display for ReadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ReadError {}

/// Encoding of a single header field element.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FieldKind {
    I16,
    U16,
    I32,
    U32,
    F32,
    F64,
    /// NUL-padded fixed width ASCII text, one byte per element
    Ascii
}

impl FieldKind {
    /// Width in bytes of one element of this kind
    pub const fn size_of(self) -> usize {
        match self {
            FieldKind::I16 | FieldKind::U16 => 2,
            FieldKind::I32 | FieldKind::U32 | FieldKind::F32 => 4,
            FieldKind::F64 => 8,
            FieldKind::Ascii => 1
        }
    }
}

/// Position, element count and encoding of one header field.
///
/// A descriptor is pure data; pairing it with a [`ByteReader`]
/// produces a value.
#[derive(Copy, Clone, Debug)]
pub struct FieldDescriptor {
    /// Byte position of the first element
    pub offset: usize,
    /// Number of elements stored
    pub count:  usize,
    /// Encoding of each element
    pub kind:   FieldKind
}

impl FieldDescriptor {
    pub const fn new(offset: usize, count: usize, kind: FieldKind) -> FieldDescriptor {
        FieldDescriptor {
            offset,
            count,
            kind
        }
    }
    /// Byte width of the whole field
    pub const fn byte_len(&self) -> usize {
        self.count * self.kind.size_of()
    }
    /// One past the last byte this field occupies
    pub const fn end(&self) -> usize {
        self.offset + self.byte_len()
    }
}

/// A read-only view over a byte source with offset-addressed,
/// little-endian typed reads.
pub struct ByteReader<'a> {
    stream: &'a [u8]
}

macro_rules! read_single_type {
    ($name:tt,$int_type:tt) => {
        impl<'a> ByteReader<'a> {
            #[doc = concat!("Read a little-endian ", stringify!($int_type), " at `offset`.")]
            #[doc = ""]
            #[doc = "Returns an error if the source ends before `offset` plus the type width."]
            #[inline]
            pub fn $name(&self, offset: usize) -> Result<$int_type, ReadError> {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let end = offset + SIZE_OF_VAL;

                match self.stream.get(offset..end) {
                    Some(bytes) => Ok($int_type::from_le_bytes(bytes.try_into().unwrap())),
                    None => Err(ReadError::Truncated(end, self.stream.len()))
                }
            }
        }
    };
}

read_single_type!(read_i16_le, i16);
read_single_type!(read_u16_le, u16);
read_single_type!(read_i32_le, i32);
read_single_type!(read_u32_le, u32);
read_single_type!(read_f32_le, f32);
read_single_type!(read_f64_le, f64);

impl<'a> ByteReader<'a> {
    pub const fn new(stream: &'a [u8]) -> ByteReader<'a> {
        ByteReader { stream }
    }

    /// Total length of the underlying source
    pub const fn len(&self) -> usize {
        self.stream.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.stream.len() == 0
    }

    /// Whether the source holds at least `len` bytes
    pub const fn has(&self, len: usize) -> bool {
        self.stream.len() >= len
    }

    /// Read one element described by `desc` widened to `f64`.
    ///
    /// The descriptor count must be exactly 1, text fields are not scalars.
    pub fn read_scalar(&self, desc: &FieldDescriptor) -> Result<f64, ReadError> {
        debug_assert_eq!(desc.count, 1);

        self.read_element(desc.offset, desc.kind)
    }

    /// Read every element described by `desc` widened to `f64`.
    ///
    /// The count is exact: the result holds `desc.count` values or the
    /// read fails.
    pub fn read_array(&self, desc: &FieldDescriptor) -> Result<Vec<f64>, ReadError> {
        let width = desc.kind.size_of();
        // bounds-check the whole field up front so a partial array
        // is never produced
        let end = desc.end();

        if !self.has(end) {
            return Err(ReadError::Truncated(end, self.stream.len()));
        }
        let mut values = Vec::with_capacity(desc.count);

        for i in 0..desc.count {
            values.push(self.read_element(desc.offset + i * width, desc.kind)?);
        }
        Ok(values)
    }

    fn read_element(&self, offset: usize, kind: FieldKind) -> Result<f64, ReadError> {
        let value = match kind {
            FieldKind::I16 => f64::from(self.read_i16_le(offset)?),
            FieldKind::U16 => f64::from(self.read_u16_le(offset)?),
            FieldKind::I32 => f64::from(self.read_i32_le(offset)?),
            FieldKind::U32 => f64::from(self.read_u32_le(offset)?),
            FieldKind::F32 => f64::from(self.read_f32_le(offset)?),
            FieldKind::F64 => self.read_f64_le(offset)?,
            FieldKind::Ascii => f64::from(self.read_u8(offset)?)
        };
        Ok(value)
    }

    /// Read a single byte at `offset`
    #[inline]
    pub fn read_u8(&self, offset: usize) -> Result<u8, ReadError> {
        self.stream
            .get(offset)
            .copied()
            .ok_or(ReadError::Truncated(offset + 1, self.stream.len()))
    }

    /// Read `width` bytes of NUL-padded text at `offset`.
    ///
    /// Trailing NUL bytes are stripped before the remainder is validated
    /// as UTF-8; the stored strings are plain ASCII so this accepts every
    /// well-formed file.
    pub fn read_ascii(&self, offset: usize, width: usize) -> Result<String, ReadError> {
        let end = offset + width;

        let bytes = self
            .stream
            .get(offset..end)
            .ok_or(ReadError::Truncated(end, self.stream.len()))?;

        let trimmed_len = bytes.iter().rposition(|b| *b != 0).map_or(0, |p| p + 1);

        match core::str::from_utf8(&bytes[..trimmed_len]) {
            Ok(text) => Ok(String::from(text)),
            Err(_) => Err(ReadError::InvalidEncoding(offset))
        }
    }

    /// Borrow everything from `offset` to the end of the source
    pub fn slice_from(&self, offset: usize) -> Result<&'a [u8], ReadError> {
        self.stream
            .get(offset..)
            .ok_or(ReadError::Truncated(offset, self.stream.len()))
    }
}
