/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Pixel sample types recorded in capture files.
//!
//! The header stores a small integer code selecting how each pixel of the
//! payload is encoded; only four codes were ever written by the
//! controller software.

/// The numeric encoding of one pixel sample in the payload.
///
/// The discriminants are the on-disk codes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PixelDataType {
    /// 32-bit IEEE float, code 0
    F32 = 0,
    /// 32-bit signed integer, code 1
    I32 = 1,
    /// 16-bit signed integer, code 2
    I16 = 2,
    /// 16-bit unsigned integer, code 3
    U16 = 3
}

impl PixelDataType {
    /// Map the header code to a sample type, `None` for any code the
    /// format never defined.
    pub const fn from_code(code: i16) -> Option<PixelDataType> {
        match code {
            0 => Some(PixelDataType::F32),
            1 => Some(PixelDataType::I32),
            2 => Some(PixelDataType::I16),
            3 => Some(PixelDataType::U16),
            _ => None
        }
    }

    /// Width in bytes of one sample
    pub const fn size_of(self) -> usize {
        match self {
            PixelDataType::F32 | PixelDataType::I32 => 4,
            PixelDataType::I16 | PixelDataType::U16 => 2
        }
    }
}
