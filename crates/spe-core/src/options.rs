/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoder options
//!
//! One options struct shared by every front end so a single configuration
//! can be reused across decodes.

use crate::version::FormatVersion;

/// Options influencing a decode.
///
/// The defaults accept anything a real controller ever wrote; the limits
/// exist so a corrupt size field cannot ask for absurd allocations.
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum frame width the decoder will accept.
    ///
    /// - Default value: 16384
    max_width:    usize,
    /// Maximum frame height the decoder will accept.
    ///
    /// - Default value: 16384
    max_height:   usize,
    /// Maximum number of frames the decoder will accept.
    ///
    /// - Default value: 1048576
    max_frames:   usize,
    /// Treat recoverable metadata problems (unparsable acquisition date,
    /// malformed ROI entries) as errors instead of logging and moving on.
    ///
    /// - Default value: false
    strict_mode:  bool,
    /// Decode assuming this format revision, skipping version probing.
    ///
    /// - Default value: None (probe newer revision, fall back to older)
    version_hint: Option<FormatVersion>
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:    1 << 14,
            max_height:   1 << 14,
            max_frames:   1 << 20,
            strict_mode:  false,
            version_hint: None
        }
    }
}

impl DecoderOptions {
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    pub const fn max_frames(&self) -> usize {
        self.max_frames
    }

    pub const fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    pub const fn version_hint(&self) -> Option<FormatVersion> {
        self.version_hint
    }

    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    pub fn set_max_frames(mut self, frames: usize) -> Self {
        self.max_frames = frames;
        self
    }

    pub fn set_strict_mode(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }

    pub fn set_version_hint(mut self, hint: Option<FormatVersion>) -> Self {
        self.version_hint = hint;
        self
    }
}
