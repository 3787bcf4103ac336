/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! On-disk format revisions.

/// The two binary revisions of the capture-file layout.
///
/// The revisions share most field offsets; the newer one grew the header,
/// moved the calibration block and added an explicit file-version float.
/// Decoders probe [`Current`](FormatVersion::Current) first and fall back
/// to [`Legacy`](FormatVersion::Legacy) unless a caller pins the version
/// through decoder options.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FormatVersion {
    /// First binary revision, 2222 byte header, no version field
    Legacy,
    /// Second binary revision, 4100 byte header, version float in the
    /// header tail
    Current
}

impl FormatVersion {
    /// Map the file-version float stored in newer headers (or supplied by
    /// a caller, e.g. `1.0`/`2.0` from a command line) to a revision.
    ///
    /// Returns `None` for values outside the two known major revisions.
    pub fn from_file_version(version: f32) -> Option<FormatVersion> {
        if (1.0..2.0).contains(&version) {
            Some(FormatVersion::Legacy)
        } else if (2.0..3.0).contains(&version) {
            Some(FormatVersion::Current)
        } else {
            None
        }
    }
}
