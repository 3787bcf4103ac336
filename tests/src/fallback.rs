/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Version probing: newer revision first, older on any fatal failure,
//! explicit hints bypass probing entirely.

use spe::{DecoderOptions, FormatVersion, SpeDecodeErrors, SpeMap};

use crate::SpeFileBuilder;

#[test]
fn legacy_file_decodes_through_the_fallback() {
    // small legacy file: shorter than the newer header, so the first
    // probe fails with truncation before the fallback succeeds
    let samples: Vec<u16> = (0..8).collect();
    let file = SpeFileBuilder::new(FormatVersion::Legacy)
        .dimensions(2, 1, 4)
        .u16_samples(&samples)
        .build();

    assert!(file.len() < 4100);

    let map = SpeMap::from_bytes(&file).unwrap();

    assert_eq!(map.version(), FormatVersion::Legacy);
    assert_eq!(map.frame_count(), 2);
    assert_eq!(map.metadata().file_version, None);
}

#[test]
fn large_legacy_file_decodes_through_the_fallback() {
    // payload big enough that the file passes the newer revision's header
    // length check and is rejected by the payload size check instead
    let samples: Vec<u16> = (0..4096).map(|v| v as u16).collect();
    let file = SpeFileBuilder::new(FormatVersion::Legacy)
        .dimensions(4, 16, 64)
        .u16_samples(&samples)
        .build();

    assert!(file.len() > 4100);

    let map = SpeMap::from_bytes(&file).unwrap();

    assert_eq!(map.version(), FormatVersion::Legacy);
    assert_eq!(map.frame_count(), 4);
    assert_eq!(map.dimensions().width, 64);
}

#[test]
fn legacy_calibration_block_is_honored() {
    let file = SpeFileBuilder::new(FormatVersion::Legacy)
        .dimensions(1, 1, 4)
        .coefficients([500.0, 2.0, 0.0, 0.0, 0.0, 0.0])
        .zero_payload()
        .build();

    let map = SpeMap::from_bytes(&file).unwrap();

    assert_eq!(map.wavelengths(), [500.0, 502.0, 504.0, 506.0]);
}

#[test]
fn version_hint_bypasses_probing() {
    let samples: Vec<u16> = (0..4).collect();
    let file = SpeFileBuilder::new(FormatVersion::Legacy)
        .dimensions(1, 1, 4)
        .u16_samples(&samples)
        .build();

    let legacy_only =
        DecoderOptions::default().set_version_hint(Some(FormatVersion::Legacy));
    let current_only =
        DecoderOptions::default().set_version_hint(Some(FormatVersion::Current));

    assert!(SpeMap::from_bytes_with_options(&file, legacy_only).is_ok());

    // pinned to the wrong revision there is no fallback
    let result = SpeMap::from_bytes_with_options(&file, current_only);
    assert!(matches!(result, Err(SpeDecodeErrors::Truncated(..))));
}

#[test]
fn both_failures_surface_the_second_attempts_error() {
    // corrupt beyond either revision: valid lengths for neither
    let file = SpeFileBuilder::new(FormatVersion::Legacy)
        .dimensions(1, 1, 4)
        .raw_payload(vec![0; 3])
        .build();

    let result = SpeMap::from_bytes(&file);

    // the older revision's size check is what the caller gets to see
    assert!(matches!(
        result,
        Err(SpeDecodeErrors::SizeMismatch(8, 3))
    ));
}
