/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use spe::{FormatVersion, FrameSamples, PixelDataType, SpeMap};

use crate::SpeFileBuilder;

#[test]
fn well_formed_file_decodes_completely() {
    let samples: Vec<u16> = (0..24).collect();
    let file = SpeFileBuilder::new(FormatVersion::Current)
        .dimensions(3, 2, 4)
        .u16_samples(&samples)
        .exposure(0.5)
        .comment(0, "power 12uW")
        .comment(4, "step 1V")
        .build();

    let map = SpeMap::from_bytes(&file).unwrap();

    assert_eq!(map.version(), FormatVersion::Current);
    assert_eq!(map.pixel_type(), PixelDataType::U16);
    assert_eq!(map.frame_count(), 3);
    assert_eq!(map.frame_count(), map.dimensions().frames);
    assert_eq!(map.dimensions().height, 2);
    assert_eq!(map.dimensions().width, 4);
    assert_eq!(map.exposure_time_seconds(), 0.5);

    let meta = map.metadata();
    assert_eq!(meta.comments.len(), 5);
    assert_eq!(meta.comments[0], "power 12uW");
    assert_eq!(meta.comments[1], "");
    assert_eq!(meta.comments[4], "step 1V");
    assert_eq!(meta.file_version, Some(2.5));

    let date = meta.captured_at.unwrap();
    assert_eq!((date.year, date.month, date.day), (2017, 10, 17));
    assert_eq!((date.hour, date.minute, date.second), (19, 39, 35));
}

#[test]
fn frames_match_payload_slices_for_every_sample_type() {
    // one decode per sample type, each frame re-serialized and compared
    // against the exact payload bytes it came from
    let (frames, height, width) = (2_usize, 2_usize, 3_usize);
    let count = frames * height * width;

    let u16s: Vec<u16> = (0..count as u16).map(|v| v * 7).collect();
    let i16s: Vec<i16> = (0..count as i16).map(|v| -v).collect();
    let i32s: Vec<i32> = (0..count as i32).map(|v| v * 100_000).collect();
    let f32s: Vec<f32> = (0..count).map(|v| v as f32 * 0.25).collect();

    let files = [
        SpeFileBuilder::new(FormatVersion::Current)
            .dimensions(frames as u32, height as u16, width as u16)
            .u16_samples(&u16s)
            .build(),
        SpeFileBuilder::new(FormatVersion::Current)
            .dimensions(frames as u32, height as u16, width as u16)
            .i16_samples(&i16s)
            .build(),
        SpeFileBuilder::new(FormatVersion::Current)
            .dimensions(frames as u32, height as u16, width as u16)
            .i32_samples(&i32s)
            .build(),
        SpeFileBuilder::new(FormatVersion::Current)
            .dimensions(frames as u32, height as u16, width as u16)
            .f32_samples(&f32s)
            .build()
    ];

    for file in &files {
        let map = SpeMap::from_bytes(file).unwrap();
        let element = map.pixel_type().size_of();
        let payload = &file[file.len() - count * element..];

        for i in 0..frames {
            let frame = map.frame(i).unwrap();
            assert_eq!((frame.height(), frame.width()), (height, width));

            let frame_bytes: Vec<u8> = match frame.samples() {
                FrameSamples::U16(v) => v.iter().flat_map(|s| s.to_le_bytes()).collect(),
                FrameSamples::I16(v) => v.iter().flat_map(|s| s.to_le_bytes()).collect(),
                FrameSamples::I32(v) => v.iter().flat_map(|s| s.to_le_bytes()).collect(),
                FrameSamples::F32(v) => v.iter().flat_map(|s| s.to_le_bytes()).collect()
            };
            let offset = i * height * width * element;

            assert_eq!(frame_bytes, payload[offset..offset + frame_bytes.len()]);
        }
    }
}

#[test]
fn identity_calibration_yields_column_indices() {
    let file = SpeFileBuilder::new(FormatVersion::Current)
        .dimensions(1, 1, 6)
        .coefficients([0.0, 1.0, 0.0, 0.0, 0.0, 0.0])
        .zero_payload()
        .build();

    let map = SpeMap::from_bytes(&file).unwrap();

    assert_eq!(map.wavelengths().len(), map.dimensions().width);
    assert_eq!(map.wavelengths(), [0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn wavelength_axis_always_spans_the_width() {
    for width in [1_u16, 100, 1340] {
        let file = SpeFileBuilder::new(FormatVersion::Current)
            .dimensions(1, 1, width)
            .coefficients([802.8, 0.031, -1.5e-6, 0.0, 0.0, 0.0])
            .zero_payload()
            .build();

        let map = SpeMap::from_bytes(&file).unwrap();
        assert_eq!(map.wavelengths().len(), usize::from(width));
    }
}

#[test]
fn zero_roi_count_normalizes_to_one() {
    let file = SpeFileBuilder::new(FormatVersion::Current)
        .num_roi(0)
        .zero_payload()
        .build();

    let map = SpeMap::from_bytes(&file).unwrap();
    assert_eq!(map.metadata().num_roi, 1);
    assert_eq!(map.metadata().num_roi_experiment, 1);
    assert_eq!(map.metadata().rois.len(), 10);

    let file = SpeFileBuilder::new(FormatVersion::Current)
        .num_roi(3)
        .zero_payload()
        .build();

    let map = SpeMap::from_bytes(&file).unwrap();
    assert_eq!(map.metadata().num_roi, 3);
}

#[test]
fn zero_frames_gives_an_empty_store() {
    let file = SpeFileBuilder::new(FormatVersion::Current)
        .dimensions(0, 4, 4)
        .raw_payload(Vec::new())
        .build();

    let map = SpeMap::from_bytes(&file).unwrap();

    assert_eq!(map.frame_count(), 0);
    assert!(map.frames().is_empty());
    assert!(map.frame(0).is_err());
}

#[test]
fn unparsable_date_is_not_fatal() {
    let file = SpeFileBuilder::new(FormatVersion::Current)
        .date_time("not a day", "")
        .zero_payload()
        .build();

    let map = SpeMap::from_bytes(&file).unwrap();
    assert!(map.metadata().captured_at.is_none());
}
