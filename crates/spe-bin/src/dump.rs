/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use serde_json::json;
use spe::{SpeDecodeErrors, SpeMap};

pub fn run(options: &ArgMatches) -> Result<(), SpeDecodeErrors> {
    let file = options.get_one::<String>("file").unwrap();

    let decoder_options = crate::cmd_parsers::decoder_options(options)?;
    let map = SpeMap::open_with_options(file, decoder_options)?;

    if let Some(frame) = options.get_one::<usize>("frame") {
        print_frame(&map, *frame)
    } else if *options.get_one::<bool>("json").unwrap() {
        print_json(file, &map);
        Ok(())
    } else {
        print_summary(file, &map);
        Ok(())
    }
}

/// One frame, one row of samples per line
fn print_frame(map: &SpeMap, index: usize) -> Result<(), SpeDecodeErrors> {
    let frame = map.frame(index)?;
    let samples = frame.samples_f64();

    for row in samples.chunks(frame.width()) {
        let line: Vec<String> = row.iter().map(|s| s.to_string()).collect();
        println!("{}", line.join(" "));
    }
    Ok(())
}

fn print_json(file: &str, map: &SpeMap) {
    let wavelengths = map.wavelengths();

    let doc = json!({
        "file": file,
        "format_version": map.version(),
        "pixel_type": map.pixel_type(),
        "dimensions": map.dimensions(),
        "exposure_seconds": map.exposure_time_seconds(),
        "wavelengths": {
            "count": wavelengths.len(),
            "first": wavelengths.first(),
            "last": wavelengths.last()
        },
        "metadata": map.metadata()
    });

    println!("{}", serde_json::to_string_pretty(&doc).unwrap());
}

/// Text dump of the decoded header, in the layout the original
/// acquisition software printed
fn print_summary(file: &str, map: &SpeMap) {
    let dims = map.dimensions();
    let meta = map.metadata();

    println!("Filename      : {file}");
    println!("Format        : {:?} ({:?})", map.version(), map.pixel_type());
    println!(
        "Data size     : {} x {} x {}",
        dims.frames, dims.height, dims.width
    );
    println!(
        "CCD chip size : {} x {}",
        dims.chip_height, dims.chip_width
    );
    println!(
        "Virtual chip  : {} x {}",
        dims.virtual_chip_height, dims.virtual_chip_width
    );
    match meta.captured_at {
        Some(date) => println!("File date     : {date}"),
        None => println!("File date     : (not recorded)")
    }
    if let Some(version) = meta.file_version {
        println!("File version  : {version}");
    }
    println!("Exposure time : {} s", meta.exposure_sec);
    println!("Num ROI       : {}", meta.num_roi);
    println!("Num ROI exp.  : {}", meta.num_roi_experiment);
    println!("Controller ver: {}", meta.controller_version);
    println!("Logic output  : {}", meta.logic_output);
    println!("Timing mode   : {}", meta.timing_mode);
    println!("Det. temp     : {}", meta.detector_temperature);
    println!("Det. type     : {}", meta.detector_type);
    println!("Trigger diode : {}", meta.trigger_diode);
    println!("Delay time    : {}", meta.delay_time);
    println!("Shutter cont. : {}", meta.shutter_control);
    println!("Absorb live   : {}", meta.absorb_live);
    println!("Absorb mode   : {}", meta.absorb_mode);
    println!("Virtual chip  : {}", meta.can_do_virtual_chip);
    println!("Thresh. min L : {}", meta.threshold_min_live);
    println!("Thresh. min   : {}", meta.threshold_min);
    println!("Thresh. max L : {}", meta.threshold_max_live);
    println!("Thresh. max   : {}", meta.threshold_max);
    println!("Geometric op  : {}", meta.geometric_ops);
    println!("ADC offset    : {}", meta.adc_offset);
    println!("ADC rate      : {}", meta.adc_rate);
    println!("ADC type      : {}", meta.adc_type);
    println!("ADC resol.    : {}", meta.adc_resolution);
    println!("ADC bit adj.  : {}", meta.adc_bit_adjust);
    println!("ADC gain      : {}", meta.adc_gain);

    for (i, roi) in meta.rois.iter().enumerate() {
        println!(
            "ROI {i:<4}      : {:<5} {:<5} {:<5} {:<5} {:<5} {:<5}",
            roi.start_x, roi.end_x, roi.group_x, roi.start_y, roi.end_y, roi.group_y
        );
    }

    println!();
    println!("Comments :");
    for (i, comment) in meta.comments.iter().enumerate() {
        println!("{i:<3} : {comment}");
    }

    let wavelengths = map.wavelengths();
    if let (Some(first), Some(last)) = (wavelengths.first(), wavelengths.last()) {
        println!();
        println!(
            "Wavelengths   : {first:.3} .. {last:.3} ({} points)",
            wavelengths.len()
        );
    }
}
