/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use log::{info, Level};
use spe::{DecoderOptions, FormatVersion, SpeDecodeErrors};

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level;

    if *options.get_one::<bool>("debug").unwrap() {
        log_level = Level::Debug;
    } else if *options.get_one::<bool>("trace").unwrap() {
        log_level = Level::Trace;
    } else if *options.get_one::<bool>("warn").unwrap() {
        log_level = Level::Warn
    } else if *options.get_one::<bool>("info").unwrap() {
        log_level = Level::Info;
    } else {
        log_level = Level::Warn;
    }

    simple_logger::init_with_level(log_level).unwrap();

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}

pub fn decoder_options(options: &ArgMatches) -> Result<DecoderOptions, SpeDecodeErrors> {
    let strict = *options.get_one::<bool>("strict").unwrap();

    let hint = match options.get_one::<f32>("format-version") {
        Some(version) => Some(
            FormatVersion::from_file_version(*version)
                .ok_or(SpeDecodeErrors::UnsupportedVersion(*version))?
        ),
        None => None
    };

    Ok(DecoderOptions::default()
        .set_strict_mode(strict)
        .set_version_hint(hint))
}
