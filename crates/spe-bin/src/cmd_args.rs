/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::{value_parser, Arg, ArgAction, Command};

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("spe")
        .about("Inspect and dump SPE capture files")
        .arg(Arg::new("file")
            .help("Capture file to read")
            .required(true))
        .arg(Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print the decoded header as JSON instead of text"))
        .arg(Arg::new("frame")
            .long("frame")
            .help("Print the samples of this frame, one row per line")
            .value_parser(value_parser!(usize)))
        .arg(Arg::new("format-version")
            .long("format-version")
            .help_heading("ADVANCED")
            .help("Decode assuming this file version (e.g. 1.43 or 2.5) instead of probing")
            .value_parser(value_parser!(f32)))
        .arg(Arg::new("strict")
            .long("strict")
            .action(ArgAction::SetTrue)
            .help_heading("ADVANCED")
            .help("Treat recoverable metadata problems as errors"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the decoding options"))
}
