/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::process::exit;

use log::error;

mod cmd_args;
mod cmd_parsers;
mod dump;

fn main() {
    let cmd = cmd_args::create_cmd_args();
    let options = cmd.get_matches();

    cmd_parsers::setup_logger(&options);

    if let Err(e) = dump::run(&options) {
        println!();
        error!(" Could not decode file, reason {:?}", e);
        println!();
        exit(-1);
    }
}
