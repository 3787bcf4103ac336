/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the spe family of crates
//!
//! This crate provides the pieces the decoder crates build on top of:
//!
//! - An offset-addressed, endian-aware byte reader together with field
//!   descriptors describing where header fields live on disk
//! - The pixel sample type recorded in capture files
//! - The on-disk format revision tag
//! - Decoder options shared by all front ends
//!
//! The crate is `#[no_std]` with `alloc`; the `std` feature only adds
//! `std::error::Error` impls and I/O conveniences for dependents.
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub mod bytestream;
pub mod log;
pub mod options;
pub mod pixel_type;
pub mod serde;
pub mod version;
