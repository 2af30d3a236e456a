// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2024.

//! i.MX CAAM (Cryptographic Acceleration and Assurance Module) support.
//!
//! This crate covers the global controller page of the block: capability
//! discovery (job rings, hashing ceiling, public key engines, silicon
//! revision and era) and the manufacturing protection message register
//! (MPMR) fill/lock protocol used for device identity attestation. Job
//! ring and crypto descriptor management sit above this layer and are not
//! part of it.

#![no_std]

pub mod ctrl;
pub mod io;
pub mod registers;

// This is used to run the tests on a host
#[cfg(test)]
#[macro_use]
extern crate std;
