// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2024.

//! CAAM global controller register map.
//!
//! Byte offsets into the controller register page plus the bit fields the
//! HAL extracts. Positions and widths follow the i.MX security reference
//! manual and are part of the wire contract with the silicon.

use tock_registers::register_bitfields;

/// Security configuration register.
pub const SCFGR: usize = 0x000C;
/// Secure memory virtual base address register of the first job ring. The
/// registers for the remaining job rings follow at a stride of 8 bytes.
pub const JR0_SMVBAR: usize = 0x0184;
/// First word of the manufacturing protection message register file.
pub const MPMR: usize = 0x0380;
/// CCB version ID register.
pub const CCBVID: usize = 0x0FE4;
/// CHA version ID register, least significant half.
pub const CHAVID_LS: usize = 0x0FEC;
/// CHA number register, most significant half.
pub const CHANUM_MS: usize = 0x0FF0;
/// CHA number register, least significant half.
pub const CHANUM_LS: usize = 0x0FF4;
/// CAAM version ID register, most significant half.
pub const CAAMVID_MS: usize = 0x0FF8;

/// MPMR capacity in bytes (eight 32-bit registers).
pub const MPMR_SIZE: usize = 32;

/// Each job ring owns a 4KiB register page behind the controller page.
pub const JR_BLOCK_SIZE: usize = 0x1000;

/// Secure memory virtual base address register for the job ring at
/// `jr_offset` from the controller base.
pub const fn jr_smvbar(jr_offset: usize) -> usize {
    JR0_SMVBAR + (jr_offset / JR_BLOCK_SIZE - 1) * 8
}

register_bitfields![u32,
    pub SCFGR [
        /// Manufacturing protection curve selector.
        MPCURVE OFFSET(28) NUMBITS(4) [],
        /// MPMR locked. Set once by software, cleared by a power cycle.
        MPMRL OFFSET(26) NUMBITS(1) [],
    ],
    pub CHANUM_MS [
        /// Number of job rings implemented.
        JRNUM OFFSET(28) NUMBITS(4) [],
    ],
    pub CHANUM_LS [
        /// Number of public key modules implemented.
        PKNUM OFFSET(28) NUMBITS(4) [],
        /// Number of message digest modules implemented.
        MDNUM OFFSET(12) NUMBITS(4) [],
    ],
    pub CHAVID_LS [
        /// Message digest module version.
        MDVID OFFSET(12) NUMBITS(4) [
            Lp256 = 0,
            Lp512 = 1,
        ],
    ],
    pub CAAMVID_MS [
        /// Major revision of the CAAM block.
        MAJ_REV OFFSET(8) NUMBITS(8) [],
    ],
    pub CCBVID [
        /// CAAM era, identifying the feature set of this silicon.
        CAAM_ERA OFFSET(24) NUMBITS(8) [],
    ],
];
