// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2024.

//! CAAM global controller.
//!
//! Capability discovery plus the manufacturing protection message register
//! (MPMR) fill/lock protocol used for device identity attestation. Every
//! operation is a bounded sequence of synchronous register accesses with no
//! waiting or interrupts; the enclosing driver serializes access to one
//! controller instance.

use log::debug;
use tock_registers::{LocalRegisterCopy, RegisterLongName};

use crate::io::CaamIo;
use crate::registers::*;

/// Platform security state the controller consults before exposing
/// manufacturing protection. Both predicates live outside the CAAM block
/// (SoC stepping identification and the OTP lifecycle state).
pub trait SecurityState {
    /// True on SoC steppings whose manufacturing protection block is known
    /// to be unusable.
    fn mp_unsupported(&self) -> bool;

    /// True once the device lifecycle has been closed.
    fn device_closed(&self) -> bool;
}

/// Errors returned by the controller HAL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    /// The destination buffer cannot hold the full MPMR contents. Carries
    /// the required size in bytes so the caller can retry with a larger
    /// buffer.
    BufferTooSmall(usize),
}

/// Strongest digest a CAAM hashing module supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaxHashAlgo {
    Sha256,
    Sha512,
}

/// Result of the manufacturing protection curve query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MpCurve {
    /// Manufacturing protection is not usable on this device. Reported for
    /// SoC steppings without a working MP block, and for closed devices
    /// whose curve was never programmed (a provisioning fault the caller
    /// must not mistake for a valid answer).
    NotSupported,
    /// Device is open and no curve has been programmed yet.
    Unprogrammed,
    /// Programmed curve identifier, 1 through 15.
    Curve(u8),
}

/// HAL for the global controller page of one CAAM instance.
pub struct CaamCtrl<'a, I: CaamIo, S: SecurityState> {
    io: &'a I,
    security: &'a S,
}

impl<'a, I: CaamIo, S: SecurityState> CaamCtrl<'a, I, S> {
    pub const fn new(io: &'a I, security: &'a S) -> CaamCtrl<'a, I, S> {
        CaamCtrl { io, security }
    }

    fn reg<R: RegisterLongName>(&self, offset: usize) -> LocalRegisterCopy<u32, R> {
        LocalRegisterCopy::new(self.io.read32(offset))
    }

    /// Number of job rings this controller implements.
    pub fn job_ring_count(&self) -> u8 {
        self.reg::<CHANUM_MS::Register>(CHANUM_MS)
            .read(CHANUM_MS::JRNUM) as u8
    }

    /// Strongest digest algorithm the hashing module supports, or `None`
    /// when no hashing module is present.
    pub fn hash_limit(&self) -> Option<MaxHashAlgo> {
        let chanum = self.reg::<CHANUM_LS::Register>(CHANUM_LS);
        if chanum.read(CHANUM_LS::MDNUM) == 0 {
            return None;
        }

        // Only the LP256 variant tops out at SHA-256; every other version
        // id of a present module is treated as the SHA-512 class.
        let chavid = self.reg::<CHAVID_LS::Register>(CHAVID_LS);
        match chavid.read_as_enum(CHAVID_LS::MDVID) {
            Some(CHAVID_LS::MDVID::Value::Lp256) => Some(MaxHashAlgo::Sha256),
            _ => Some(MaxHashAlgo::Sha512),
        }
    }

    /// Number of public key modules this controller implements.
    pub fn pk_engine_count(&self) -> u8 {
        self.reg::<CHANUM_LS::Register>(CHANUM_LS)
            .read(CHANUM_LS::PKNUM) as u8
    }

    /// Split key generation is only implemented from major revision 3 on.
    pub fn supports_split_key(&self) -> bool {
        self.reg::<CAAMVID_MS::Register>(CAAMVID_MS)
            .read(CAAMVID_MS::MAJ_REV)
            >= 3
    }

    /// CAAM era of this silicon.
    pub fn era(&self) -> u8 {
        self.reg::<CCBVID::Register>(CCBVID).read(CCBVID::CAAM_ERA) as u8
    }

    /// Manufacturing protection curve selector.
    ///
    /// Steppings without a usable MP block report
    /// [`MpCurve::NotSupported`] without any register access. On a closed
    /// device an unprogrammed curve field is a provisioning fault and also
    /// reports `NotSupported`; an open device reports the raw field, with
    /// 0 mapped to [`MpCurve::Unprogrammed`].
    pub fn mp_curve(&self) -> MpCurve {
        if self.security.mp_unsupported() {
            return MpCurve::NotSupported;
        }

        let curve = self.reg::<SCFGR::Register>(SCFGR).read(SCFGR::MPCURVE) as u8;
        match (curve, self.security.device_closed()) {
            (0, true) => MpCurve::NotSupported,
            (0, false) => MpCurve::Unprogrammed,
            (n, _) => MpCurve::Curve(n),
        }
    }

    /// Copy the full MPMR contents into `mpmr`, most significant byte of
    /// each register word first. Reading is always allowed, locked or not.
    ///
    /// Fails without touching the hardware when `mpmr` is shorter than
    /// [`MPMR_SIZE`]; the error carries the required size. On success the
    /// first [`MPMR_SIZE`] bytes of `mpmr` are valid and that length is
    /// returned.
    pub fn read_mpmr(&self, mpmr: &mut [u8]) -> Result<usize, ErrorCode> {
        if mpmr.len() < MPMR_SIZE {
            return Err(ErrorCode::BufferTooSmall(MPMR_SIZE));
        }

        // The MPMR byte lanes are reversed between the read and write
        // paths: reads hand back each word most significant byte first.
        for i in (0..MPMR_SIZE).step_by(4) {
            let val = self.io.read32(MPMR + i);
            mpmr[i] = (val >> 24) as u8;
            mpmr[i + 1] = (val >> 16) as u8;
            mpmr[i + 2] = (val >> 8) as u8;
            mpmr[i + 3] = val as u8;
        }

        Ok(MPMR_SIZE)
    }

    /// Fill the MPMR with `msg` and lock it until the next power cycle.
    ///
    /// The write path packs four message bytes per register word, least
    /// significant byte first. Messages longer than [`MPMR_SIZE`] are
    /// truncated to it; shorter messages are zero padded. Once the lock
    /// bit is set any further call returns without writing, so the first
    /// fill of a power session is the one that sticks.
    pub fn fill_mpmr(&self, msg: &[u8]) {
        if self.mpmr_locked() {
            debug!("caam: MPMR already locked, leaving contents in place");
            return;
        }

        let len = msg.len().min(MPMR_SIZE);
        let full = len - len % 4;
        let mut offset = MPMR;

        for word in msg[..full].chunks_exact(4) {
            let val = (word[0] as u32)
                | (word[1] as u32) << 8
                | (word[2] as u32) << 16
                | (word[3] as u32) << 24;
            self.io.write32(offset, val);
            offset += 4;
        }

        // 1 to 3 leftover message bytes share one more word, unused lanes
        // stay zero.
        if full < len {
            let mut val = 0;
            for (i, byte) in msg[full..len].iter().enumerate() {
                val |= (*byte as u32) << (i * 8);
            }
            self.io.write32(offset, val);
            offset += 4;
        }

        while offset < MPMR + MPMR_SIZE {
            self.io.write32(offset, 0);
            offset += 4;
        }

        // The lock is the only irreversible step and always comes last: a
        // fault before this point leaves the MPMR unlocked and the next
        // fill starts over from scratch.
        let scfgr = self.io.read32(SCFGR);
        self.io.write32(SCFGR, SCFGR::MPMRL::SET.modify(scfgr));
        debug!("caam: MPMR filled and locked for this power session");
    }

    fn mpmr_locked(&self) -> bool {
        self.reg::<SCFGR::Register>(SCFGR).is_set(SCFGR::MPMRL)
    }

    /// Secure memory base address configured in the job ring at
    /// `jr_offset`. The register holds only the upper address bits: secure
    /// memory sits on a 64KiB boundary, so the low 16 bits are implied
    /// zero.
    pub fn secure_memory_base(&self, jr_offset: usize) -> usize {
        (self.io.read32(jr_smvbar(jr_offset)) as usize) << 16
    }
}
