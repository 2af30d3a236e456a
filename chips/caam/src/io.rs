// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2024.

//! Register bus access for the CAAM controller page.

use core::ptr;

/// Raw 32-bit access into one controller register window.
///
/// `offset` is a byte offset from the controller base; the offsets and
/// field layouts live in [`crate::registers`]. Reads and writes are
/// synchronous and assumed to succeed at this level, matching the bus
/// behavior of the block.
///
/// Besides the memory-mapped implementation for real hardware this seam
/// lets tests drive the HAL against an in-memory register bank:
///
/// ```rust
/// use caam::io::CaamIo;
///
/// struct FakeBank {
///     words: core::cell::RefCell<[u32; 0x400]>,
/// }
///
/// impl CaamIo for FakeBank {
///     fn read32(&self, offset: usize) -> u32 {
///         self.words.borrow()[offset / 4]
///     }
///
///     fn write32(&self, offset: usize, value: u32) {
///         self.words.borrow_mut()[offset / 4] = value;
///     }
/// }
/// ```
pub trait CaamIo {
    /// Read the 32-bit register at `offset` bytes from the controller base.
    fn read32(&self, offset: usize) -> u32;

    /// Write the 32-bit register at `offset` bytes from the controller base.
    fn write32(&self, offset: usize, value: u32);
}

/// Memory-mapped implementation of [`CaamIo`] for real hardware.
pub struct CaamMmio {
    base: *mut u32,
}

impl CaamMmio {
    /// # Safety
    ///
    /// `base` must be the virtual address of a mapped CAAM controller
    /// register page and the mapping must outlive this value. The caller
    /// serializes all access to one controller instance; this type
    /// performs no locking.
    pub const unsafe fn new(base: *mut u32) -> CaamMmio {
        CaamMmio { base }
    }
}

impl CaamIo for CaamMmio {
    fn read32(&self, offset: usize) -> u32 {
        unsafe { ptr::read_volatile(self.base.cast::<u8>().add(offset).cast::<u32>()) }
    }

    fn write32(&self, offset: usize, value: u32) {
        unsafe { ptr::write_volatile(self.base.cast::<u8>().add(offset).cast::<u32>(), value) }
    }
}
