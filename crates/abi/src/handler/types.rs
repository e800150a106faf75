// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::ptr::null;

use crate::handler::TL_UNLOCK;

/// Estimated cost of an access path, split into I/O and CPU
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IoAndCpuCostFFI {
	pub io: f64,
	pub cpu: f64,
}

impl IoAndCpuCostFFI {
	/// Estimated rows per index block when the caller does not know the block count
	const KEYS_PER_BLOCK: f64 = 64.0;

	pub const fn new(io: f64, cpu: f64) -> Self {
		Self {
			io,
			cpu,
		}
	}

	/// Default cost of an index-only read of `rows` keys over `ranges` ranges
	///
	/// `blocks` is the number of index blocks touched, or 0 if unknown. The estimate grows
	/// monotonically with both `ranges` and `rows`.
	pub fn keyread(ranges: u64, rows: u64, blocks: u64) -> Self {
		let io = match blocks {
			0 => ranges as f64 + rows as f64 / Self::KEYS_PER_BLOCK,
			blocks => blocks as f64,
		};
		Self::new(io, rows as f64 + ranges as f64)
	}

	/// Combined cost
	pub fn total(&self) -> f64 {
		self.io + self.cpu
	}
}

/// One end of a key range used by `records_in_range`
///
/// A null `*const KeyRangeFFI` stands for an unbounded end.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct KeyRangeFFI {
	/// Pointer to the key image
	pub key: *const u8,
	/// Length of the key image
	pub length: u32,
	/// Which leading key parts are present
	pub keypart_map: u64,
	/// Read function (`HA_READ_*`) describing the bound
	pub flag: u32,
}

impl KeyRangeFFI {
	/// Create a range bound from a key slice
	///
	/// Key images longer than `u32::MAX` bytes are cut to their first `u32::MAX` bytes.
	pub fn from_slice(key: &[u8], keypart_map: u64, flag: u32) -> Self {
		Self {
			key: key.as_ptr(),
			length: key_length(key.len()),
			keypart_map,
			flag,
		}
	}

	/// Get the key as a slice
	///
	/// # Safety
	/// Caller must ensure `key` is valid for `length` bytes.
	pub unsafe fn key(&self) -> &[u8] {
		if self.key.is_null() || self.length == 0 {
			&[]
		} else {
			// SAFETY: Caller must ensure pointer validity and lifetime
			unsafe { core::slice::from_raw_parts(self.key, self.length as usize) }
		}
	}
}

fn key_length(len: usize) -> u32 {
	u32::try_from(len).unwrap_or(u32::MAX)
}

/// Pages touched by a key range, used as a hint by `records_in_range`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRangeFFI {
	pub first_page: u64,
	pub last_page: u64,
}

/// A table lock requested through `store_lock`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockRequestFFI {
	/// Foreign-state handle of the handler that owns the lock
	pub owner: u64,
	/// Requested strength (`TL_*`)
	pub lock_type: i32,
}

impl LockRequestFFI {
	pub const fn empty() -> Self {
		Self {
			owner: 0,
			lock_type: TL_UNLOCK,
		}
	}
}

impl Default for LockRequestFFI {
	fn default() -> Self {
		Self::empty()
	}
}

/// Lock request list handed to `store_lock`
///
/// `entries` has room for `capacity` requests of which the first `len` are filled. The engine
/// appends its own requests and returns the new length.
#[repr(C)]
#[derive(Debug)]
pub struct LockListFFI {
	pub entries: *mut LockRequestFFI,
	pub len: usize,
	pub capacity: usize,
}

impl LockListFFI {
	pub const fn empty() -> Self {
		Self {
			entries: core::ptr::null_mut(),
			len: 0,
			capacity: 0,
		}
	}

	/// Append a request if there is room, returning the new length
	///
	/// # Safety
	/// Caller must ensure `entries` is valid for `capacity` elements.
	pub unsafe fn push(&mut self, request: LockRequestFFI) -> usize {
		if self.len < self.capacity && !self.entries.is_null() {
			// SAFETY: len < capacity, caller guarantees the allocation
			unsafe { self.entries.add(self.len).write(request) };
			self.len += 1;
		}
		self.len
	}
}

/// Engine descriptor exported by a storage engine library
#[repr(C)]
#[derive(Clone, Copy)]
pub struct EngineDescriptorFFI {
	/// API version the engine was built against
	pub api_version: u32,
	/// Engine name (NUL-terminated, static)
	pub name: *const core::ffi::c_char,
	/// Host type flags requested by the engine
	pub flags: u32,
	/// Handler vtable
	pub vtable: crate::handler::HandlerVTableFFI,
}

impl EngineDescriptorFFI {
	pub const fn empty() -> Self {
		Self {
			api_version: 0,
			name: null(),
			flags: 0,
			vtable: crate::handler::HandlerVTableFFI::empty(),
		}
	}
}

// SAFETY: the descriptor only holds a pointer to a static string and function pointers
unsafe impl Send for EngineDescriptorFFI {}
unsafe impl Sync for EngineDescriptorFFI {}
