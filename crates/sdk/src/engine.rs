// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The engine trait

use std::{ffi::CStr, marker::PhantomData};

use storebridge_abi::{
	bridge::StatisticsFFI,
	constants::{
		DEFAULT_RECORDS_IN_RANGE, DEFAULT_REF_LENGTH, HA_MAX_REC_LENGTH, MAX_DATA_LENGTH_FOR_KEY, MAX_REF_PARTS,
	},
	handler::{
		HA_ALTER_INPLACE_NOT_SUPPORTED, IoAndCpuCostFFI, KeyRangeFFI, LockListFFI, LockRequestFFI, PageRangeFFI,
	},
	host::{AlterInfoFFI, ArenaFFI, CreateInfoFFI, HostTypeFFI, SessionFFI, TableFFI, TableShareFFI},
};

use crate::error::{StorageError, StorageResult};

/// Host objects handed to [`StorageEngine::new`]
///
/// All of them are opaque; they stay valid for the lifetime of the handler.
#[derive(Debug, Clone, Copy)]
pub struct ConstructContext {
	pub(crate) host_type: *const HostTypeFFI,
	pub(crate) share: *const TableShareFFI,
	pub(crate) arena: *mut ArenaFFI,
}

impl ConstructContext {
	pub fn host_type(&self) -> *const HostTypeFFI {
		self.host_type
	}

	pub fn share(&self) -> *const TableShareFFI {
		self.share
	}

	pub fn arena(&self) -> *mut ArenaFFI {
		self.arena
	}
}

/// One bound of a key range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRange<'a> {
	pub key: &'a [u8],
	pub keypart_map: u64,
	pub flag: u32,
}

impl<'a> KeyRange<'a> {
	/// # Safety
	/// `range.key` must be valid for `range.length` bytes for `'a`.
	pub(crate) unsafe fn from_ffi(range: &'a KeyRangeFFI) -> Self {
		Self {
			key: unsafe { range.key() },
			keypart_map: range.keypart_map,
			flag: range.flag,
		}
	}
}

/// The lock list passed to [`StorageEngine::store_lock`]
///
/// Requests pushed here are owned by the calling handler.
pub struct LockList<'a> {
	list: *mut LockListFFI,
	owner: u64,
	_marker: PhantomData<&'a mut LockListFFI>,
}

impl<'a> LockList<'a> {
	/// # Safety
	/// `list` must be null or point at a list whose `entries` are valid for `capacity` elements.
	pub(crate) unsafe fn new(list: *mut LockListFFI, owner: u64) -> Self {
		Self {
			list,
			owner,
			_marker: PhantomData,
		}
	}

	/// Request a lock of `lock_type`, returning false when the list is full
	pub fn push(&mut self, lock_type: i32) -> bool {
		// SAFETY: guaranteed by the constructor
		let Some(list) = (unsafe { self.list.as_mut() }) else {
			return false;
		};
		let before = list.len;
		let after = unsafe {
			list.push(LockRequestFFI {
				owner: self.owner,
				lock_type,
			})
		};
		after > before
	}

	pub fn len(&self) -> usize {
		unsafe { self.list.as_ref() }.map_or(0, |list| list.len)
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// A storage engine written in Rust
///
/// One value is created per handler by [`StorageEngine::new`] and dropped when the host destroys
/// the handler. Only `open`, `close`, `rnd_init` and `rnd_next` are required; every other method
/// behaves like the host's own default.
///
/// Methods never see the handler header directly. Row buffers, positions and statistics are
/// passed in as slices and references into it.
pub trait StorageEngine: Sized + Send + 'static {
	/// Engine name announced to the host
	const NAME: &'static CStr;

	/// Bytes of `ref_buf` used by `position` / `rnd_pos`
	const REF_LENGTH: u32 = DEFAULT_REF_LENGTH;

	/// Vtable capability flags
	const FLAGS: u32 = 0;

	/// Flags for the host type registered for this engine
	const HOST_FLAGS: u32 = 0;

	fn new(ctx: &ConstructContext) -> StorageResult<Self>;

	// ==================== Capabilities ====================

	fn index_type(&self, _index: u32) -> &'static CStr {
		c""
	}

	fn table_flags(&self) -> u64 {
		0
	}

	fn index_flags(&self, _index: u32, _part: u32, _all_parts: bool) -> u64 {
		0
	}

	fn max_supported_record_length(&self) -> u32 {
		HA_MAX_REC_LENGTH
	}

	fn max_supported_keys(&self) -> u32 {
		0
	}

	fn max_supported_key_parts(&self) -> u32 {
		MAX_REF_PARTS
	}

	fn max_supported_key_length(&self) -> u32 {
		MAX_DATA_LENGTH_FOR_KEY
	}

	// ==================== Costs ====================

	fn scan_time(&mut self, stats: &StatisticsFFI) -> IoAndCpuCostFFI {
		stats.scan_cost()
	}

	fn keyread_time(&mut self, _index: u32, ranges: u64, rows: u64, blocks: u64) -> IoAndCpuCostFFI {
		IoAndCpuCostFFI::keyread(ranges, rows, blocks)
	}

	fn rnd_pos_time(&mut self, stats: &StatisticsFFI, rows: u64) -> IoAndCpuCostFFI {
		stats.rnd_pos_cost(rows)
	}

	// ==================== Table Lifecycle ====================

	fn open(&mut self, name: &CStr, mode: i32, test_if_locked: u32) -> StorageResult;

	fn close(&mut self) -> StorageResult;

	fn create(&mut self, _name: &CStr, _table: *const TableFFI, _create_info: *mut CreateInfoFFI) -> StorageResult {
		Err(StorageError::WrongCommand)
	}

	fn delete_table(&mut self, _name: &CStr) -> StorageResult {
		Ok(())
	}

	// ==================== Rows ====================

	fn write_row(&mut self, _row: &[u8]) -> StorageResult {
		Err(StorageError::WrongCommand)
	}

	fn update_row(&mut self, _old: &[u8], _new: &[u8]) -> StorageResult {
		Err(StorageError::WrongCommand)
	}

	fn delete_row(&mut self, _row: &[u8]) -> StorageResult {
		Err(StorageError::WrongCommand)
	}

	fn delete_all_rows(&mut self) -> StorageResult {
		Err(StorageError::WrongCommand)
	}

	// ==================== Index ====================

	fn index_read_map(&mut self, _buf: &mut [u8], _key: &[u8], _keypart_map: u64, _find_flag: u32) -> StorageResult {
		Err(StorageError::WrongCommand)
	}

	fn index_next(&mut self, _buf: &mut [u8]) -> StorageResult {
		Err(StorageError::WrongCommand)
	}

	fn index_prev(&mut self, _buf: &mut [u8]) -> StorageResult {
		Err(StorageError::WrongCommand)
	}

	fn index_first(&mut self, _buf: &mut [u8]) -> StorageResult {
		Err(StorageError::WrongCommand)
	}

	fn index_last(&mut self, _buf: &mut [u8]) -> StorageResult {
		Err(StorageError::WrongCommand)
	}

	// ==================== Scan ====================

	fn rnd_init(&mut self, scan: bool) -> StorageResult;

	/// Fill `buf` with the next row, `Err(StorageError::EndOfFile)` when the scan is done
	fn rnd_next(&mut self, buf: &mut [u8]) -> StorageResult;

	fn rnd_end(&mut self) -> StorageResult {
		Ok(())
	}

	fn rnd_pos(&mut self, _buf: &mut [u8], _pos: &[u8]) -> StorageResult {
		Err(StorageError::WrongCommand)
	}

	/// Write the position of `record` into `pos`, which is `REF_LENGTH` bytes long
	fn position(&mut self, _record: &[u8], _pos: &mut [u8]) {}

	// ==================== Stats / Maintenance ====================

	fn info(&mut self, _flag: u32, _stats: &mut StatisticsFFI) -> StorageResult {
		Ok(())
	}

	fn extra(&mut self, _operation: u32) -> StorageResult {
		Ok(())
	}

	fn records_in_range(
		&mut self,
		_index: u32,
		_min: Option<KeyRange<'_>>,
		_max: Option<KeyRange<'_>>,
		_pages: &mut PageRangeFFI,
	) -> u64 {
		DEFAULT_RECORDS_IN_RANGE
	}

	// ==================== Locking ====================

	fn external_lock(&mut self, _session: *mut SessionFFI, _lock_kind: i32) -> StorageResult {
		Ok(())
	}

	fn store_lock(&mut self, _session: *mut SessionFFI, _locks: &mut LockList<'_>, _lock_type: i32) {}

	// ==================== DDL ====================

	fn check_if_supported_inplace_alter(&mut self, _altered: *const TableFFI, _alter_info: *mut AlterInfoFFI) -> u32 {
		HA_ALTER_INPLACE_NOT_SUPPORTED
	}
}
