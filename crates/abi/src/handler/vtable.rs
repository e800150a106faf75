// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::ffi::c_char;

use crate::{
	bridge::HandlerBridgeFFI,
	constants::CURRENT_API_VERSION,
	handler::{IoAndCpuCostFFI, KeyRangeFFI, LockListFFI, PageRangeFFI},
	host::{AlterInfoFFI, ArenaFFI, CreateInfoFFI, HostTypeFFI, SessionFFI, TableFFI, TableShareFFI},
};

// ==================== Lifecycle ====================

/// Initialize the engine side of a freshly placed handler
///
/// # Parameters
/// - `bridge`: The handler header; the engine stores its state handle here
/// - `host_type`: The registered engine type
/// - `arena`: Arena owning the handler storage
/// - `share`: Schema of the table this handler serves
///
/// # Returns
/// - 0 on success, a host status code otherwise. On failure `destruct` is not called.
pub type ConstructFnFFI = extern "C" fn(
	bridge: *mut HandlerBridgeFFI,
	host_type: *const HostTypeFFI,
	arena: *mut ArenaFFI,
	share: *const TableShareFFI,
) -> i32;

/// Release the engine side of a handler
///
/// # Safety
/// - Called exactly once per successful `construct`
/// - The state handle must not be used afterwards
pub type DestructFnFFI = extern "C" fn(bridge: *mut HandlerBridgeFFI);

// ==================== Capability Queries ====================

/// Display name of the index kind, NUL-terminated. Null means "no name".
pub type IndexTypeFnFFI = extern "C" fn(bridge: *const HandlerBridgeFFI, index: u32) -> *const c_char;

/// Table-level capability bits (`HA_*` table flags)
pub type TableFlagsFnFFI = extern "C" fn(bridge: *const HandlerBridgeFFI) -> u64;

/// Capability bits of one index part (`HA_READ_*` index flags)
pub type IndexFlagsFnFFI =
	extern "C" fn(bridge: *const HandlerBridgeFFI, index: u32, part: u32, all_parts: bool) -> u64;

/// One of the `max_supported_*` limits
pub type LimitFnFFI = extern "C" fn(bridge: *const HandlerBridgeFFI) -> u32;

// ==================== Cost Estimation ====================

/// Cost of a full table scan
pub type ScanTimeFnFFI = extern "C" fn(bridge: *mut HandlerBridgeFFI) -> IoAndCpuCostFFI;

/// Cost of reading `rows` keys over `ranges` ranges of `index`, touching `blocks` blocks (0 if
/// unknown)
pub type KeyreadTimeFnFFI = extern "C" fn(
	bridge: *mut HandlerBridgeFFI,
	index: u32,
	ranges: u64,
	rows: u64,
	blocks: u64,
) -> IoAndCpuCostFFI;

/// Cost of fetching `rows` rows through `rnd_pos`
pub type RndPosTimeFnFFI = extern "C" fn(bridge: *mut HandlerBridgeFFI, rows: u64) -> IoAndCpuCostFFI;

// ==================== Table Lifecycle ====================

/// Open the table stored under `name`
pub type OpenFnFFI =
	extern "C" fn(bridge: *mut HandlerBridgeFFI, name: *const c_char, mode: i32, test_if_locked: u32) -> i32;

/// Slot taking only the handler: `close`, `rnd_end`, `delete_all_rows`
pub type StatusFnFFI = extern "C" fn(bridge: *mut HandlerBridgeFFI) -> i32;

/// Slot taking a table name: `delete_table`
pub type NameFnFFI = extern "C" fn(bridge: *mut HandlerBridgeFFI, name: *const c_char) -> i32;

/// Create the table `name` from the opened `table` definition
pub type CreateFnFFI = extern "C" fn(
	bridge: *mut HandlerBridgeFFI,
	name: *const c_char,
	table: *const TableFFI,
	create_info: *mut CreateInfoFFI,
) -> i32;

// ==================== Row Operations ====================

/// Slot reading a host-formatted row: `write_row`, `delete_row`
pub type RowFnFFI = extern "C" fn(bridge: *mut HandlerBridgeFFI, buf: *const u8, buf_len: usize) -> i32;

/// Replace `old` with `new`
pub type UpdateRowFnFFI = extern "C" fn(
	bridge: *mut HandlerBridgeFFI,
	old: *const u8,
	old_len: usize,
	new: *const u8,
	new_len: usize,
) -> i32;

/// Slot filling a host-formatted row: `index_next`, `index_prev`, `index_first`, `index_last`,
/// `rnd_next`
pub type ReadFnFFI = extern "C" fn(bridge: *mut HandlerBridgeFFI, buf: *mut u8, buf_len: usize) -> i32;

// ==================== Index Navigation ====================

/// Position the index cursor on `key` and fill `buf` with the found row
///
/// # Parameters
/// - `keypart_map`: Bit `n` set means key part `n` participates in the lookup
/// - `find_flag`: One of the `HA_READ_*` read functions
pub type IndexReadMapFnFFI = extern "C" fn(
	bridge: *mut HandlerBridgeFFI,
	buf: *mut u8,
	buf_len: usize,
	key: *const u8,
	key_len: usize,
	keypart_map: u64,
	find_flag: u32,
) -> i32;

// ==================== Table Scan ====================

/// Prepare a table scan. `scan` is false when only `rnd_pos` will follow.
pub type RndInitFnFFI = extern "C" fn(bridge: *mut HandlerBridgeFFI, scan: bool) -> i32;

/// Fill `buf` with the row at a position captured by `position`
pub type RndPosFnFFI = extern "C" fn(
	bridge: *mut HandlerBridgeFFI,
	buf: *mut u8,
	buf_len: usize,
	pos: *const u8,
	pos_len: usize,
) -> i32;

/// Store the position of `record` (the row last read) in the header's `ref_buf`
pub type PositionFnFFI = extern "C" fn(bridge: *mut HandlerBridgeFFI, record: *const u8, record_len: usize);

// ==================== Stats / Maintenance ====================

/// Slot taking a flag word: `info` (`HA_STATUS_*`), `extra` (`HA_EXTRA_*`)
pub type FlagFnFFI = extern "C" fn(bridge: *mut HandlerBridgeFFI, flag: u32) -> i32;

// ==================== Locking ====================

/// Acquire (`F_RDLCK` / `F_WRLCK`) or release (`F_UNLCK`) the table lock for `session`
pub type ExternalLockFnFFI = extern "C" fn(bridge: *mut HandlerBridgeFFI, session: *mut SessionFFI, lock_kind: i32) -> i32;

/// Append the locks the engine wants to `to` and return the new list length
pub type StoreLockFnFFI = extern "C" fn(
	bridge: *mut HandlerBridgeFFI,
	session: *mut SessionFFI,
	to: *mut LockListFFI,
	lock_type: i32,
) -> usize;

// ==================== Range Estimation ====================

/// Approximate number of rows between `min` and `max` in `index` (null = unbounded)
pub type RecordsInRangeFnFFI = extern "C" fn(
	bridge: *mut HandlerBridgeFFI,
	index: u32,
	min: *const KeyRangeFFI,
	max: *const KeyRangeFFI,
	pages: *mut PageRangeFFI,
) -> u64;

// ==================== DDL ====================

/// Whether an ALTER TABLE can avoid a rebuild (`HA_ALTER_*` verdict)
pub type InplaceAlterFnFFI =
	extern "C" fn(bridge: *mut HandlerBridgeFFI, altered: *const TableFFI, alter_info: *mut AlterInfoFFI) -> u32;

/// Virtual function table for bridged storage handlers
///
/// The slot order below is the ABI: every built engine is bound to it. Slots are only ever
/// appended, and capabilities introduced later are gated on `api_version` / `flags`.
///
/// `construct`, `destruct`, `open`, `close`, `rnd_init`, `rnd_end` and `rnd_next` are mandatory; a
/// host refuses a vtable where any of them is null. Every other null slot falls back to the host's
/// default behaviour.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct HandlerVTableFFI {
	/// API version the vtable was built against
	pub api_version: u32,
	/// Contract capability bits (`CONTRACT_*`)
	pub flags: u32,

	pub construct: Option<ConstructFnFFI>,
	pub destruct: Option<DestructFnFFI>,
	pub index_type: Option<IndexTypeFnFFI>,
	pub table_flags: Option<TableFlagsFnFFI>,
	pub index_flags: Option<IndexFlagsFnFFI>,
	pub max_supported_record_length: Option<LimitFnFFI>,
	pub max_supported_keys: Option<LimitFnFFI>,
	pub max_supported_key_parts: Option<LimitFnFFI>,
	pub max_supported_key_length: Option<LimitFnFFI>,
	pub scan_time: Option<ScanTimeFnFFI>,
	pub keyread_time: Option<KeyreadTimeFnFFI>,
	pub rnd_pos_time: Option<RndPosTimeFnFFI>,
	pub open: Option<OpenFnFFI>,
	pub close: Option<StatusFnFFI>,
	pub write_row: Option<RowFnFFI>,
	pub update_row: Option<UpdateRowFnFFI>,
	pub delete_row: Option<RowFnFFI>,
	pub index_read_map: Option<IndexReadMapFnFFI>,
	pub index_next: Option<ReadFnFFI>,
	pub index_prev: Option<ReadFnFFI>,
	pub index_first: Option<ReadFnFFI>,
	pub index_last: Option<ReadFnFFI>,
	pub rnd_init: Option<RndInitFnFFI>,
	pub rnd_end: Option<StatusFnFFI>,
	pub rnd_next: Option<ReadFnFFI>,
	pub rnd_pos: Option<RndPosFnFFI>,
	pub position: Option<PositionFnFFI>,
	pub info: Option<FlagFnFFI>,
	pub extra: Option<FlagFnFFI>,
	pub external_lock: Option<ExternalLockFnFFI>,
	pub delete_all_rows: Option<StatusFnFFI>,
	pub records_in_range: Option<RecordsInRangeFnFFI>,
	pub delete_table: Option<NameFnFFI>,
	pub create: Option<CreateFnFFI>,
	pub check_if_supported_inplace_alter: Option<InplaceAlterFnFFI>,
	pub store_lock: Option<StoreLockFnFFI>,
}

impl HandlerVTableFFI {
	/// A vtable with every slot null, stamped with the current API version
	pub const fn empty() -> Self {
		Self {
			api_version: CURRENT_API_VERSION,
			flags: 0,
			construct: None,
			destruct: None,
			index_type: None,
			table_flags: None,
			index_flags: None,
			max_supported_record_length: None,
			max_supported_keys: None,
			max_supported_key_parts: None,
			max_supported_key_length: None,
			scan_time: None,
			keyread_time: None,
			rnd_pos_time: None,
			open: None,
			close: None,
			write_row: None,
			update_row: None,
			delete_row: None,
			index_read_map: None,
			index_next: None,
			index_prev: None,
			index_first: None,
			index_last: None,
			rnd_init: None,
			rnd_end: None,
			rnd_next: None,
			rnd_pos: None,
			position: None,
			info: None,
			extra: None,
			external_lock: None,
			delete_all_rows: None,
			records_in_range: None,
			delete_table: None,
			create: None,
			check_if_supported_inplace_alter: None,
			store_lock: None,
		}
	}
}

impl Default for HandlerVTableFFI {
	fn default() -> Self {
		Self::empty()
	}
}

#[cfg(test)]
mod tests {
	use core::mem::{offset_of, size_of};

	use super::*;

	#[test]
	fn test_slots_are_pointer_sized() {
		// Option<extern "C" fn> uses the null niche, so every slot is exactly one pointer
		assert_eq!(size_of::<Option<OpenFnFFI>>(), size_of::<usize>());
		assert_eq!(size_of::<HandlerVTableFFI>(), 8 + 36 * size_of::<usize>());
	}

	#[test]
	fn test_slot_order_is_stable() {
		let slot = size_of::<usize>();
		assert_eq!(offset_of!(HandlerVTableFFI, construct), 8);
		assert_eq!(offset_of!(HandlerVTableFFI, destruct), 8 + slot);
		assert_eq!(offset_of!(HandlerVTableFFI, open), 8 + 12 * slot);
		assert_eq!(offset_of!(HandlerVTableFFI, rnd_init), 8 + 22 * slot);
		assert_eq!(offset_of!(HandlerVTableFFI, store_lock), 8 + 35 * slot);
	}

	#[test]
	fn test_empty_has_current_version() {
		let vt = HandlerVTableFFI::empty();
		assert_eq!(vt.api_version, CURRENT_API_VERSION);
		assert!(vt.construct.is_none());
		assert!(vt.store_lock.is_none());
	}
}
