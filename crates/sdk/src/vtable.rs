// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! `extern "C"` wrappers that expose a [`StorageEngine`] through the handler vtable
//!
//! Every wrapper resolves the engine instance from the header's foreign-state handle, converts the
//! raw arguments into slices and references, and turns the engine's result into a status code.
//! A panic inside the engine is logged and aborts the process: unwinding across the C boundary is
//! undefined behaviour.

use std::{
	any::Any,
	ffi::{CStr, c_char},
	panic::{AssertUnwindSafe, catch_unwind},
	process::abort,
	slice,
};

use storebridge_abi::{
	bridge::HandlerBridgeFFI,
	constants::{
		CURRENT_API_VERSION, DEFAULT_RECORDS_IN_RANGE, HA_ERR_INTERNAL_ERROR, HA_MAX_REC_LENGTH, HA_OK,
		MAX_DATA_LENGTH_FOR_KEY, MAX_REF_LENGTH, MAX_REF_PARTS, TYPE_ID_LENGTH,
	},
	handler::{
		EngineDescriptorFFI, HA_ALTER_INPLACE_NOT_SUPPORTED, HandlerVTableFFI, IoAndCpuCostFFI, KeyRangeFFI,
		LockListFFI, PageRangeFFI,
	},
	host::{AlterInfoFFI, ArenaFFI, CreateInfoFFI, HostTypeFFI, SessionFFI, TableFFI, TableShareFFI},
};
use tracing::{debug, error, warn};

use crate::{
	engine::{ConstructContext, KeyRange, LockList, StorageEngine},
	error::{StorageResult, status},
	pool,
	tag::type_tag,
};

/// Build the vtable for engine `E`, every slot populated
pub fn build_vtable<E: StorageEngine>() -> HandlerVTableFFI {
	HandlerVTableFFI {
		api_version: CURRENT_API_VERSION,
		flags: E::FLAGS,
		construct: Some(construct::<E>),
		destruct: Some(destruct::<E>),
		index_type: Some(index_type::<E>),
		table_flags: Some(table_flags::<E>),
		index_flags: Some(index_flags::<E>),
		max_supported_record_length: Some(max_supported_record_length::<E>),
		max_supported_keys: Some(max_supported_keys::<E>),
		max_supported_key_parts: Some(max_supported_key_parts::<E>),
		max_supported_key_length: Some(max_supported_key_length::<E>),
		scan_time: Some(scan_time::<E>),
		keyread_time: Some(keyread_time::<E>),
		rnd_pos_time: Some(rnd_pos_time::<E>),
		open: Some(open::<E>),
		close: Some(close::<E>),
		write_row: Some(write_row::<E>),
		update_row: Some(update_row::<E>),
		delete_row: Some(delete_row::<E>),
		index_read_map: Some(index_read_map::<E>),
		index_next: Some(index_next::<E>),
		index_prev: Some(index_prev::<E>),
		index_first: Some(index_first::<E>),
		index_last: Some(index_last::<E>),
		rnd_init: Some(rnd_init::<E>),
		rnd_end: Some(rnd_end::<E>),
		rnd_next: Some(rnd_next::<E>),
		rnd_pos: Some(rnd_pos::<E>),
		position: Some(position::<E>),
		info: Some(info::<E>),
		extra: Some(extra::<E>),
		external_lock: Some(external_lock::<E>),
		delete_all_rows: Some(delete_all_rows::<E>),
		records_in_range: Some(records_in_range::<E>),
		delete_table: Some(delete_table::<E>),
		create: Some(create::<E>),
		check_if_supported_inplace_alter: Some(check_if_supported_inplace_alter::<E>),
		store_lock: Some(store_lock::<E>),
	}
}

/// The descriptor exported for engine `E`
pub fn descriptor<E: StorageEngine>() -> EngineDescriptorFFI {
	EngineDescriptorFFI {
		api_version: CURRENT_API_VERSION,
		name: E::NAME.as_ptr(),
		flags: E::HOST_FLAGS,
		vtable: build_vtable::<E>(),
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
	if let Some(message) = payload.downcast_ref::<&str>() {
		message
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message
	} else {
		"<non-string panic payload>"
	}
}

fn guarded<R>(slot: &'static str, f: impl FnOnce() -> R) -> R {
	match catch_unwind(AssertUnwindSafe(f)) {
		Ok(result) => result,
		Err(payload) => {
			error!(slot, panic = panic_message(payload.as_ref()), "panic in storage engine - aborting");
			abort();
		}
	}
}

/// Run `f` on the engine behind `handle`, or return `missing` if there is none
fn dispatch<E: StorageEngine, R>(
	slot: &'static str,
	handle: u64,
	type_id: [u8; TYPE_ID_LENGTH],
	missing: R,
	f: impl FnOnce(&mut E) -> R,
) -> R {
	guarded(slot, || {
		debug_assert_eq!(type_id, type_tag::<E>(), "{slot} called on a handler of another engine");
		match pool::with::<E, R>(handle, f) {
			Some(result) => result,
			None => {
				error!(slot, handle, "no engine instance behind handle");
				missing
			}
		}
	})
}

unsafe fn bytes<'a>(ptr: *const u8, len: usize) -> &'a [u8] {
	if ptr.is_null() {
		&[]
	} else {
		unsafe { slice::from_raw_parts(ptr, len) }
	}
}

unsafe fn bytes_mut<'a>(ptr: *mut u8, len: usize) -> &'a mut [u8] {
	if ptr.is_null() {
		&mut []
	} else {
		unsafe { slice::from_raw_parts_mut(ptr, len) }
	}
}

unsafe fn name<'a>(ptr: *const c_char) -> &'a CStr {
	if ptr.is_null() {
		c""
	} else {
		unsafe { CStr::from_ptr(ptr) }
	}
}

fn run<E: StorageEngine>(
	slot: &'static str,
	bridge: *mut HandlerBridgeFFI,
	f: impl FnOnce(&mut E) -> StorageResult,
) -> i32 {
	let Some(header) = (unsafe { bridge.as_ref() }) else {
		return HA_ERR_INTERNAL_ERROR;
	};
	dispatch::<E, _>(slot, header.state, header.type_id, HA_ERR_INTERNAL_ERROR, |engine| status(f(engine)))
}

fn read<E: StorageEngine>(
	slot: &'static str,
	bridge: *mut HandlerBridgeFFI,
	buf: *mut u8,
	buf_len: usize,
	f: fn(&mut E, &mut [u8]) -> StorageResult,
) -> i32 {
	let buf = unsafe { bytes_mut(buf, buf_len) };
	run::<E>(slot, bridge, |engine| f(engine, buf))
}

fn limit<E: StorageEngine>(
	slot: &'static str,
	bridge: *const HandlerBridgeFFI,
	default: u32,
	f: fn(&E) -> u32,
) -> u32 {
	let Some(header) = (unsafe { bridge.as_ref() }) else {
		return default;
	};
	dispatch::<E, _>(slot, header.state, header.type_id, default, |engine| f(engine))
}

// ==================== Lifecycle ====================

extern "C" fn construct<E: StorageEngine>(
	bridge: *mut HandlerBridgeFFI,
	host_type: *const HostTypeFFI,
	arena: *mut ArenaFFI,
	share: *const TableShareFFI,
) -> i32 {
	let Some(header) = (unsafe { bridge.as_mut() }) else {
		return HA_ERR_INTERNAL_ERROR;
	};
	let ctx = ConstructContext {
		host_type,
		share,
		arena,
	};

	guarded("construct", || match E::new(&ctx) {
		Ok(engine) => {
			header.state = pool::insert(engine);
			header.type_id = type_tag::<E>();
			header.ref_length = E::REF_LENGTH.min(MAX_REF_LENGTH as u32);
			debug!(engine = ?E::NAME, handle = header.state, "engine instance created");
			HA_OK
		}
		Err(err) => {
			warn!(engine = ?E::NAME, %err, "engine construction failed");
			err.code()
		}
	})
}

extern "C" fn destruct<E: StorageEngine>(bridge: *mut HandlerBridgeFFI) {
	let Some(header) = (unsafe { bridge.as_mut() }) else {
		return;
	};
	guarded("destruct", || {
		if pool::remove(header.state) {
			debug!(engine = ?E::NAME, handle = header.state, "engine instance dropped");
		} else {
			warn!(engine = ?E::NAME, handle = header.state, "destruct without an engine instance");
		}
		header.state = 0;
	})
}

// ==================== Capabilities ====================

extern "C" fn index_type<E: StorageEngine>(bridge: *const HandlerBridgeFFI, index: u32) -> *const c_char {
	let Some(header) = (unsafe { bridge.as_ref() }) else {
		return c"".as_ptr();
	};
	dispatch::<E, _>("index_type", header.state, header.type_id, c"", |engine| engine.index_type(index)).as_ptr()
}

extern "C" fn table_flags<E: StorageEngine>(bridge: *const HandlerBridgeFFI) -> u64 {
	let Some(header) = (unsafe { bridge.as_ref() }) else {
		return 0;
	};
	dispatch::<E, _>("table_flags", header.state, header.type_id, 0, |engine| engine.table_flags())
}

extern "C" fn index_flags<E: StorageEngine>(
	bridge: *const HandlerBridgeFFI,
	index: u32,
	part: u32,
	all_parts: bool,
) -> u64 {
	let Some(header) = (unsafe { bridge.as_ref() }) else {
		return 0;
	};
	dispatch::<E, _>("index_flags", header.state, header.type_id, 0, |engine| {
		engine.index_flags(index, part, all_parts)
	})
}

extern "C" fn max_supported_record_length<E: StorageEngine>(bridge: *const HandlerBridgeFFI) -> u32 {
	limit::<E>("max_supported_record_length", bridge, HA_MAX_REC_LENGTH, E::max_supported_record_length)
}

extern "C" fn max_supported_keys<E: StorageEngine>(bridge: *const HandlerBridgeFFI) -> u32 {
	limit::<E>("max_supported_keys", bridge, 0, E::max_supported_keys)
}

extern "C" fn max_supported_key_parts<E: StorageEngine>(bridge: *const HandlerBridgeFFI) -> u32 {
	limit::<E>("max_supported_key_parts", bridge, MAX_REF_PARTS, E::max_supported_key_parts)
}

extern "C" fn max_supported_key_length<E: StorageEngine>(bridge: *const HandlerBridgeFFI) -> u32 {
	limit::<E>("max_supported_key_length", bridge, MAX_DATA_LENGTH_FOR_KEY, E::max_supported_key_length)
}

// ==================== Costs ====================

extern "C" fn scan_time<E: StorageEngine>(bridge: *mut HandlerBridgeFFI) -> IoAndCpuCostFFI {
	let Some(header) = (unsafe { bridge.as_ref() }) else {
		return IoAndCpuCostFFI::default();
	};
	let stats = &header.stats;
	dispatch::<E, _>("scan_time", header.state, header.type_id, stats.scan_cost(), |engine| {
		engine.scan_time(stats)
	})
}

extern "C" fn keyread_time<E: StorageEngine>(
	bridge: *mut HandlerBridgeFFI,
	index: u32,
	ranges: u64,
	rows: u64,
	blocks: u64,
) -> IoAndCpuCostFFI {
	let fallback = IoAndCpuCostFFI::keyread(ranges, rows, blocks);
	let Some(header) = (unsafe { bridge.as_ref() }) else {
		return fallback;
	};
	dispatch::<E, _>("keyread_time", header.state, header.type_id, fallback, |engine| {
		engine.keyread_time(index, ranges, rows, blocks)
	})
}

extern "C" fn rnd_pos_time<E: StorageEngine>(bridge: *mut HandlerBridgeFFI, rows: u64) -> IoAndCpuCostFFI {
	let Some(header) = (unsafe { bridge.as_ref() }) else {
		return IoAndCpuCostFFI::default();
	};
	let stats = &header.stats;
	dispatch::<E, _>("rnd_pos_time", header.state, header.type_id, stats.rnd_pos_cost(rows), |engine| {
		engine.rnd_pos_time(stats, rows)
	})
}

// ==================== Table Lifecycle ====================

extern "C" fn open<E: StorageEngine>(
	bridge: *mut HandlerBridgeFFI,
	table: *const c_char,
	mode: i32,
	test_if_locked: u32,
) -> i32 {
	let table = unsafe { name(table) };
	run::<E>("open", bridge, |engine| engine.open(table, mode, test_if_locked))
}

extern "C" fn close<E: StorageEngine>(bridge: *mut HandlerBridgeFFI) -> i32 {
	run::<E>("close", bridge, E::close)
}

extern "C" fn create<E: StorageEngine>(
	bridge: *mut HandlerBridgeFFI,
	table_name: *const c_char,
	table: *const TableFFI,
	create_info: *mut CreateInfoFFI,
) -> i32 {
	let table_name = unsafe { name(table_name) };
	run::<E>("create", bridge, |engine| engine.create(table_name, table, create_info))
}

extern "C" fn delete_table<E: StorageEngine>(bridge: *mut HandlerBridgeFFI, table: *const c_char) -> i32 {
	let table = unsafe { name(table) };
	run::<E>("delete_table", bridge, |engine| engine.delete_table(table))
}

// ==================== Rows ====================

extern "C" fn write_row<E: StorageEngine>(bridge: *mut HandlerBridgeFFI, buf: *const u8, buf_len: usize) -> i32 {
	let row = unsafe { bytes(buf, buf_len) };
	run::<E>("write_row", bridge, |engine| engine.write_row(row))
}

extern "C" fn update_row<E: StorageEngine>(
	bridge: *mut HandlerBridgeFFI,
	old: *const u8,
	old_len: usize,
	new: *const u8,
	new_len: usize,
) -> i32 {
	let (old, new) = unsafe { (bytes(old, old_len), bytes(new, new_len)) };
	run::<E>("update_row", bridge, |engine| engine.update_row(old, new))
}

extern "C" fn delete_row<E: StorageEngine>(bridge: *mut HandlerBridgeFFI, buf: *const u8, buf_len: usize) -> i32 {
	let row = unsafe { bytes(buf, buf_len) };
	run::<E>("delete_row", bridge, |engine| engine.delete_row(row))
}

extern "C" fn delete_all_rows<E: StorageEngine>(bridge: *mut HandlerBridgeFFI) -> i32 {
	run::<E>("delete_all_rows", bridge, E::delete_all_rows)
}

// ==================== Index ====================

extern "C" fn index_read_map<E: StorageEngine>(
	bridge: *mut HandlerBridgeFFI,
	buf: *mut u8,
	buf_len: usize,
	key: *const u8,
	key_len: usize,
	keypart_map: u64,
	find_flag: u32,
) -> i32 {
	let (buf, key) = unsafe { (bytes_mut(buf, buf_len), bytes(key, key_len)) };
	run::<E>("index_read_map", bridge, |engine| engine.index_read_map(buf, key, keypart_map, find_flag))
}

extern "C" fn index_next<E: StorageEngine>(bridge: *mut HandlerBridgeFFI, buf: *mut u8, buf_len: usize) -> i32 {
	read::<E>("index_next", bridge, buf, buf_len, E::index_next)
}

extern "C" fn index_prev<E: StorageEngine>(bridge: *mut HandlerBridgeFFI, buf: *mut u8, buf_len: usize) -> i32 {
	read::<E>("index_prev", bridge, buf, buf_len, E::index_prev)
}

extern "C" fn index_first<E: StorageEngine>(bridge: *mut HandlerBridgeFFI, buf: *mut u8, buf_len: usize) -> i32 {
	read::<E>("index_first", bridge, buf, buf_len, E::index_first)
}

extern "C" fn index_last<E: StorageEngine>(bridge: *mut HandlerBridgeFFI, buf: *mut u8, buf_len: usize) -> i32 {
	read::<E>("index_last", bridge, buf, buf_len, E::index_last)
}

// ==================== Scan ====================

extern "C" fn rnd_init<E: StorageEngine>(bridge: *mut HandlerBridgeFFI, scan: bool) -> i32 {
	run::<E>("rnd_init", bridge, |engine| engine.rnd_init(scan))
}

extern "C" fn rnd_end<E: StorageEngine>(bridge: *mut HandlerBridgeFFI) -> i32 {
	run::<E>("rnd_end", bridge, E::rnd_end)
}

extern "C" fn rnd_next<E: StorageEngine>(bridge: *mut HandlerBridgeFFI, buf: *mut u8, buf_len: usize) -> i32 {
	read::<E>("rnd_next", bridge, buf, buf_len, E::rnd_next)
}

extern "C" fn rnd_pos<E: StorageEngine>(
	bridge: *mut HandlerBridgeFFI,
	buf: *mut u8,
	buf_len: usize,
	pos: *const u8,
	pos_len: usize,
) -> i32 {
	let (buf, pos) = unsafe { (bytes_mut(buf, buf_len), bytes(pos, pos_len)) };
	run::<E>("rnd_pos", bridge, |engine| engine.rnd_pos(buf, pos))
}

extern "C" fn position<E: StorageEngine>(bridge: *mut HandlerBridgeFFI, record: *const u8, record_len: usize) {
	let Some(header) = (unsafe { bridge.as_mut() }) else {
		return;
	};
	let record = unsafe { bytes(record, record_len) };
	let ref_length = (header.ref_length as usize).min(MAX_REF_LENGTH);
	let pos = &mut header.ref_buf[..ref_length];
	dispatch::<E, _>("position", header.state, header.type_id, (), |engine| engine.position(record, pos))
}

// ==================== Stats / Maintenance ====================

extern "C" fn info<E: StorageEngine>(bridge: *mut HandlerBridgeFFI, flag: u32) -> i32 {
	let Some(header) = (unsafe { bridge.as_mut() }) else {
		return HA_ERR_INTERNAL_ERROR;
	};
	let stats = &mut header.stats;
	dispatch::<E, _>("info", header.state, header.type_id, HA_ERR_INTERNAL_ERROR, |engine| {
		status(engine.info(flag, stats))
	})
}

extern "C" fn extra<E: StorageEngine>(bridge: *mut HandlerBridgeFFI, operation: u32) -> i32 {
	run::<E>("extra", bridge, |engine| engine.extra(operation))
}

extern "C" fn records_in_range<E: StorageEngine>(
	bridge: *mut HandlerBridgeFFI,
	index: u32,
	min: *const KeyRangeFFI,
	max: *const KeyRangeFFI,
	pages: *mut PageRangeFFI,
) -> u64 {
	let Some(header) = (unsafe { bridge.as_ref() }) else {
		return DEFAULT_RECORDS_IN_RANGE;
	};
	let min = unsafe { min.as_ref() }.map(|range| unsafe { KeyRange::from_ffi(range) });
	let max = unsafe { max.as_ref() }.map(|range| unsafe { KeyRange::from_ffi(range) });
	let mut unused = PageRangeFFI::default();
	let pages = unsafe { pages.as_mut() }.unwrap_or(&mut unused);
	dispatch::<E, _>("records_in_range", header.state, header.type_id, DEFAULT_RECORDS_IN_RANGE, |engine| {
		engine.records_in_range(index, min, max, pages)
	})
}

// ==================== Locking ====================

extern "C" fn external_lock<E: StorageEngine>(
	bridge: *mut HandlerBridgeFFI,
	session: *mut SessionFFI,
	lock_kind: i32,
) -> i32 {
	run::<E>("external_lock", bridge, |engine| engine.external_lock(session, lock_kind))
}

extern "C" fn store_lock<E: StorageEngine>(
	bridge: *mut HandlerBridgeFFI,
	session: *mut SessionFFI,
	to: *mut LockListFFI,
	lock_type: i32,
) -> usize {
	let current = unsafe { to.as_ref() }.map_or(0, |list| list.len);
	let Some(header) = (unsafe { bridge.as_ref() }) else {
		return current;
	};
	let owner = header.state;
	dispatch::<E, _>("store_lock", header.state, header.type_id, current, |engine| {
		let mut locks = unsafe { LockList::new(to, owner) };
		engine.store_lock(session, &mut locks, lock_type);
		locks.len()
	})
}

// ==================== DDL ====================

extern "C" fn check_if_supported_inplace_alter<E: StorageEngine>(
	bridge: *mut HandlerBridgeFFI,
	altered: *const TableFFI,
	alter_info: *mut AlterInfoFFI,
) -> u32 {
	let Some(header) = (unsafe { bridge.as_ref() }) else {
		return HA_ALTER_INPLACE_NOT_SUPPORTED;
	};
	dispatch::<E, _>(
		"check_if_supported_inplace_alter",
		header.state,
		header.type_id,
		HA_ALTER_INPLACE_NOT_SUPPORTED,
		|engine| engine.check_if_supported_inplace_alter(altered, alter_info),
	)
}

#[cfg(test)]
mod tests {
	use std::ptr::{null, null_mut};

	use storebridge_abi::constants::{HA_ERR_END_OF_FILE, HA_ERR_WRONG_COMMAND, HA_ERR_NO_SUCH_TABLE};

	use super::*;
	use crate::StorageError;

	struct Countdown {
		left: u8,
	}

	impl StorageEngine for Countdown {
		const NAME: &'static CStr = c"countdown";
		const REF_LENGTH: u32 = 1;

		fn new(_ctx: &ConstructContext) -> StorageResult<Self> {
			Ok(Self {
				left: 0,
			})
		}

		fn open(&mut self, name: &CStr, _mode: i32, _test_if_locked: u32) -> StorageResult {
			if name.is_empty() {
				return Err(StorageError::NoSuchTable);
			}
			Ok(())
		}

		fn close(&mut self) -> StorageResult {
			Ok(())
		}

		fn rnd_init(&mut self, _scan: bool) -> StorageResult {
			self.left = 2;
			Ok(())
		}

		fn rnd_next(&mut self, buf: &mut [u8]) -> StorageResult {
			if self.left == 0 {
				return Err(StorageError::EndOfFile);
			}
			self.left -= 1;
			buf.fill(self.left);
			Ok(())
		}

		fn position(&mut self, record: &[u8], pos: &mut [u8]) {
			pos.copy_from_slice(&record[..pos.len()]);
		}
	}

	fn constructed(vtable: &HandlerVTableFFI) -> HandlerBridgeFFI {
		let mut header = HandlerBridgeFFI::empty();
		let construct = vtable.construct.unwrap();
		assert_eq!(construct(&mut header, null(), null_mut(), null()), HA_OK);
		header
	}

	#[test]
	fn test_every_slot_is_populated() {
		let vtable = build_vtable::<Countdown>();
		assert_eq!(vtable.api_version, CURRENT_API_VERSION);
		assert!(vtable.construct.is_some());
		assert!(vtable.store_lock.is_some());
		assert!(vtable.check_if_supported_inplace_alter.is_some());
		assert!(vtable.index_last.is_some());
	}

	#[test]
	fn test_construct_sets_header() {
		let vtable = build_vtable::<Countdown>();
		let mut header = constructed(&vtable);

		assert_ne!(header.state, 0);
		assert_eq!(header.type_id, type_tag::<Countdown>());
		assert_eq!(header.ref_length, 1);
		assert!(pool::contains(header.state));

		let handle = header.state;
		vtable.destruct.unwrap()(&mut header);
		assert_eq!(header.state, 0);
		assert!(!pool::contains(handle));
	}

	#[test]
	fn test_scan_through_slots() {
		let vtable = build_vtable::<Countdown>();
		let mut header = constructed(&vtable);
		let mut buf = [9u8; 3];

		assert_eq!(vtable.open.unwrap()(&mut header, c"t".as_ptr(), 0, 0), HA_OK);
		assert_eq!(vtable.rnd_init.unwrap()(&mut header, true), HA_OK);
		assert_eq!(vtable.rnd_next.unwrap()(&mut header, buf.as_mut_ptr(), buf.len()), HA_OK);
		assert_eq!(buf, [1, 1, 1]);

		vtable.position.unwrap()(&mut header, buf.as_ptr(), buf.len());
		assert_eq!(header.position(), [1]);

		assert_eq!(vtable.rnd_next.unwrap()(&mut header, buf.as_mut_ptr(), buf.len()), HA_OK);
		assert_eq!(vtable.rnd_next.unwrap()(&mut header, buf.as_mut_ptr(), buf.len()), HA_ERR_END_OF_FILE);
		assert_eq!(vtable.rnd_end.unwrap()(&mut header), HA_OK);
		assert_eq!(vtable.close.unwrap()(&mut header), HA_OK);

		vtable.destruct.unwrap()(&mut header);
	}

	#[test]
	fn test_engine_errors_become_status_codes() {
		let vtable = build_vtable::<Countdown>();
		let mut header = constructed(&vtable);

		assert_eq!(vtable.open.unwrap()(&mut header, null(), 0, 0), HA_ERR_NO_SUCH_TABLE);
		assert_eq!(vtable.write_row.unwrap()(&mut header, null(), 0), HA_ERR_WRONG_COMMAND);
		assert_eq!(vtable.index_first.unwrap()(&mut header, null_mut(), 0), HA_ERR_WRONG_COMMAND);

		vtable.destruct.unwrap()(&mut header);
	}

	#[test]
	fn test_defaults_through_slots() {
		let vtable = build_vtable::<Countdown>();
		let mut header = constructed(&vtable);

		assert_eq!(vtable.table_flags.unwrap()(&header), 0);
		assert_eq!(vtable.max_supported_record_length.unwrap()(&header), HA_MAX_REC_LENGTH);
		let index_type = unsafe { CStr::from_ptr(vtable.index_type.unwrap()(&header, 0)) };
		assert!(index_type.is_empty());
		assert_eq!(vtable.scan_time.unwrap()(&mut header), header.stats.scan_cost());
		assert_eq!(
			vtable.records_in_range.unwrap()(&mut header, 0, null(), null(), null_mut()),
			DEFAULT_RECORDS_IN_RANGE
		);
		assert_eq!(
			vtable.check_if_supported_inplace_alter.unwrap()(&mut header, null(), null_mut()),
			HA_ALTER_INPLACE_NOT_SUPPORTED
		);
		assert_eq!(vtable.store_lock.unwrap()(&mut header, null_mut(), null_mut(), 0), 0);

		vtable.destruct.unwrap()(&mut header);
	}

	#[test]
	fn test_null_bridge() {
		let vtable = build_vtable::<Countdown>();
		assert_eq!(vtable.construct.unwrap()(null_mut(), null(), null_mut(), null()), HA_ERR_INTERNAL_ERROR);
		assert_eq!(vtable.rnd_next.unwrap()(null_mut(), null_mut(), 0), HA_ERR_INTERNAL_ERROR);
		assert_eq!(vtable.max_supported_keys.unwrap()(null()), 0);
		vtable.destruct.unwrap()(null_mut());
	}

	#[test]
	fn test_destroyed_handle_has_no_instance() {
		let vtable = build_vtable::<Countdown>();
		let mut header = constructed(&vtable);
		vtable.destruct.unwrap()(&mut header);

		assert_eq!(vtable.close.unwrap()(&mut header), HA_ERR_INTERNAL_ERROR);
		assert_eq!(vtable.max_supported_key_parts.unwrap()(&header), MAX_REF_PARTS);
	}

	#[test]
	fn test_descriptor() {
		let descriptor = descriptor::<Countdown>();
		assert_eq!(descriptor.api_version, CURRENT_API_VERSION);
		assert_eq!(unsafe { CStr::from_ptr(descriptor.name) }, c"countdown");
		assert!(descriptor.vtable.rnd_next.is_some());
	}

	#[test]
	fn test_panic_message() {
		let payload: Box<dyn Any + Send> = Box::new("boom");
		assert_eq!(panic_message(payload.as_ref()), "boom");
		let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
		assert_eq!(panic_message(payload.as_ref()), "bang");
		let payload: Box<dyn Any + Send> = Box::new(3u8);
		assert_eq!(panic_message(payload.as_ref()), "<non-string panic payload>");
	}
}
