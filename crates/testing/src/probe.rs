// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! A recording contract
//!
//! Every slot appends its name to a thread-local call log and returns the status scripted with
//! [`respond`] (success by default). Row-producing slots hand out rows queued with [`push_row`]
//! and report `HA_ERR_END_OF_FILE` once the queue is empty. State is per thread, so tests on
//! separate threads never see each other's calls.
//!
//! ```ignore
//! probe::reset();
//! probe::respond("write_row", 17);
//! let contract = HandlerContract::from_vtable(&probe::full_vtable())?;
//! ```

use std::{
	cell::RefCell,
	collections::{HashMap, VecDeque},
	ffi::{CStr, c_char},
	ptr::copy_nonoverlapping,
	slice::from_raw_parts,
};

use storebridge_abi::{
	bridge::HandlerBridgeFFI,
	constants::{HA_ERR_END_OF_FILE, HA_OK, MAX_REF_LENGTH, TYPE_ID_LENGTH},
	handler::{
		HA_ALTER_INPLACE_INSTANT, HA_FILE_BASED, HA_NO_TRANSACTIONS, HA_READ_NEXT, HA_READ_ORDER, HA_READ_PREV,
		HandlerVTableFFI, IoAndCpuCostFFI, KeyRangeFFI, LockListFFI, LockRequestFFI, PageRangeFFI,
	},
	host::{AlterInfoFFI, ArenaFFI, CreateInfoFFI, HostTypeFFI, SessionFFI, TableFFI, TableShareFFI},
};
use tracing::trace;

/// Type tag written into the header by `construct`
pub const TYPE_ID: [u8; TYPE_ID_LENGTH] = *b"storebridge-prob";
pub const INDEX_TYPE: &CStr = c"PROBE";
pub const TABLE_FLAGS: u64 = HA_NO_TRANSACTIONS | HA_FILE_BASED;
pub const INDEX_FLAGS: u64 = HA_READ_NEXT | HA_READ_PREV | HA_READ_ORDER;
pub const MAX_RECORD_LENGTH: u32 = 4096;
pub const MAX_KEYS: u32 = 4;
pub const MAX_KEY_PARTS: u32 = 2;
pub const MAX_KEY_LENGTH: u32 = 256;
pub const SCAN_COST: IoAndCpuCostFFI = IoAndCpuCostFFI::new(1.0, 2.0);
pub const RECORDS_IN_RANGE: u64 = 42;
pub const INFO_RECORDS: u64 = 3;
pub const ALTER_VERDICT: u32 = HA_ALTER_INPLACE_INSTANT;

#[derive(Default)]
struct Probe {
	calls: Vec<&'static str>,
	responses: HashMap<&'static str, i32>,
	rows: VecDeque<Vec<u8>>,
	positions: Vec<Vec<u8>>,
	instances: u64,
}

thread_local! {
	static PROBE: RefCell<Probe> = RefCell::new(Probe::default());
}

/// Clear the call log, scripted statuses and queued rows of this thread
pub fn reset() {
	PROBE.with_borrow_mut(|probe| *probe = Probe::default());
}

/// Slot names invoked on this thread since the last [`reset`], in order
pub fn calls() -> Vec<&'static str> {
	PROBE.with_borrow(|probe| probe.calls.clone())
}

/// How often `slot` was invoked
pub fn count(slot: &str) -> usize {
	PROBE.with_borrow(|probe| probe.calls.iter().filter(|call| **call == slot).count())
}

/// Make `slot` return `status` from now on
pub fn respond(slot: &'static str, status: i32) {
	PROBE.with_borrow_mut(|probe| {
		probe.responses.insert(slot, status);
	});
}

/// Queue a row for the next row-producing slot
pub fn push_row(row: impl Into<Vec<u8>>) {
	PROBE.with_borrow_mut(|probe| probe.rows.push_back(row.into()));
}

/// Position arguments received by `rnd_pos`, in order
pub fn received_positions() -> Vec<Vec<u8>> {
	PROBE.with_borrow(|probe| probe.positions.clone())
}

/// A vtable with only the mandatory slots
pub fn minimal_vtable() -> HandlerVTableFFI {
	HandlerVTableFFI {
		construct: Some(construct),
		destruct: Some(destruct),
		open: Some(open),
		close: Some(close),
		rnd_init: Some(rnd_init),
		rnd_end: Some(rnd_end),
		rnd_next: Some(rnd_next),
		..HandlerVTableFFI::empty()
	}
}

/// A vtable with every slot filled
pub fn full_vtable() -> HandlerVTableFFI {
	HandlerVTableFFI {
		index_type: Some(index_type),
		table_flags: Some(table_flags),
		index_flags: Some(index_flags),
		max_supported_record_length: Some(max_supported_record_length),
		max_supported_keys: Some(max_supported_keys),
		max_supported_key_parts: Some(max_supported_key_parts),
		max_supported_key_length: Some(max_supported_key_length),
		scan_time: Some(scan_time),
		keyread_time: Some(keyread_time),
		rnd_pos_time: Some(rnd_pos_time),
		write_row: Some(write_row),
		update_row: Some(update_row),
		delete_row: Some(delete_row),
		index_read_map: Some(index_read_map),
		index_next: Some(index_next),
		index_prev: Some(index_prev),
		index_first: Some(index_first),
		index_last: Some(index_last),
		rnd_pos: Some(rnd_pos),
		position: Some(position),
		info: Some(info),
		extra: Some(extra),
		external_lock: Some(external_lock),
		delete_all_rows: Some(delete_all_rows),
		records_in_range: Some(records_in_range),
		delete_table: Some(delete_table),
		create: Some(create),
		check_if_supported_inplace_alter: Some(check_if_supported_inplace_alter),
		store_lock: Some(store_lock),
		..minimal_vtable()
	}
}

fn record(slot: &'static str) -> i32 {
	trace!(slot, "probe invoked");
	PROBE.with_borrow_mut(|probe| {
		probe.calls.push(slot);
		probe.responses.get(slot).copied().unwrap_or(HA_OK)
	})
}

fn header<'a>(bridge: *mut HandlerBridgeFFI) -> Option<&'a mut HandlerBridgeFFI> {
	// SAFETY: the host passes the header of a live bridge
	unsafe { bridge.as_mut() }
}

/// Record `slot` and, unless a failure is scripted, copy the next queued row into `buf`
fn read_row(slot: &'static str, buf: *mut u8, buf_len: usize) -> i32 {
	let status = record(slot);
	if status != HA_OK {
		return status;
	}
	match PROBE.with_borrow_mut(|probe| probe.rows.pop_front()) {
		Some(row) => {
			if !buf.is_null() {
				// SAFETY: the host's row buffer is valid for `buf_len` bytes
				unsafe { copy_nonoverlapping(row.as_ptr(), buf, row.len().min(buf_len)) };
			}
			HA_OK
		}
		None => HA_ERR_END_OF_FILE,
	}
}

extern "C" fn construct(
	bridge: *mut HandlerBridgeFFI,
	_host_type: *const HostTypeFFI,
	_arena: *mut ArenaFFI,
	_share: *const TableShareFFI,
) -> i32 {
	let status = record("construct");
	if status == HA_OK
		&& let Some(header) = header(bridge)
	{
		header.state = PROBE.with_borrow_mut(|probe| {
			probe.instances += 1;
			probe.instances
		});
		header.type_id = TYPE_ID;
	}
	status
}

extern "C" fn destruct(_bridge: *mut HandlerBridgeFFI) {
	record("destruct");
}

extern "C" fn index_type(_bridge: *const HandlerBridgeFFI, _index: u32) -> *const c_char {
	record("index_type");
	INDEX_TYPE.as_ptr()
}

extern "C" fn table_flags(_bridge: *const HandlerBridgeFFI) -> u64 {
	record("table_flags");
	TABLE_FLAGS
}

extern "C" fn index_flags(_bridge: *const HandlerBridgeFFI, _index: u32, _part: u32, _all_parts: bool) -> u64 {
	record("index_flags");
	INDEX_FLAGS
}

extern "C" fn max_supported_record_length(_bridge: *const HandlerBridgeFFI) -> u32 {
	record("max_supported_record_length");
	MAX_RECORD_LENGTH
}

extern "C" fn max_supported_keys(_bridge: *const HandlerBridgeFFI) -> u32 {
	record("max_supported_keys");
	MAX_KEYS
}

extern "C" fn max_supported_key_parts(_bridge: *const HandlerBridgeFFI) -> u32 {
	record("max_supported_key_parts");
	MAX_KEY_PARTS
}

extern "C" fn max_supported_key_length(_bridge: *const HandlerBridgeFFI) -> u32 {
	record("max_supported_key_length");
	MAX_KEY_LENGTH
}

extern "C" fn scan_time(_bridge: *mut HandlerBridgeFFI) -> IoAndCpuCostFFI {
	record("scan_time");
	SCAN_COST
}

extern "C" fn keyread_time(
	_bridge: *mut HandlerBridgeFFI,
	_index: u32,
	ranges: u64,
	rows: u64,
	_blocks: u64,
) -> IoAndCpuCostFFI {
	record("keyread_time");
	IoAndCpuCostFFI::new(ranges as f64, rows as f64)
}

extern "C" fn rnd_pos_time(_bridge: *mut HandlerBridgeFFI, rows: u64) -> IoAndCpuCostFFI {
	record("rnd_pos_time");
	IoAndCpuCostFFI::new(rows as f64, rows as f64)
}

extern "C" fn open(_bridge: *mut HandlerBridgeFFI, _name: *const c_char, _mode: i32, _test_if_locked: u32) -> i32 {
	record("open")
}

extern "C" fn close(_bridge: *mut HandlerBridgeFFI) -> i32 {
	record("close")
}

extern "C" fn write_row(_bridge: *mut HandlerBridgeFFI, _buf: *const u8, _buf_len: usize) -> i32 {
	record("write_row")
}

extern "C" fn update_row(
	_bridge: *mut HandlerBridgeFFI,
	_old: *const u8,
	_old_len: usize,
	_new: *const u8,
	_new_len: usize,
) -> i32 {
	record("update_row")
}

extern "C" fn delete_row(_bridge: *mut HandlerBridgeFFI, _buf: *const u8, _buf_len: usize) -> i32 {
	record("delete_row")
}

extern "C" fn index_read_map(
	_bridge: *mut HandlerBridgeFFI,
	buf: *mut u8,
	buf_len: usize,
	_key: *const u8,
	_key_len: usize,
	_keypart_map: u64,
	_find_flag: u32,
) -> i32 {
	read_row("index_read_map", buf, buf_len)
}

extern "C" fn index_next(_bridge: *mut HandlerBridgeFFI, buf: *mut u8, buf_len: usize) -> i32 {
	read_row("index_next", buf, buf_len)
}

extern "C" fn index_prev(_bridge: *mut HandlerBridgeFFI, buf: *mut u8, buf_len: usize) -> i32 {
	read_row("index_prev", buf, buf_len)
}

extern "C" fn index_first(_bridge: *mut HandlerBridgeFFI, buf: *mut u8, buf_len: usize) -> i32 {
	read_row("index_first", buf, buf_len)
}

extern "C" fn index_last(_bridge: *mut HandlerBridgeFFI, buf: *mut u8, buf_len: usize) -> i32 {
	read_row("index_last", buf, buf_len)
}

extern "C" fn rnd_init(_bridge: *mut HandlerBridgeFFI, _scan: bool) -> i32 {
	record("rnd_init")
}

extern "C" fn rnd_end(_bridge: *mut HandlerBridgeFFI) -> i32 {
	record("rnd_end")
}

extern "C" fn rnd_next(_bridge: *mut HandlerBridgeFFI, buf: *mut u8, buf_len: usize) -> i32 {
	read_row("rnd_next", buf, buf_len)
}

extern "C" fn rnd_pos(
	_bridge: *mut HandlerBridgeFFI,
	buf: *mut u8,
	buf_len: usize,
	pos: *const u8,
	pos_len: usize,
) -> i32 {
	if !pos.is_null() {
		// SAFETY: the position is valid for `pos_len` bytes
		let pos = unsafe { from_raw_parts(pos, pos_len) }.to_vec();
		PROBE.with_borrow_mut(|probe| probe.positions.push(pos));
	}
	read_row("rnd_pos", buf, buf_len)
}

/// Uses the leading `ref_length` bytes of the record as its position
extern "C" fn position(bridge: *mut HandlerBridgeFFI, record_buf: *const u8, record_len: usize) {
	record("position");
	let Some(header) = header(bridge) else {
		return;
	};
	if record_buf.is_null() {
		return;
	}
	let len = (header.ref_length as usize).min(MAX_REF_LENGTH).min(record_len);
	// SAFETY: the record is valid for `record_len` bytes
	unsafe { copy_nonoverlapping(record_buf, header.ref_buf.as_mut_ptr(), len) };
}

extern "C" fn info(bridge: *mut HandlerBridgeFFI, _flag: u32) -> i32 {
	let status = record("info");
	if let Some(header) = header(bridge) {
		header.stats.records = INFO_RECORDS;
	}
	status
}

extern "C" fn extra(_bridge: *mut HandlerBridgeFFI, _operation: u32) -> i32 {
	record("extra")
}

extern "C" fn external_lock(_bridge: *mut HandlerBridgeFFI, _session: *mut SessionFFI, _lock_kind: i32) -> i32 {
	record("external_lock")
}

extern "C" fn delete_all_rows(_bridge: *mut HandlerBridgeFFI) -> i32 {
	record("delete_all_rows")
}

extern "C" fn records_in_range(
	_bridge: *mut HandlerBridgeFFI,
	_index: u32,
	_min: *const KeyRangeFFI,
	_max: *const KeyRangeFFI,
	_pages: *mut PageRangeFFI,
) -> u64 {
	record("records_in_range");
	RECORDS_IN_RANGE
}

extern "C" fn delete_table(_bridge: *mut HandlerBridgeFFI, _name: *const c_char) -> i32 {
	record("delete_table")
}

extern "C" fn create(
	_bridge: *mut HandlerBridgeFFI,
	_name: *const c_char,
	_table: *const TableFFI,
	_create_info: *mut CreateInfoFFI,
) -> i32 {
	record("create")
}

extern "C" fn check_if_supported_inplace_alter(
	_bridge: *mut HandlerBridgeFFI,
	_altered: *const TableFFI,
	_alter_info: *mut AlterInfoFFI,
) -> u32 {
	record("check_if_supported_inplace_alter");
	ALTER_VERDICT
}

/// Appends one request owned by this handler
extern "C" fn store_lock(
	bridge: *mut HandlerBridgeFFI,
	_session: *mut SessionFFI,
	to: *mut LockListFFI,
	lock_type: i32,
) -> usize {
	record("store_lock");
	let owner = header(bridge).map_or(0, |header| header.state);
	// SAFETY: the host's lock list is valid for its capacity
	match unsafe { to.as_mut() } {
		Some(list) => unsafe {
			list.push(LockRequestFFI {
				owner,
				lock_type,
			})
		},
		None => 0,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_call_log() {
		reset();
		let vtable = full_vtable();
		let mut header = HandlerBridgeFFI::empty();

		respond("write_row", 17);
		assert_eq!((vtable.write_row.unwrap())(&mut header, std::ptr::null(), 0), 17);
		assert_eq!((vtable.close.unwrap())(&mut header), HA_OK);
		assert_eq!(calls(), ["write_row", "close"]);
		assert_eq!(count("close"), 1);
	}

	#[test]
	fn test_rows_then_end_of_file() {
		reset();
		let vtable = minimal_vtable();
		let mut header = HandlerBridgeFFI::empty();
		let mut buf = [0u8; 4];

		push_row([1, 2, 3, 4]);
		let rnd_next = vtable.rnd_next.unwrap();
		assert_eq!(rnd_next(&mut header, buf.as_mut_ptr(), buf.len()), HA_OK);
		assert_eq!(buf, [1, 2, 3, 4]);
		assert_eq!(rnd_next(&mut header, buf.as_mut_ptr(), buf.len()), HA_ERR_END_OF_FILE);
	}

	#[test]
	fn test_minimal_leaves_optional_slots_empty() {
		let vtable = minimal_vtable();
		assert!(vtable.construct.is_some());
		assert!(vtable.write_row.is_none());
		assert!(vtable.store_lock.is_none());
	}
}
