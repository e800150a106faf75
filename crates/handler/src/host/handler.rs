// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{cmp::max, ffi::CStr};

use storebridge_abi::handler::HA_READ_PREFIX_LAST;

use crate::host::{
	defaults,
	types::{AlterInfo, CreateInfo, IoAndCpuCost, KeyRange, LockRequests, PageRange, Session, Statistics, Table},
};

/// The host's abstract storage handler
///
/// One value per open table handle. Status-returning methods use the host code space (0 is
/// success). Only the table lifecycle and the sequential scan are required; everything else has
/// the host's default behaviour.
pub trait Handler {
	/// Table statistics as last refreshed by [`Handler::info`]
	fn stats(&self) -> &Statistics;

	/// Position of the row last read, as written by [`Handler::position`]
	fn position_ref(&self) -> &[u8];

	// ==================== Capability Queries ====================

	/// Display name of an index kind
	fn index_type(&self, _index: u32) -> &CStr {
		defaults::index_type()
	}

	fn table_flags(&self) -> u64 {
		defaults::table_flags()
	}

	fn index_flags(&self, _index: u32, _part: u32, _all_parts: bool) -> u64 {
		defaults::index_flags()
	}

	fn max_supported_record_length(&self) -> u32 {
		defaults::max_supported_record_length()
	}

	fn max_supported_keys(&self) -> u32 {
		defaults::max_supported_keys()
	}

	fn max_supported_key_parts(&self) -> u32 {
		defaults::max_supported_key_parts()
	}

	fn max_supported_key_length(&self) -> u32 {
		defaults::max_supported_key_length()
	}

	// ==================== Cost Estimation ====================

	/// Time for a full table data scan
	fn scan_time(&mut self) -> IoAndCpuCost {
		defaults::scan_time(self.stats())
	}

	/// Cost of an index-only read of `rows` keys over `ranges` ranges
	///
	/// `blocks` is the number of index blocks touched, or 0 if not known.
	fn keyread_time(&mut self, _index: u32, ranges: u64, rows: u64, blocks: u64) -> IoAndCpuCost {
		defaults::keyread_time(ranges, rows, blocks)
	}

	/// Time for a full index scan without copy or compare cost
	fn key_scan_time(&mut self, index: u32) -> IoAndCpuCost {
		let rows = max(self.stats().records, 1);
		self.keyread_time(index, 1, rows, 0)
	}

	/// Cost of fetching `rows` rows through [`Handler::rnd_pos`]
	fn rnd_pos_time(&mut self, rows: u64) -> IoAndCpuCost {
		defaults::rnd_pos_time(self.stats(), rows)
	}

	// ==================== Table Lifecycle ====================

	fn open(&mut self, name: &CStr, mode: i32, test_if_locked: u32) -> i32;

	fn close(&mut self) -> i32;

	fn create(&mut self, _name: &CStr, _table: &Table, _create_info: &mut CreateInfo) -> i32 {
		defaults::unsupported()
	}

	/// Remove the table's storage. Engines without files of their own have nothing to do.
	fn delete_table(&mut self, _name: &CStr) -> i32 {
		defaults::accepted()
	}

	// ==================== Row Operations ====================

	fn write_row(&mut self, _buf: &[u8]) -> i32 {
		defaults::unsupported()
	}

	fn update_row(&mut self, _old: &[u8], _new: &[u8]) -> i32 {
		defaults::unsupported()
	}

	fn delete_row(&mut self, _buf: &[u8]) -> i32 {
		defaults::unsupported()
	}

	/// Delete all rows, as for `DELETE` without a `WHERE` clause
	fn delete_all_rows(&mut self) -> i32 {
		defaults::unsupported()
	}

	fn truncate(&mut self) -> i32 {
		self.delete_all_rows()
	}

	// ==================== Index Navigation ====================

	fn index_read_map(&mut self, _buf: &mut [u8], _key: &[u8], _keypart_map: u64, _find_flag: u32) -> i32 {
		defaults::unsupported()
	}

	/// Last row with the given key prefix
	fn index_read_last_map(&mut self, buf: &mut [u8], key: &[u8], keypart_map: u64) -> i32 {
		self.index_read_map(buf, key, keypart_map, HA_READ_PREFIX_LAST)
	}

	fn index_next(&mut self, _buf: &mut [u8]) -> i32 {
		defaults::unsupported()
	}

	fn index_prev(&mut self, _buf: &mut [u8]) -> i32 {
		defaults::unsupported()
	}

	fn index_first(&mut self, _buf: &mut [u8]) -> i32 {
		defaults::unsupported()
	}

	fn index_last(&mut self, _buf: &mut [u8]) -> i32 {
		defaults::unsupported()
	}

	// ==================== Table Scan ====================

	fn rnd_init(&mut self, scan: bool) -> i32;

	fn rnd_next(&mut self, buf: &mut [u8]) -> i32;

	fn rnd_end(&mut self) -> i32 {
		defaults::accepted()
	}

	fn rnd_pos(&mut self, _buf: &mut [u8], _pos: &[u8]) -> i32 {
		defaults::unsupported()
	}

	/// Capture the position of `record`, the row last read
	fn position(&mut self, _record: &[u8]) {}

	// ==================== Stats / Hints ====================

	fn info(&mut self, _flag: u32) -> i32 {
		defaults::accepted()
	}

	fn extra(&mut self, _operation: u32) -> i32 {
		defaults::accepted()
	}

	fn records_in_range(
		&mut self,
		_index: u32,
		_min: Option<&KeyRange<'_>>,
		_max: Option<&KeyRange<'_>>,
		_pages: &mut PageRange,
	) -> u64 {
		defaults::records_in_range()
	}

	// ==================== Locking ====================

	fn external_lock(&mut self, _session: &mut Session, _lock_kind: i32) -> i32 {
		defaults::accepted()
	}

	/// Add the locks this handler needs to `to`
	fn store_lock(&mut self, _session: &mut Session, _to: &mut LockRequests, _lock_type: i32) {}

	// ==================== DDL ====================

	fn check_if_supported_inplace_alter(&mut self, _altered: &Table, _alter_info: &mut AlterInfo) -> u32 {
		defaults::check_if_supported_inplace_alter()
	}
}
