// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Forwarding of every handler operation to its contract slot
//!
//! Results are relayed unchanged. A null optional slot, or a value-returning call the lifecycle
//! guard rejects, answers with the host default instead.

use std::{
	ffi::{CStr, c_char},
	ptr::null,
};

use storebridge_abi::constants::HA_ERR_WRONG_COMMAND;

use crate::{
	bridge::HandlerBridge,
	contract::Slot,
	host::{
		AlterInfo, CreateInfo, Handler, IoAndCpuCost, KeyRange, LockRequests, PageRange, Session, Statistics, Table,
		defaults,
	},
};

impl HandlerBridge<'_> {
	/// Forward a status-returning slot and track the resulting state
	fn forward(&mut self, slot: Slot, call: impl FnOnce(&mut Self) -> Option<i32>, absent: i32) -> i32 {
		if !self.admit(slot) {
			return HA_ERR_WRONG_COMMAND;
		}
		let status = call(self).unwrap_or(absent);
		self.settle(slot, status);
		status
	}
}

impl Handler for HandlerBridge<'_> {
	fn stats(&self) -> &Statistics {
		&self.ffi.stats
	}

	fn position_ref(&self) -> &[u8] {
		self.ffi.position()
	}

	fn index_type(&self, index: u32) -> &CStr {
		if !self.admit(Slot::IndexType) {
			return defaults::index_type();
		}
		let name: *const c_char = match self.contract.index_type {
			Some(f) => f(self.header_const(), index),
			None => null(),
		};
		if name.is_null() {
			return defaults::index_type();
		}
		// SAFETY: engines return static NUL-terminated names
		unsafe { CStr::from_ptr(name) }
	}

	fn table_flags(&self) -> u64 {
		match self.contract.table_flags {
			Some(f) if self.admit(Slot::TableFlags) => f(self.header_const()),
			_ => defaults::table_flags(),
		}
	}

	fn index_flags(&self, index: u32, part: u32, all_parts: bool) -> u64 {
		match self.contract.index_flags {
			Some(f) if self.admit(Slot::IndexFlags) => f(self.header_const(), index, part, all_parts),
			_ => defaults::index_flags(),
		}
	}

	fn max_supported_record_length(&self) -> u32 {
		match self.contract.max_supported_record_length {
			Some(f) if self.admit(Slot::MaxSupportedRecordLength) => f(self.header_const()),
			_ => defaults::max_supported_record_length(),
		}
	}

	fn max_supported_keys(&self) -> u32 {
		match self.contract.max_supported_keys {
			Some(f) if self.admit(Slot::MaxSupportedKeys) => f(self.header_const()),
			_ => defaults::max_supported_keys(),
		}
	}

	fn max_supported_key_parts(&self) -> u32 {
		match self.contract.max_supported_key_parts {
			Some(f) if self.admit(Slot::MaxSupportedKeyParts) => f(self.header_const()),
			_ => defaults::max_supported_key_parts(),
		}
	}

	fn max_supported_key_length(&self) -> u32 {
		match self.contract.max_supported_key_length {
			Some(f) if self.admit(Slot::MaxSupportedKeyLength) => f(self.header_const()),
			_ => defaults::max_supported_key_length(),
		}
	}

	fn scan_time(&mut self) -> IoAndCpuCost {
		match self.contract.scan_time {
			Some(f) if self.admit(Slot::ScanTime) => f(self.header_mut()),
			_ => defaults::scan_time(self.stats()),
		}
	}

	fn keyread_time(&mut self, index: u32, ranges: u64, rows: u64, blocks: u64) -> IoAndCpuCost {
		match self.contract.keyread_time {
			Some(f) if self.admit(Slot::KeyreadTime) => f(self.header_mut(), index, ranges, rows, blocks),
			_ => defaults::keyread_time(ranges, rows, blocks),
		}
	}

	fn rnd_pos_time(&mut self, rows: u64) -> IoAndCpuCost {
		match self.contract.rnd_pos_time {
			Some(f) if self.admit(Slot::RndPosTime) => f(self.header_mut(), rows),
			_ => defaults::rnd_pos_time(self.stats(), rows),
		}
	}

	fn open(&mut self, name: &CStr, mode: i32, test_if_locked: u32) -> i32 {
		let open = self.contract.open;
		self.forward(Slot::Open, |b| Some(open(b.header_mut(), name.as_ptr(), mode, test_if_locked)), 0)
	}

	fn close(&mut self) -> i32 {
		let close = self.contract.close;
		self.forward(Slot::Close, |b| Some(close(b.header_mut())), 0)
	}

	fn create(&mut self, name: &CStr, table: &Table, create_info: &mut CreateInfo) -> i32 {
		let create = self.contract.create;
		self.forward(
			Slot::Create,
			|b| create.map(|f| f(b.header_mut(), name.as_ptr(), table.as_ffi(), create_info.as_ffi())),
			defaults::unsupported(),
		)
	}

	fn delete_table(&mut self, name: &CStr) -> i32 {
		let delete_table = self.contract.delete_table;
		self.forward(
			Slot::DeleteTable,
			|b| delete_table.map(|f| f(b.header_mut(), name.as_ptr())),
			defaults::accepted(),
		)
	}

	fn write_row(&mut self, buf: &[u8]) -> i32 {
		let write_row = self.contract.write_row;
		self.forward(
			Slot::WriteRow,
			|b| write_row.map(|f| f(b.header_mut(), buf.as_ptr(), buf.len())),
			defaults::unsupported(),
		)
	}

	fn update_row(&mut self, old: &[u8], new: &[u8]) -> i32 {
		let update_row = self.contract.update_row;
		self.forward(
			Slot::UpdateRow,
			|b| update_row.map(|f| f(b.header_mut(), old.as_ptr(), old.len(), new.as_ptr(), new.len())),
			defaults::unsupported(),
		)
	}

	fn delete_row(&mut self, buf: &[u8]) -> i32 {
		let delete_row = self.contract.delete_row;
		self.forward(
			Slot::DeleteRow,
			|b| delete_row.map(|f| f(b.header_mut(), buf.as_ptr(), buf.len())),
			defaults::unsupported(),
		)
	}

	fn delete_all_rows(&mut self) -> i32 {
		let delete_all_rows = self.contract.delete_all_rows;
		self.forward(Slot::DeleteAllRows, |b| delete_all_rows.map(|f| f(b.header_mut())), defaults::unsupported())
	}

	fn index_read_map(&mut self, buf: &mut [u8], key: &[u8], keypart_map: u64, find_flag: u32) -> i32 {
		let index_read_map = self.contract.index_read_map;
		self.forward(
			Slot::IndexReadMap,
			|b| {
				index_read_map.map(|f| {
					f(b.header_mut(), buf.as_mut_ptr(), buf.len(), key.as_ptr(), key.len(), keypart_map, find_flag)
				})
			},
			defaults::unsupported(),
		)
	}

	fn index_next(&mut self, buf: &mut [u8]) -> i32 {
		let index_next = self.contract.index_next;
		self.forward(
			Slot::IndexNext,
			|b| index_next.map(|f| f(b.header_mut(), buf.as_mut_ptr(), buf.len())),
			defaults::unsupported(),
		)
	}

	fn index_prev(&mut self, buf: &mut [u8]) -> i32 {
		let index_prev = self.contract.index_prev;
		self.forward(
			Slot::IndexPrev,
			|b| index_prev.map(|f| f(b.header_mut(), buf.as_mut_ptr(), buf.len())),
			defaults::unsupported(),
		)
	}

	fn index_first(&mut self, buf: &mut [u8]) -> i32 {
		let index_first = self.contract.index_first;
		self.forward(
			Slot::IndexFirst,
			|b| index_first.map(|f| f(b.header_mut(), buf.as_mut_ptr(), buf.len())),
			defaults::unsupported(),
		)
	}

	fn index_last(&mut self, buf: &mut [u8]) -> i32 {
		let index_last = self.contract.index_last;
		self.forward(
			Slot::IndexLast,
			|b| index_last.map(|f| f(b.header_mut(), buf.as_mut_ptr(), buf.len())),
			defaults::unsupported(),
		)
	}

	fn rnd_init(&mut self, scan: bool) -> i32 {
		let rnd_init = self.contract.rnd_init;
		self.forward(Slot::RndInit, |b| Some(rnd_init(b.header_mut(), scan)), 0)
	}

	fn rnd_next(&mut self, buf: &mut [u8]) -> i32 {
		let rnd_next = self.contract.rnd_next;
		self.forward(Slot::RndNext, |b| Some(rnd_next(b.header_mut(), buf.as_mut_ptr(), buf.len())), 0)
	}

	fn rnd_end(&mut self) -> i32 {
		let rnd_end = self.contract.rnd_end;
		self.forward(Slot::RndEnd, |b| Some(rnd_end(b.header_mut())), 0)
	}

	fn rnd_pos(&mut self, buf: &mut [u8], pos: &[u8]) -> i32 {
		let rnd_pos = self.contract.rnd_pos;
		self.forward(
			Slot::RndPos,
			|b| rnd_pos.map(|f| f(b.header_mut(), buf.as_mut_ptr(), buf.len(), pos.as_ptr(), pos.len())),
			defaults::unsupported(),
		)
	}

	fn position(&mut self, record: &[u8]) {
		if let Some(f) = self.contract.position
			&& self.admit(Slot::Position)
		{
			f(self.header_mut(), record.as_ptr(), record.len());
		}
	}

	fn info(&mut self, flag: u32) -> i32 {
		let info = self.contract.info;
		self.forward(Slot::Info, |b| info.map(|f| f(b.header_mut(), flag)), defaults::accepted())
	}

	fn extra(&mut self, operation: u32) -> i32 {
		let extra = self.contract.extra;
		self.forward(Slot::Extra, |b| extra.map(|f| f(b.header_mut(), operation)), defaults::accepted())
	}

	fn records_in_range(
		&mut self,
		index: u32,
		min: Option<&KeyRange<'_>>,
		max: Option<&KeyRange<'_>>,
		pages: &mut PageRange,
	) -> u64 {
		let Some(f) = self.contract.records_in_range else {
			return defaults::records_in_range();
		};
		if !self.admit(Slot::RecordsInRange) {
			return defaults::records_in_range();
		}

		let min = min.map(KeyRange::to_ffi);
		let max = max.map(KeyRange::to_ffi);
		f(
			self.header_mut(),
			index,
			min.as_ref().map_or(null(), |range| range as *const _),
			max.as_ref().map_or(null(), |range| range as *const _),
			pages,
		)
	}

	fn external_lock(&mut self, session: &mut Session, lock_kind: i32) -> i32 {
		let external_lock = self.contract.external_lock;
		self.forward(
			Slot::ExternalLock,
			|b| external_lock.map(|f| f(b.header_mut(), session.as_ffi(), lock_kind)),
			defaults::accepted(),
		)
	}

	fn store_lock(&mut self, session: &mut Session, to: &mut LockRequests, lock_type: i32) {
		if let Some(f) = self.contract.store_lock
			&& self.admit(Slot::StoreLock)
		{
			let mut list = to.as_ffi();
			let len = f(self.header_mut(), session.as_ffi(), &mut list, lock_type);
			to.set_len(len);
		}
	}

	fn check_if_supported_inplace_alter(&mut self, altered: &Table, alter_info: &mut AlterInfo) -> u32 {
		match self.contract.check_if_supported_inplace_alter {
			Some(f) if self.admit(Slot::CheckIfSupportedInplaceAlter) => {
				f(self.header_mut(), altered.as_ffi(), alter_info.as_ffi())
			}
			_ => defaults::check_if_supported_inplace_alter(),
		}
	}
}
