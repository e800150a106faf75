// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use storebridge_abi::handler::HandlerVTableFFI;

/// A named slot of the handler vtable, in ABI order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Slot {
	Construct,
	Destruct,
	IndexType,
	TableFlags,
	IndexFlags,
	MaxSupportedRecordLength,
	MaxSupportedKeys,
	MaxSupportedKeyParts,
	MaxSupportedKeyLength,
	ScanTime,
	KeyreadTime,
	RndPosTime,
	Open,
	Close,
	WriteRow,
	UpdateRow,
	DeleteRow,
	IndexReadMap,
	IndexNext,
	IndexPrev,
	IndexFirst,
	IndexLast,
	RndInit,
	RndEnd,
	RndNext,
	RndPos,
	Position,
	Info,
	Extra,
	ExternalLock,
	DeleteAllRows,
	RecordsInRange,
	DeleteTable,
	Create,
	CheckIfSupportedInplaceAlter,
	StoreLock,
}

impl Slot {
	pub const ALL: [Slot; 36] = [
		Slot::Construct,
		Slot::Destruct,
		Slot::IndexType,
		Slot::TableFlags,
		Slot::IndexFlags,
		Slot::MaxSupportedRecordLength,
		Slot::MaxSupportedKeys,
		Slot::MaxSupportedKeyParts,
		Slot::MaxSupportedKeyLength,
		Slot::ScanTime,
		Slot::KeyreadTime,
		Slot::RndPosTime,
		Slot::Open,
		Slot::Close,
		Slot::WriteRow,
		Slot::UpdateRow,
		Slot::DeleteRow,
		Slot::IndexReadMap,
		Slot::IndexNext,
		Slot::IndexPrev,
		Slot::IndexFirst,
		Slot::IndexLast,
		Slot::RndInit,
		Slot::RndEnd,
		Slot::RndNext,
		Slot::RndPos,
		Slot::Position,
		Slot::Info,
		Slot::Extra,
		Slot::ExternalLock,
		Slot::DeleteAllRows,
		Slot::RecordsInRange,
		Slot::DeleteTable,
		Slot::Create,
		Slot::CheckIfSupportedInplaceAlter,
		Slot::StoreLock,
	];

	/// Slots a contract must provide to be usable
	pub const MANDATORY: [Slot; 7] = [
		Slot::Construct,
		Slot::Destruct,
		Slot::Open,
		Slot::Close,
		Slot::RndInit,
		Slot::RndEnd,
		Slot::RndNext,
	];

	/// Position of the slot in the vtable
	pub const fn index(self) -> usize {
		self as usize
	}

	pub const fn is_mandatory(self) -> bool {
		matches!(
			self,
			Slot::Construct
				| Slot::Destruct
				| Slot::Open
				| Slot::Close
				| Slot::RndInit
				| Slot::RndEnd
				| Slot::RndNext
		)
	}

	pub const fn name(self) -> &'static str {
		match self {
			Slot::Construct => "construct",
			Slot::Destruct => "destruct",
			Slot::IndexType => "index_type",
			Slot::TableFlags => "table_flags",
			Slot::IndexFlags => "index_flags",
			Slot::MaxSupportedRecordLength => "max_supported_record_length",
			Slot::MaxSupportedKeys => "max_supported_keys",
			Slot::MaxSupportedKeyParts => "max_supported_key_parts",
			Slot::MaxSupportedKeyLength => "max_supported_key_length",
			Slot::ScanTime => "scan_time",
			Slot::KeyreadTime => "keyread_time",
			Slot::RndPosTime => "rnd_pos_time",
			Slot::Open => "open",
			Slot::Close => "close",
			Slot::WriteRow => "write_row",
			Slot::UpdateRow => "update_row",
			Slot::DeleteRow => "delete_row",
			Slot::IndexReadMap => "index_read_map",
			Slot::IndexNext => "index_next",
			Slot::IndexPrev => "index_prev",
			Slot::IndexFirst => "index_first",
			Slot::IndexLast => "index_last",
			Slot::RndInit => "rnd_init",
			Slot::RndEnd => "rnd_end",
			Slot::RndNext => "rnd_next",
			Slot::RndPos => "rnd_pos",
			Slot::Position => "position",
			Slot::Info => "info",
			Slot::Extra => "extra",
			Slot::ExternalLock => "external_lock",
			Slot::DeleteAllRows => "delete_all_rows",
			Slot::RecordsInRange => "records_in_range",
			Slot::DeleteTable => "delete_table",
			Slot::Create => "create",
			Slot::CheckIfSupportedInplaceAlter => "check_if_supported_inplace_alter",
			Slot::StoreLock => "store_lock",
		}
	}

	/// Whether `vtable` fills this slot
	pub fn is_present(self, vtable: &HandlerVTableFFI) -> bool {
		match self {
			Slot::Construct => vtable.construct.is_some(),
			Slot::Destruct => vtable.destruct.is_some(),
			Slot::IndexType => vtable.index_type.is_some(),
			Slot::TableFlags => vtable.table_flags.is_some(),
			Slot::IndexFlags => vtable.index_flags.is_some(),
			Slot::MaxSupportedRecordLength => vtable.max_supported_record_length.is_some(),
			Slot::MaxSupportedKeys => vtable.max_supported_keys.is_some(),
			Slot::MaxSupportedKeyParts => vtable.max_supported_key_parts.is_some(),
			Slot::MaxSupportedKeyLength => vtable.max_supported_key_length.is_some(),
			Slot::ScanTime => vtable.scan_time.is_some(),
			Slot::KeyreadTime => vtable.keyread_time.is_some(),
			Slot::RndPosTime => vtable.rnd_pos_time.is_some(),
			Slot::Open => vtable.open.is_some(),
			Slot::Close => vtable.close.is_some(),
			Slot::WriteRow => vtable.write_row.is_some(),
			Slot::UpdateRow => vtable.update_row.is_some(),
			Slot::DeleteRow => vtable.delete_row.is_some(),
			Slot::IndexReadMap => vtable.index_read_map.is_some(),
			Slot::IndexNext => vtable.index_next.is_some(),
			Slot::IndexPrev => vtable.index_prev.is_some(),
			Slot::IndexFirst => vtable.index_first.is_some(),
			Slot::IndexLast => vtable.index_last.is_some(),
			Slot::RndInit => vtable.rnd_init.is_some(),
			Slot::RndEnd => vtable.rnd_end.is_some(),
			Slot::RndNext => vtable.rnd_next.is_some(),
			Slot::RndPos => vtable.rnd_pos.is_some(),
			Slot::Position => vtable.position.is_some(),
			Slot::Info => vtable.info.is_some(),
			Slot::Extra => vtable.extra.is_some(),
			Slot::ExternalLock => vtable.external_lock.is_some(),
			Slot::DeleteAllRows => vtable.delete_all_rows.is_some(),
			Slot::RecordsInRange => vtable.records_in_range.is_some(),
			Slot::DeleteTable => vtable.delete_table.is_some(),
			Slot::Create => vtable.create.is_some(),
			Slot::CheckIfSupportedInplaceAlter => vtable.check_if_supported_inplace_alter.is_some(),
			Slot::StoreLock => vtable.store_lock.is_some(),
		}
	}

	/// Null this slot in `vtable`
	pub fn clear(self, vtable: &mut HandlerVTableFFI) {
		match self {
			Slot::Construct => vtable.construct = None,
			Slot::Destruct => vtable.destruct = None,
			Slot::IndexType => vtable.index_type = None,
			Slot::TableFlags => vtable.table_flags = None,
			Slot::IndexFlags => vtable.index_flags = None,
			Slot::MaxSupportedRecordLength => vtable.max_supported_record_length = None,
			Slot::MaxSupportedKeys => vtable.max_supported_keys = None,
			Slot::MaxSupportedKeyParts => vtable.max_supported_key_parts = None,
			Slot::MaxSupportedKeyLength => vtable.max_supported_key_length = None,
			Slot::ScanTime => vtable.scan_time = None,
			Slot::KeyreadTime => vtable.keyread_time = None,
			Slot::RndPosTime => vtable.rnd_pos_time = None,
			Slot::Open => vtable.open = None,
			Slot::Close => vtable.close = None,
			Slot::WriteRow => vtable.write_row = None,
			Slot::UpdateRow => vtable.update_row = None,
			Slot::DeleteRow => vtable.delete_row = None,
			Slot::IndexReadMap => vtable.index_read_map = None,
			Slot::IndexNext => vtable.index_next = None,
			Slot::IndexPrev => vtable.index_prev = None,
			Slot::IndexFirst => vtable.index_first = None,
			Slot::IndexLast => vtable.index_last = None,
			Slot::RndInit => vtable.rnd_init = None,
			Slot::RndEnd => vtable.rnd_end = None,
			Slot::RndNext => vtable.rnd_next = None,
			Slot::RndPos => vtable.rnd_pos = None,
			Slot::Position => vtable.position = None,
			Slot::Info => vtable.info = None,
			Slot::Extra => vtable.extra = None,
			Slot::ExternalLock => vtable.external_lock = None,
			Slot::DeleteAllRows => vtable.delete_all_rows = None,
			Slot::RecordsInRange => vtable.records_in_range = None,
			Slot::DeleteTable => vtable.delete_table = None,
			Slot::Create => vtable.create = None,
			Slot::CheckIfSupportedInplaceAlter => vtable.check_if_supported_inplace_alter = None,
			Slot::StoreLock => vtable.store_lock = None,
		}
	}
}

impl Display for Slot {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
