// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use storebridge_abi::handler::{
	ConstructFnFFI, CreateFnFFI, DestructFnFFI, ExternalLockFnFFI, FlagFnFFI, HandlerVTableFFI, IndexFlagsFnFFI,
	IndexReadMapFnFFI, IndexTypeFnFFI, InplaceAlterFnFFI, KeyreadTimeFnFFI, LimitFnFFI, NameFnFFI, OpenFnFFI,
	PositionFnFFI, ReadFnFFI, RecordsInRangeFnFFI, RndInitFnFFI, RndPosFnFFI, RndPosTimeFnFFI, RowFnFFI,
	ScanTimeFnFFI, StatusFnFFI, StoreLockFnFFI, TableFlagsFnFFI, UpdateRowFnFFI,
};

use crate::{
	contract::{HandlerContract, Slot},
	error::ContractError,
};

macro_rules! slot_setters {
	($($slot:ident: $ty:ty),* $(,)?) => {
		$(
			pub fn $slot(mut self, f: $ty) -> Self {
				self.vtable.$slot = Some(f);
				self
			}
		)*
	};
}

/// Builds a [`HandlerContract`] slot by slot
///
/// ```ignore
/// let contract = ContractBuilder::new()
/// 	.construct(construct)
/// 	.destruct(destruct)
/// 	.open(open)
/// 	.close(close)
/// 	.rnd_init(rnd_init)
/// 	.rnd_end(rnd_end)
/// 	.rnd_next(rnd_next)
/// 	.build()?;
/// ```
#[derive(Clone, Copy, Default)]
pub struct ContractBuilder {
	vtable: HandlerVTableFFI,
}

impl ContractBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Start from an existing vtable
	pub fn from_vtable(vtable: HandlerVTableFFI) -> Self {
		Self {
			vtable,
		}
	}

	pub fn api_version(mut self, api_version: u32) -> Self {
		self.vtable.api_version = api_version;
		self
	}

	pub fn flags(mut self, flags: u32) -> Self {
		self.vtable.flags = flags;
		self
	}

	/// Null `slot` again
	pub fn without(mut self, slot: Slot) -> Self {
		slot.clear(&mut self.vtable);
		self
	}

	slot_setters! {
		construct: ConstructFnFFI,
		destruct: DestructFnFFI,
		index_type: IndexTypeFnFFI,
		table_flags: TableFlagsFnFFI,
		index_flags: IndexFlagsFnFFI,
		max_supported_record_length: LimitFnFFI,
		max_supported_keys: LimitFnFFI,
		max_supported_key_parts: LimitFnFFI,
		max_supported_key_length: LimitFnFFI,
		scan_time: ScanTimeFnFFI,
		keyread_time: KeyreadTimeFnFFI,
		rnd_pos_time: RndPosTimeFnFFI,
		open: OpenFnFFI,
		close: StatusFnFFI,
		write_row: RowFnFFI,
		update_row: UpdateRowFnFFI,
		delete_row: RowFnFFI,
		index_read_map: IndexReadMapFnFFI,
		index_next: ReadFnFFI,
		index_prev: ReadFnFFI,
		index_first: ReadFnFFI,
		index_last: ReadFnFFI,
		rnd_init: RndInitFnFFI,
		rnd_end: StatusFnFFI,
		rnd_next: ReadFnFFI,
		rnd_pos: RndPosFnFFI,
		position: PositionFnFFI,
		info: FlagFnFFI,
		extra: FlagFnFFI,
		external_lock: ExternalLockFnFFI,
		delete_all_rows: StatusFnFFI,
		records_in_range: RecordsInRangeFnFFI,
		delete_table: NameFnFFI,
		create: CreateFnFFI,
		check_if_supported_inplace_alter: InplaceAlterFnFFI,
		store_lock: StoreLockFnFFI,
	}

	/// The vtable as built so far, unvalidated
	pub fn into_vtable(self) -> HandlerVTableFFI {
		self.vtable
	}

	pub fn build(self) -> Result<HandlerContract, ContractError> {
		HandlerContract::from_vtable(&self.vtable)
	}
}

#[cfg(test)]
mod tests {
	use storebridge_abi::{bridge::HandlerBridgeFFI, constants::CURRENT_API_VERSION};
	use storebridge_testing::probe;

	use super::*;

	extern "C" fn write_row(_: *mut HandlerBridgeFFI, _: *const u8, _: usize) -> i32 {
		0
	}

	#[test]
	fn test_empty_builder_reports_all_mandatory_slots() {
		let err = ContractBuilder::new().build().unwrap_err();
		assert_eq!(err, ContractError::MissingSlots(Slot::MANDATORY.to_vec()));
	}

	#[test]
	fn test_optional_slot_alone_is_not_enough() {
		let err = ContractBuilder::new().write_row(write_row).build().unwrap_err();
		assert_eq!(err, ContractError::MissingSlots(Slot::MANDATORY.to_vec()));
	}

	#[test]
	fn test_without_removes_slot() {
		let err = ContractBuilder::from_vtable(probe::minimal_vtable()).without(Slot::Destruct).build().unwrap_err();
		assert_eq!(err, ContractError::MissingSlots(vec![Slot::Destruct]));
	}

	#[test]
	fn test_build_with_optional_slot() {
		let contract = ContractBuilder::from_vtable(probe::minimal_vtable()).write_row(write_row).build().unwrap();
		assert!(contract.supports(Slot::WriteRow));
		assert!(!contract.supports(Slot::DeleteRow));
		assert_eq!(contract.api_version(), CURRENT_API_VERSION);
	}
}
