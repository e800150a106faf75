// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Validated operation contract
//!
//! A [`HandlerContract`] is a [`HandlerVTableFFI`] whose mandatory slots are known to be present
//! and whose API version the host understands. It is built once when an engine registers and
//! shared read-only by every bridge created from it.

mod builder;
mod slot;

use std::fmt::{self, Debug, Formatter};

pub use builder::ContractBuilder;
pub use slot::Slot;
use storebridge_abi::{
	constants::{MAX_API_VERSION, MIN_API_VERSION},
	handler::{
		ConstructFnFFI, CreateFnFFI, DestructFnFFI, ExternalLockFnFFI, FlagFnFFI, HandlerVTableFFI,
		IndexFlagsFnFFI, IndexReadMapFnFFI, IndexTypeFnFFI, InplaceAlterFnFFI, KeyreadTimeFnFFI, LimitFnFFI,
		NameFnFFI, OpenFnFFI, PositionFnFFI, ReadFnFFI, RecordsInRangeFnFFI, RndInitFnFFI, RndPosFnFFI,
		RndPosTimeFnFFI, RowFnFFI, ScanTimeFnFFI, StatusFnFFI, StoreLockFnFFI, TableFlagsFnFFI,
		UpdateRowFnFFI,
	},
};
use tracing::error;

use crate::error::ContractError;

#[derive(Clone, Copy)]
pub struct HandlerContract {
	api_version: u32,
	flags: u32,

	pub(crate) construct: ConstructFnFFI,
	pub(crate) destruct: DestructFnFFI,
	pub(crate) index_type: Option<IndexTypeFnFFI>,
	pub(crate) table_flags: Option<TableFlagsFnFFI>,
	pub(crate) index_flags: Option<IndexFlagsFnFFI>,
	pub(crate) max_supported_record_length: Option<LimitFnFFI>,
	pub(crate) max_supported_keys: Option<LimitFnFFI>,
	pub(crate) max_supported_key_parts: Option<LimitFnFFI>,
	pub(crate) max_supported_key_length: Option<LimitFnFFI>,
	pub(crate) scan_time: Option<ScanTimeFnFFI>,
	pub(crate) keyread_time: Option<KeyreadTimeFnFFI>,
	pub(crate) rnd_pos_time: Option<RndPosTimeFnFFI>,
	pub(crate) open: OpenFnFFI,
	pub(crate) close: StatusFnFFI,
	pub(crate) write_row: Option<RowFnFFI>,
	pub(crate) update_row: Option<UpdateRowFnFFI>,
	pub(crate) delete_row: Option<RowFnFFI>,
	pub(crate) index_read_map: Option<IndexReadMapFnFFI>,
	pub(crate) index_next: Option<ReadFnFFI>,
	pub(crate) index_prev: Option<ReadFnFFI>,
	pub(crate) index_first: Option<ReadFnFFI>,
	pub(crate) index_last: Option<ReadFnFFI>,
	pub(crate) rnd_init: RndInitFnFFI,
	pub(crate) rnd_end: StatusFnFFI,
	pub(crate) rnd_next: ReadFnFFI,
	pub(crate) rnd_pos: Option<RndPosFnFFI>,
	pub(crate) position: Option<PositionFnFFI>,
	pub(crate) info: Option<FlagFnFFI>,
	pub(crate) extra: Option<FlagFnFFI>,
	pub(crate) external_lock: Option<ExternalLockFnFFI>,
	pub(crate) delete_all_rows: Option<StatusFnFFI>,
	pub(crate) records_in_range: Option<RecordsInRangeFnFFI>,
	pub(crate) delete_table: Option<NameFnFFI>,
	pub(crate) create: Option<CreateFnFFI>,
	pub(crate) check_if_supported_inplace_alter: Option<InplaceAlterFnFFI>,
	pub(crate) store_lock: Option<StoreLockFnFFI>,
}

impl HandlerContract {
	/// Validate a raw vtable
	///
	/// Fails with every missing mandatory slot listed, so a broken engine is reported in one go.
	pub fn from_vtable(vtable: &HandlerVTableFFI) -> Result<Self, ContractError> {
		if !(MIN_API_VERSION..=MAX_API_VERSION).contains(&vtable.api_version) {
			error!(version = vtable.api_version, "handler contract has an unsupported API version");
			return Err(ContractError::UnsupportedVersion {
				version: vtable.api_version,
				min: MIN_API_VERSION,
				max: MAX_API_VERSION,
			});
		}

		let (
			Some(construct),
			Some(destruct),
			Some(open),
			Some(close),
			Some(rnd_init),
			Some(rnd_end),
			Some(rnd_next),
		) = (
			vtable.construct,
			vtable.destruct,
			vtable.open,
			vtable.close,
			vtable.rnd_init,
			vtable.rnd_end,
			vtable.rnd_next,
		)
		else {
			let missing: Vec<Slot> =
				Slot::MANDATORY.iter().copied().filter(|slot| !slot.is_present(vtable)).collect();
			error!(?missing, "handler contract is missing mandatory slots");
			return Err(ContractError::MissingSlots(missing));
		};

		Ok(Self {
			api_version: vtable.api_version,
			flags: vtable.flags,
			construct,
			destruct,
			index_type: vtable.index_type,
			table_flags: vtable.table_flags,
			index_flags: vtable.index_flags,
			max_supported_record_length: vtable.max_supported_record_length,
			max_supported_keys: vtable.max_supported_keys,
			max_supported_key_parts: vtable.max_supported_key_parts,
			max_supported_key_length: vtable.max_supported_key_length,
			scan_time: vtable.scan_time,
			keyread_time: vtable.keyread_time,
			rnd_pos_time: vtable.rnd_pos_time,
			open,
			close,
			write_row: vtable.write_row,
			update_row: vtable.update_row,
			delete_row: vtable.delete_row,
			index_read_map: vtable.index_read_map,
			index_next: vtable.index_next,
			index_prev: vtable.index_prev,
			index_first: vtable.index_first,
			index_last: vtable.index_last,
			rnd_init,
			rnd_end,
			rnd_next,
			rnd_pos: vtable.rnd_pos,
			position: vtable.position,
			info: vtable.info,
			extra: vtable.extra,
			external_lock: vtable.external_lock,
			delete_all_rows: vtable.delete_all_rows,
			records_in_range: vtable.records_in_range,
			delete_table: vtable.delete_table,
			create: vtable.create,
			check_if_supported_inplace_alter: vtable.check_if_supported_inplace_alter,
			store_lock: vtable.store_lock,
		})
	}

	/// The contract as a raw vtable again
	pub fn to_vtable(&self) -> HandlerVTableFFI {
		HandlerVTableFFI {
			api_version: self.api_version,
			flags: self.flags,
			construct: Some(self.construct),
			destruct: Some(self.destruct),
			index_type: self.index_type,
			table_flags: self.table_flags,
			index_flags: self.index_flags,
			max_supported_record_length: self.max_supported_record_length,
			max_supported_keys: self.max_supported_keys,
			max_supported_key_parts: self.max_supported_key_parts,
			max_supported_key_length: self.max_supported_key_length,
			scan_time: self.scan_time,
			keyread_time: self.keyread_time,
			rnd_pos_time: self.rnd_pos_time,
			open: Some(self.open),
			close: Some(self.close),
			write_row: self.write_row,
			update_row: self.update_row,
			delete_row: self.delete_row,
			index_read_map: self.index_read_map,
			index_next: self.index_next,
			index_prev: self.index_prev,
			index_first: self.index_first,
			index_last: self.index_last,
			rnd_init: Some(self.rnd_init),
			rnd_end: Some(self.rnd_end),
			rnd_next: Some(self.rnd_next),
			rnd_pos: self.rnd_pos,
			position: self.position,
			info: self.info,
			extra: self.extra,
			external_lock: self.external_lock,
			delete_all_rows: self.delete_all_rows,
			records_in_range: self.records_in_range,
			delete_table: self.delete_table,
			create: self.create,
			check_if_supported_inplace_alter: self.check_if_supported_inplace_alter,
			store_lock: self.store_lock,
		}
	}

	pub fn api_version(&self) -> u32 {
		self.api_version
	}

	pub fn flags(&self) -> u32 {
		self.flags
	}

	/// Whether the contract declares a `CONTRACT_*` capability
	pub fn has_flag(&self, flag: u32) -> bool {
		self.flags & flag != 0
	}

	/// Whether the engine fills `slot` itself rather than leaving it to the host default
	pub fn supports(&self, slot: Slot) -> bool {
		slot.is_present(&self.to_vtable())
	}
}

impl Debug for HandlerContract {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let vtable = self.to_vtable();
		let slots: Vec<&str> =
			Slot::ALL.iter().filter(|slot| slot.is_present(&vtable)).map(|slot| slot.name()).collect();
		f.debug_struct("HandlerContract")
			.field("api_version", &self.api_version)
			.field("flags", &self.flags)
			.field("slots", &slots)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use storebridge_abi::handler::{CONTRACT_OWN_LOCKING, CONTRACT_STABLE_POSITION};
	use storebridge_testing::probe;

	use super::*;
	use crate::bridge::HandlerBridge;

	fn assert_send_sync<T: Send + Sync>() {}

	fn assert_send<T: Send>() {}

	#[test]
	fn test_contract_is_shareable() {
		assert_send_sync::<HandlerContract>();
	}

	#[test]
	fn test_bridge_can_change_threads() {
		assert_send::<HandlerBridge<'static>>();
	}

	#[test]
	fn test_minimal_vtable_is_accepted() {
		let contract = HandlerContract::from_vtable(&probe::minimal_vtable()).unwrap();
		for slot in Slot::ALL {
			assert_eq!(contract.supports(slot), slot.is_mandatory(), "{slot}");
		}
	}

	#[test]
	fn test_full_vtable_round_trips() {
		let vtable = probe::full_vtable();
		let contract = HandlerContract::from_vtable(&vtable).unwrap();
		let back = contract.to_vtable();
		for slot in Slot::ALL {
			assert!(slot.is_present(&back), "{slot}");
		}
		assert_eq!(back.api_version, vtable.api_version);
	}

	#[test]
	fn test_every_missing_slot_is_reported() {
		let mut vtable = probe::full_vtable();
		Slot::Open.clear(&mut vtable);
		Slot::RndNext.clear(&mut vtable);
		Slot::WriteRow.clear(&mut vtable);

		let err = HandlerContract::from_vtable(&vtable).err().unwrap();
		assert_eq!(err, ContractError::MissingSlots(vec![Slot::Open, Slot::RndNext]));
	}

	#[test]
	fn test_unsupported_version() {
		let mut vtable = probe::full_vtable();
		vtable.api_version = MAX_API_VERSION + 1;
		let err = HandlerContract::from_vtable(&vtable).err().unwrap();
		assert!(matches!(err, ContractError::UnsupportedVersion { version, .. } if version == MAX_API_VERSION + 1));

		vtable.api_version = 0;
		assert!(HandlerContract::from_vtable(&vtable).is_err());
	}

	#[test]
	fn test_flags() {
		let mut vtable = probe::minimal_vtable();
		vtable.flags = CONTRACT_STABLE_POSITION;
		let contract = HandlerContract::from_vtable(&vtable).unwrap();
		assert!(contract.has_flag(CONTRACT_STABLE_POSITION));
		assert!(!contract.has_flag(CONTRACT_OWN_LOCKING));
	}
}
