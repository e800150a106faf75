// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::contract::Slot;

/// Lifecycle of a bridged handler
///
/// ```text
/// Uninitialized -> Constructed -> Opened <-> {Scanning | IndexPositioned}
///                                  Opened <-> Closed
///                    any live state -> Destroyed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerState {
	Uninitialized,
	Constructed,
	Opened,
	Scanning,
	IndexPositioned,
	Closed,
	Destroyed,
}

impl HandlerState {
	/// The table is open (possibly with a cursor)
	pub const fn is_open(self) -> bool {
		matches!(self, HandlerState::Opened | HandlerState::Scanning | HandlerState::IndexPositioned)
	}

	/// Constructed and not yet destroyed
	pub const fn is_live(self) -> bool {
		!matches!(self, HandlerState::Uninitialized | HandlerState::Destroyed)
	}

	/// Whether `slot` may be invoked in this state
	pub fn permits(self, slot: Slot) -> bool {
		match slot {
			Slot::Construct => self == HandlerState::Uninitialized,
			Slot::Open => matches!(self, HandlerState::Constructed | HandlerState::Closed),
			Slot::RndNext | Slot::RndEnd => self == HandlerState::Scanning,
			Slot::IndexNext | Slot::IndexPrev => self == HandlerState::IndexPositioned,
			Slot::Close
			| Slot::RndInit
			| Slot::RndPos
			| Slot::Position
			| Slot::IndexReadMap
			| Slot::IndexFirst
			| Slot::IndexLast
			| Slot::WriteRow
			| Slot::UpdateRow
			| Slot::DeleteRow
			| Slot::DeleteAllRows
			| Slot::Info
			| Slot::RecordsInRange => self.is_open(),
			Slot::Destruct
			| Slot::IndexType
			| Slot::TableFlags
			| Slot::IndexFlags
			| Slot::MaxSupportedRecordLength
			| Slot::MaxSupportedKeys
			| Slot::MaxSupportedKeyParts
			| Slot::MaxSupportedKeyLength
			| Slot::ScanTime
			| Slot::KeyreadTime
			| Slot::RndPosTime
			| Slot::Extra
			| Slot::ExternalLock
			| Slot::StoreLock
			| Slot::DeleteTable
			| Slot::Create
			| Slot::CheckIfSupportedInplaceAlter => self.is_live(),
		}
	}

	/// State after `slot` returned `status`
	pub fn after(self, slot: Slot, status: i32) -> HandlerState {
		let ok = status == 0;
		match slot {
			Slot::Construct if ok => HandlerState::Constructed,
			Slot::Open if ok => HandlerState::Opened,
			Slot::Close if ok => HandlerState::Closed,
			Slot::RndInit if ok => HandlerState::Scanning,
			// the cursor is gone even if the engine complains
			Slot::RndEnd => HandlerState::Opened,
			Slot::IndexReadMap | Slot::IndexFirst | Slot::IndexLast => HandlerState::IndexPositioned,
			Slot::Destruct => HandlerState::Destroyed,
			_ => self,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_construct_only_once() {
		assert!(HandlerState::Uninitialized.permits(Slot::Construct));
		assert!(!HandlerState::Constructed.permits(Slot::Construct));
		assert!(!HandlerState::Destroyed.permits(Slot::Construct));
	}

	#[test]
	fn test_failed_construct_stays_uninitialized() {
		assert_eq!(HandlerState::Uninitialized.after(Slot::Construct, 128), HandlerState::Uninitialized);
		assert_eq!(HandlerState::Uninitialized.after(Slot::Construct, 0), HandlerState::Constructed);
	}

	#[test]
	fn test_open_close_cycle() {
		let state = HandlerState::Constructed.after(Slot::Open, 0);
		assert_eq!(state, HandlerState::Opened);
		let state = state.after(Slot::Close, 0);
		assert_eq!(state, HandlerState::Closed);
		assert!(state.permits(Slot::Open));
		assert_eq!(state.after(Slot::Open, 0), HandlerState::Opened);
	}

	#[test]
	fn test_failed_open_keeps_state() {
		assert_eq!(HandlerState::Constructed.after(Slot::Open, 155), HandlerState::Constructed);
	}

	#[test]
	fn test_scan_requires_init() {
		assert!(!HandlerState::Opened.permits(Slot::RndNext));
		let state = HandlerState::Opened.after(Slot::RndInit, 0);
		assert!(state.permits(Slot::RndNext));
		assert_eq!(state.after(Slot::RndNext, 137), HandlerState::Scanning);
		assert_eq!(state.after(Slot::RndEnd, 0), HandlerState::Opened);
	}

	#[test]
	fn test_cursors_are_exclusive() {
		let scanning = HandlerState::Opened.after(Slot::RndInit, 0);
		let positioned = scanning.after(Slot::IndexFirst, 0);
		assert_eq!(positioned, HandlerState::IndexPositioned);
		assert!(!positioned.permits(Slot::RndNext));
		assert!(positioned.permits(Slot::IndexNext));
		assert_eq!(positioned.after(Slot::RndInit, 0), HandlerState::Scanning);
	}

	#[test]
	fn test_row_ops_need_open_table() {
		assert!(!HandlerState::Constructed.permits(Slot::WriteRow));
		assert!(!HandlerState::Closed.permits(Slot::Info));
		assert!(HandlerState::Scanning.permits(Slot::Position));
		assert!(HandlerState::Constructed.permits(Slot::TableFlags));
		assert!(HandlerState::Closed.permits(Slot::Create));
		assert!(!HandlerState::Destroyed.permits(Slot::Destruct));
	}
}
