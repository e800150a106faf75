// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The bridge adapter
//!
//! A [`HandlerBridge`] implements [`Handler`](crate::host::Handler) by forwarding every operation
//! to its contract. Its C-visible header is the first field, so the pointer every slot receives is
//! also a pointer to the bridge itself.

mod forward;
mod state;

use std::fmt::{self, Debug, Formatter};

pub use state::HandlerState;
use storebridge_abi::{
	bridge::HandlerBridgeFFI,
	constants::{HA_ERR_WRONG_COMMAND, TYPE_ID_LENGTH},
};
use tracing::{trace, warn};

use crate::{
	arena::Arena,
	config::LifecycleGuard,
	contract::{HandlerContract, Slot},
	host::{HostType, TableShare},
};

#[repr(C)]
pub struct HandlerBridge<'a> {
	ffi: HandlerBridgeFFI,
	contract: &'a HandlerContract,
	host_type: &'a HostType,
	share: &'a TableShare,
	state: HandlerState,
	guard: LifecycleGuard,
}

impl<'a> HandlerBridge<'a> {
	pub(crate) fn new(
		contract: &'a HandlerContract,
		host_type: &'a HostType,
		share: &'a TableShare,
		guard: LifecycleGuard,
	) -> Self {
		Self {
			ffi: HandlerBridgeFFI::empty(),
			contract,
			host_type,
			share,
			state: HandlerState::Uninitialized,
			guard,
		}
	}

	pub fn state(&self) -> HandlerState {
		self.state
	}

	pub fn contract(&self) -> &'a HandlerContract {
		self.contract
	}

	pub fn host_type(&self) -> &'a HostType {
		self.host_type
	}

	pub fn share(&self) -> &'a TableShare {
		self.share
	}

	/// The foreign-state handle set by the engine. Never interpreted here.
	pub fn foreign_state(&self) -> u64 {
		self.ffi.state
	}

	pub fn type_id(&self) -> [u8; TYPE_ID_LENGTH] {
		self.ffi.type_id
	}

	pub fn header(&self) -> &HandlerBridgeFFI {
		&self.ffi
	}

	pub fn as_ffi(&mut self) -> *mut HandlerBridgeFFI {
		&mut self.ffi
	}

	/// Recover the bridge from the header pointer handed out by [`HandlerBridge::as_ffi`]
	///
	/// # Safety
	/// `ptr` must be null or point at the header of a live bridge with no other reference to it.
	pub unsafe fn from_ffi<'b>(ptr: *mut HandlerBridgeFFI) -> Option<&'b mut HandlerBridge<'b>> {
		unsafe { (ptr as *mut HandlerBridge<'b>).as_mut() }
	}

	/// Check the lifecycle state before forwarding `slot`
	fn admit(&self, slot: Slot) -> bool {
		if self.state.permits(slot) {
			trace!(%slot, state = ?self.state, "forwarding");
			return true;
		}

		warn!(
			%slot,
			state = ?self.state,
			engine = self.host_type.name(),
			table = self.share.table_name(),
			"handler call out of lifecycle order"
		);
		self.guard == LifecycleGuard::Permissive
	}

	fn settle(&mut self, slot: Slot, status: i32) {
		self.state = self.state.after(slot, status);
	}

	fn header_mut(&mut self) -> *mut HandlerBridgeFFI {
		&mut self.ffi
	}

	fn header_const(&self) -> *const HandlerBridgeFFI {
		&self.ffi
	}

	/// Run the engine's `construct`. Exactly once, right after placement.
	///
	/// `arena` is only lent to the engine for this call; the bridge keeps no reference to it.
	pub(crate) fn construct(&mut self, arena: &Arena) -> i32 {
		if !self.admit(Slot::Construct) {
			return HA_ERR_WRONG_COMMAND;
		}
		let status = (self.contract.construct)(
			self.header_mut(),
			self.host_type.as_ffi(),
			arena.as_ffi(),
			self.share.as_ffi(),
		);
		self.settle(Slot::Construct, status);
		status
	}

	/// Run the engine's `destruct` unless it already ran
	///
	/// A bridge whose construct failed never reaches the engine again.
	pub(crate) fn destruct(&mut self) {
		match self.state {
			HandlerState::Destroyed => {
				warn!(engine = self.host_type.name(), "handler destroyed twice");
				return;
			}
			HandlerState::Uninitialized => {
				warn!(engine = self.host_type.name(), "destroying a handler that was never constructed");
			}
			_ => (self.contract.destruct)(self.header_mut()),
		}
		self.state = HandlerState::Destroyed;
	}
}

impl Debug for HandlerBridge<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("HandlerBridge")
			.field("engine", &self.host_type.name())
			.field("table", &self.share.table_name())
			.field("state", &self.state)
			.field("foreign_state", &self.ffi.state)
			.field("guard", &self.guard)
			.finish()
	}
}
