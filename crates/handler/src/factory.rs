// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Creation and teardown of bridged handlers

use storebridge_abi::{constants::is_ok, handler::HandlerVTableFFI};
use tracing::{debug, instrument};

use crate::{
	arena::Arena,
	bridge::HandlerBridge,
	config::BridgeConfig,
	contract::HandlerContract,
	error::{BridgeError, Result},
	host::{HostType, TableShare},
};

/// Places bridges in an arena and runs the engine's construct / destruct around them
#[derive(Debug, Clone, Default)]
pub struct HandlerFactory {
	config: BridgeConfig,
}

impl HandlerFactory {
	pub fn new(config: BridgeConfig) -> Self {
		Self {
			config,
		}
	}

	pub fn config(&self) -> &BridgeConfig {
		&self.config
	}

	/// Create a bridge for one open table handle
	///
	/// The bridge lives in `arena` and borrows everything else; all of it must outlive the bridge.
	/// Fails with the engine's status if its construct does not return success, in which case
	/// destruct is never called.
	#[instrument(name = "handler::create", level = "debug", skip_all, fields(engine = host_type.name(), table = share.table_name()))]
	pub fn create<'a>(
		&self,
		host_type: &'a HostType,
		share: &'a TableShare,
		arena: &'a Arena,
		contract: &'a HandlerContract,
	) -> Result<&'a mut HandlerBridge<'a>> {
		let bridge = arena.place(HandlerBridge::new(contract, host_type, share, self.config.guard))?;

		let status = bridge.construct(arena);
		if !is_ok(status) {
			debug!(status, "engine construct failed");
			return Err(BridgeError::Construct {
				status,
			});
		}

		debug!(arena_used = arena.used(), state = bridge.foreign_state(), "handler created");
		Ok(bridge)
	}

	/// Validate `vtable`, copy the contract into `arena` and create a bridge from it
	///
	/// A vtable that fails validation invokes no slot at all.
	pub fn create_from_vtable<'a>(
		&self,
		host_type: &'a HostType,
		share: &'a TableShare,
		arena: &'a Arena,
		vtable: &HandlerVTableFFI,
	) -> Result<&'a mut HandlerBridge<'a>> {
		let contract = HandlerContract::from_vtable(vtable)?;
		let contract: &'a HandlerContract = arena.place(contract)?;
		self.create(host_type, share, arena, contract)
	}

	/// Tear a bridge down
	///
	/// Runs destruct exactly once; later calls only log. The arena reclaims the storage itself.
	#[instrument(name = "handler::destroy", level = "debug", skip_all, fields(engine = bridge.host_type().name()))]
	pub fn destroy(&self, bridge: &mut HandlerBridge<'_>) {
		bridge.destruct();
		debug!("handler destroyed");
	}
}
