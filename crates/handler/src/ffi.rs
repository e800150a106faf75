// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Exported C entry points of the factory
//!
//! Host code that is not Rust creates and destroys bridges through these two functions. All host
//! objects are passed as the opaque pointers produced by the matching `as_ffi` methods.

use storebridge_abi::{
	bridge::HandlerBridgeFFI,
	constants::HA_OK,
	handler::HandlerVTableFFI,
	host::{ArenaFFI, HostTypeFFI, TableShareFFI},
};
use tracing::{error, warn};

use crate::{
	arena::Arena,
	bridge::HandlerBridge,
	error::{BridgeError, ContractError, Result},
	factory::HandlerFactory,
	host::{HostType, TableShare},
};

/// Create a bridged handler
///
/// # Parameters
/// - `host_type`: Registered engine type
/// - `share`: Schema of the table
/// - `arena`: Arena that will own the handler
/// - `vtable`: The engine's contract; validated before any slot runs
/// - `out`: Receives the handler header on success
///
/// # Returns
/// - 0 on success
/// - `HA_ERR_NO_CONNECTION` if the contract is unusable
/// - `HA_ERR_OUT_OF_MEM` if the arena is exhausted
/// - The engine's status if its construct failed
#[unsafe(no_mangle)]
pub extern "C" fn storebridge_handler_create(
	host_type: *const HostTypeFFI,
	share: *const TableShareFFI,
	arena: *mut ArenaFFI,
	vtable: *const HandlerVTableFFI,
	out: *mut *mut HandlerBridgeFFI,
) -> i32 {
	match create(host_type, share, arena, vtable, out) {
		Ok(()) => HA_OK,
		Err(err) => {
			error!(%err, "failed to create handler");
			err.status()
		}
	}
}

fn create(
	host_type: *const HostTypeFFI,
	share: *const TableShareFFI,
	arena: *mut ArenaFFI,
	vtable: *const HandlerVTableFFI,
	out: *mut *mut HandlerBridgeFFI,
) -> Result<()> {
	if out.is_null() {
		return Err(BridgeError::NullArgument("out"));
	}

	// SAFETY: the host passes pointers produced by `as_ffi` on objects that outlive the handler
	let vtable = unsafe { vtable.as_ref() }.ok_or(ContractError::NullVtable)?;
	let host_type = unsafe { HostType::from_ffi(host_type) }.ok_or(BridgeError::NullArgument("host_type"))?;
	let share = unsafe { TableShare::from_ffi(share) }.ok_or(BridgeError::NullArgument("share"))?;
	let arena = unsafe { Arena::from_ffi(arena) }.ok_or(BridgeError::NullArgument("arena"))?;

	let bridge = HandlerFactory::default().create_from_vtable(host_type, share, arena, vtable)?;

	// SAFETY: checked for null above
	unsafe { *out = bridge.as_ffi() };
	Ok(())
}

/// Destroy a bridged handler
///
/// Runs the engine's destruct. The storage stays in the arena until the arena is dropped. Null
/// and already destroyed handlers are ignored.
#[unsafe(no_mangle)]
pub extern "C" fn storebridge_handler_destroy(handler: *mut HandlerBridgeFFI) {
	// SAFETY: non-null handlers come from `storebridge_handler_create`
	let Some(bridge) = (unsafe { HandlerBridge::from_ffi(handler) }) else {
		warn!("destroy called with a null handler");
		return;
	};
	HandlerFactory::default().destroy(bridge);
}
