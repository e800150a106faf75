// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use storebridge_abi::constants::{HA_ERR_INTERNAL_ERROR, HA_ERR_NO_CONNECTION, HA_ERR_OUT_OF_MEM};

use crate::contract::Slot;

pub type Result<T> = std::result::Result<T, BridgeError>;

/// A contract that cannot be used at all
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
	#[error("handler vtable is null")]
	NullVtable,

	#[error("unsupported handler API version {version} (supported {min}..={max})")]
	UnsupportedVersion {
		version: u32,
		min: u32,
		max: u32,
	},

	#[error("handler contract is missing mandatory slots: {}", SlotList(.0))]
	MissingSlots(Vec<Slot>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArenaError {
	#[error("arena exhausted: requested {requested} bytes, {remaining} remaining")]
	Exhausted {
		requested: usize,
		remaining: usize,
	},

	#[error("invalid allocation layout (size {size}, align {align})")]
	Layout {
		size: usize,
		align: usize,
	},
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
	#[error(transparent)]
	Contract(#[from] ContractError),

	#[error(transparent)]
	Arena(#[from] ArenaError),

	#[error("engine construct failed with status {status}")]
	Construct {
		status: i32,
	},

	#[error("null {0} passed across the handler boundary")]
	NullArgument(&'static str),

	#[error("failed to load engine library: {0}")]
	Library(String),
}

impl BridgeError {
	/// Status code reported to the host for this error
	pub fn status(&self) -> i32 {
		match self {
			BridgeError::Contract(_) | BridgeError::Library(_) => HA_ERR_NO_CONNECTION,
			BridgeError::Arena(_) => HA_ERR_OUT_OF_MEM,
			BridgeError::Construct {
				status,
			} => *status,
			BridgeError::NullArgument(_) => HA_ERR_INTERNAL_ERROR,
		}
	}
}

struct SlotList<'a>(&'a [Slot]);

impl Display for SlotList<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		for (i, slot) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			f.write_str(slot.name())?;
		}
		Ok(())
	}
}
