// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Host side of the storebridge handler bridge
//!
//! A storage engine implemented outside the host fills a [`HandlerVTableFFI`] once. The host
//! validates it into a [`HandlerContract`], and the [`HandlerFactory`] places one [`HandlerBridge`]
//! per open table handle into a scope-bound [`Arena`]. The bridge implements the host's
//! [`Handler`] interface by forwarding every operation to the contract.
//!
//! [`HandlerVTableFFI`]: storebridge_abi::handler::HandlerVTableFFI

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod arena;
pub mod bridge;
pub mod config;
pub mod contract;
pub mod error;
pub mod factory;
pub mod ffi;
pub mod host;
pub mod loader;

pub use arena::Arena;
pub use bridge::{HandlerBridge, HandlerState};
pub use config::{ArenaConfig, BridgeConfig, LifecycleGuard};
pub use contract::{ContractBuilder, HandlerContract, Slot};
pub use error::{ArenaError, BridgeError, ContractError, Result};
pub use factory::HandlerFactory;
pub use host::Handler;
pub use loader::EngineLibrary;
pub use storebridge_abi as abi;
