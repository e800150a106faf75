// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The host's storage handler interface and the objects it passes around

pub mod defaults;
mod handler;
mod types;

pub use handler::Handler;
pub use types::{
	AlterInfo, CreateInfo, HostType, IoAndCpuCost, KeyInfo, KeyRange, LockRequests, PageRange, Session, Statistics,
	Table, TableShare,
};
