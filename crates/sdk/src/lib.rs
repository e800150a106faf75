// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! storebridge SDK
//!
//! Write a storage engine as a plain Rust type implementing [`StorageEngine`], then export it with
//! [`export_storage_engine!`]. The SDK builds the C vtable, keeps engine instances behind the opaque
//! foreign-state handle and contains panics at the boundary.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod engine;
pub mod error;
pub mod macros;
mod pool;
pub mod tag;
pub mod vtable;

pub use engine::{ConstructContext, KeyRange, LockList, StorageEngine};
pub use error::{StorageError, StorageResult};
pub use storebridge_abi as abi;
pub use tag::type_tag;
pub use vtable::{build_vtable, descriptor};

pub mod prelude {
	pub use std::ffi::CStr;

	pub use crate::{
		ConstructContext, KeyRange, LockList, StorageEngine, StorageError, StorageResult,
		abi::{
			bridge::StatisticsFFI as Statistics,
			handler::{IoAndCpuCostFFI as IoAndCpuCost, PageRangeFFI as PageRange},
		},
		export_storage_engine,
	};
}
