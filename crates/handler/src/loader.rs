// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Loading storage engines from shared libraries

use std::{
	ffi::CStr,
	path::{Path, PathBuf},
};

use libloading::{Library, Symbol};
use storebridge_abi::{
	constants::{MAX_API_VERSION, MIN_API_VERSION, SYMBOL_API_VERSION, SYMBOL_ENGINE_DESCRIPTOR},
	handler::EngineDescriptorFFI,
};
use tracing::{debug, error, instrument};

use crate::{
	contract::HandlerContract,
	error::{BridgeError, ContractError, Result},
	host::HostType,
};

/// `storebridge_engine_api_version`
pub type ApiVersionFn = extern "C" fn() -> u32;
/// `storebridge_engine_descriptor`
pub type DescriptorFn = extern "C" fn() -> *const EngineDescriptorFFI;

/// A storage engine loaded from a shared library
///
/// The library stays loaded for as long as this value lives, which keeps every function pointer
/// in the contract valid.
pub struct EngineLibrary {
	path: PathBuf,
	host_type: HostType,
	contract: HandlerContract,
	_library: Library,
}

impl EngineLibrary {
	/// Load an engine library and validate its contract
	#[instrument(name = "engine::load", level = "debug", skip_all, fields(path = %path.as_ref().display()))]
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();

		// SAFETY: loading a library runs its initializers; engine libraries are trusted
		let library = unsafe { Library::new(path) }.map_err(|e| BridgeError::Library(e.to_string()))?;

		let (api_version, descriptor) = unsafe {
			let api_version: Symbol<ApiVersionFn> =
				library.get(SYMBOL_API_VERSION).map_err(|e| BridgeError::Library(e.to_string()))?;
			let descriptor: Symbol<DescriptorFn> =
				library.get(SYMBOL_ENGINE_DESCRIPTOR).map_err(|e| BridgeError::Library(e.to_string()))?;
			(*api_version, *descriptor)
		};
		// SAFETY: both entry points live in the library we keep loaded
		let (host_type, contract) = unsafe { bind(api_version, descriptor) }?;

		debug!(engine = host_type.name(), version = contract.api_version(), "engine library loaded");

		Ok(Self {
			path: path.to_path_buf(),
			host_type,
			contract,
			_library: library,
		})
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn host_type(&self) -> &HostType {
		&self.host_type
	}

	pub fn contract(&self) -> &HandlerContract {
		&self.contract
	}
}

fn check_version(version: u32) -> Result<()> {
	if (MIN_API_VERSION..=MAX_API_VERSION).contains(&version) {
		return Ok(());
	}
	error!(version, "engine built against an unsupported API version");
	Err(ContractError::UnsupportedVersion {
		version,
		min: MIN_API_VERSION,
		max: MAX_API_VERSION,
	}
	.into())
}

/// Resolve an engine from its two exported entry points
///
/// The API version is checked before the descriptor entry point is called.
///
/// # Safety
/// `descriptor` must return null or a pointer to a descriptor that stays valid while the
/// contract is in use, with a name as required by [`describe`].
pub unsafe fn bind(api_version: ApiVersionFn, descriptor: DescriptorFn) -> Result<(HostType, HandlerContract)> {
	check_version(api_version())?;
	let descriptor = unsafe { descriptor().as_ref() }.ok_or(ContractError::NullVtable)?;
	unsafe { describe(descriptor) }
}

/// Turn an engine descriptor into a host type and validated contract
///
/// # Safety
/// `descriptor.name` must be null or a valid NUL-terminated string.
pub unsafe fn describe(descriptor: &EngineDescriptorFFI) -> Result<(HostType, HandlerContract)> {
	check_version(descriptor.api_version)?;

	if descriptor.name.is_null() {
		return Err(BridgeError::NullArgument("engine name"));
	}
	let name = unsafe { CStr::from_ptr(descriptor.name) }.to_string_lossy().into_owned();

	let contract = HandlerContract::from_vtable(&descriptor.vtable)?;
	Ok((HostType::new(name).with_flags(descriptor.flags), contract))
}
