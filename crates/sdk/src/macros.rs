// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Declarative macros for engine libraries

/// Export a storage engine type from a shared library
///
/// Generates the two symbols the host looks up when loading an engine library:
/// `storebridge_engine_api_version` and `storebridge_engine_descriptor`. The descriptor is built on
/// first use and lives for the rest of the process.
///
/// # Example
/// ```ignore
/// use storebridge_sdk::prelude::*;
///
/// struct MyEngine;
/// impl StorageEngine for MyEngine { ... }
///
/// export_storage_engine!(MyEngine);
/// ```
#[macro_export]
macro_rules! export_storage_engine {
	($engine:ty) => {
		/// The API version this engine was built against
		#[unsafe(no_mangle)]
		pub extern "C" fn storebridge_engine_api_version() -> u32 {
			$crate::abi::constants::CURRENT_API_VERSION
		}

		/// The engine descriptor: name, host type flags and handler vtable
		#[unsafe(no_mangle)]
		pub extern "C" fn storebridge_engine_descriptor() -> *const $crate::abi::handler::EngineDescriptorFFI {
			static DESCRIPTOR: ::std::sync::OnceLock<$crate::abi::handler::EngineDescriptorFFI> =
				::std::sync::OnceLock::new();
			DESCRIPTOR.get_or_init($crate::vtable::descriptor::<$engine>)
		}
	};
}
