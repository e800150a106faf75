// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Opaque host objects
//!
//! Host objects cross the boundary only as pointers to these zero-sized types. An engine that
//! needs to look inside one goes through the host's own accessors; the ABI never exposes their
//! layout.

/// Opaque host storage engine type (one per registered engine)
#[repr(C)]
pub struct HostTypeFFI {
	_private: [u8; 0],
}

/// Opaque table schema shared by every handler of one table
#[repr(C)]
pub struct TableShareFFI {
	_private: [u8; 0],
}

/// Opaque opened table, passed to `create` and in-place alter checks
#[repr(C)]
pub struct TableFFI {
	_private: [u8; 0],
}

/// Opaque host arena that owns the storage of a handler
#[repr(C)]
pub struct ArenaFFI {
	_private: [u8; 0],
}

/// Opaque table creation options
#[repr(C)]
pub struct CreateInfoFFI {
	_private: [u8; 0],
}

/// Opaque description of a pending ALTER TABLE
#[repr(C)]
pub struct AlterInfoFFI {
	_private: [u8; 0],
}

/// Opaque session (connection / transaction owner)
#[repr(C)]
pub struct SessionFFI {
	_private: [u8; 0],
}
