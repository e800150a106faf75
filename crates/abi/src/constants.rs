// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Constants and version information for the handler ABI

/// Current API version
///
/// This version must be incremented when the vtable gains slots. Slots are only ever appended, so a
/// host accepts any version between [`MIN_API_VERSION`] and [`MAX_API_VERSION`].
pub const CURRENT_API_VERSION: u32 = 1;

/// Minimum supported API version
pub const MIN_API_VERSION: u32 = 1;

/// Maximum supported API version
pub const MAX_API_VERSION: u32 = 1;

// ==================== Status Codes ====================
// Status codes are taken from the host's handler error space. The bridge relays them unchanged.

/// Success
pub const HA_OK: i32 = 0;
/// Didn't find key on read or update
pub const HA_ERR_KEY_NOT_FOUND: i32 = 120;
/// Duplicate key on write
pub const HA_ERR_FOUND_DUPP_KEY: i32 = 121;
/// Internal error
pub const HA_ERR_INTERNAL_ERROR: i32 = 122;
/// Update with is recoverable
pub const HA_ERR_RECORD_CHANGED: i32 = 123;
/// Wrong index given to function
pub const HA_ERR_WRONG_INDEX: i32 = 124;
/// Index file is crashed
pub const HA_ERR_CRASHED: i32 = 126;
/// Record file is crashed
pub const HA_ERR_WRONG_IN_RECORD: i32 = 127;
/// Out of memory
pub const HA_ERR_OUT_OF_MEM: i32 = 128;
/// Initialization failed and should be retried
pub const HA_ERR_RETRY_INIT: i32 = 129;
/// Not a table file
pub const HA_ERR_NOT_A_TABLE: i32 = 130;
/// Command not supported
pub const HA_ERR_WRONG_COMMAND: i32 = 131;
/// Old database file
pub const HA_ERR_OLD_FILE: i32 = 132;
/// No record read in update
pub const HA_ERR_NO_ACTIVE_RECORD: i32 = 133;
/// A record is not there
pub const HA_ERR_RECORD_DELETED: i32 = 134;
/// No more room in record file
pub const HA_ERR_RECORD_FILE_FULL: i32 = 135;
/// No more room in index file
pub const HA_ERR_INDEX_FILE_FULL: i32 = 136;
/// End in next/prev/first/last
pub const HA_ERR_END_OF_FILE: i32 = 137;
/// Unsupported extension used
pub const HA_ERR_UNSUPPORTED: i32 = 138;
/// Too big row
pub const HA_ERR_TO_BIG_ROW: i32 = 139;
/// Wrong create option
pub const HA_WRONG_CREATE_OPTION: i32 = 140;
/// Duplicate unique on write
pub const HA_ERR_FOUND_DUPP_UNIQUE: i32 = 141;
/// Can't open charset
pub const HA_ERR_UNKNOWN_CHARSET: i32 = 142;
/// Conflicting tables in MERGE
pub const HA_ERR_WRONG_MRG_TABLE_DEF: i32 = 143;
/// Last (automatic?) repair failed
pub const HA_ERR_CRASHED_ON_REPAIR: i32 = 144;
/// Table must be repaired
pub const HA_ERR_CRASHED_ON_USAGE: i32 = 145;
pub const HA_ERR_LOCK_WAIT_TIMEOUT: i32 = 146;
pub const HA_ERR_LOCK_TABLE_FULL: i32 = 147;
/// Updates not allowed
pub const HA_ERR_READ_ONLY_TRANSACTION: i32 = 148;
pub const HA_ERR_LOCK_DEADLOCK: i32 = 149;
/// Cannot add a foreign key constraint
pub const HA_ERR_CANNOT_ADD_FOREIGN: i32 = 150;
/// Cannot add a child row
pub const HA_ERR_NO_REFERENCED_ROW: i32 = 151;
/// Cannot delete a parent row
pub const HA_ERR_ROW_IS_REFERENCED: i32 = 152;
/// No savepoint with that name
pub const HA_ERR_NO_SAVEPOINT: i32 = 153;
/// Non unique key block size
pub const HA_ERR_NON_UNIQUE_BLOCK_SIZE: i32 = 154;
/// The table does not exist in engine
pub const HA_ERR_NO_SUCH_TABLE: i32 = 155;
/// The table existed in storage engine
pub const HA_ERR_TABLE_EXIST: i32 = 156;
/// Could not connect to storage engine
///
/// Returned by the factory when a contract cannot be used at all.
pub const HA_ERR_NO_CONNECTION: i32 = 157;
/// NULLs are not supported in spatial index
pub const HA_ERR_NULL_IN_SPATIAL: i32 = 158;
/// The table changed in storage engine
pub const HA_ERR_TABLE_DEF_CHANGED: i32 = 159;
/// There's no partition in table for given value
pub const HA_ERR_NO_PARTITION_FOUND: i32 = 160;
/// Row-based binlogging of row failed
pub const HA_ERR_RBR_LOGGING_FAILED: i32 = 161;
/// Index needed in foreign key constraint
pub const HA_ERR_DROP_INDEX_FK: i32 = 162;
/// Upholding foreign key constraints would lead to a duplicate key error in another table
pub const HA_ERR_FOREIGN_DUPLICATE_KEY: i32 = 163;
/// The table changed in storage engine
pub const HA_ERR_TABLE_NEEDS_UPGRADE: i32 = 164;
/// The table is not writable
pub const HA_ERR_TABLE_READONLY: i32 = 165;
/// Failed to get next autoinc value
pub const HA_ERR_AUTOINC_READ_FAILED: i32 = 166;
/// Failed to set row autoinc value
pub const HA_ERR_AUTOINC_ERANGE: i32 = 167;
/// Generic error
pub const HA_ERR_GENERIC: i32 = 168;
/// Row not actually updated: new values same as the old values
pub const HA_ERR_RECORD_IS_THE_SAME: i32 = 169;
/// It is not possible to log this statement
pub const HA_ERR_LOGGING_IMPOSSIBLE: i32 = 170;
/// The event was corrupt, leading to illegal data being read
pub const HA_ERR_CORRUPT_EVENT: i32 = 171;
/// New file format
pub const HA_ERR_NEW_FILE: i32 = 172;
/// The event could not be processed
pub const HA_ERR_ROWS_EVENT_APPLY: i32 = 173;
/// Error during initialization
pub const HA_ERR_INITIALIZATION: i32 = 174;
/// File too short
pub const HA_ERR_FILE_TOO_SHORT: i32 = 175;
/// Wrong CRC on page
pub const HA_ERR_WRONG_CRC: i32 = 176;

// ==================== Host Limits ====================

/// Default maximum record length
pub const HA_MAX_REC_LENGTH: u32 = 65535;

/// Default maximum number of key parts
pub const MAX_REF_PARTS: u32 = 32;

/// Default maximum key length in bytes
pub const MAX_DATA_LENGTH_FOR_KEY: u32 = 3072;

/// Block size used by the default cost model
pub const IO_SIZE: u64 = 4096;

/// Row estimate returned by `records_in_range` when the engine gives none
pub const DEFAULT_RECORDS_IN_RANGE: u64 = 10;

/// Capacity of the position buffer in every bridged handler
pub const MAX_REF_LENGTH: usize = 64;

/// Position length used until the engine sets its own during `construct`
pub const DEFAULT_REF_LENGTH: u32 = 8;

/// Size of the type identifier tag in every bridged handler
pub const TYPE_ID_LENGTH: usize = 16;

// ==================== Standard Symbols ====================

/// Symbol name for getting the engine descriptor
pub const SYMBOL_ENGINE_DESCRIPTOR: &[u8] = b"storebridge_engine_descriptor\0";

/// Symbol name for getting the API version
pub const SYMBOL_API_VERSION: &[u8] = b"storebridge_engine_api_version\0";

/// Returns true if `status` is the host's success code
#[inline]
pub const fn is_ok(status: i32) -> bool {
	status == HA_OK
}
