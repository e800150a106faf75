// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

// ==================== Table Flags ====================

/// Transactions are not supported
pub const HA_NO_TRANSACTIONS: u64 = 1 << 0;
/// Read may not return all columns
pub const HA_PARTIAL_COLUMN_READ: u64 = 1 << 1;
/// Data and index are in the same file
pub const HA_TABLE_SCAN_ON_INDEX: u64 = 1 << 2;
/// Records may not be returned in sequence by `rnd_next`; the host positions every matched row
pub const HA_REC_NOT_IN_SEQ: u64 = 1 << 3;
pub const HA_CAN_GEOMETRY: u64 = 1 << 4;
/// Reading keys in random order is as fast as reading keys in sort order
pub const HA_FAST_KEY_READ: u64 = 1 << 5;
/// Deletes should force all keys to be read
pub const HA_REQUIRES_KEY_COLUMNS_FOR_DELETE: u64 = 1 << 6;
/// Keys may contain NULL
pub const HA_NULL_IN_KEY: u64 = 1 << 7;
/// `position()` gives a duplicate row
pub const HA_DUPLICATE_POS: u64 = 1 << 8;
/// Doesn't support blobs
pub const HA_NO_BLOBS: u64 = 1 << 9;
/// Blobs can be added to an index
pub const HA_CAN_INDEX_BLOBS: u64 = 1 << 10;
/// Auto-increment in a multi-part key
pub const HA_AUTO_PART_KEY: u64 = 1 << 11;
/// Every table needs a user-specified primary key
pub const HA_REQUIRE_PRIMARY_KEY: u64 = 1 << 12;
/// `stats.records` is exact
pub const HA_STATS_RECORDS_IS_EXACT: u64 = 1 << 13;
/// `position()` uses the primary key given by the record argument
pub const HA_PRIMARY_KEY_REQUIRED_FOR_POSITION: u64 = 1 << 16;
/// A primary key is needed to delete and update a row
pub const HA_PRIMARY_KEY_REQUIRED_FOR_DELETE: u64 = 1 << 20;
pub const HA_NO_AUTO_INCREMENT: u64 = 1 << 23;
/// Table data are stored in separate files
pub const HA_FILE_BASED: u64 = 1 << 26;
/// `rnd_pos` is a slow operation
pub const HA_SLOW_RND_POS: u64 = 1 << 48;

// ==================== Index Flags ====================

/// The index supports `index_next`
pub const HA_READ_NEXT: u64 = 1;
/// The index supports `index_prev`
pub const HA_READ_PREV: u64 = 2;
/// The index returns records in key order
pub const HA_READ_ORDER: u64 = 4;
/// The index supports range scans
pub const HA_READ_RANGE: u64 = 8;
/// The index can only be used with all key parts
pub const HA_ONLY_WHOLE_INDEX: u64 = 16;
/// The key can be read without reading the row
pub const HA_KEYREAD_ONLY: u64 = 64;

// ==================== Read Functions ====================
// How `index_read_map` compares the search key against stored keys.

/// Find the first record with exactly the key
pub const HA_READ_KEY_EXACT: u32 = 0;
/// Record or next record
pub const HA_READ_KEY_OR_NEXT: u32 = 1;
/// Record or previous record
pub const HA_READ_KEY_OR_PREV: u32 = 2;
/// Find the next record after the key
pub const HA_READ_AFTER_KEY: u32 = 3;
/// Find the record before the key
pub const HA_READ_BEFORE_KEY: u32 = 4;
/// Key which has the same prefix
pub const HA_READ_PREFIX: u32 = 5;
/// Last key with the same prefix
pub const HA_READ_PREFIX_LAST: u32 = 6;
/// Last key with the same prefix, or the previous one
pub const HA_READ_PREFIX_LAST_OR_PREV: u32 = 7;

// ==================== Info Flags ====================

pub const HA_STATUS_POS: u32 = 1;
/// Don't take locks while reading statistics
pub const HA_STATUS_NO_LOCK: u32 = 2;
pub const HA_STATUS_TIME: u32 = 4;
/// Refresh values that only change on schema changes
pub const HA_STATUS_CONST: u32 = 8;
/// Refresh row counts and file lengths
pub const HA_STATUS_VARIABLE: u32 = 16;
pub const HA_STATUS_ERRKEY: u32 = 32;
pub const HA_STATUS_AUTO: u32 = 64;

// ==================== Extra Functions ====================
// Behavioral hints passed through `extra()`.

pub const HA_EXTRA_NORMAL: u32 = 0;
pub const HA_EXTRA_QUICK: u32 = 1;
pub const HA_EXTRA_NOT_USED: u32 = 2;
/// Cache records in `rnd_next`
pub const HA_EXTRA_CACHE: u32 = 3;
/// End caching of records
pub const HA_EXTRA_NO_CACHE: u32 = 4;
pub const HA_EXTRA_NO_READCHECK: u32 = 5;
pub const HA_EXTRA_READCHECK: u32 = 6;
/// Read only the key
pub const HA_EXTRA_KEYREAD: u32 = 7;
/// Normal read of records
pub const HA_EXTRA_NO_KEYREAD: u32 = 8;
pub const HA_EXTRA_NO_USER_CHANGE: u32 = 9;
pub const HA_EXTRA_RESET_STATE: u32 = 15;

// ==================== External Lock Kinds ====================

/// Acquire a read lock
pub const F_RDLCK: i32 = 0;
/// Acquire a write lock
pub const F_WRLCK: i32 = 1;
/// Release the lock
pub const F_UNLCK: i32 = 2;

// ==================== Table Lock Types ====================
// Lock strengths negotiated through `store_lock`.

pub const TL_IGNORE: i32 = -1;
/// Unlock, or "no lock requested yet"
pub const TL_UNLOCK: i32 = 0;
pub const TL_READ_DEFAULT: i32 = 1;
pub const TL_READ: i32 = 2;
pub const TL_READ_WITH_SHARED_LOCKS: i32 = 3;
pub const TL_READ_HIGH_PRIORITY: i32 = 4;
pub const TL_READ_NO_INSERT: i32 = 5;
pub const TL_WRITE_ALLOW_WRITE: i32 = 6;
pub const TL_WRITE_CONCURRENT_INSERT: i32 = 7;
pub const TL_WRITE_DEFAULT: i32 = 8;
pub const TL_WRITE_LOW_PRIORITY: i32 = 9;
pub const TL_WRITE: i32 = 10;
pub const TL_WRITE_ONLY: i32 = 11;

// ==================== In-place Alter Verdicts ====================

pub const HA_ALTER_ERROR: u32 = 0;
pub const HA_ALTER_INPLACE_COPY_NO_LOCK: u32 = 1;
pub const HA_ALTER_INPLACE_COPY_LOCK: u32 = 2;
/// The change needs a full table rebuild
pub const HA_ALTER_INPLACE_NOT_SUPPORTED: u32 = 3;
pub const HA_ALTER_INPLACE_EXCLUSIVE_LOCK: u32 = 4;
pub const HA_ALTER_INPLACE_SHARED_LOCK: u32 = 5;
pub const HA_ALTER_INPLACE_NOCOPY_LOCK: u32 = 6;
pub const HA_ALTER_INPLACE_NOCOPY_NO_LOCK: u32 = 7;
/// Metadata-only change
pub const HA_ALTER_INPLACE_INSTANT: u32 = 8;

// ==================== Open Modes ====================

pub const O_RDONLY: i32 = 0;
pub const O_RDWR: i32 = 2;

// ==================== Contract Flags ====================
// Bits of `HandlerVTableFFI::flags`. New capabilities are gated here rather than by reordering slots.

/// The engine's `position()` / `rnd_pos()` pair is usable for sorted result revisits
pub const CONTRACT_STABLE_POSITION: u32 = 1 << 0;

/// The engine negotiates table locks itself through `store_lock`
pub const CONTRACT_OWN_LOCKING: u32 = 1 << 1;

/// Helper to check if a flag is set
///
/// # Example
/// ```
/// use storebridge_abi::handler::*;
///
/// let flags = HA_NO_TRANSACTIONS | HA_FILE_BASED;
/// assert!(has_flag(flags, HA_FILE_BASED));
/// assert!(!has_flag(flags, HA_NO_BLOBS));
/// ```
#[inline]
pub const fn has_flag(flags: u64, flag: u64) -> bool {
	(flags & flag) != 0
}
