// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Host objects handed to handlers
//!
//! Each crosses the boundary as one of the opaque pointers in [`storebridge_abi::host`]. The
//! `from_ffi` casts are only valid for pointers produced by the matching `as_ffi`.

use storebridge_abi::{
	bridge::StatisticsFFI,
	handler::{IoAndCpuCostFFI, KeyRangeFFI, LockListFFI, LockRequestFFI, PageRangeFFI},
	host::{AlterInfoFFI, CreateInfoFFI, HostTypeFFI, SessionFFI, TableFFI, TableShareFFI},
};

pub type IoAndCpuCost = IoAndCpuCostFFI;
pub type PageRange = PageRangeFFI;
pub type Statistics = StatisticsFFI;

macro_rules! opaque {
	($ty:ty, $ffi:ty) => {
		impl $ty {
			pub fn as_ffi(&self) -> *const $ffi {
				self as *const Self as *const $ffi
			}

			/// # Safety
			/// `ptr` must be null or come from `as_ffi` on a value that outlives `'a`.
			pub unsafe fn from_ffi<'a>(ptr: *const $ffi) -> Option<&'a Self> {
				unsafe { (ptr as *const Self).as_ref() }
			}
		}
	};
	(mut $ty:ty, $ffi:ty) => {
		impl $ty {
			pub fn as_ffi(&mut self) -> *mut $ffi {
				self as *mut Self as *mut $ffi
			}

			/// # Safety
			/// `ptr` must be null or come from `as_ffi` on a value that outlives `'a`, with no other
			/// live reference to it.
			pub unsafe fn from_ffi<'a>(ptr: *mut $ffi) -> Option<&'a mut Self> {
				unsafe { (ptr as *mut Self).as_mut() }
			}
		}
	};
}

/// A registered storage engine type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostType {
	name: String,
	flags: u32,
}

impl HostType {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			flags: 0,
		}
	}

	pub fn with_flags(mut self, flags: u32) -> Self {
		self.flags = flags;
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn flags(&self) -> u32 {
		self.flags
	}
}

opaque!(HostType, HostTypeFFI);

/// One index of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInfo {
	pub name: String,
	/// Number of key parts
	pub parts: u32,
	/// Length of the key image in bytes
	pub length: u32,
	pub unique: bool,
}

impl KeyInfo {
	pub fn new(name: impl Into<String>, parts: u32, length: u32) -> Self {
		Self {
			name: name.into(),
			parts,
			length,
			unique: false,
		}
	}

	pub fn unique(mut self) -> Self {
		self.unique = true;
		self
	}
}

/// Table schema shared by every handler of one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableShare {
	db: String,
	table_name: String,
	path: String,
	reclength: usize,
	keys: Vec<KeyInfo>,
}

impl TableShare {
	pub fn new(db: impl Into<String>, table_name: impl Into<String>) -> Self {
		let db = db.into();
		let table_name = table_name.into();
		let path = format!("./{db}/{table_name}");
		Self {
			db,
			table_name,
			path,
			reclength: 0,
			keys: Vec::new(),
		}
	}

	pub fn with_reclength(mut self, reclength: usize) -> Self {
		self.reclength = reclength;
		self
	}

	pub fn with_key(mut self, key: KeyInfo) -> Self {
		self.keys.push(key);
		self
	}

	pub fn db(&self) -> &str {
		&self.db
	}

	pub fn table_name(&self) -> &str {
		&self.table_name
	}

	/// Path the table is stored under, without extension
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Length of a host-formatted row
	pub fn reclength(&self) -> usize {
		self.reclength
	}

	pub fn keys(&self) -> &[KeyInfo] {
		&self.keys
	}
}

opaque!(TableShare, TableShareFFI);

/// An opened table definition, used by `create` and in-place alter checks
#[derive(Debug, Clone)]
pub struct Table {
	share: TableShare,
	record: Vec<u8>,
}

impl Table {
	pub fn new(share: TableShare) -> Self {
		let record = vec![0; share.reclength()];
		Self {
			share,
			record,
		}
	}

	pub fn share(&self) -> &TableShare {
		&self.share
	}

	/// The table's row buffer
	pub fn record(&mut self) -> &mut [u8] {
		&mut self.record
	}
}

opaque!(Table, TableFFI);

/// Options given to `create`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateInfo {
	pub comment: Option<String>,
	pub auto_increment_value: u64,
}

opaque!(mut CreateInfo, CreateInfoFFI);

/// A pending ALTER TABLE
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlterInfo {
	/// Bits describing what the statement changes
	pub handler_flags: u64,
}

opaque!(mut AlterInfo, AlterInfoFFI);

/// The connection a lock is taken for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
	id: u64,
}

impl Session {
	pub fn new(id: u64) -> Self {
		Self {
			id,
		}
	}

	pub fn id(&self) -> u64 {
		self.id
	}
}

opaque!(mut Session, SessionFFI);

/// One end of a key range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRange<'a> {
	pub key: &'a [u8],
	pub keypart_map: u64,
	/// Read function (`HA_READ_*`)
	pub flag: u32,
}

impl<'a> KeyRange<'a> {
	pub fn new(key: &'a [u8], keypart_map: u64, flag: u32) -> Self {
		Self {
			key,
			keypart_map,
			flag,
		}
	}

	/// The FFI view, borrowing `key`
	pub fn to_ffi(&self) -> KeyRangeFFI {
		KeyRangeFFI::from_slice(self.key, self.keypart_map, self.flag)
	}
}

/// Lock requests collected through `store_lock`
#[derive(Debug, Clone)]
pub struct LockRequests {
	entries: Vec<LockRequestFFI>,
	len: usize,
}

impl LockRequests {
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			entries: vec![LockRequestFFI::empty(); capacity],
			len: 0,
		}
	}

	pub fn push(&mut self, request: LockRequestFFI) -> bool {
		match self.entries.get_mut(self.len) {
			Some(entry) => {
				*entry = request;
				self.len += 1;
				true
			}
			None => false,
		}
	}

	pub fn requests(&self) -> &[LockRequestFFI] {
		&self.entries[..self.len]
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn capacity(&self) -> usize {
		self.entries.len()
	}

	/// A list view over the backing storage, valid until `self` is next touched
	pub fn as_ffi(&mut self) -> LockListFFI {
		LockListFFI {
			entries: self.entries.as_mut_ptr(),
			len: self.len,
			capacity: self.entries.len(),
		}
	}

	/// Adopt the length reported back by the engine, clamped to the capacity
	pub fn set_len(&mut self, len: usize) {
		self.len = len.min(self.entries.len());
	}
}

#[cfg(test)]
mod tests {
	use storebridge_abi::handler::{HA_READ_KEY_EXACT, TL_READ, TL_WRITE};

	use super::*;

	#[test]
	fn test_share_path() {
		let share = TableShare::new("test", "t1").with_reclength(16).with_key(KeyInfo::new("PRIMARY", 1, 4).unique());
		assert_eq!(share.path(), "./test/t1");
		assert_eq!(share.reclength(), 16);
		assert_eq!(share.keys().len(), 1);
		assert!(share.keys()[0].unique);
	}

	#[test]
	fn test_opaque_round_trip() {
		let share = TableShare::new("test", "t1");
		let back = unsafe { TableShare::from_ffi(share.as_ffi()) }.unwrap();
		assert_eq!(back.table_name(), "t1");

		let mut session = Session::new(7);
		let back = unsafe { Session::from_ffi(session.as_ffi()) }.unwrap();
		assert_eq!(back.id(), 7);

		assert!(unsafe { HostType::from_ffi(std::ptr::null()) }.is_none());
	}

	#[test]
	fn test_table_record_buffer() {
		let mut table = Table::new(TableShare::new("test", "t1").with_reclength(8));
		assert_eq!(table.record().len(), 8);
	}

	#[test]
	fn test_key_range_ffi_view() {
		let key = [1u8, 2, 3];
		let range = KeyRange::new(&key, 1, HA_READ_KEY_EXACT);
		let ffi = range.to_ffi();
		assert_eq!(unsafe { ffi.key() }, &key);
		assert_eq!(ffi.keypart_map, 1);
	}

	#[test]
	fn test_lock_requests_clamp() {
		let mut locks = LockRequests::with_capacity(2);
		assert!(locks.push(LockRequestFFI {
			owner: 1,
			lock_type: TL_READ
		}));
		assert_eq!(locks.len(), 1);

		let mut list = locks.as_ffi();
		let len = unsafe {
			list.push(LockRequestFFI {
				owner: 2,
				lock_type: TL_WRITE,
			});
			list.push(LockRequestFFI {
				owner: 3,
				lock_type: TL_WRITE,
			})
		};
		assert_eq!(len, 2);

		locks.set_len(len + 5);
		assert_eq!(locks.len(), 2);
		assert_eq!(locks.requests()[1].owner, 2);
		assert!(!locks.push(LockRequestFFI::empty()));
	}
}
