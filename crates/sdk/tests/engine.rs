// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::atomic::{AtomicUsize, Ordering};

use storebridge_abi::{
	constants::{HA_ERR_END_OF_FILE, HA_ERR_RETRY_INIT, HA_ERR_WRONG_COMMAND, HA_OK},
	handler::{HA_STATUS_VARIABLE, O_RDWR, TL_WRITE},
};
use storebridge_handler::{
	Arena, BridgeError, Handler, HandlerFactory, HandlerState,
	host::{HostType, LockRequests, PageRange, Session, TableShare},
	loader::{bind, describe},
};
use storebridge_sdk::{prelude::*, type_tag};
use storebridge_testing::init_tracing;

/// Rows of four bytes kept in memory, addressed by their index
struct Ledger {
	rows: Vec<[u8; 4]>,
	cursor: usize,
}

impl StorageEngine for Ledger {
	const NAME: &'static CStr = c"ledger";
	const REF_LENGTH: u32 = 4;
	const HOST_FLAGS: u32 = 2;

	fn new(_ctx: &ConstructContext) -> StorageResult<Self> {
		Ok(Self {
			rows: Vec::new(),
			cursor: 0,
		})
	}

	fn open(&mut self, _name: &CStr, _mode: i32, _test_if_locked: u32) -> StorageResult {
		Ok(())
	}

	fn close(&mut self) -> StorageResult {
		Ok(())
	}

	fn table_flags(&self) -> u64 {
		0x40
	}

	fn write_row(&mut self, row: &[u8]) -> StorageResult {
		let row: [u8; 4] = row.try_into().map_err(|_| StorageError::WrongInRecord)?;
		self.rows.push(row);
		Ok(())
	}

	fn delete_all_rows(&mut self) -> StorageResult {
		self.rows.clear();
		Ok(())
	}

	fn rnd_init(&mut self, _scan: bool) -> StorageResult {
		self.cursor = 0;
		Ok(())
	}

	fn rnd_next(&mut self, buf: &mut [u8]) -> StorageResult {
		let row = self.rows.get(self.cursor).ok_or(StorageError::EndOfFile)?;
		buf[..4].copy_from_slice(row);
		self.cursor += 1;
		Ok(())
	}

	fn rnd_pos(&mut self, buf: &mut [u8], pos: &[u8]) -> StorageResult {
		let index: [u8; 4] = pos.try_into().map_err(|_| StorageError::WrongIndex)?;
		let row = self.rows.get(u32::from_le_bytes(index) as usize).ok_or(StorageError::KeyNotFound)?;
		buf[..4].copy_from_slice(row);
		Ok(())
	}

	fn position(&mut self, _record: &[u8], pos: &mut [u8]) {
		let index = self.cursor.saturating_sub(1) as u32;
		pos.copy_from_slice(&index.to_le_bytes());
	}

	fn info(&mut self, _flag: u32, stats: &mut Statistics) -> StorageResult {
		stats.records = self.rows.len() as u64;
		stats.data_file_length = self.rows.len() as u64 * 4;
		Ok(())
	}

	fn store_lock(&mut self, _session: *mut storebridge_abi::host::SessionFFI, locks: &mut LockList<'_>, lock_type: i32) {
		locks.push(lock_type);
	}
}

storebridge_sdk::export_storage_engine!(Ledger);

static DROPPED: AtomicUsize = AtomicUsize::new(0);

struct Tracked;

impl Drop for Tracked {
	fn drop(&mut self) {
		DROPPED.fetch_add(1, Ordering::SeqCst);
	}
}

impl StorageEngine for Tracked {
	const NAME: &'static CStr = c"tracked";

	fn new(_ctx: &ConstructContext) -> StorageResult<Self> {
		Ok(Self)
	}

	fn open(&mut self, _name: &CStr, _mode: i32, _test_if_locked: u32) -> StorageResult {
		Ok(())
	}

	fn close(&mut self) -> StorageResult {
		Ok(())
	}

	fn rnd_init(&mut self, _scan: bool) -> StorageResult {
		Ok(())
	}

	fn rnd_next(&mut self, _buf: &mut [u8]) -> StorageResult {
		Err(StorageError::EndOfFile)
	}
}

struct Refusing;

impl StorageEngine for Refusing {
	const NAME: &'static CStr = c"refusing";

	fn new(_ctx: &ConstructContext) -> StorageResult<Self> {
		Err(StorageError::RetryInit)
	}

	fn open(&mut self, _name: &CStr, _mode: i32, _test_if_locked: u32) -> StorageResult {
		Ok(())
	}

	fn close(&mut self) -> StorageResult {
		Ok(())
	}

	fn rnd_init(&mut self, _scan: bool) -> StorageResult {
		Ok(())
	}

	fn rnd_next(&mut self, _buf: &mut [u8]) -> StorageResult {
		Err(StorageError::EndOfFile)
	}
}

fn fixtures(name: &str) -> (HostType, TableShare, Arena) {
	init_tracing();
	(HostType::new(name), TableShare::new("test", "t").with_reclength(4), Arena::new())
}

#[test]
fn test_exported_descriptor_describes_engine() {
	let api_version = storebridge_engine_api_version();
	let descriptor = unsafe { &*storebridge_engine_descriptor() };
	let (host_type, contract) = unsafe { describe(descriptor) }.unwrap();

	assert_eq!(api_version, storebridge_sdk::abi::constants::CURRENT_API_VERSION);
	assert_eq!(host_type.name(), "ledger");
	assert_eq!(host_type.flags(), 2);
	assert_eq!(contract.api_version(), api_version);
	assert_eq!(storebridge_engine_descriptor(), storebridge_engine_descriptor());
}

#[test]
fn test_exported_entry_points_bind_like_a_loaded_library() {
	init_tracing();
	let (host_type, contract) =
		unsafe { bind(storebridge_engine_api_version, storebridge_engine_descriptor) }.unwrap();
	let share = TableShare::new("test", "t").with_reclength(4);
	let arena = Arena::new();
	let factory = HandlerFactory::default();

	let bridge = factory.create(&host_type, &share, &arena, &contract).unwrap();
	assert_eq!(bridge.type_id(), type_tag::<Ledger>());
	assert_eq!(bridge.open(c"t", O_RDWR, 0), HA_OK);
	assert_eq!(bridge.write_row(&[9; 4]), HA_OK);
	assert_eq!(bridge.info(HA_STATUS_VARIABLE), HA_OK);
	assert_eq!(bridge.stats().records, 1);
	assert_eq!(bridge.close(), HA_OK);
	factory.destroy(bridge);
}

#[test]
fn test_engine_through_the_bridge() {
	let (host_type, share, arena) = fixtures("ledger");
	let factory = HandlerFactory::default();
	let vtable = storebridge_sdk::build_vtable::<Ledger>();
	let bridge = factory.create_from_vtable(&host_type, &share, &arena, &vtable).unwrap();

	assert_eq!(bridge.type_id(), type_tag::<Ledger>());
	assert_ne!(bridge.foreign_state(), 0);
	assert_eq!(bridge.position_ref().len(), 4);

	assert_eq!(bridge.open(c"t", O_RDWR, 0), HA_OK);
	for n in 1..=3u8 {
		assert_eq!(bridge.write_row(&[n; 4]), HA_OK);
	}
	assert_eq!(bridge.write_row(&[0; 3]), storebridge_abi::constants::HA_ERR_WRONG_IN_RECORD);

	assert_eq!(bridge.rnd_init(true), HA_OK);
	let mut row = [0u8; 4];
	assert_eq!(bridge.rnd_next(&mut row), HA_OK);
	assert_eq!(bridge.rnd_next(&mut row), HA_OK);
	assert_eq!(row, [2; 4]);

	bridge.position(&row);
	let pos = bridge.position_ref().to_vec();
	assert_eq!(pos, 1u32.to_le_bytes());

	assert_eq!(bridge.rnd_next(&mut row), HA_OK);
	assert_eq!(bridge.rnd_next(&mut row), HA_ERR_END_OF_FILE);

	let mut fetched = [0u8; 4];
	assert_eq!(bridge.rnd_pos(&mut fetched, &pos), HA_OK);
	assert_eq!(fetched, [2; 4]);
	assert_eq!(bridge.rnd_end(), HA_OK);

	assert_eq!(bridge.info(HA_STATUS_VARIABLE), HA_OK);
	assert_eq!(bridge.stats().records, 3);
	assert_eq!(bridge.scan_time(), bridge.stats().scan_cost());

	assert_eq!(bridge.table_flags(), 0x40);
	assert_eq!(bridge.index_first(&mut row), HA_ERR_WRONG_COMMAND);
	assert_eq!(bridge.records_in_range(0, None, None, &mut PageRange::default()), 10);

	let mut session = Session::new(1);
	let mut locks = LockRequests::with_capacity(2);
	bridge.store_lock(&mut session, &mut locks, TL_WRITE);
	assert_eq!(locks.len(), 1);
	assert_eq!(locks.requests()[0].owner, bridge.foreign_state());
	assert_eq!(locks.requests()[0].lock_type, TL_WRITE);

	assert_eq!(bridge.truncate(), HA_OK);
	assert_eq!(bridge.rnd_init(true), HA_OK);
	assert_eq!(bridge.rnd_next(&mut row), HA_ERR_END_OF_FILE);
	assert_eq!(bridge.rnd_end(), HA_OK);
	assert_eq!(bridge.close(), HA_OK);

	factory.destroy(bridge);
	assert_eq!(bridge.state(), HandlerState::Destroyed);
}

#[test]
fn test_handlers_have_separate_instances() {
	let (host_type, share, arena) = fixtures("ledger");
	let factory = HandlerFactory::default();
	let vtable = storebridge_sdk::build_vtable::<Ledger>();
	let first = factory.create_from_vtable(&host_type, &share, &arena, &vtable).unwrap();
	let second = factory.create_from_vtable(&host_type, &share, &arena, &vtable).unwrap();

	assert_ne!(first.foreign_state(), second.foreign_state());

	first.open(c"t", O_RDWR, 0);
	second.open(c"t", O_RDWR, 0);
	first.write_row(&[1; 4]);

	second.info(HA_STATUS_VARIABLE);
	assert_eq!(second.stats().records, 0);
	first.info(HA_STATUS_VARIABLE);
	assert_eq!(first.stats().records, 1);

	factory.destroy(first);
	factory.destroy(second);
}

#[test]
fn test_destroy_drops_the_engine() {
	let (host_type, share, arena) = fixtures("tracked");
	let factory = HandlerFactory::default();
	let vtable = storebridge_sdk::build_vtable::<Tracked>();
	let bridge = factory.create_from_vtable(&host_type, &share, &arena, &vtable).unwrap();

	assert_eq!(DROPPED.load(Ordering::SeqCst), 0);
	factory.destroy(bridge);
	assert_eq!(DROPPED.load(Ordering::SeqCst), 1);
	factory.destroy(bridge);
	assert_eq!(DROPPED.load(Ordering::SeqCst), 1);
}

#[test]
fn test_failed_construction_reports_engine_status() {
	let (host_type, share, arena) = fixtures("refusing");
	let vtable = storebridge_sdk::build_vtable::<Refusing>();
	let err = HandlerFactory::default().create_from_vtable(&host_type, &share, &arena, &vtable).unwrap_err();

	assert!(matches!(err, BridgeError::Construct { status: HA_ERR_RETRY_INIT }));
	assert_eq!(err.status(), HA_ERR_RETRY_INIT);
}
