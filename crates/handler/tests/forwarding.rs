// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use storebridge_abi::{
	constants::{HA_ERR_WRONG_COMMAND, HA_MAX_REC_LENGTH, HA_OK, MAX_DATA_LENGTH_FOR_KEY, MAX_REF_PARTS},
	handler::{F_RDLCK, HA_ALTER_INPLACE_NOT_SUPPORTED, HA_EXTRA_CACHE, HA_READ_KEY_EXACT, HA_STATUS_VARIABLE, O_RDWR, TL_READ},
};
use storebridge_handler::{
	Arena, Handler, HandlerBridge, HandlerContract, HandlerFactory,
	host::{AlterInfo, CreateInfo, HostType, KeyRange, LockRequests, PageRange, Session, Table, TableShare},
};
use storebridge_testing::probe;

struct Fixture {
	host_type: HostType,
	share: TableShare,
	arena: Arena,
	contract: HandlerContract,
}

impl Fixture {
	fn new(vtable: storebridge_abi::handler::HandlerVTableFFI) -> Self {
		probe::reset();
		Self {
			host_type: HostType::new("probe"),
			share: TableShare::new("test", "t").with_reclength(16),
			arena: Arena::new(),
			contract: HandlerContract::from_vtable(&vtable).unwrap(),
		}
	}

	fn full() -> Self {
		Self::new(probe::full_vtable())
	}

	fn minimal() -> Self {
		Self::new(probe::minimal_vtable())
	}

	fn opened(&self) -> &mut HandlerBridge<'_> {
		let bridge = HandlerFactory::default().create(&self.host_type, &self.share, &self.arena, &self.contract).unwrap();
		assert_eq!(bridge.open(c"t", O_RDWR, 0), HA_OK);
		bridge
	}
}

#[test]
fn test_status_passes_through_unchanged() {
	let fixture = Fixture::full();
	let bridge = fixture.opened();
	let row = [0u8; 16];

	probe::respond("write_row", 17);
	assert_eq!(bridge.write_row(&row), 17);

	probe::respond("update_row", 121);
	assert_eq!(bridge.update_row(&row, &row), 121);

	probe::respond("delete_row", -5);
	assert_eq!(bridge.delete_row(&row), -5);

	probe::respond("extra", 9999);
	assert_eq!(bridge.extra(HA_EXTRA_CACHE), 9999);
}

#[test]
fn test_position_round_trip() {
	let fixture = Fixture::full();
	let bridge = fixture.opened();
	let row: Vec<u8> = (1..=16).collect();

	probe::push_row(row.clone());
	assert_eq!(bridge.rnd_init(true), HA_OK);
	let mut buf = [0u8; 16];
	assert_eq!(bridge.rnd_next(&mut buf), HA_OK);

	bridge.position(&buf);
	let pos = bridge.position_ref().to_vec();
	assert_eq!(pos, row[..8]);

	let mut fetched = [0u8; 16];
	probe::push_row(row.clone());
	assert_eq!(bridge.rnd_pos(&mut fetched, &pos), HA_OK);
	assert_eq!(probe::received_positions(), [pos]);
	assert_eq!(fetched.as_slice(), row.as_slice());
}

#[test]
fn test_capabilities_are_forwarded() {
	let fixture = Fixture::full();
	let bridge = fixture.opened();

	assert_eq!(bridge.table_flags(), probe::TABLE_FLAGS);
	assert_eq!(bridge.index_flags(0, 0, true), probe::INDEX_FLAGS);
	assert_eq!(bridge.index_type(0), probe::INDEX_TYPE);
	assert_eq!(bridge.max_supported_record_length(), probe::MAX_RECORD_LENGTH);
	assert_eq!(bridge.max_supported_keys(), probe::MAX_KEYS);
	assert_eq!(bridge.max_supported_key_parts(), probe::MAX_KEY_PARTS);
	assert_eq!(bridge.max_supported_key_length(), probe::MAX_KEY_LENGTH);
	assert_eq!(bridge.scan_time(), probe::SCAN_COST);
	assert_eq!(bridge.keyread_time(0, 2, 30, 0).cpu, 30.0);
	assert_eq!(bridge.rnd_pos_time(5).io, 5.0);
}

#[test]
fn test_absent_slots_use_host_defaults() {
	let fixture = Fixture::minimal();
	let bridge = fixture.opened();
	let mut row = [0u8; 16];

	assert_eq!(bridge.table_flags(), 0);
	assert!(bridge.index_type(0).is_empty());
	assert_eq!(bridge.max_supported_record_length(), HA_MAX_REC_LENGTH);
	assert_eq!(bridge.max_supported_keys(), 0);
	assert_eq!(bridge.max_supported_key_parts(), MAX_REF_PARTS);
	assert_eq!(bridge.max_supported_key_length(), MAX_DATA_LENGTH_FOR_KEY);
	assert_eq!(bridge.scan_time(), bridge.stats().scan_cost());

	assert_eq!(bridge.write_row(&row), HA_ERR_WRONG_COMMAND);
	assert_eq!(bridge.index_first(&mut row), HA_ERR_WRONG_COMMAND);
	assert_eq!(bridge.rnd_pos(&mut row, &[0; 8]), HA_ERR_WRONG_COMMAND);
	assert_eq!(bridge.delete_all_rows(), HA_ERR_WRONG_COMMAND);
	assert_eq!(bridge.truncate(), HA_ERR_WRONG_COMMAND);
	assert_eq!(bridge.info(HA_STATUS_VARIABLE), HA_OK);
	assert_eq!(bridge.extra(HA_EXTRA_CACHE), HA_OK);
	assert_eq!(bridge.records_in_range(0, None, None, &mut PageRange::default()), 10);

	let mut session = Session::new(1);
	assert_eq!(bridge.external_lock(&mut session, F_RDLCK), HA_OK);
	let mut locks = LockRequests::with_capacity(4);
	bridge.store_lock(&mut session, &mut locks, TL_READ);
	assert!(locks.is_empty());

	let table = Table::new(fixture.share.clone());
	assert_eq!(bridge.create(c"t", &table, &mut CreateInfo::default()), HA_ERR_WRONG_COMMAND);
	assert_eq!(bridge.delete_table(c"t"), HA_OK);
	assert_eq!(
		bridge.check_if_supported_inplace_alter(&table, &mut AlterInfo::default()),
		HA_ALTER_INPLACE_NOT_SUPPORTED
	);

	assert_eq!(probe::calls(), ["construct", "open"]);
}

#[test]
fn test_records_in_range_and_ddl_are_forwarded() {
	let fixture = Fixture::full();
	let bridge = fixture.opened();
	let key = [1u8, 0, 0, 0];
	let min = KeyRange::new(&key, 1, HA_READ_KEY_EXACT);

	assert_eq!(bridge.records_in_range(0, Some(&min), None, &mut PageRange::default()), probe::RECORDS_IN_RANGE);

	let table = Table::new(fixture.share.clone());
	assert_eq!(bridge.create(c"t", &table, &mut CreateInfo::default()), HA_OK);
	assert_eq!(bridge.check_if_supported_inplace_alter(&table, &mut AlterInfo::default()), probe::ALTER_VERDICT);
	assert_eq!(bridge.delete_table(c"t"), HA_OK);
	assert_eq!(probe::count("records_in_range"), 1);
	assert_eq!(probe::count("create"), 1);
}

#[test]
fn test_info_refreshes_statistics() {
	let fixture = Fixture::full();
	let bridge = fixture.opened();

	assert_eq!(bridge.stats().records, 0);
	assert_eq!(bridge.info(HA_STATUS_VARIABLE), HA_OK);
	assert_eq!(bridge.stats().records, probe::INFO_RECORDS);
	assert_eq!(bridge.key_scan_time(0).cpu, probe::INFO_RECORDS as f64);
}

#[test]
fn test_store_lock_appends_requests() {
	let fixture = Fixture::full();
	let bridge = fixture.opened();
	let mut session = Session::new(9);
	let mut locks = LockRequests::with_capacity(2);

	bridge.store_lock(&mut session, &mut locks, TL_READ);
	assert_eq!(locks.len(), 1);
	assert_eq!(locks.requests()[0].lock_type, TL_READ);
	assert_eq!(locks.requests()[0].owner, bridge.foreign_state());
}

#[test]
fn test_index_read_last_goes_through_index_read_map() {
	let fixture = Fixture::full();
	let bridge = fixture.opened();
	let mut row = [0u8; 16];

	probe::push_row([5u8; 16]);
	assert_eq!(bridge.index_read_last_map(&mut row, &[5], 1), HA_OK);
	assert_eq!(row, [5u8; 16]);
	assert_eq!(probe::count("index_read_map"), 1);
}

#[test]
fn test_type_tag_and_foreign_state_are_untouched() {
	let fixture = Fixture::full();
	let bridge = fixture.opened();
	let state = bridge.foreign_state();

	bridge.info(HA_STATUS_VARIABLE);
	bridge.extra(HA_EXTRA_CACHE);

	assert_eq!(bridge.foreign_state(), state);
	assert_eq!(bridge.type_id(), probe::TYPE_ID);
}
