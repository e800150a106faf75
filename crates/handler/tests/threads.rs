// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::thread;

use storebridge_abi::{
	constants::{HA_ERR_END_OF_FILE, HA_OK},
	handler::O_RDONLY,
};
use storebridge_handler::{
	Arena, Handler, HandlerContract, HandlerFactory, HandlerState,
	host::{HostType, TableShare},
};
use storebridge_testing::probe;

#[test]
fn test_two_bridges_from_one_contract_on_separate_threads() {
	let contract = HandlerContract::from_vtable(&probe::full_vtable()).unwrap();
	let host_type = HostType::new("probe");
	let factory = HandlerFactory::default();

	let results: Vec<(Vec<&'static str>, Vec<i32>)> = thread::scope(|s| {
		let workers: Vec<_> = (0..2u8)
			.map(|n| {
				let (contract, host_type, factory) = (&contract, &host_type, &factory);
				s.spawn(move || {
					probe::reset();
					for i in 0..=n {
						probe::push_row([n, i, 0, 0]);
					}

					let share = TableShare::new("test", format!("t{n}")).with_reclength(4);
					let arena = Arena::new();
					let bridge = factory.create(host_type, &share, &arena, contract).unwrap();

					let mut statuses = vec![bridge.open(c"t", O_RDONLY, 0), bridge.rnd_init(true)];
					let mut row = [0u8; 4];
					loop {
						let status = bridge.rnd_next(&mut row);
						statuses.push(status);
						if status != HA_OK {
							break;
						}
						assert_eq!(row[0], n);
					}
					statuses.push(bridge.rnd_end());
					statuses.push(bridge.close());
					factory.destroy(bridge);
					assert_eq!(bridge.state(), HandlerState::Destroyed);

					(probe::calls(), statuses)
				})
			})
			.collect();

		workers.into_iter().map(|w| w.join().unwrap()).collect()
	});

	let (calls_a, statuses_a) = &results[0];
	let (calls_b, statuses_b) = &results[1];

	assert_eq!(statuses_a, &[HA_OK, HA_OK, HA_OK, HA_ERR_END_OF_FILE, HA_OK, HA_OK]);
	assert_eq!(statuses_b, &[HA_OK, HA_OK, HA_OK, HA_OK, HA_ERR_END_OF_FILE, HA_OK, HA_OK]);
	assert_eq!(calls_a.iter().filter(|c| **c == "rnd_next").count(), 2);
	assert_eq!(calls_b.iter().filter(|c| **c == "rnd_next").count(), 3);
	assert_eq!(calls_a.first(), Some(&"construct"));
	assert_eq!(calls_b.last(), Some(&"destruct"));
}

#[test]
fn test_bridge_moves_to_another_thread() {
	let contract = HandlerContract::from_vtable(&probe::minimal_vtable()).unwrap();
	let host_type = HostType::new("probe");
	let share = TableShare::new("test", "t").with_reclength(4);
	let arena = Arena::new();
	let factory = HandlerFactory::default();

	probe::reset();
	let bridge = factory.create(&host_type, &share, &arena, &contract).unwrap();
	assert_eq!(bridge.open(c"t", O_RDONLY, 0), HA_OK);

	let moved = &mut *bridge;
	let row = thread::scope(|s| {
		s.spawn(move || {
			probe::reset();
			probe::push_row([4, 3, 2, 1]);
			let mut row = [0u8; 4];
			assert_eq!(moved.rnd_init(true), HA_OK);
			assert_eq!(moved.rnd_next(&mut row), HA_OK);
			assert_eq!(moved.rnd_end(), HA_OK);
			assert_eq!(probe::calls(), ["rnd_init", "rnd_next", "rnd_end"]);
			row
		})
		.join()
		.unwrap()
	});

	assert_eq!(row, [4, 3, 2, 1]);
	assert_eq!(bridge.state(), HandlerState::Opened);
	assert_eq!(bridge.close(), HA_OK);
	factory.destroy(bridge);
	assert_eq!(probe::calls(), ["construct", "open", "close", "destruct"]);
}
