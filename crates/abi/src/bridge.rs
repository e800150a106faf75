// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{
	constants::{DEFAULT_REF_LENGTH, IO_SIZE, MAX_REF_LENGTH, TYPE_ID_LENGTH},
	handler::IoAndCpuCostFFI,
};

/// Table statistics kept by the host for every handler
///
/// The engine refreshes these from `info()`; the host reads them for its cost model.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatisticsFFI {
	pub data_file_length: u64,
	pub max_data_file_length: u64,
	pub index_file_length: u64,
	pub delete_length: u64,
	pub auto_increment_value: u64,
	/// Number of rows in the table
	pub records: u64,
	/// Number of deleted rows
	pub deleted: u64,
	pub mean_rec_length: u64,
	pub block_size: u64,
	pub checksum: u32,
}

impl StatisticsFFI {
	/// Default cost of a full table scan: one I/O per `IO_SIZE` bytes of data and one CPU unit per
	/// block
	pub fn scan_cost(&self) -> IoAndCpuCostFFI {
		let length = self.data_file_length as f64;
		let block_size = match self.block_size {
			0 => IO_SIZE,
			size => size,
		} as f64;
		let io = length / IO_SIZE as f64;
		let cpu = ((length + block_size - 1.0) / block_size).clamp(0.0, 1e200);
		IoAndCpuCostFFI::new(io, cpu)
	}

	/// Default cost of fetching `rows` rows by position
	pub fn rnd_pos_cost(&self, rows: u64) -> IoAndCpuCostFFI {
		let io = (self.block_size + IO_SIZE).saturating_sub(1) / IO_SIZE;
		IoAndCpuCostFFI::new(io as f64, rows as f64)
	}
}

/// C-visible header of a bridged handler
///
/// Every slot receives a pointer to this header as its first argument. The host owns the header;
/// the engine owns what `state` refers to.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct HandlerBridgeFFI {
	/// Opaque foreign-state handle
	///
	/// Set by the engine in `construct` and never interpreted by the host. Engines typically store
	/// an index into their own instance table here.
	pub state: u64,

	/// Type identifier, lets one handler shape serve several engine kinds
	pub type_id: [u8; TYPE_ID_LENGTH],

	/// Number of meaningful bytes in `ref_buf`
	pub ref_length: u32,

	/// Row position written by `position()` and handed back to `rnd_pos()`
	pub ref_buf: [u8; MAX_REF_LENGTH],

	/// Statistics refreshed by `info()`
	pub stats: StatisticsFFI,
}

impl HandlerBridgeFFI {
	/// Create a zeroed header with the default position length
	pub const fn empty() -> Self {
		Self {
			state: 0,
			type_id: [0; TYPE_ID_LENGTH],
			ref_length: DEFAULT_REF_LENGTH,
			ref_buf: [0; MAX_REF_LENGTH],
			stats: StatisticsFFI {
				data_file_length: 0,
				max_data_file_length: 0,
				index_file_length: 0,
				delete_length: 0,
				auto_increment_value: 0,
				records: 0,
				deleted: 0,
				mean_rec_length: 0,
				block_size: 0,
				checksum: 0,
			},
		}
	}

	/// The current position, clamped to the buffer capacity
	pub fn position(&self) -> &[u8] {
		let len = (self.ref_length as usize).min(MAX_REF_LENGTH);
		&self.ref_buf[..len]
	}
}

impl Default for HandlerBridgeFFI {
	fn default() -> Self {
		Self::empty()
	}
}
