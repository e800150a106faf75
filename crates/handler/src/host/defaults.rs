// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Host behaviour for operations an engine leaves out
//!
//! These back the default methods of [`Handler`](super::Handler) and are what a bridge falls
//! back to when a contract slot is null.

use std::ffi::CStr;

use storebridge_abi::{
	constants::{
		DEFAULT_RECORDS_IN_RANGE, HA_ERR_WRONG_COMMAND, HA_MAX_REC_LENGTH, HA_OK, MAX_DATA_LENGTH_FOR_KEY,
		MAX_REF_PARTS,
	},
	handler::HA_ALTER_INPLACE_NOT_SUPPORTED,
};

use crate::host::types::{IoAndCpuCost, Statistics};

/// Status for operations the engine does not implement
pub const fn unsupported() -> i32 {
	HA_ERR_WRONG_COMMAND
}

/// Status for hints and notifications that need no action
pub const fn accepted() -> i32 {
	HA_OK
}

pub fn index_type() -> &'static CStr {
	c""
}

pub const fn table_flags() -> u64 {
	0
}

pub const fn index_flags() -> u64 {
	0
}

pub const fn max_supported_record_length() -> u32 {
	HA_MAX_REC_LENGTH
}

pub const fn max_supported_keys() -> u32 {
	0
}

pub const fn max_supported_key_parts() -> u32 {
	MAX_REF_PARTS
}

pub const fn max_supported_key_length() -> u32 {
	MAX_DATA_LENGTH_FOR_KEY
}

pub fn scan_time(stats: &Statistics) -> IoAndCpuCost {
	stats.scan_cost()
}

pub fn keyread_time(ranges: u64, rows: u64, blocks: u64) -> IoAndCpuCost {
	IoAndCpuCost::keyread(ranges, rows, blocks)
}

pub fn rnd_pos_time(stats: &Statistics, rows: u64) -> IoAndCpuCost {
	stats.rnd_pos_cost(rows)
}

pub const fn records_in_range() -> u64 {
	DEFAULT_RECORDS_IN_RANGE
}

pub const fn check_if_supported_inplace_alter() -> u32 {
	HA_ALTER_INPLACE_NOT_SUPPORTED
}
