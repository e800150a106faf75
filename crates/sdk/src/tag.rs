// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::any::type_name;

use storebridge_abi::constants::TYPE_ID_LENGTH;
use xxhash_rust::xxh3::xxh3_128;

/// Type identifier written into the handler header for engine `E`
pub fn type_tag<E: ?Sized>() -> [u8; TYPE_ID_LENGTH] {
	xxh3_128(type_name::<E>().as_bytes()).to_le_bytes()
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Left;
	struct Right;

	#[test]
	fn test_stable() {
		assert_eq!(type_tag::<Left>(), type_tag::<Left>());
	}

	#[test]
	fn test_distinct_types() {
		assert_ne!(type_tag::<Left>(), type_tag::<Right>());
		assert_ne!(type_tag::<Left>(), [0; TYPE_ID_LENGTH]);
	}
}
