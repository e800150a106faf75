// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

/// What the bridge does with a call its lifecycle state does not permit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleGuard {
	/// Reject the call with `HA_ERR_WRONG_COMMAND` without invoking the slot
	#[default]
	Enforce,
	/// Log the violation and forward anyway
	Permissive,
}

/// Configuration for the arena that owns handler storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
	/// Byte budget, `None` for unbounded
	pub limit: Option<usize>,
	/// Size of the first chunk reserved up front
	pub initial_capacity: usize,
}

impl Default for ArenaConfig {
	fn default() -> Self {
		Self {
			limit: None,
			initial_capacity: 4096,
		}
	}
}

impl ArenaConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_limit(mut self, limit: usize) -> Self {
		self.limit = Some(limit);
		self
	}

	pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
		self.initial_capacity = initial_capacity;
		self
	}
}

/// Configuration for the handler factory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
	pub guard: LifecycleGuard,
}

impl BridgeConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_guard(mut self, guard: LifecycleGuard) -> Self {
		self.guard = guard;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = BridgeConfig::default();
		assert_eq!(config.guard, LifecycleGuard::Enforce);

		let arena = ArenaConfig::default();
		assert_eq!(arena.limit, None);
		assert_eq!(arena.initial_capacity, 4096);
	}

	#[test]
	fn test_deserialize_partial() {
		let config: BridgeConfig = serde_json::from_str(r#"{ "guard": "permissive" }"#).unwrap();
		assert_eq!(config.guard, LifecycleGuard::Permissive);

		let arena: ArenaConfig = serde_json::from_str(r#"{ "limit": 1024 }"#).unwrap();
		assert_eq!(arena.limit, Some(1024));
		assert_eq!(arena.initial_capacity, 4096);
	}

	#[test]
	fn test_builder() {
		let arena = ArenaConfig::new().with_limit(64).with_initial_capacity(0);
		assert_eq!(arena.limit, Some(64));
		assert_eq!(arena.initial_capacity, 0);

		let config = BridgeConfig::new().with_guard(LifecycleGuard::Permissive);
		assert_eq!(config.guard, LifecycleGuard::Permissive);
	}
}
