// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Engine instances addressed by the foreign-state handle
//!
//! The handle stored in the handler header is a slab key plus one, so a zeroed header never
//! resolves to an instance.

use std::{any::Any, sync::Arc};

use parking_lot::Mutex;
use slab::Slab;

type Instance = Arc<Mutex<Box<dyn Any + Send>>>;

static POOL: Mutex<Slab<Instance>> = Mutex::new(Slab::new());

pub(crate) fn insert<E: Send + 'static>(engine: E) -> u64 {
	let key = POOL.lock().insert(Arc::new(Mutex::new(Box::new(engine))));
	key as u64 + 1
}

/// Run `f` on the instance behind `handle`
///
/// The pool lock is released before `f` runs, so handlers of different instances never wait on
/// each other.
pub(crate) fn with<E: 'static, R>(handle: u64, f: impl FnOnce(&mut E) -> R) -> Option<R> {
	let instance = {
		let pool = POOL.lock();
		pool.get(key(handle)?)?.clone()
	};
	let mut engine = instance.lock();
	engine.downcast_mut::<E>().map(f)
}

pub(crate) fn remove(handle: u64) -> bool {
	let Some(key) = key(handle) else {
		return false;
	};
	let instance = POOL.lock().try_remove(key);
	instance.is_some()
}

#[cfg(test)]
pub(crate) fn contains(handle: u64) -> bool {
	key(handle).is_some_and(|key| POOL.lock().contains(key))
}

fn key(handle: u64) -> Option<usize> {
	usize::try_from(handle.checked_sub(1)?).ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_insert_with_remove() {
		let handle = insert(41u32);
		assert_ne!(handle, 0);
		assert_eq!(with(handle, |n: &mut u32| {
			*n += 1;
			*n
		}), Some(42));
		assert!(remove(handle));
		assert!(!contains(handle));
		assert!(!remove(handle));
	}

	#[test]
	fn test_zero_handle() {
		assert_eq!(with(0, |n: &mut u32| *n), None);
		assert!(!remove(0));
	}

	#[test]
	fn test_wrong_type() {
		let handle = insert(String::from("engine"));
		assert_eq!(with(handle, |n: &mut u32| *n), None);
		assert_eq!(with(handle, |s: &mut String| s.len()), Some(6));
		remove(handle);
	}
}
