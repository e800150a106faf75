// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Scope-bound arena for handler storage
//!
//! Handlers live in the arena of the scope that opened them and are reclaimed together with it.
//! The arena never runs destructors, so anything placed here that owns resources must be torn
//! down explicitly before the arena goes away.

use std::{alloc::Layout, cell::Cell, ptr::NonNull, slice};

use bumpalo::Bump;
use storebridge_abi::host::ArenaFFI;

use crate::{config::ArenaConfig, error::ArenaError};

pub struct Arena {
	bump: Bump,
	limit: Option<usize>,
	used: Cell<usize>,
}

impl Arena {
	pub fn new() -> Self {
		Self::with_config(&ArenaConfig::default())
	}

	pub fn with_config(config: &ArenaConfig) -> Self {
		Self {
			bump: Bump::with_capacity(config.initial_capacity),
			limit: config.limit,
			used: Cell::new(0),
		}
	}

	/// Reserve zeroed storage for `layout`
	///
	/// This is the first half of two-phase placement: the caller writes a value into the returned
	/// storage afterwards. Storage is never freed individually.
	///
	/// Every request is rounded up to whole 8-byte granules, so the bump pointer stays granule
	/// aligned and the budget is charged for padding as well as payload.
	pub fn alloc_zeroed_layout(&self, layout: Layout) -> Result<NonNull<u8>, ArenaError> {
		let (padded, requested) = charge(layout)?;
		let used = self.used.get();

		if let Some(limit) = self.limit {
			let remaining = limit.saturating_sub(used);
			if requested > remaining {
				return Err(ArenaError::Exhausted {
					requested,
					remaining,
				});
			}
		}

		let ptr = self.bump.try_alloc_layout(padded).map_err(|_| ArenaError::Exhausted {
			requested,
			remaining: self.remaining().unwrap_or(0),
		})?;

		// SAFETY: bumpalo handed out `padded.size()` writable bytes at `ptr`
		unsafe { ptr.as_ptr().write_bytes(0, padded.size()) };
		self.used.set(used + requested);
		Ok(ptr)
	}

	/// Reserve `size` zeroed bytes, 8-byte aligned
	pub fn alloc_zeroed(&self, size: usize) -> Result<&mut [u8], ArenaError> {
		let layout = Layout::from_size_align(size, align_of::<u64>()).map_err(|_| ArenaError::Layout {
			size,
			align: align_of::<u64>(),
		})?;
		let ptr = self.alloc_zeroed_layout(layout)?;
		// SAFETY: the storage is zeroed, exclusively ours and lives as long as the arena
		Ok(unsafe { slice::from_raw_parts_mut(ptr.as_ptr(), size) })
	}

	/// Place `value` into the arena
	///
	/// The value's `Drop` never runs.
	#[allow(clippy::mut_from_ref)]
	pub fn place<T>(&self, value: T) -> Result<&mut T, ArenaError> {
		let ptr = self.alloc_zeroed_layout(Layout::new::<T>())?.cast::<T>();
		// SAFETY: storage is sized and aligned for T and not aliased
		unsafe {
			ptr.as_ptr().write(value);
			Ok(&mut *ptr.as_ptr())
		}
	}

	/// Bytes consumed so far, padding included
	pub fn used(&self) -> usize {
		self.used.get()
	}

	pub fn limit(&self) -> Option<usize> {
		self.limit
	}

	/// Bytes left under the limit, `None` when unbounded
	pub fn remaining(&self) -> Option<usize> {
		self.limit.map(|limit| limit.saturating_sub(self.used.get()))
	}

	pub fn as_ffi(&self) -> *mut ArenaFFI {
		self as *const Self as *mut ArenaFFI
	}

	/// Recover an arena from its opaque pointer
	///
	/// # Safety
	/// `ptr` must be null or come from [`Arena::as_ffi`] on an arena that outlives `'a`.
	pub unsafe fn from_ffi<'a>(ptr: *mut ArenaFFI) -> Option<&'a Arena> {
		unsafe { (ptr as *const Arena).as_ref() }
	}
}

const GRANULE: usize = align_of::<u64>();

/// The layout actually allocated for `layout` and the bytes it can consume
///
/// Sizes are whole granules. Alignment above one granule can skip up to `align - GRANULE` bytes.
fn charge(layout: Layout) -> Result<(Layout, usize), ArenaError> {
	let error = || ArenaError::Layout {
		size: layout.size(),
		align: layout.align(),
	};
	let align = layout.align().max(GRANULE);
	let size = layout.size().checked_next_multiple_of(GRANULE).ok_or_else(error)?;
	let padded = Layout::from_size_align(size, align).map_err(|_| error())?;
	let consumed = size.checked_add(align - GRANULE).ok_or_else(error)?;
	Ok((padded, consumed))
}

impl Default for Arena {
	fn default() -> Self {
		Self::new()
	}
}
