// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! C ABI definitions for storebridge storage handlers
//!
//! This crate provides the stable C ABI that a storage engine implemented outside the host must
//! fill in. It defines the handler vtable, the C-visible header of every bridged handler, and the
//! FFI-safe value types passed through the slots. Nothing in here depends on the host's own
//! object layout: host objects cross the boundary as opaque pointers.

// #![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod bridge;
pub mod constants;
pub mod handler;
pub mod host;
