// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Handler-specific types: the vtable, its value types and the host vocabulary

mod flags;
mod types;
mod vtable;

pub use flags::*;
pub use types::*;
pub use vtable::*;
