// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Test tooling for storebridge
//!
//! - [`probe`]: a contract whose slots record every invocation and return scripted results
//! - [`init_tracing`]: route `tracing` output to the test harness

pub mod probe;
mod logging;

pub use logging::init_tracing;
