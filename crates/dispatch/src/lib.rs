// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sweep orchestration for the WhatsPing reminder engine.
//!
//! One sweep loads every pending commitment, asks the window evaluator
//! which threshold (if any) is due, resolves recipients, renders one
//! message per recipient, sends through the messaging gateway, and
//! persists a delivery log row plus the fired flag. Failures are
//! isolated per commitment and per recipient; a sweep never aborts
//! because one delivery failed.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod resolver;
mod sweep;

#[cfg(test)]
mod tests;

pub use resolver::{Resolution, resolve_recipients};
pub use sweep::{Dispatcher, SweepSummary};
