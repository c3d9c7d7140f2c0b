// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how records get their numbers.
//!
//! `signals` holds the four lexical signals and their weighted combination.
//! `ranking` orders finished results and computes the NDCG diagnostic.

mod signals;
pub mod ranking;

pub use signals::*;
