// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Confirmation gate in front of the Deletion Executor.

/// The phrase an operator must type before anything is deleted.
pub const CONFIRMATION_PHRASE: &str = "DELETE";

/// Proof that the operator confirmed the deletion.
///
/// Only [`confirm`] produces one, and
/// [`Executor::execute`](crate::executor::Executor::execute) requires it, so
/// no delete call can be issued without an explicit confirmation.
#[derive(Debug)]
pub struct Confirmed {
	_private: (),
}

/// Checks operator input against [`CONFIRMATION_PHRASE`].
///
/// A trailing line terminator from interactive input is ignored; anything
/// else must match exactly, case included.
pub fn confirm(input: &str) -> Option<Confirmed> {
	let input = input.trim_end_matches(['\r', '\n']);
	if input == CONFIRMATION_PHRASE {
		Some(Confirmed { _private: () })
	} else {
		None
	}
}
