// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use console::style;
use purge_directory::{DeletionOutcome, DeletionStatus, Identifier};

/// One line per delete attempt, printed as the outcome arrives.
pub fn outcome_line(outcome: &DeletionOutcome) -> String {
	let username = outcome.record.username();
	match &outcome.status {
		DeletionStatus::Deleted => format!("  {} {}", style("Deleted").green().bold(), username),
		DeletionStatus::Failed { reason } => format!(
			"  {} {} {}",
			style("Error").red().bold(),
			username,
			style(format!("({reason})")).dim()
		),
	}
}

pub fn not_found_block(not_found: &[Identifier]) -> String {
	let mut out = format!("{}\n", style("Not found in directory:").yellow());
	for id in not_found {
		out.push_str(&format!("  {id}\n"));
	}
	out
}

pub fn confirmation_question(records: usize) -> String {
	format!(
		"{} {} user(s) will be permanently deleted. Type {} to continue: ",
		style("!").red().bold(),
		records,
		style(purge_directory::CONFIRMATION_PHRASE).bold()
	)
}
