// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Interactive questions on stderr, answers from stdin.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

/// Writes `question` and reads one line. `None` on end of input.
pub fn read_answer<R, W>(input: &mut R, output: &mut W, question: &str) -> io::Result<Option<String>>
where
	R: BufRead,
	W: Write,
{
	write!(output, "{question}")?;
	output.flush()?;

	let mut line = String::new();
	if input.read_line(&mut line)? == 0 {
		return Ok(None);
	}
	Ok(Some(line))
}

/// `y` or `yes`, any case. Everything else, EOF included, is no.
pub fn is_yes(answer: Option<&str>) -> bool {
	matches!(
		answer.map(|a| a.trim().to_ascii_lowercase()).as_deref(),
		Some("y" | "yes")
	)
}

/// Asks on the terminal without blocking the runtime.
///
/// Returns `None` when input ends or `cancel` fires first.
pub async fn ask(question: String, cancel: &CancellationToken) -> Result<Option<String>> {
	let read = tokio::task::spawn_blocking(move || {
		let stdin = io::stdin();
		let mut input = stdin.lock();
		read_answer(&mut input, &mut io::stderr(), &question)
	});

	tokio::select! {
		_ = cancel.cancelled() => Ok(None),
		answer = read => Ok(answer.context("prompt task failed")?.context("failed to read answer")?),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	#[test]
	fn reads_one_line_and_echoes_question() {
		let mut input = Cursor::new("DELETE\nextra\n");
		let mut output = Vec::new();

		let answer = read_answer(&mut input, &mut output, "Type DELETE: ").unwrap();

		assert_eq!(answer.as_deref(), Some("DELETE\n"));
		assert_eq!(String::from_utf8(output).unwrap(), "Type DELETE: ");
	}

	#[test]
	fn end_of_input_is_none() {
		let mut input = Cursor::new("");
		let answer = read_answer(&mut input, &mut Vec::new(), "? ").unwrap();
		assert_eq!(answer, None);
	}

	#[test]
	fn yes_answers() {
		assert!(is_yes(Some("y\n")));
		assert!(is_yes(Some("YES")));
		assert!(!is_yes(Some("")));
		assert!(!is_yes(Some("n")));
		assert!(!is_yes(Some("yep")));
		assert!(!is_yes(None));
	}
}
