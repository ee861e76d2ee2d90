// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! purge-users: delete the tenant directory users listed in a file.
//!
//! Resolves every identifier against the directory, prints a summary, and
//! deletes the matched users only after the operator types the
//! confirmation phrase.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use console::style;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use purge_cli_config::{load_config, CliOverrides, PurgeConfig};
use purge_common_secret::SecretString;
use purge_directory::{
	load_identifiers, render_summary, write_partition, ClientSettings, Counters, DeletionReport,
	DirectoryError, Executor, HttpDirectoryClient, Resolver, ResolverConfig,
};

mod logging;
mod output;
mod prompt;

/// Exit status after an interrupt.
const EXIT_INTERRUPTED: u8 = 130;

/// Delete directory users listed one identifier per line in FILE
#[derive(Parser, Debug)]
#[command(name = "purge-users", version, about, long_about = None)]
struct Args {
	/// Tenant host, e.g. acme.example.com (https:// is assumed)
	tenant: String,

	/// Bearer token for the directory API
	#[arg(env = "PURGE_API_TOKEN", hide_env_values = true)]
	api_token: String,

	/// File with one email or username per line
	file: PathBuf,

	/// Path to custom configuration file
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Log level (overrides config)
	#[arg(short, long)]
	log_level: Option<String>,

	/// Output logs as JSON (overrides config)
	#[arg(long)]
	json_logs: bool,

	/// Resolve and report, never delete
	#[arg(long)]
	dry_run: bool,

	/// Confirmation phrase, instead of the interactive prompt
	#[arg(long, value_name = "PHRASE")]
	confirm: Option<String>,

	/// Write found_users.txt and not_found_users.txt without asking
	#[arg(long)]
	export: bool,

	/// Directory for the exported lists
	#[arg(long, value_name = "DIR", default_value = ".")]
	export_dir: PathBuf,

	/// Deletes in flight at once (overrides config)
	#[arg(long, value_name = "N")]
	concurrency: Option<usize>,

	/// Exit 1 if any delete failed
	#[arg(long)]
	fail_on_error: bool,
}

impl From<&Args> for CliOverrides {
	fn from(args: &Args) -> Self {
		Self {
			config_file: args.config.clone(),
			log_level: args.log_level.clone(),
			log_format: if args.json_logs {
				Some("json".to_string())
			} else {
				None
			},
			concurrency: args.concurrency,
		}
	}
}

fn client_settings(config: &PurgeConfig) -> ClientSettings {
	ClientSettings {
		timeout: config.http.timeout,
		search_path: config.http.search_path.clone(),
		delete_path: config.http.delete_path.clone(),
	}
}

/// First Ctrl-C cancels between requests; a second one exits at once.
fn spawn_interrupt_handler(cancel: CancellationToken) {
	tokio::spawn(async move {
		if tokio::signal::ctrl_c().await.is_err() {
			return;
		}
		warn!("interrupt received, stopping after the current request");
		eprintln!(
			"{} interrupted, finishing the current request (Ctrl-C again to exit now)",
			style("!").yellow().bold()
		);
		cancel.cancel();

		if tokio::signal::ctrl_c().await.is_ok() {
			std::process::exit(i32::from(EXIT_INTERRUPTED));
		}
	});
}

async fn run(args: Args) -> Result<ExitCode> {
	let config = load_config(CliOverrides::from(&args)).context("failed to load configuration")?;
	logging::init_tracing(&config.logging);

	let token = SecretString::new(args.api_token.clone());
	if token.is_blank() {
		bail!("API token is empty");
	}

	let identifiers = load_identifiers(&args.file).await?;
	info!(count = identifiers.len(), file = %args.file.display(), "loaded identifiers");

	let api = HttpDirectoryClient::for_tenant(&args.tenant, token, client_settings(&config))
		.context("failed to set up directory client")?;

	let cancel = CancellationToken::new();
	spawn_interrupt_handler(cancel.clone());

	let resolver_config = ResolverConfig {
		page_size: config.search.page_size,
		..ResolverConfig::default()
	};
	let result = match Resolver::new(&api, resolver_config)
		.with_cancellation(cancel.clone())
		.resolve(&identifiers)
		.await
	{
		Ok(result) => result,
		Err(DirectoryError::Cancelled) => {
			println!("Interrupted before resolution finished. No users were deleted.");
			return Ok(ExitCode::from(EXIT_INTERRUPTED));
		}
		Err(e) => return Err(e).context("failed to resolve identifiers"),
	};

	print!("{}", render_summary(&Counters::after_resolution(&result)));
	if !result.not_found.is_empty() {
		print!("{}", output::not_found_block(&result.not_found));
	}

	let export = if args.export {
		true
	} else if args.dry_run || args.confirm.is_some() {
		false
	} else {
		let answer = prompt::ask("Export found/not-found lists? [y/N] ".to_string(), &cancel).await?;
		prompt::is_yes(answer.as_deref())
	};
	if export {
		let paths = write_partition(&args.export_dir, &result).await?;
		println!(
			"Exported {} and {}",
			style(paths.found.display()).cyan(),
			style(paths.not_found.display()).cyan()
		);
	}

	if result.is_empty() {
		println!("Nothing to delete.");
		return Ok(ExitCode::SUCCESS);
	}
	if args.dry_run {
		println!("Dry run: no users were deleted.");
		return Ok(ExitCode::SUCCESS);
	}

	let answer = match args.confirm.clone() {
		Some(phrase) => Some(phrase),
		None => prompt::ask(output::confirmation_question(result.record_count()), &cancel).await?,
	};
	let executed = Executor::new(&api)
		.with_concurrency(config.delete.concurrency)
		.with_cancellation(cancel)
		.execute_confirmed(&result.found, answer.as_deref(), |outcome| {
			println!("{}", output::outcome_line(outcome));
		})
		.await;
	let Some(report) = executed else {
		println!("Aborted. No users were deleted.");
		return Ok(ExitCode::SUCCESS);
	};

	print!("{}", render_summary(&Counters::after_deletion(&result, &report)));
	Ok(ExitCode::from(deletion_exit_status(&report, args.fail_on_error)))
}

/// Failed deletes are reported, not fatal, unless `fail_on_error` is set.
fn deletion_exit_status(report: &DeletionReport, fail_on_error: bool) -> u8 {
	if report.cancelled {
		EXIT_INTERRUPTED
	} else if fail_on_error && report.error_count() > 0 {
		1
	} else {
		0
	}
}

fn main() -> ExitCode {
	let args = match Args::try_parse() {
		Ok(args) => args,
		Err(e) => {
			let _ = e.print();
			return if e.use_stderr() {
				ExitCode::FAILURE
			} else {
				ExitCode::SUCCESS
			};
		}
	};

	let runtime = match tokio::runtime::Builder::new_current_thread()
		.enable_all()
		.build()
	{
		Ok(runtime) => runtime,
		Err(e) => {
			eprintln!("{} failed to start runtime: {e}", style("error:").red().bold());
			return ExitCode::FAILURE;
		}
	};

	let code = runtime.block_on(async {
		match run(args).await {
			Ok(code) => code,
			Err(e) => {
				eprintln!("{} {e:#}", style("error:").red().bold());
				ExitCode::FAILURE
			}
		}
	});

	// A prompt may still be blocked on stdin.
	runtime.shutdown_background();
	code
}
