//! `ldapaccess` command line tool
//!
//! Lists and modifies the LDAP group access settings and resolves the
//! access of a set of group memberships.

#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use ldapaccess_core::Principal;
use ldapaccess_types::prelude::*;

mod commands;
mod config;
mod table;

use config::{Config, CONFIG_ENV, DEFAULT_CONFIG_PATH};

#[derive(Parser)]
#[command(name = "ldapaccess")]
#[command(about = "Manage LDAP group based access settings", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Configuration file
	#[arg(short, long, global = true, env = CONFIG_ENV, default_value = DEFAULT_CONFIG_PATH)]
	config: PathBuf,

	/// Enable verbose logging
	#[arg(short, long, global = true)]
	verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// List all settings with their type and current value
	SettingsList,

	/// Modify a setting
	SettingsModify {
		/// Name of the setting
		setting: String,

		/// One of add, set, remove, reset
		mode: String,

		/// Values for the mode (several for array settings)
		#[arg(allow_hyphen_values = true)]
		values: Vec<String>,
	},

	/// List the available modify modes
	Modes,

	/// Resolve the access granted by a set of group memberships
	Resolve {
		/// Groups the user is a member of
		#[arg(conflicts_with_all = ["no_groups", "entry"])]
		groups: Vec<String>,

		/// Resolve for a user without group information
		#[arg(long, conflicts_with = "entry")]
		no_groups: bool,

		/// LDAP entry as JSON, its `groups` attribute is used
		#[arg(long)]
		entry: Option<String>,
	},
}

fn init_logging(verbose: bool) {
	let filter = if verbose {
		tracing_subscriber::EnvFilter::new("debug")
	} else {
		tracing_subscriber::EnvFilter::from_default_env()
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_writer(io::stderr)
		.init();
}

fn principal(groups: Vec<String>, no_groups: bool, entry: Option<&str>) -> LaResult<Principal> {
	if let Some(entry) = entry {
		let entry: serde_json::Value = serde_json::from_str(entry)?;
		Ok(Principal::from_ldap_entry(&entry))
	} else if no_groups {
		Ok(Principal::without_groups())
	} else {
		Ok(Principal::new(groups))
	}
}

async fn run(cli: Cli) -> LaResult<()> {
	let mut stdout = io::stdout().lock();

	if let Commands::Modes = cli.command {
		return commands::modes(&mut stdout);
	}

	let config = Config::load(&cli.config).await?;
	let mut settings = commands::open_settings(&config).await?;

	match cli.command {
		Commands::SettingsList => commands::settings_list(&settings, &mut stdout)?,
		Commands::SettingsModify { setting, mode, values } => {
			if let Err(err) =
				commands::settings_modify(&mut settings, &setting, &mode, &values, &mut stdout).await
			{
				writeln!(stdout, "{}", err)?;
				writeln!(stdout, "{}", commands::NOT_CHANGED)?;
				return Err(err);
			}
		}
		Commands::Resolve { groups, no_groups, entry } => {
			let principal = principal(groups, no_groups, entry.as_deref())?;
			commands::resolve_access(&settings, &principal, &mut stdout)?;
		}
		Commands::Modes => {}
	}

	Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match run(cli).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			error!("{}", err);
			ExitCode::FAILURE
		}
	}
}


// vim: ts=4
