//! Command dispatch

use std::io;
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use tracing::instrument;

use crate::application::BrowseSession;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::render;
use crate::config::{global_config_path, Settings};
use crate::domain::ToggleOutcome;
use crate::infrastructure::api::HttpCollectionApi;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Collections => list_collections(cli),
        Commands::Show {
            pid,
            expand,
            all,
            json,
        } => show(cli, pid, expand, *all, *json),
        Commands::Search { query } => search(cli, query),
        Commands::Config { command } => run_config(command),
        Commands::Completion { shell } => completion(*shell),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load()?;
    if let Some(url) = &cli.api_url {
        settings.api_url = url.clone();
    }
    Ok(settings)
}

fn open_session(cli: &Cli) -> CliResult<BrowseSession> {
    let settings = load_settings(cli)?;
    let api = HttpCollectionApi::new(&settings)?;
    Ok(BrowseSession::new(Arc::new(api)))
}

#[instrument(skip(cli))]
fn list_collections(cli: &Cli) -> CliResult<()> {
    let session = open_session(cli)?;
    let collections = session.collections()?;
    println!("Found {} collections:\n", collections.len());
    for coll in &collections {
        println!("{}  {}", coll.pid, coll.title);
    }
    Ok(())
}

#[instrument(skip(cli))]
fn show(cli: &Cli, pid: &str, expand: &[String], all: bool, json: bool) -> CliResult<()> {
    let mut session = open_session(cli)?;
    session.load(pid)?;

    for node_pid in expand {
        match session.toggle(node_pid) {
            ToggleOutcome::NotFound => {
                eprintln!("{}", format!("node {} not found", node_pid).yellow());
            }
            ToggleOutcome::Unchanged => {
                eprintln!(
                    "{}",
                    format!("node {} is an attribute, nothing to open", node_pid).yellow()
                );
            }
            _ => {}
        }
    }

    let Some(tree) = session.current() else {
        return Ok(());
    };
    if json {
        println!("{}", serde_json::to_string_pretty(tree)?);
    } else {
        print!("{}", render::render(tree, all));
    }
    Ok(())
}

#[instrument(skip(cli))]
fn search(cli: &Cli, query: &str) -> CliResult<()> {
    if query.trim().is_empty() {
        return Err(CliError::InvalidArgs("missing query term".to_string()));
    }

    let session = open_session(cli)?;
    let results = session.search(query)?;
    println!("{} hits ({} ms)", results.hits, results.response_time_ms);
    for coll in &results.results {
        println!("\n{} [{}]", coll.collection_title, coll.collection_pid);
        for hit in &coll.hits {
            match &hit.title {
                Some(title) => println!("  {}  {}: {} ({})", hit.pid, hit.match_type, hit.matched, title),
                None => println!("  {}  {}: {}", hit.pid, hit.match_type, hit.matched),
            }
        }
    }
    Ok(())
}

fn run_config(command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load()?;
            println!("{}", settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init => {
            let Some(path) = global_config_path() else {
                return Err(CliError::InvalidArgs(
                    "cannot determine config directory".to_string(),
                ));
            };
            if path.exists() {
                println!("Config already exists: {}", path.display());
                return Ok(());
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            println!("Created {}", path.display());
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("(config directory unavailable)"),
            }
            Ok(())
        }
    }
}

fn completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
