use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;

use ngimport::args::{Command, parse_args};
use ngimport::config::NgimportConfig;
use ngimport::service::{ImportError, IndexService};
use ngimport::watch::{WatchConfig, watch_and_reindex};

const USAGE: &str = "ngimport - selector index and auto-import for Angular-style components\n\n\
Usage:\n  \
  ngimport reindex [root]                  Full index rebuild, persisted to .ngimport/\n  \
  ngimport import <selector> <file>        Add the selector's import to <file>\n  \
  ngimport prompt-import <file>            Same, selector read from stdin\n  \
  ngimport complete <fragment>             List selectors containing <fragment>\n  \
  ngimport lookup <selector>               Print one component record as JSON\n  \
  ngimport watch [root]                    Rebuild on a timer and on new files\n  \
  ngimport help | version\n\n\
Configuration lives in .ngimport/config.toml (project_path,\n\
refresh_interval_secs, component_suffix).";

fn main() -> anyhow::Result<()> {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_args(&raw) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    match command {
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Command::Version => {
            println!("ngimport {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Reindex { root } => run_reindex(root.as_deref()),
        Command::Import { selector, target } => run_import(&selector, target.as_deref()),
        Command::PromptImport { target } => {
            let selector = read_selector_from_stdin()?;
            run_import(&selector, target.as_deref())
        }
        Command::Complete { fragment } => run_complete(&fragment),
        Command::Lookup { selector } => run_lookup(&selector),
        Command::Watch { root } => run_watch(root.as_deref()),
    }
}

/// Resolve the project root and construct the service over it.
fn open_service(cli_root: Option<&Path>) -> (IndexService, NgimportConfig) {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = NgimportConfig::load(cli_root.unwrap_or(&cwd));
    let root = config.resolve_root(cli_root, &cwd);
    let service = IndexService::new(root, config.component_suffix.clone());
    (service, config)
}

fn run_reindex(root: Option<&Path>) -> anyhow::Result<()> {
    let (mut service, _) = open_service(root);
    match service.rebuild() {
        Some(stats) => {
            println!("{}", stats.summary());
            println!("{} selector(s) in the index", service.index().len());
            Ok(())
        }
        None => anyhow::bail!("a rebuild is already in progress"),
    }
}

fn run_import(selector: &str, target: Option<&Path>) -> anyhow::Result<()> {
    let (mut service, _) = open_service(None);
    service.ensure_ready();
    let record = service.import_component(selector, target)?;
    // target is Some here; import_component rejects None.
    let target = target.unwrap_or_else(|| Path::new(""));
    println!(
        "imported {} from {} into {}",
        record.symbol_name,
        record.file_path,
        target.display()
    );
    Ok(())
}

fn read_selector_from_stdin() -> anyhow::Result<String> {
    eprintln!("selector: ");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read selector from stdin")?;
    let selector = line.trim().to_string();
    if selector.is_empty() {
        anyhow::bail!("no selector given");
    }
    Ok(selector)
}

fn run_complete(fragment: &str) -> anyhow::Result<()> {
    let (mut service, _) = open_service(None);
    service.ensure_ready();
    for (selector, record) in service.complete(fragment) {
        // Label shape: "<selector>  <Name> from <path>"
        println!(
            "{selector}  {} from {}",
            record.symbol_name, record.file_path
        );
    }
    Ok(())
}

fn run_lookup(selector: &str) -> anyhow::Result<()> {
    let (mut service, _) = open_service(None);
    service.ensure_ready();
    let record = service
        .lookup(selector)
        .ok_or_else(|| ImportError::ComponentNotFound(selector.to_string()))?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn run_watch(root: Option<&Path>) -> anyhow::Result<()> {
    let (mut service, config) = open_service(root);
    let watch_config = WatchConfig {
        refresh_interval: Duration::from_secs(config.refresh_interval_secs),
        suffix: config.component_suffix.clone(),
        ..Default::default()
    };
    watch_and_reindex(&mut service, &watch_config)
}
