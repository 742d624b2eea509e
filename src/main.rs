//! TexEdit - A terminal text editor.
//!
//! # Usage
//!
//! ```bash
//! texedit
//! texedit notes.txt
//! texedit --case-sensitive --icon logo.png notes.txt
//! ```

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;

use texedit::app::App;
use texedit::config::{
    ConfigFlags, global_config_path, load_config_flags, local_override_path,
};
use texedit::icon::{create_picker, load_about_icon};
use texedit::search::SearchOptions;

/// A terminal text editor with menus, find and replace
#[derive(Parser, Debug)]
#[command(name = "texedit", version, about, long_about = None)]
struct Cli {
    /// Text file to open at startup
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Match case in Find and Replace
    #[arg(long)]
    case_sensitive: bool,

    /// Image shown in the About dialog
    #[arg(long, value_name = "PATH")]
    icon: Option<PathBuf>,

    /// Do not load or draw the About icon
    #[arg(long)]
    no_icon: bool,

    /// Force image rendering to use half-cell fallback mode
    #[arg(long)]
    force_half_cell: bool,

    /// Write log output to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());
    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

impl Cli {
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            case_sensitive: self.case_sensitive,
            no_icon: self.no_icon,
            force_half_cell: self.force_half_cell,
            icon: self.icon.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

/// Global config, then the local override, then the command line.
fn effective_flags(cli: &Cli) -> Result<ConfigFlags> {
    let global_flags = load_config_flags(&global_config_path())?;
    let local_flags = load_config_flags(&local_override_path())?;
    Ok(global_flags.union(&local_flags).union(&cli.flags()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let effective = effective_flags(&cli)?;

    init_logging(effective.log_file.as_deref())?;

    let search_options = if effective.case_sensitive {
        SearchOptions::case_sensitive()
    } else {
        SearchOptions::case_insensitive()
    };

    // The picker queries the terminal, so it must run before raw mode.
    let (icon, picker) = if effective.no_icon {
        (None, None)
    } else {
        let icon = load_about_icon(effective.icon.as_deref());
        let picker = icon
            .as_ref()
            .and_then(|_| create_picker(effective.force_half_cell));
        (icon, picker)
    };

    let mut app = App::new()
        .with_file(cli.file)
        .with_search_options(search_options)
        .with_icon(icon, picker);

    app.run().context("Application error")
}
