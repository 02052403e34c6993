use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use crossterm::{
    cursor::Show,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::{io, time::Duration};
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt, EnvFilter};

mod app;
mod app_event;
mod config;
mod error;
mod models;
mod ssh_config;
mod ssh_service;
mod ui;

use app::{App, SelectionState};
use config::{AppConfig, ConfigManager, Theme};
use error::AppError;
use ssh_service::SystemLauncher;

/// Pick a host from your ssh config and print (or run) the ssh command for it.
#[derive(Debug, Parser)]
#[command(name = "sshpick", version, about)]
struct Cli {
    /// Path to ssh config file (default: ~/.ssh/config)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Execute ssh after selection
    #[arg(long)]
    exec: bool,

    /// Do not print the command to stdout
    #[arg(long)]
    no_print: bool,
}

fn init_logging(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join(format!(
        "sshpick_{}.log",
        Local::now().format("%Y%m%d_%H%M%S")
    ));
    let file = File::create(&log_file).context("Failed to create log file")?;

    fmt()
        .with_max_level(Level::DEBUG)
        .with_env_filter(EnvFilter::from_default_env().add_directive("sshpick=debug".parse()?))
        .with_ansi(false)
        .with_writer(file)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}

/// Raw mode, alternate screen and mouse capture for as long as this lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        // from here on a failed step is undone by Drop
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show);
    }
}

fn load_settings() -> AppConfig {
    let manager = match ConfigManager::new() {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("Warning: {:#}; running without settings or logs", e);
            return AppConfig::default();
        }
    };

    if let Err(e) = init_logging(&manager.log_dir()) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    match manager.load_config() {
        Ok(config) => {
            info!("Loaded settings from {:?}", manager.config_path());
            config
        }
        Err(e) => {
            tracing::warn!("Ignoring settings file: {:#}", e);
            eprintln!(
                "Warning: ignoring {}: {:#}",
                manager.config_path().display(),
                e
            );
            AppConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // usage errors exit with status 2
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            eprintln!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let settings = load_settings();
    debug!("CLI: {:?}", cli);

    let home = ssh_config::home_dir();
    let explicit = cli.config.or_else(|| settings.ssh_config_path(home.as_deref()));
    let ssh_config_path = ssh_config::resolve_ssh_config_path(explicit, home)?;
    info!("SSH config path: {:?}", ssh_config_path);

    let connections = ssh_config::load_connections(&ssh_config_path)?;

    let exec_requested = cli.exec || settings.exec;
    let suppress_print = cli.no_print || !settings.print_command;
    let state = SelectionState::new(connections, exec_requested, suppress_print);
    let app = App::new(state, Theme::from(&settings.theme));

    // Terminal is restored when the guard drops, before printing or exec
    let res = {
        let _guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        run_app(&mut terminal, app).await
    };

    let state = res?;
    info!("Picker finished in phase {:?}", state.phase());
    ssh_service::finish(&state, &SystemLauncher, &mut io::stdout())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> Result<SelectionState, AppError> {
    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }

            if app.should_quit() {
                return Ok(app.into_state());
            }
        }
    }
}
