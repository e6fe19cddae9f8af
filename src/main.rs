//! henrik-os - Main entry point
//!
//! Parses the command line, sets up logging and signal handling, and hands
//! off to the interactive or headless front end.

use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use henrik_os::app::App;
use henrik_os::cli::{Cli, Commands, InstallMode};
use henrik_os::completion::{self, CompletionIo};
use henrik_os::error::{ProvisionError, Result};
use henrik_os::logging::{self, LogMode};
use henrik_os::modules::{self, files};
use henrik_os::process_guard::{self, CancelFlag};
use henrik_os::registry::Registry;
use henrik_os::summary::RunOutcome;
use henrik_os::{headless, sanity, ProvisionConfig, Selection};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

fn log_mode(command: Option<&Commands>) -> LogMode {
    match command {
        None => LogMode::Interactive,
        Some(Commands::Install { modules, all, .. })
            if InstallMode::from_args(modules, *all) == InstallMode::Interactive =>
        {
            LogMode::Interactive
        }
        Some(_) => LogMode::Headless,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if let Err(e) = logging::init(log_mode(cli.command.as_ref()), cli.verbose, cli.log_file.as_deref()) {
        eprintln!("warning: {e:#}");
    }
    info!(version = env!("CARGO_PKG_VERSION"), "henrik-os starting up");

    if cli.dry_run {
        henrik_os::enable_dry_run();
        info!("dry-run mode: mutating commands and file writes are only printed");
    }

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            error!(error = %err, "exiting with error");
            eprintln!("✗ {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let Cli { config, command, .. } = cli;
    let config = config.as_deref();

    match command {
        Some(Commands::Validate { config }) => validate(&config),
        Some(Commands::Completion { shell, install }) => {
            let home = if install {
                files::home_dir().map_err(|e| ProvisionError::general(format!("{e:#}")))?
            } else {
                PathBuf::new()
            };
            let shell_env = std::env::var("SHELL").unwrap_or_default();
            let (stdout, stderr, stdin) = (io::stdout(), io::stderr(), io::stdin());
            completion::run(
                shell,
                install,
                &shell_env,
                &home,
                CompletionIo {
                    stdout: &mut stdout.lock(),
                    stderr: &mut stderr.lock(),
                    stdin: &mut stdin.lock(),
                },
            )
            .map_err(|e| ProvisionError::general(format!("{e:#}")))?;
            Ok(0)
        }
        Some(Commands::List) => {
            let registry = load_registry(config)?;
            list(&registry)?;
            Ok(0)
        }
        Some(Commands::Install { modules, all, report }) => {
            install(config, InstallMode::from_args(&modules, all), report.as_deref())
        }
        None => {
            info!("no command specified, launching interactive installer");
            install(config, InstallMode::Interactive, None)
        }
    }
}

fn load_registry(config: Option<&Path>) -> Result<Arc<Registry>> {
    let config =
        ProvisionConfig::load(config).map_err(|e| ProvisionError::config(format!("{e:#}")))?;
    debug!(?config, "effective configuration");
    Ok(Arc::new(modules::builtin_registry(&config)?))
}

fn validate(path: &Path) -> Result<u8> {
    info!(path = %path.display(), "validating configuration file");
    match ProvisionConfig::load_from_file(path) {
        Ok(_) => {
            println!("✓ Configuration file is valid: {}", path.display());
            Ok(0)
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed: {e:#}");
            Ok(2)
        }
    }
}

fn list(registry: &Registry) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for module in registry.all() {
        let deps = module.dependencies();
        let deps = if deps.is_empty() { "-".to_string() } else { deps.join(", ") };
        writeln!(
            out,
            "{:<14} {:<28} {:<20} {}",
            module.id(),
            module.name(),
            deps,
            module.description()
        )?;
    }
    Ok(())
}

fn install(config: Option<&Path>, mode: InstallMode, report: Option<&Path>) -> Result<u8> {
    let check = sanity::verify_environment();
    sanity::report(&check, &mut io::stderr())?;
    if !check.is_ok() {
        return Ok(2);
    }

    let registry = load_registry(config)?;
    let cancel = CancelFlag::new();
    if let Err(e) = process_guard::init_signal_handlers(&cancel) {
        warn!(error = %e, "failed to install signal handlers; Ctrl+C will exit immediately");
    }

    let selection = match mode {
        InstallMode::Interactive => {
            if report.is_some() {
                warn!("--report is only written for headless runs");
            }
            let Some(outcome) = run_tui(registry, cancel)? else {
                info!("quit before starting a run");
                return Ok(0);
            };
            print!("{}", outcome.render());
            for failure in outcome.failures() {
                eprintln!("✗ {failure}");
            }
            return Ok(outcome.exit_code());
        }
        InstallMode::All => Selection::All,
        InstallMode::Selected(ids) => Selection::Ids(ids),
    };

    let stdout = io::stdout();
    let outcome = headless::run_headless(registry, selection, &mut stdout.lock(), &cancel)?;
    if let Some(path) = report {
        outcome.write_report(path)?;
    }
    if let Some(err) = &outcome.error {
        eprintln!("✗ {err}");
    }
    Ok(outcome.exit_code())
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
}

/// Run the TUI, always restoring the terminal afterwards.
fn run_tui(registry: Arc<Registry>, cancel: CancelFlag) -> Result<Option<RunOutcome>> {
    debug!("initializing terminal for TUI mode");

    enable_raw_mode()
        .map_err(|e| ProvisionError::terminal(format!("failed to enable raw mode: {e}")))?;
    if let Err(e) = crossterm::execute!(io::stdout(), EnterAlternateScreen) {
        restore_terminal();
        return Err(ProvisionError::terminal(format!("failed to enter alternate screen: {e}")));
    }

    // A panic on the UI thread must not leave the shell in raw mode. Module
    // workers catch their own panics and keep the TUI alive.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if std::thread::current().name() == Some("main") {
            restore_terminal();
            default_hook(info);
        } else {
            error!(panic = %info, "worker panicked");
        }
    }));

    let result = Terminal::new(CrosstermBackend::new(io::stdout()))
        .map_err(ProvisionError::from)
        .and_then(|mut terminal| App::new(registry, cancel).run(&mut terminal));

    restore_terminal();
    result
}
