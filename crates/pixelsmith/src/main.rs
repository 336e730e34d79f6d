use std::{fs, io::Write, path::PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};
use pixelsmith_engine::{EditorSession, EditorSettings, JsonFileStore, LibraryStore, SessionState};

mod ascii;
mod config;
mod script;

#[derive(Parser, Debug)]
#[command(version, about = "Sprite and bitmap font editing from the command line", long_about = None)]
pub struct Args {
    /// Library file holding components, compositions and fonts
    #[arg(long, value_name = "PATH")]
    library: Option<PathBuf>,

    /// Settings file (TOML)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "info,pixelsmith_engine=trace"
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run an editing script against a fresh canvas
    Run {
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Session file restored before and written after the script
        #[arg(long, value_name = "PATH")]
        session: Option<PathBuf>,
    },
    /// Print a stored component as text
    ShowComponent { name: String },
    /// List everything in the library
    List,
    /// Write the effective settings to the settings file
    WriteSettings,
}

fn start_logger(spec: &str) -> Option<LoggerHandle> {
    let Some(log_dir) = config::log_dir() else {
        eprintln!("Failed to create log file");
        return None;
    };
    let logger = match Logger::try_with_env_or_str(spec) {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("Invalid log specification '{spec}': {err}");
            return None;
        }
    };
    let result = logger
        .log_to_file(FileSpec::default().directory(&log_dir).basename("pixelsmith").suffix("log").suppress_timestamp())
        .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
        .duplicate_to_stderr(flexi_logger::Duplicate::Warn)
        .start();
    match result {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to start logger: {err}");
            None
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _logger = start_logger(&args.log_level);
    log::info!("Starting pixelsmith {}", env!("CARGO_PKG_VERSION"));

    let settings_path = args.settings.clone().or_else(config::settings_file);
    let settings = match &settings_path {
        Some(path) => EditorSettings::load(path),
        None => EditorSettings::default(),
    };

    let Some(library_path) = args.library.clone().or_else(config::library_file) else {
        bail!("No library location available, pass --library");
    };
    let mut store = JsonFileStore::new(library_path);
    let library = store.load().with_context(|| format!("loading library {}", store.path().display()))?;

    match args.command {
        Command::Run { script, session: session_path } => {
            let text = fs::read_to_string(&script).with_context(|| format!("reading script {}", script.display()))?;
            let mut session = EditorSession::with_library(settings, library);
            if let Some(path) = session_path.as_ref().filter(|p| p.exists()) {
                session.restore_session(SessionState::load(path)?);
            }

            let stdout = std::io::stdout();
            let errors = script::run_script(&mut session, &text, &mut stdout.lock());
            for error in &errors {
                eprintln!("{}: {error}", script.display());
            }

            store.store(session.library())?;
            if let Some(path) = &session_path {
                session.session_state().save(path)?;
            }
            if !errors.is_empty() {
                bail!("{} of the script lines failed", errors.len());
            }
        }
        Command::ShowComponent { name } => {
            let component = library.component(&name)?;
            println!("{} {}", component.name, component.size());
            print!("{}", ascii::render_component(component));
        }
        Command::List => {
            let mut out = std::io::stdout().lock();
            for (name, component) in &library.components {
                writeln!(out, "component   {name} {}", component.size())?;
            }
            for (name, composition) in &library.compositions {
                writeln!(out, "composition {name} {}", composition.size())?;
            }
            for (name, font) in &library.fonts {
                let chars: String = font.characters.keys().collect();
                writeln!(out, "font        {name} [{chars}]")?;
            }
        }
        Command::WriteSettings => {
            let Some(path) = settings_path else {
                bail!("No settings location available, pass --settings");
            };
            settings.store(&path)?;
            println!("{}", path.display());
        }
    }

    log::info!("Shutting down.");
    Ok(())
}
