//! CLI entry point for chord-resize
//!
//! Provides a command-line interface for checking settings, formatting
//! chords, replaying input event scripts and recording shortcuts.

use anyhow::Context;
use chord_resize::config::{ResizeSettings, SettingsStore, SettingsValidator, SettingsWatcher, ValidationLevel, DEFAULT_SETTINGS_PATH};
use chord_resize::core::{parser::normalize_chord, ChordRecorder};
use chord_resize::driver::{parse_script, DriverEvent, InputEvent, ResizeDriver, ScriptCommand, ScriptLine, ValueHost};
use clap::{Parser, Subcommand};
use colored::*;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "chord-resize")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load, validate and print the settings
    Check {
        /// Path to the settings file
        #[arg(short, long, default_value = DEFAULT_SETTINGS_PATH)]
        settings: PathBuf,
    },

    /// Print the canonical form of a chord
    Format {
        /// Chord text, e.g. "Shift+Right"
        text: String,
    },

    /// Feed an event script through the drag driver
    Replay {
        /// Script file, or "-" for stdin
        script: PathBuf,

        /// Path to the settings file
        #[arg(short, long, default_value = DEFAULT_SETTINGS_PATH)]
        settings: PathBuf,

        /// Reload settings between events when the file changes
        #[arg(short, long)]
        follow: bool,
    },

    /// Capture a shortcut from the presses in an event script
    Record {
        /// Script file, or "-" for stdin
        script: PathBuf,

        /// Store the captured shortcut in the settings file
        #[arg(long)]
        save: bool,

        /// Path to the settings file
        #[arg(short, long, default_value = DEFAULT_SETTINGS_PATH)]
        settings: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { settings } => check_settings(&settings)?,
        Commands::Format { text } => format_chord(&text)?,
        Commands::Replay { script, settings, follow } => replay_script(&script, &settings, follow)?,
        Commands::Record { script, save, settings } => record_shortcut(&script, save, &settings)?,
    }

    Ok(())
}

/// Log to stderr, filtered by RUST_LOG (default: warn)
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Host value kept in memory, standing in for a document
struct MemoryHost {
    value: f64,
}

impl ValueHost for MemoryHost {
    fn current_value(&self) -> f64 {
        self.value
    }

    fn set_value(&mut self, value: f64) {
        self.value = value;
    }
}

fn read_script(path: &Path) -> anyhow::Result<Vec<ScriptLine>> {
    let text = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read script from stdin")?;
        buffer
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read script: {}", path.display()))?
    };

    Ok(parse_script(&text)?)
}

fn print_settings(settings: &ResizeSettings) {
    println!("  {} {}", "shortcut:".dimmed(), settings.shortcut.cyan().bold());
    println!("  {} {}", "min_brush_size:".dimmed(), settings.min_brush_size);
    println!("  {} {}", "max_brush_size:".dimmed(), settings.max_brush_size);
    println!("  {} {}", "max_size:".dimmed(), settings.max_size);
}

/// Load and validate the settings file
fn check_settings(path: &Path) -> anyhow::Result<()> {
    let store = SettingsStore::new(path)?;

    println!("{} Loading settings: {}", "→".cyan(), store.path().display());
    let settings = store.load()?;
    print_settings(&settings);
    println!();

    let report = SettingsValidator::new().validate(&settings);

    if report.is_clean() {
        println!("{} {}", "✓".green().bold(), "Settings are valid!".bold());
        return Ok(());
    }

    for issue in &report.issues {
        let marker = match issue.validation_level {
            ValidationLevel::Error => "✗ error".red().bold(),
            ValidationLevel::Warning => "⚠ warning".yellow().bold(),
        };
        println!("{} {}: {}", marker, issue.field.cyan(), issue.message);
        if let Some(suggestion) = &issue.suggestion {
            println!("  {} {}", "→".dimmed(), suggestion.dimmed());
        }
    }

    if report.has_errors() {
        println!("\n{}", "These settings cannot be used for dragging.".red());
        std::process::exit(1);
    }

    Ok(())
}

fn format_chord(text: &str) -> anyhow::Result<()> {
    let canonical = normalize_chord(text)?;
    println!("{}", canonical);
    Ok(())
}

fn describe(event: &DriverEvent) -> String {
    match event {
        DriverEvent::Armed { anchor_x, value } => {
            format!("{} anchor_x={} value={}", "armed".green().bold(), anchor_x, value)
        }
        DriverEvent::ValueChanged(value) => format!("{} {}", "value".cyan(), value),
        DriverEvent::Disarmed => "disarmed".yellow().bold().to_string(),
    }
}

/// Run a script through a driver backed by an in-memory host
fn replay_script(script: &Path, settings_path: &Path, follow: bool) -> anyhow::Result<()> {
    let lines = read_script(script)?;
    let store = SettingsStore::new(settings_path)?;
    let settings = store.load()?;

    let mut driver = ResizeDriver::new(&settings).context("Settings cannot be used for dragging")?;
    let mut host = MemoryHost { value: 0.0 };

    let watcher = if follow {
        Some(SettingsWatcher::new(store.path())?)
    } else {
        None
    };

    println!("{} Chord: {}", "→".cyan(), driver.chord().to_string().bold());

    for ScriptLine { line, command } in lines {
        if let Some(watcher) = &watcher {
            if watcher.check_for_changes() {
                reload(&store, &mut driver);
            }
        }

        let event = match command {
            ScriptCommand::SetValue(value) => {
                host.value = value;
                continue;
            }
            ScriptCommand::Event(event) => event,
        };

        if let Some(driver_event) = driver.handle(event, &mut host) {
            println!("{} {}", format!("{:>4}", line).dimmed(), describe(&driver_event));
        }
    }

    println!("{} Final value: {}", "✓".green(), host.value);
    Ok(())
}

fn reload(store: &SettingsStore, driver: &mut ResizeDriver) {
    match store.load().map(|settings| driver.apply_settings(&settings)) {
        Ok(Ok(event)) => {
            println!("{} Settings reloaded, chord: {}", "↻".cyan(), driver.chord());
            if let Some(event) = event {
                println!("     {}", describe(&event));
            }
        }
        Ok(Err(e)) | Err(e) => {
            tracing::warn!(error = %e, "Keeping previous settings");
        }
    }
}

/// Capture a shortcut from the presses in a script
fn record_shortcut(script: &Path, save: bool, settings_path: &Path) -> anyhow::Result<()> {
    let lines = read_script(script)?;

    let mut recorder = ChordRecorder::new();
    recorder.begin();

    for ScriptLine { command, .. } in lines {
        match command {
            ScriptCommand::Event(InputEvent::Press(input)) => {
                if recorder.is_recording() {
                    recorder.press(input);
                    println!("  {} {}", "capturing:".dimmed(), recorder.label());
                }
            }
            ScriptCommand::Event(InputEvent::Release(input)) => recorder.release(input),
            _ => {}
        }
    }

    let chord = recorder.finish().context("No keys or buttons were pressed")?;
    println!("{} Recorded: {}", "✓".green(), chord.to_string().cyan().bold());

    if save {
        let store = SettingsStore::new(settings_path)?;
        let mut settings = store.load()?;
        settings.set_chord(&chord);
        store.save(&settings)?;
        println!("{} Saved to {}", "✓".green(), store.path().display());
    }

    Ok(())
}
