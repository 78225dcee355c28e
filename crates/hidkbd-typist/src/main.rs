//! hidkbd command-line entry point.
//!
//! Loads the configuration, opens the HID gadget device, and runs one typing
//! command through a [`ReportSession`].
//!
//! # Usage
//!
//! ```text
//! hidkbd [OPTIONS] <COMMAND>
//!
//! Commands:
//!   type        Type a string of ASCII text
//!   press       Press one key while holding modifiers (e.g. --ctrl --alt /del)
//!   key         Press a single key or operation key (/esc /del /tab /space /enter)
//!   modifiers   Tap modifier keys on their own (e.g. --gui)
//!   descriptor  Write the boot keyboard report descriptor for gadget setup
//!
//! Options:
//!   --config <PATH>       Config file [default: platform config dir]
//!   --device <PATH>       HID gadget device [env: HIDKBD_DEVICE]
//!   --interval-ms <MS>    Key hold interval [env: HIDKBD_INTERVAL_MS]
//!   --dry-run             Print reports instead of writing to the device
//! ```
//!
//! CLI options take precedence over the config file.  The log level comes from
//! `RUST_LOG` when set, otherwise from the config file.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hidkbd_core::{ModifierFlags, KEYBOARD_REPORT_DESCRIPTOR};
use hidkbd_typist::application::report_session::{KeyDelay, ReportSession, ReportTransmitter};
use hidkbd_typist::infrastructure::{
    delay::{RecordingDelay, ThreadSleepDelay},
    storage::config::load_config,
    transmitter::{HidGadgetTransmitter, RecordingTransmitter},
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Type text on a host through a USB HID gadget keyboard.
#[derive(Debug, Parser)]
#[command(name = "hidkbd", version)]
struct Cli {
    /// Path of the TOML config file.
    #[arg(long, global = true, env = "HIDKBD_CONFIG")]
    config: Option<PathBuf>,

    /// HID gadget character device to write reports to.
    #[arg(long, global = true, env = "HIDKBD_DEVICE")]
    device: Option<PathBuf>,

    /// Milliseconds to hold each press and each release.
    ///
    /// Values below 15 may be too fast for some hosts.
    #[arg(long, global = true, env = "HIDKBD_INTERVAL_MS")]
    interval_ms: Option<u64>,

    /// Record reports and print them as hex instead of opening the device.
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Type a string of ASCII text.
    Type {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Press one key while holding modifiers.
    Press {
        #[command(flatten)]
        modifiers: ModifierArgs,
        /// A single character, or /esc, /del, /tab.
        #[arg(allow_hyphen_values = true)]
        key: String,
    },
    /// Press a single key.
    Key {
        /// A single character, or /esc, /del, /tab, /space, /enter.
        #[arg(allow_hyphen_values = true)]
        key: String,
    },
    /// Tap modifier keys on their own.
    Modifiers {
        #[command(flatten)]
        modifiers: ModifierArgs,
    },
    /// Write the HID report descriptor (raw bytes to a file, or hex to stdout).
    Descriptor {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct ModifierArgs {
    #[arg(long)]
    ctrl: bool,
    #[arg(long)]
    shift: bool,
    #[arg(long)]
    alt: bool,
    /// Windows / Command / Super key.
    #[arg(long)]
    gui: bool,
    #[arg(long)]
    right_ctrl: bool,
    #[arg(long)]
    right_shift: bool,
    #[arg(long)]
    right_alt: bool,
    #[arg(long)]
    right_gui: bool,
}

impl ModifierArgs {
    fn flags(&self) -> ModifierFlags {
        [
            (self.ctrl, ModifierFlags::LEFT_CTRL),
            (self.shift, ModifierFlags::LEFT_SHIFT),
            (self.alt, ModifierFlags::LEFT_ALT),
            (self.gui, ModifierFlags::LEFT_GUI),
            (self.right_ctrl, ModifierFlags::RIGHT_CTRL),
            (self.right_shift, ModifierFlags::RIGHT_SHIFT),
            (self.right_alt, ModifierFlags::RIGHT_ALT),
            (self.right_gui, ModifierFlags::RIGHT_GUI),
        ]
        .into_iter()
        .filter(|(set, _)| *set)
        .fold(ModifierFlags::NONE, |acc, (_, flag)| acc | flag)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(device) = &cli.device {
        config.device.path = device.clone();
    }
    if let Some(ms) = cli.interval_ms {
        config.typing.key_interval_ms = ms;
    }

    // Logs go to stderr so dry-run output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Command::Descriptor { output } = &cli.command {
        return write_descriptor(output.as_deref());
    }

    let recorder = Arc::new(RecordingTransmitter::new());
    let recorded_delay = Arc::new(RecordingDelay::new());
    let (transmitter, delay): (Arc<dyn ReportTransmitter>, Arc<dyn KeyDelay>) = if cli.dry_run {
        (recorder.clone(), recorded_delay.clone())
    } else {
        let device = HidGadgetTransmitter::open(&config.device.path).with_context(|| {
            format!(
                "failed to open HID gadget device {}",
                config.device.path.display()
            )
        })?;
        (Arc::new(device), Arc::new(ThreadSleepDelay))
    };

    let mut session = ReportSession::new(transmitter, delay, config.session_config());
    session.init();
    let result = run_command(&mut session, &cli.command);
    session.deinit();
    result?;

    if cli.dry_run {
        let reports = recorder.reports();
        for report in &reports {
            println!("{}", hex(report));
        }
        info!(
            reports = reports.len(),
            elapsed_ms = recorded_delay.total().as_millis() as u64,
            "dry run complete"
        );
    }
    Ok(())
}

/// Dispatches one CLI command to the session.
fn run_command(session: &mut ReportSession, command: &Command) -> anyhow::Result<()> {
    match command {
        Command::Type { text } => {
            let keystrokes = session.type_text(text).context("failed to type text")?;
            info!(keystrokes, "typed text");
        }
        Command::Press { modifiers, key } => {
            let flags = modifiers.flags();
            session
                .press_with_modifiers(flags, key)
                .with_context(|| format!("failed to press {flags}+{key}"))?;
        }
        Command::Key { key } => {
            session
                .single_keypress(key)
                .with_context(|| format!("failed to press {key}"))?;
        }
        Command::Modifiers { modifiers } => {
            let flags = modifiers.flags();
            session
                .tap_modifiers(flags)
                .with_context(|| format!("failed to tap modifiers {flags}"))?;
        }
        Command::Descriptor { .. } => unreachable!("handled before the session is opened"),
    }
    Ok(())
}

fn write_descriptor(output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, KEYBOARD_REPORT_DESCRIPTOR)
                .with_context(|| format!("failed to write descriptor to {}", path.display()))?;
            info!(path = %path.display(), bytes = KEYBOARD_REPORT_DESCRIPTOR.len(), "descriptor written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", hex(KEYBOARD_REPORT_DESCRIPTOR))?;
        }
    }
    Ok(())
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
