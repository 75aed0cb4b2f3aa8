//! SecureWiper command-line interface
//!
//! Loads a target file, runs the simulated sanitization with live telemetry,
//! then optionally exports, reports and prints the certificate.

use std::future::Future;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::builder::EnumValueParser;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueEnum};
use securewiper::config::ConfigSection;
use securewiper::types::format_bytes;
use securewiper::utils::metrics::RUN_TIMER;
use securewiper::{
    AppConfig, CertificateFormat, CertificateFormatter, ConsoleRenderer, ExportOutcome, Logger, PacingConfig,
    PassCount, Result, RunStatus, Session, TargetFile, TelemetryEvent,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum LogLevel {
    /// Error messages only
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages (default)
    Info,
    /// Debug and all messages
    Debug,
    /// Trace and all messages (most verbose)
    Trace,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    Text,
    Markdown,
    Html,
    Json,
}

impl From<ReportFormat> for CertificateFormat {
    fn from(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Text => CertificateFormat::PlainText,
            ReportFormat::Markdown => CertificateFormat::Markdown,
            ReportFormat::Html => CertificateFormat::Html,
            ReportFormat::Json => CertificateFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();

    let log_level = matches.get_one::<LogLevel>("verbose").copied().unwrap_or(LogLevel::Info);
    let mut logger = Logger::with_level(log_level.as_str());
    logger.init();

    info!("🚀 SecureWiper starting");

    match run(&matches, log_level).await {
        Ok(RunStatus::Completed) => {
            info!("🎉 Sanitization completed and certificate issued");
        }
        Ok(status) => {
            error!("❌ Sanitization ended with status {}", status);
            process::exit(1);
        }
        Err(e) => {
            error!("❌ {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

async fn run(matches: &ArgMatches, log_level: LogLevel) -> Result<RunStatus> {
    let config = load_config(matches)?;
    let default_passes = config.defaults.pass_count;

    let mut builder = Session::builder(config);
    if let Some(seed) = matches.get_one::<u64>("seed") {
        info!("🎲 Using seeded randomness: {}", seed);
        builder = builder.seed(*seed);
    }
    let mut session = builder.build()?;

    let mut events = session.subscribe();
    let mut renderer = ConsoleRenderer::new(std::io::stdout().is_terminal()).with_sectors(log_level >= LogLevel::Debug);

    let passes = match matches.get_one::<u32>("passes") {
        Some(raw) => PassCount::try_from(*raw)?,
        None => default_passes,
    };
    session.set_pass_count(passes)?;
    info!("🛡️ {} pass(es), {} compliance", passes, passes.tier());

    if let Some(input) = matches.get_one::<String>("input") {
        let target = TargetFile::from_path(input).await?;
        info!("📁 Target {} ({})", target.name, format_bytes(target.size_bytes, 2));
        session.select_target(target)?;
        renderer.drain(&mut events);
    }

    let status = drive(session.start_run(), &mut events, &mut renderer).await?;

    if let Some(dir) = matches.get_one::<String>("export") {
        if session.can_export() {
            let outcome = session.export_certificate()?;
            renderer.drain(&mut events);
            match outcome {
                ExportOutcome::Exported(document) => {
                    document.write_to(&PathBuf::from(dir)).await?;
                }
                ExportOutcome::PrintFallback { reason, printed } => {
                    warn!("⚠️ Export fell back to print ({}), printed: {}", reason, printed);
                }
            }
        } else {
            warn!("⚠️ Export skipped: no certificate was issued");
        }
    }

    if let Some(report) = matches.get_one::<String>("report") {
        let format = matches
            .get_one::<ReportFormat>("format")
            .copied()
            .unwrap_or(ReportFormat::Text);
        let content = CertificateFormatter::format(&session.view(), format.into())?;
        tokio::fs::write(report, content).await?;
        info!("📋 Report generated: {}", report);
    }

    if matches.get_flag("print") {
        session.print()?;
    }

    let metrics = session.metrics();
    if let Some(elapsed) = metrics.timers.get(RUN_TIMER) {
        info!("⏱️ Run took {:.2?}", elapsed);
    }

    Ok(status)
}

fn load_config(matches: &ArgMatches) -> Result<AppConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => {
            info!("⚙️ Loading configuration from {}", path);
            AppConfig::load(&PathBuf::from(path))?
        }
        None => AppConfig::default(),
    };

    if let Some(overrides) = matches.get_many::<String>("set") {
        for assignment in overrides {
            config.apply_override(assignment)?;
        }
    }

    if matches.get_flag("no-delay") {
        config.pacing = PacingConfig {
            sub_steps_per_phase: config.pacing.sub_steps_per_phase,
            ..PacingConfig::immediate()
        };
    }

    config.validate()?;
    Ok(config)
}

/// Polls `task` while rendering telemetry as it arrives
async fn drive<F: Future>(
    task: F,
    events: &mut UnboundedReceiver<TelemetryEvent>,
    renderer: &mut ConsoleRenderer,
) -> F::Output {
    tokio::pin!(task);
    let output = loop {
        tokio::select! {
            output = &mut task => break output,
            Some(event) = events.recv() => renderer.emit(&event),
        }
    };
    renderer.drain(events);
    output
}

fn build_cli() -> Command {
    Command::new("SecureWiper")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Simulated secure file erasure with certificate of destruction")
        .long_about(
            "Runs a simulated multi-pass overwrite of a file (NIST / DoD / Gutmann tiers), \
             streams the sanitization telemetry to the console and issues a certificate \
             that can be exported as PDF, written as a report or printed. \
             No data on disk is modified.",
        )
        // Input
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .required(true)
                .help("File to sanitize"),
        )
        .arg(
            Arg::new("passes")
                .short('p')
                .long("passes")
                .value_name("N")
                .value_parser(clap::value_parser!(u32))
                .help("Overwrite passes: 1, 3, 7 or 35"),
        )
        // Configuration
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file (JSON/YAML)"),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .value_name("KEY=VALUE")
                .action(ArgAction::Append)
                .help("Override a configuration value, e.g. pacing.sub_step_delay_ms=0"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("N")
                .value_parser(clap::value_parser!(u64))
                .help("Seed the random source for reproducible runs"),
        )
        .arg(
            Arg::new("no-delay")
                .long("no-delay")
                .action(ArgAction::SetTrue)
                .help("Skip the simulated pacing delays"),
        )
        // Output
        .arg(
            Arg::new("export")
                .short('e')
                .long("export")
                .value_name("DIR")
                .help("Export the certificate as PDF into DIR"),
        )
        .arg(
            Arg::new("report")
                .short('r')
                .long("report")
                .value_name("FILE")
                .help("Write the certificate report to FILE"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_parser(EnumValueParser::<ReportFormat>::new())
                .default_value("text")
                .help("Report format"),
        )
        .arg(
            Arg::new("print")
                .long("print")
                .action(ArgAction::SetTrue)
                .help("Print the certificate to the terminal after the run"),
        )
        // Logging
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .value_parser(EnumValueParser::<LogLevel>::new())
                .default_value("info")
                .help("Set logging verbosity"),
        )
}
