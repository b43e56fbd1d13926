use std::{
    fs::File,
    io::{self, IsTerminal},
    path::Path,
    sync::Mutex,
};

use anyhow::{Result, anyhow};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

// --- Formatter ---

/// Time of day on the terminal; a full date on file, where runs accumulate.
const TERMINAL_TIMESTAMP: &str = "%H:%M:%S%.3f";
const FILE_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// Local timestamp, coloured level, module and line, then the event fields.
struct LocalFmt {
    timestamp: &'static str,
}

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

/// `benefit_core::calculations::salary_exchange` becomes
/// `core::calculations::salary_exchange`.
fn short_target(target: &str) -> &str {
    target.strip_prefix("benefit_").unwrap_or(target)
}

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();
        let timestamp = Local::now().format(self.timestamp);
        let target = short_target(meta.target());

        if ansi {
            write!(
                writer,
                "\x1b[2m{timestamp}\x1b[0m {}{:>5}\x1b[0m \x1b[36m{target}",
                level_color(meta.level()),
                meta.level()
            )?;
        } else {
            write!(writer, "{timestamp} {:>5} {target}", meta.level())?;
        }
        if let Some(line) = meta.line() {
            write!(writer, ":{line}")?;
        }
        if ansi {
            write!(writer, "\x1b[0m")?;
        }
        write!(writer, " ")?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// `RUST_LOG` wins when set; otherwise `info`, or `debug` when verbose.
fn make_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("info,benefit_core=debug,benefit_data=debug,benefit_cli=debug")
        } else {
            EnvFilter::new("info")
        }
    })
}

/// Initializes logging. Call once at startup.
///
/// - Stderr: coloured when attached to a terminal, plain when piped, so the
///   report on stdout stays clean.
/// - File: appended to `log_file` when given, never coloured.
pub fn init_logging(
    log_file: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt {
            timestamp: TERMINAL_TIMESTAMP,
        })
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| anyhow!("cannot open log file '{}': {e}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .event_format(LocalFmt {
                        timestamp: FILE_TIMESTAMP,
                    })
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(make_filter(verbose))
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("logging already initialized: {e}"))
}
