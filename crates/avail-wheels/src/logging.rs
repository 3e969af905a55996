use std::fmt;

use anstream::ColorChoice;
use anyhow::Context;
use owo_colors::OwoColorize;
use tracing::level_filters::LevelFilter;
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use wh_static::EnvVars;

/// The crates whose `DEBUG` messages are shown with `--verbose`.
const WORKSPACE_TARGETS: &[&str] = &[
    "avail_wheels",
    "wh_distribution_filename",
    "wh_environment",
    "wh_pep440",
    "wh_platform_tags",
    "wh_requirements",
    "wh_select",
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Level {
    /// Suppress all tracing output by default (overridable by `RUST_LOG`).
    #[default]
    Default,
    /// Show debug messages by default (overridable by `RUST_LOG`).
    Verbose,
}

/// Formats an event as its level followed by its message.
struct AvailWheelsFormat;

/// See <https://docs.rs/tracing-subscriber/0.3.18/src/tracing_subscriber/fmt/format/mod.rs.html#1026-1156>
impl<S, N> FormatEvent<S, N> for AvailWheelsFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let level = event.metadata().level();

        // Same colors as tracing
        if writer.has_ansi_escapes() {
            match *level {
                tracing::Level::TRACE => write!(writer, "{} ", level.purple())?,
                tracing::Level::DEBUG => write!(writer, "{} ", level.blue())?,
                tracing::Level::INFO => write!(writer, "{} ", level.green())?,
                tracing::Level::WARN => write!(writer, "{} ", level.yellow())?,
                tracing::Level::ERROR => write!(writer, "{} ", level.red())?,
            }
        } else {
            write!(writer, "{level} ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Configure `tracing` based on the given [`Level`], taking into account the `RUST_LOG` environment
/// variable.
///
/// With [`Level::Verbose`] and no `RUST_LOG`, `DEBUG` messages of the workspace crates are shown.
pub(crate) fn setup_logging(level: Level) -> anyhow::Result<()> {
    let mut filter = EnvFilter::builder()
        // Show nothing, but allow `RUST_LOG` to override.
        .with_default_directive(LevelFilter::OFF.into())
        .from_env()
        .context("Invalid RUST_LOG directives")?;

    if level == Level::Verbose && std::env::var_os(EnvVars::RUST_LOG).is_none() {
        for target in WORKSPACE_TARGETS {
            let directive: Directive = format!("{target}=debug")
                .parse()
                .with_context(|| format!("Invalid logging directive for `{target}`"))?;
            filter = filter.add_directive(directive);
        }
    }

    let ansi = match anstream::Stderr::choice(&std::io::stderr()) {
        ColorChoice::Always | ColorChoice::AlwaysAnsi => true,
        ColorChoice::Never => false,
        // We just asked anstream for a choice, that can't be auto
        ColorChoice::Auto => unreachable!(),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(AvailWheelsFormat)
                .with_writer(std::io::stderr)
                .with_ansi(ansi)
                .with_filter(filter),
        )
        .init();

    Ok(())
}
