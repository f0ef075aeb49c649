use std::{fs::File, path::Path, sync::Mutex};

use anyhow::Context;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, fmt::time, fmt::writer::BoxMakeWriter, layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Installs the global tracing subscriber.
///
/// The terminal belongs to the renderer, so events go to `log_file` when
/// one is given and are discarded otherwise. `RUST_LOG` overrides the
/// default directives. Call once, early in `main`.
pub fn init(log_file: Option<&Path>) -> anyhow::Result<()> {
    let writer = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::sink),
    };

    let default_level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    tracing_subscriber::Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_timer(time::uptime())
                .with_writer(writer),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env()?
                .add_directive("cpal=warn".parse()?)
                .add_directive("rodio=warn".parse()?),
        )
        .try_init()?;
    Ok(())
}
