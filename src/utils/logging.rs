use crate::utils::config::LoggingConfig;
use crate::utils::errors::{BotError, Result};
use std::fs::OpenOptions;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{
    filter::Directive, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
    Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn fmt_layer<W>(writer: W, json: bool, ansi: bool) -> BoxedLayer
where
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer().with_writer(writer).with_ansi(ansi);
    if json {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}

/// Opens `path` for appending, creating missing parent directories, behind a
/// background writer. Lines still buffered are flushed when the guard drops.
pub fn open_log_file(path: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(tracing_appender::non_blocking(file))
}

pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let directive = format!("attraction_bot={}", config.level)
        .parse::<Directive>()
        .map_err(|e| BotError::ConfigError(e.to_string()))?;
    let filter = EnvFilter::from_default_env().add_directive(directive);
    let json = config.format == "json";

    let mut layers = vec![fmt_layer(std::io::stderr, json, true)];
    let guard = match &config.file {
        Some(path) => {
            let (writer, guard) = open_log_file(path)?;
            layers.push(fmt_layer(writer, json, false));
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .init();

    Ok(guard)
}
