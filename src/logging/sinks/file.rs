use std::io;

use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling::daily};
use tracing_subscriber::{layer::Layer as LayerTrait, registry::LookupSpan};

use crate::logging::{config::LoggingConfig, formatter};

/// Файловый слой с ежедневной ротацией и неблокирующей записью.
///
/// Guard нужно держать до завершения программы: при его drop буфер
/// сбрасывается на диск.
pub fn layer_with_config<S>(
    config: &LoggingConfig
) -> io::Result<(Box<dyn LayerTrait<S> + Send + Sync>, WorkerGuard)>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    config.ensure_log_dir()?;

    let file_appender = daily(&config.log_dir, &config.file_name);
    let (non_blocking_writer, guard) = non_blocking(file_appender);

    let layer = formatter::build_formatter(config, non_blocking_writer, false);
    Ok((layer, guard))
}
