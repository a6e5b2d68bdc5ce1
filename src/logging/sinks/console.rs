use std::io::{self, Stderr};

use tracing_subscriber::{layer::Layer as LayerTrait, registry::LookupSpan};

use crate::logging::{config::LoggingConfig, formatter};

/// Консольный слой. Пишет в stderr, чтобы не смешиваться с выводом
/// оболочки в stdout.
pub fn layer_with_config<S>(config: &LoggingConfig) -> Box<dyn LayerTrait<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let writer: fn() -> Stderr = io::stderr;
    formatter::build_formatter(config, writer, config.with_ansi)
}

#[cfg(test)]
mod tests {
    use tracing::info;
    use tracing_subscriber::{prelude::*, registry::Registry};

    use super::*;
    use crate::logging::config::LogFormat;

    /// Тест проверяет, что слой строится для каждого формата и что вызов
    /// логирования не приводит к панике.
    #[test]
    fn test_layer_with_config_various_formats() {
        for format in [LogFormat::Compact, LogFormat::Pretty, LogFormat::Json] {
            for with_ansi in [true, false] {
                let cfg = LoggingConfig {
                    format,
                    with_ansi,
                    ..Default::default()
                };
                let subscriber = Registry::default().with(layer_with_config::<Registry>(&cfg));
                tracing::subscriber::with_default(subscriber, || {
                    info!(?format, with_ansi, "console layer smoke test");
                });
            }
        }
    }
}
