//! Tracing setup for hosts embedding `folio-core`.
//!
//! Opt-in: hosts call [`init_default_tracing`] on native targets or
//! [`init_console_tracing`] in the browser, or install their own subscriber.

/// Installs a compact `tracing` subscriber filtered by `RUST_LOG` (default
/// `info`) when the `telemetry` feature is enabled.
///
/// Returns `false` when the feature is off or a global subscriber is already
/// set.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

/// Browser counterpart of [`init_default_tracing`]: formats events without
/// timestamps or ANSI colors and forwards each one to `console.error`,
/// `console.warn` or `console.log` by level.
///
/// Returns `false` off wasm32, when the feature is off, or when a global
/// subscriber is already set.
#[must_use]
pub fn init_console_tracing() -> bool {
    #[cfg(all(feature = "telemetry", target_arch = "wasm32"))]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
            .with_writer(console::MakeConsoleWriter)
            .with_ansi(false)
            .without_time()
            .with_target(false);

        return builder.try_init().is_ok();
    }

    #[cfg(not(all(feature = "telemetry", target_arch = "wasm32")))]
    {
        false
    }
}

#[cfg(all(feature = "telemetry", target_arch = "wasm32"))]
mod console {
    use std::io;

    use tracing::{Level, Metadata};
    use tracing_subscriber::fmt::MakeWriter;

    pub struct MakeConsoleWriter;

    /// Buffers one formatted event and hands it to the console on drop.
    pub struct ConsoleWriter {
        level: Level,
        buf: Vec<u8>,
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let line = String::from_utf8_lossy(&self.buf);
            let line = line.trim_end();
            if line.is_empty() {
                return;
            }
            let message = line.into();
            match self.level {
                Level::ERROR => web_sys::console::error_1(&message),
                Level::WARN => web_sys::console::warn_1(&message),
                _ => web_sys::console::log_1(&message),
            }
        }
    }

    impl<'a> MakeWriter<'a> for MakeConsoleWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter {
                level: Level::INFO,
                buf: Vec::new(),
            }
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleWriter {
                level: *meta.level(),
                buf: Vec::new(),
            }
        }
    }
}
