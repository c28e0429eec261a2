//! Tracing subscriber for the CLI
//!
//! The level is chosen from `RUST_LOG`, then `--verbose`. A manifest read
//! later can still raise it to debug through [`Logging::enable_debug`].

use std::io::IsTerminal;

use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry};

pub struct Logging {
    handle: Option<reload::Handle<EnvFilter, Registry>>,
    from_env: bool,
}

impl Logging {
    /// Installs the stderr subscriber; `RUST_LOG` wins over `--verbose`
    pub fn init(verbose: bool) -> Self {
        let level = if verbose { "debug" } else { "warn" };
        let (filter, from_env) = match EnvFilter::try_from_default_env() {
            Ok(filter) => (filter, true),
            Err(_) => (EnvFilter::new(level), false),
        };
        let (filter, handle) = reload::Layer::new(filter);

        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .is_ok();

        Self {
            handle: installed.then_some(handle),
            from_env,
        }
    }

    /// Raises the level to debug, unless `RUST_LOG` chose it
    pub fn enable_debug(&self) {
        if self.from_env {
            return;
        }
        if let Some(handle) = &self.handle {
            let _ = handle.reload(EnvFilter::new("debug"));
        }
    }
}
