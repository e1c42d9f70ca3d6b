use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, fmt};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Installs the global `tracing` subscriber. Safe to call more than once;
/// only the first call takes effect.
///
/// In the browser events go to the developer console; elsewhere to stderr.
/// An unparsable filter falls back to `info`.
pub fn init_tracing(filter: &str) {
    INITIALIZED.get_or_init(|| {
        let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
        let builder = fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_ansi(false)
            .without_time();

        #[cfg(target_arch = "wasm32")]
        let builder = builder.with_writer(crate::web::console::MakeConsoleWriter);

        builder.try_init().ok();
    });
}
