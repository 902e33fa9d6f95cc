use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log to stderr so stdout stays clean for `inspect` and `config` output.
/// `RUST_LOG` overrides the default filter.
pub fn init_logger(verbose: bool) {
    let default = if verbose {
        "fleetsheet=debug,fleetsheet_core=debug,info"
    } else {
        "fleetsheet=info,fleetsheet_core=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
