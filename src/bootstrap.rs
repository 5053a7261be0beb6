use core::sync::atomic::{AtomicUsize, Ordering};

use tracing_subscriber::{fmt, EnvFilter};

/// `RUST_LOG` decides what is printed, `info` when unset.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Err(e) = fmt().with_env_filter(filter).try_init() {
        eprintln!("cannot install tracing subscriber: {}", e);
    }
}

/// Multi-threaded runtime whose workers are named `<prefix>-worker-<n>`.
pub fn runtime(prefix: &'static str) -> ::std::io::Result<tokio::runtime::Runtime> {
    let num = AtomicUsize::new(0);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name_fn(move || format!("{}-worker-{}", prefix, num.fetch_add(1, Ordering::SeqCst)))
        .build()
}
