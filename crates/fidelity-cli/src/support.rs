use fidelity_core::EngineConfig;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout stays parseable under `--json`.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn load_config_or_exit(path: Option<&str>) -> EngineConfig {
    match path {
        None => EngineConfig::default(),
        Some(path) => EngineConfig::load(path).unwrap_or_else(|e| {
            eprintln!("error: {e}");
            std::process::exit(1);
        }),
    }
}

pub fn exit_with(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}

pub fn print_json(payload: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(payload).expect("json serialization")
    );
}

pub fn print_sample_block(header: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }

    println!("  {header}:");
    for item in items {
        println!("    - {item}");
    }
}
