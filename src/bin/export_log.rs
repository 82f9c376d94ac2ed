//! One-shot export of the whole log
//! Usage: cargo run --bin export_log -- [json|csv|all]

use tracing_subscriber::EnvFilter;

use nutrition_tracker::config::Config;
use nutrition_tracker::dates;
use nutrition_tracker::export::{self, ExportFormat};
use nutrition_tracker::storage;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutrition_tracker=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let formats = match args.get(1).map(|s| s.as_str()).unwrap_or("all") {
        "all" => vec![ExportFormat::Json, ExportFormat::Csv],
        other => match ExportFormat::from_str(other) {
            Some(format) => vec![format],
            None => {
                eprintln!("Unknown format '{}': expected json, csv or all", other);
                std::process::exit(2);
            }
        },
    };

    let config = Config::from_env();
    println!("Data: {} ({})", config.data_path.display(), config.backend.as_str());

    // Exports read the durable data directly; a load failure is an export failure
    let backend = storage::open_backend(config.backend, config.data_path);
    let store = backend.load().await?;
    println!("Found {} day(s)", store.len());

    let today = dates::today();
    for format in formats {
        let artifact = export::write_export(&store, format, &config.export_dir, &today).await?;
        println!("Wrote {} ({}, {} bytes)", artifact.path.display(), artifact.mime_type, artifact.bytes);
    }

    Ok(())
}
