use anyhow::Result;
use wildmap_core::Config;

#[tokio::main]
async fn main() -> Result<()> {
    wildmap_core::init()?;

    let (config, validation) = Config::load_validated()?;
    tracing::info!(
        "Wildmap {} starting ({} config warnings), data in {}",
        env!("CARGO_PKG_VERSION"),
        validation.warnings.len(),
        config.storage.data_dir.display()
    );

    wildmap_server::serve(&config).await
}
