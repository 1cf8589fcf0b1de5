use std::collections::BTreeMap;

use anyhow::Context;
use tracing::info;

/// Prints the first picks of every pool in the config file.
///
/// Usage: `swrr [config.toml] [picks]`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| String::from("swrr.toml"));
    let picks: usize = match args.next() {
        Some(count) => count.parse().context("picks must be a non-negative integer")?,
        None => 10,
    };

    let source = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read {path}"))?;
    let config: swrr::Config = source.parse()?;

    tracing_subscriber::fmt()
        .with_max_level(config.max_level())
        .init();
    info!(version = swrr::VERSION, path = %path, "loaded config");

    let registry = swrr::SelectorRegistry::from_config(&config)?;

    for name in registry.keys() {
        let Some(selector) = registry.get(&name) else {
            continue;
        };
        let mut selector = selector.lock();

        let weights: BTreeMap<_, _> = selector.all().into_iter().collect();
        let weights = serde_json::to_string(&weights)?;
        let sequence: Vec<String> = (0..picks)
            .map_while(|_| selector.next().cloned())
            .collect();

        println!("{name} {weights}");
        println!("  {}", sequence.join(" "));
    }

    Ok(())
}
