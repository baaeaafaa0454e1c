//! Thermocouple Node - Main Entry Point

use clap::Parser;
use std::path::PathBuf;
use thermo_node::{init_logging, install_metrics, run, NodeConfig};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Serve thermocouple readings over a serial link", long_about = None)]
struct Args {
    /// Config file (defaults to thermo-node.toml if present)
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = NodeConfig::load(args.config.as_deref())?;

    init_logging(&config.log)?;
    info!("=== Thermocouple Node v{} ===", env!("CARGO_PKG_VERSION"));

    install_metrics(&config.metrics)?;
    run(config).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_config_path_is_optional() {
        let args = Args::try_parse_from(["thermo-node"]).unwrap();
        assert!(args.config.is_none());

        let args = Args::try_parse_from(["thermo-node", "/etc/thermo-node.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/etc/thermo-node.toml")));
    }
}
