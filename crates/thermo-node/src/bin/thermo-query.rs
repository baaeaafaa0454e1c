//! Base station query tool

use anyhow::Context;
use clap::Parser;
use thermo_node::{init_logging, LogSettings};
use thermo_protocol::{Channel, LinkSettings, StationClient, DEFAULT_BAUD_RATE};

#[derive(Parser, Debug)]
#[command(author, version, about = "Query thermocouple readings from a node", long_about = None)]
struct Args {
    /// Serial port path (e.g., /dev/ttyUSB0)
    device: String,

    /// Thermocouple to read
    #[arg(value_parser = clap::value_parser!(u8).range(1..=3))]
    thermocouple: u8,

    /// Number of queries to send
    #[arg(short, long, default_value_t = 1)]
    count: u32,

    /// Baud rate
    #[arg(short, long, default_value_t = DEFAULT_BAUD_RATE)]
    baud: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(&LogSettings {
        level: "warn".to_string(),
        json: false,
    })?;

    let channel = Channel::from_number(args.thermocouple)
        .context("thermocouple must be 1, 2 or 3")?;
    let link = LinkSettings {
        baud_rate: args.baud,
        ..LinkSettings::new(&args.device)
    };

    let mut client = StationClient::open(&link)?;
    for _ in 0..args.count {
        let reading = client.query(channel).await?;
        println!(
            "{} {:>4} counts {:>8.2} mV",
            reading.channel,
            reading.raw,
            reading.millivolts()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["thermo-query", "/dev/ttyUSB0", "2"]).unwrap();
        assert_eq!(args.device, "/dev/ttyUSB0");
        assert_eq!(args.thermocouple, 2);
        assert_eq!(args.count, 1);
        assert_eq!(args.baud, DEFAULT_BAUD_RATE);
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "thermo-query",
            "/dev/ttyUSB0",
            "3",
            "--count",
            "5",
            "--baud",
            "19200",
        ])
        .unwrap();
        assert_eq!(args.thermocouple, 3);
        assert_eq!(args.count, 5);
        assert_eq!(args.baud, 19200);
    }

    #[test]
    fn test_thermocouple_out_of_range() {
        for bad in ["0", "4", "x"] {
            let err = Args::try_parse_from(["thermo-query", "/dev/ttyUSB0", bad]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation, "{}", bad);
        }
    }

    #[test]
    fn test_help_and_missing_arguments() {
        let help = Args::try_parse_from(["thermo-query", "--help"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);

        let missing = Args::try_parse_from(["thermo-query", "/dev/ttyUSB0"]).unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::MissingRequiredArgument);

        let empty = Args::try_parse_from(std::iter::empty::<&str>()).unwrap_err();
        assert_eq!(empty.kind(), ErrorKind::MissingRequiredArgument);
    }
}
