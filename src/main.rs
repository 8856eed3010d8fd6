use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};
use csv2geojson::{convert, ConvertOptions, Style};
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("csv2geojson")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Jesper Fjellin")
        .about("Converts latitude,longitude CSV rows into a GeoJSON FeatureCollection of points")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .num_args(1)
                .default_value("points.csv")
                .help("Input CSV file, one <latitude>,<longitude> row per point"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .num_args(1)
                .default_value("points.geojson")
                .help("Output GeoJSON file"),
        )
        .arg(
            Arg::new("delimiter")
                .short('d')
                .long("delimiter")
                .num_args(1)
                .default_value(",")
                .value_parser(parse_delimiter)
                .help("Field delimiter (a single ASCII character)"),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .action(ArgAction::SetTrue)
                .help("Indent the output"),
        )
        .arg(
            Arg::new("verify")
                .long("verify")
                .action(ArgAction::SetTrue)
                .help("Read the output back and check every point round-trips"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("More log output (-v, -vv)"),
        )
        .get_matches();

    init_tracing(matches.get_count("verbose"));

    let defaults = ConvertOptions::default();
    let options = ConvertOptions {
        input: matches
            .get_one::<String>("input")
            .map(PathBuf::from)
            .unwrap_or(defaults.input),
        output: matches
            .get_one::<String>("output")
            .map(PathBuf::from)
            .unwrap_or(defaults.output),
        delimiter: matches
            .get_one::<u8>("delimiter")
            .copied()
            .unwrap_or(defaults.delimiter),
        style: if matches.get_flag("pretty") {
            Style::Pretty
        } else {
            Style::Compact
        },
        verify: matches.get_flag("verify"),
    };

    match convert(&options) {
        Ok(summary) => println!(
            "Conversion complete! {} features written to {}",
            summary.features,
            options.output.display()
        ),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "csv2geojson=warn",
        1 => "csv2geojson=info",
        2 => "csv2geojson=debug",
        _ => "csv2geojson=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// A single ASCII byte that can separate CSV fields.
fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value.as_bytes() {
        [b'"' | b'\n' | b'\r'] => Err(format!("{value:?} cannot be used as a delimiter")),
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!("expected a single ASCII character, got {value:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiter_accepts_single_ascii_characters() {
        assert_eq!(parse_delimiter(","), Ok(b','));
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("\t"), Ok(b'\t'));
    }

    #[test]
    fn delimiter_rejects_unusable_values() {
        for value in ["", ";;", "é", "\"", "\n", "\r"] {
            assert!(parse_delimiter(value).is_err(), "{value:?} accepted");
        }
    }
}
