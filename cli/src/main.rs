use std::path::PathBuf;

use clap::{ArgAction, ArgGroup, Parser};
use tabconv_formats::ConvertConfig;
use tracing_subscriber::EnvFilter;

mod convert;

use convert::{Converter, Direction};

#[derive(Debug, Parser)]
#[command(name = "tabconv", version)]
#[command(about = "Convert tables between CSV, SQLite and JSON")]
#[command(override_usage = "tabconv [OPTIONS] <INPUT> <OUTPUT>\n\nDefault option is CSV to SQLite.")]
#[command(group(ArgGroup::new("direction").args(["c2s", "s2c", "c2j", "j2c"])))]
struct Cli {
    /// CSV to SQLite [default]. Usage: tabconv --c2s input_file output_file
    #[arg(long)]
    c2s: bool,
    /// SQLite to CSV. Usage: tabconv --s2c input_file output_folder
    #[arg(long, short = 'R', visible_alias = "reverse")]
    s2c: bool,
    /// CSV to JSON. Usage: tabconv --c2j input_file output_file
    #[arg(long)]
    c2j: bool,
    /// JSON to CSV. Usage: tabconv --j2c input_file output_file
    #[arg(long)]
    j2c: bool,
    /// YAML file with conversion settings (batch_size, backup_suffix, json_indent).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Log more detail to stderr (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Source file.
    input: PathBuf,
    /// Destination file, or destination directory for --s2c.
    output: PathBuf,
}

impl Cli {
    fn direction(&self) -> Direction {
        if self.s2c {
            Direction::SqliteToCsv
        } else if self.c2j {
            Direction::CsvToJson
        } else if self.j2c {
            Direction::JsonToCsv
        } else {
            Direction::CsvToSqlite
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let config = match &cli.config {
        Some(path) => ConvertConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => ConvertConfig::default(),
    };

    let summary = Converter::new(config)
        .run(cli.direction(), &cli.input, &cli.output)
        .map_err(|err| err.to_string())?;
    println!("{summary}");
    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("tabconv").chain(args.iter().copied()))
    }

    #[test]
    fn test_default_direction() {
        let cli = parse(&["in.csv", "out.db"]).unwrap();
        assert_eq!(cli.direction(), Direction::CsvToSqlite);
    }

    #[test]
    fn test_direction_flags() {
        assert_eq!(parse(&["--c2s", "a", "b"]).unwrap().direction(), Direction::CsvToSqlite);
        assert_eq!(parse(&["--s2c", "a", "b"]).unwrap().direction(), Direction::SqliteToCsv);
        assert_eq!(parse(&["--c2j", "a", "b"]).unwrap().direction(), Direction::CsvToJson);
        assert_eq!(parse(&["--j2c", "a", "b"]).unwrap().direction(), Direction::JsonToCsv);
    }

    #[test]
    fn test_reverse_aliases() {
        assert_eq!(parse(&["-R", "a", "b"]).unwrap().direction(), Direction::SqliteToCsv);
        assert_eq!(parse(&["--reverse", "a", "b"]).unwrap().direction(), Direction::SqliteToCsv);
    }

    #[test]
    fn test_direction_flags_are_exclusive() {
        assert!(parse(&["--c2j", "--j2c", "a", "b"]).is_err());
    }

    #[test]
    fn test_two_positionals_required() {
        assert!(parse(&["only-one"]).is_err());
        assert!(parse(&["a", "b", "c"]).is_err());
    }

    #[test]
    fn test_verbose_counts() {
        assert_eq!(parse(&["-vv", "a", "b"]).unwrap().verbose, 2);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
