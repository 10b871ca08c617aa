use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Strip ARFF-style .dat datasets down to the nominal attributes they use",
    long_about = None
)]
pub struct Cli {
    /// Dataset file or directory to clean (directories are searched recursively for .dat files)
    pub path: PathBuf,
    /// Character encoding of the input files (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Character encoding for the cleaned files (defaults to utf-8)
    #[arg(long = "output-encoding")]
    pub output_encoding: Option<String>,
    /// Write a JSON summary of every cleaned file to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_positional_path_and_options() {
        let cli = Cli::try_parse_from([
            "dataset-cleaner",
            "data/set.dat",
            "--input-encoding",
            "latin1",
            "--report",
            "report.json",
        ])
        .expect("parse args");
        assert_eq!(cli.path, PathBuf::from("data/set.dat"));
        assert_eq!(cli.input_encoding.as_deref(), Some("latin1"));
        assert!(cli.output_encoding.is_none());
        assert_eq!(cli.report, Some(PathBuf::from("report.json")));
    }

    #[test]
    fn path_is_required() {
        assert!(Cli::try_parse_from(["dataset-cleaner"]).is_err());
    }
}
