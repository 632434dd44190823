use clap::{ArgAction, Args, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Output options shared by both binaries.
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Write SVG charts into this directory
    #[arg(long)]
    pub svg_dir: Option<PathBuf>,

    /// Skip terminal plots
    #[arg(long)]
    pub no_plot: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl OutputArgs {
    /// Terminal plots only accompany the table format.
    pub fn terminal_plots(&self) -> bool {
        !self.no_plot && self.format == OutputFormat::Table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        output: OutputArgs,
    }

    #[test]
    fn defaults_to_table_with_plots() {
        let harness = Harness::try_parse_from(["drift"]).expect("no arguments is valid");
        assert_eq!(harness.output.format, OutputFormat::Table);
        assert!(harness.output.svg_dir.is_none());
        assert_eq!(harness.output.verbose, 0);
        assert!(harness.output.terminal_plots());
    }

    #[test]
    fn json_suppresses_terminal_plots() {
        let harness = Harness::try_parse_from(["drift", "--format", "json", "-vv"])
            .expect("json is a valid format");
        assert_eq!(harness.output.format, OutputFormat::Json);
        assert_eq!(harness.output.verbose, 2);
        assert!(!harness.output.terminal_plots());
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Harness::try_parse_from(["drift", "--format", "xml"]).is_err());
    }
}
