//! Command line arguments of `chembalance`, defined with `clap`.

use clap::{ArgAction, Parser};
use log::LevelFilter;

/// chembalance - balance a chemical equation
#[derive(Debug, Parser)]
#[command(name = "chembalance")]
#[command(version)]
#[command(about = "Balance a chemical equation with the smallest integer coefficients", long_about = None)]
pub struct Cli {
    /// Formulas on the left side of the equation, e.g. `-i CH4 Cl2`
    #[arg(short = 'i', long = "input-molecules", num_args = 1.., required = true)]
    pub input_molecules: Vec<String>,

    /// Formulas on the right side of the equation, e.g. `-o CH3Cl H2`
    #[arg(short = 'o', long = "output-molecules", num_args = 1.., required = true)]
    pub output_molecules: Vec<String>,

    /// Token printed between the two sides
    #[arg(long, env = "CHEMBALANCE_ARROW", default_value = "-->")]
    pub arrow: String,

    /// Print only the coefficients, separated by spaces
    #[arg(long)]
    pub coefficients: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Disable logging
    #[arg(short, long)]
    pub quiet: bool,
}
impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Off;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}





#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn molecule_lists() {
        let cli = Cli::try_parse_from(["chembalance", "-i", "CH4", "Cl2", "-o", "CH3Cl", "H2"]).unwrap();
        assert_eq!(cli.input_molecules, ["CH4", "Cl2"]);
        assert_eq!(cli.output_molecules, ["CH3Cl", "H2"]);
        assert!(!cli.coefficients);
        assert_eq!(cli.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn both_sides_are_required() {
        assert!(Cli::try_parse_from(["chembalance", "-i", "H2"]).is_err());
        assert!(Cli::try_parse_from(["chembalance", "-o", "H2"]).is_err());
    }

    #[test]
    fn verbosity() {
        let cli = Cli::try_parse_from(["chembalance", "-vv", "-i", "H2", "-o", "H2"]).unwrap();
        assert_eq!(cli.log_level(), LevelFilter::Debug);

        let cli = Cli::try_parse_from(["chembalance", "-q", "-i", "H2", "-o", "H2"]).unwrap();
        assert_eq!(cli.log_level(), LevelFilter::Off);

        assert!(Cli::try_parse_from(["chembalance", "-q", "-v", "-i", "H2", "-o", "H2"]).is_err());
    }
}
