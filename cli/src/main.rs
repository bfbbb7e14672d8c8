//! # chembalance
//!
//! Thin command line front end of the `chembalance` library:
//!
//! ```text
//! $ chembalance -i CH4 Cl2 -o CH3Cl H2
//! 2CH4 + Cl2 --> 2CH3Cl + H2
//! ```

mod cli;
mod output;

use anyhow::{anyhow, Context};
use chembalance::{Equation, EquationStyle};
use clap::Parser;
use cli::Cli;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    init_logging(cli.log_level());

    match run(&cli) {
        Ok(line) => println!("{}", line),
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            std::process::exit(1);
        },
    }
}

fn init_logging(level: LevelFilter) {
    if level == LevelFilter::Off {
        return;
    }
    if let Err(e) = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto) {
        output::print_error(&format!("failed to initialise logging: {}", e));
    }
}

/// Balances the equation given on the command line and returns the line to print
fn run(cli: &Cli) -> anyhow::Result<String> {
    log::info!("{} reactants, {} products", cli.input_molecules.len(), cli.output_molecules.len());

    let mut equation = Equation::new(&cli.input_molecules, &cli.output_molecules)
        .context("failed to read the equation")?;
    equation
        .solve()
        .with_context(|| format!("cannot balance {}", equation))?;

    if cli.coefficients {
        let solution = equation
            .solution()
            .ok_or_else(|| anyhow!("equation has no solution"))?;
        let values: Vec<String> = solution.values().iter().map(|c| c.to_string()).collect();
        return Ok(values.join(" "));
    }

    let style = EquationStyle { arrow: cli.arrow.clone() };
    equation
        .solution_str_with_style(&style)
        .ok_or_else(|| anyhow!("equation has no solution"))
}
