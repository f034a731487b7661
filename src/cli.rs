//! Command line surface: one subcommand per engine entry point.

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use ipmentor::config::{Config, DESCRIPTION};
use ipmentor::output::{error_json, render_plan, render_report, to_json};
use ipmentor::{ip_info, subnet_calculator, IpReport, SubnetPlan};
use std::error::Error;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "ipmentor", version, about = DESCRIPTION)]
pub struct Cli {
    /// Output format
    #[arg(long, short, value_enum, default_value_t = Format::Json, global = true)]
    pub format: Format,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Table,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze an IPv4 address with its subnet mask
    Info {
        /// Address in decimal or binary form, optionally with /mask
        ip: String,
        /// Mask as /24, 24 or 255.255.255.0
        #[arg(default_value = "")]
        mask: String,
    },
    /// Divide a network into subnets
    Subnet {
        /// Parent network, e.g. 192.168.1.0/24
        network: String,
        /// max_subnets, max_hosts_per_subnet or vlsm
        division_type: String,
        /// Subnet count (max_subnets) or hosts per subnet (max_hosts_per_subnet)
        #[arg(long, short)]
        number: Option<String>,
        /// Comma separated host counts for vlsm, e.g. 100,50,25,10
        #[arg(long = "hosts", short = 'H')]
        hosts_per_subnet: Option<String>,
    },
    /// Print the effective configuration
    Config,
}

enum Output {
    Report(IpReport),
    Plan(SubnetPlan),
}

/// Execute the parsed command and print its result to stdout.
pub fn run(cli: Cli, config: &Config) -> Result<ExitCode, Box<dyn Error>> {
    let output = match cli.command {
        Command::Info { ip, mask } => ip_info(&ip, &mask).map(Output::Report),
        Command::Subnet {
            network,
            division_type,
            number,
            hosts_per_subnet,
        } => subnet_calculator(
            &network,
            &division_type,
            number.as_deref(),
            hosts_per_subnet.as_deref(),
        )
        .map(Output::Plan),
        Command::Config => {
            println!("{}", to_json(config)?);
            return Ok(ExitCode::SUCCESS);
        }
    };

    match (output, cli.format) {
        (Ok(Output::Report(report)), Format::Json) => println!("{}", to_json(&report)?),
        (Ok(Output::Report(report)), Format::Table) => println!("{}", render_report(&report)),
        (Ok(Output::Plan(plan)), Format::Json) => println!("{}", to_json(&plan)?),
        (Ok(Output::Plan(plan)), Format::Table) => println!("{}", render_plan(&plan)),
        (Err(e), format) => {
            log::warn!("{} failed: {e}", e.error_code());
            match format {
                Format::Json => println!("{}", error_json(&e)),
                Format::Table => eprintln!("{} {e}", "error:".red()),
            }
            return Ok(ExitCode::FAILURE);
        }
    }
    Ok(ExitCode::SUCCESS)
}
