use clap::{Parser, ValueEnum};

/// Folio: terminal front-end for the portfolio assistant widget.
#[derive(Parser, Debug)]
#[command(name = "folio", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Store a completion API key as the local override.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Store the preferred colour theme.
    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

pub fn parse() -> Args {
    Args::parse()
}
