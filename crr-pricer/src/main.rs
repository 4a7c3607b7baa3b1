use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

use crr_pricer::core::{Compounding, Error};
use crr_pricer::instruments::OptionType;
use crr_pricer::methods::{ArbitragePolicy, TreeMode};
use crr_pricer::{PricingConfig, PricingReport};

/// Price a European option on a Cox-Ross-Rubinstein binomial tree.
#[derive(Parser, Debug)]
#[command(
    name = "crr",
    version,
    about = "Price a European option on a Cox-Ross-Rubinstein binomial tree",
    long_about = "Derives the CRR up/down factors and risk-neutral probability, prices the \
                  option by backward induction and by the closed-form binomial expectation, \
                  and compares both with Black-Scholes. Flags override values loaded with \
                  --input; anything left unset uses the reference run."
)]
struct Cli {
    /// JSON file holding a pricing configuration
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Option type (call or put)
    #[arg(long, value_parser = parse_with::<OptionType>)]
    option_type: Option<OptionType>,

    /// Number of tree steps
    #[arg(long, short = 'n')]
    steps: Option<usize>,

    /// Spot price of the underlying
    #[arg(long)]
    spot: Option<f64>,

    /// Strike price
    #[arg(long)]
    strike: Option<f64>,

    /// Time to maturity in years
    #[arg(long)]
    maturity: Option<f64>,

    /// Risk-free rate as a decimal
    #[arg(long)]
    rate: Option<f64>,

    /// Volatility as a decimal
    #[arg(long)]
    volatility: Option<f64>,

    /// Compounding convention (simple or continuous)
    #[arg(long, value_parser = parse_with::<Compounding>)]
    compounding: Option<Compounding>,

    /// What to do when the up probability leaves [0, 1] (reject or warn)
    #[arg(long, value_parser = parse_with::<ArbitragePolicy>)]
    arbitrage_policy: Option<ArbitragePolicy>,

    /// Tree structure (lattice or path)
    #[arg(long, value_parser = parse_with::<TreeMode>)]
    tree_mode: Option<TreeMode>,

    /// Output format
    #[arg(long, default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn parse_with<T>(s: &str) -> Result<T, String>
where
    T: std::str::FromStr<Err = Error>,
{
    s.parse().map_err(|e: Error| e.to_string())
}

impl Cli {
    fn config(&self) -> Result<PricingConfig, Error> {
        let mut config = match &self.input {
            Some(path) => PricingConfig::from_json_file(path)?,
            None => PricingConfig::default(),
        };
        if let Some(v) = self.option_type {
            config.option_type = v;
        }
        if let Some(v) = self.steps {
            config.step_count = v;
        }
        if let Some(v) = self.spot {
            config.initial_price = v;
        }
        if let Some(v) = self.strike {
            config.strike = v;
        }
        if let Some(v) = self.maturity {
            config.maturity = v;
        }
        if let Some(v) = self.rate {
            config.risk_free_rate = v;
        }
        if let Some(v) = self.volatility {
            config.volatility = v;
        }
        if let Some(v) = self.compounding {
            config.compounding = v;
        }
        if let Some(v) = self.arbitrage_policy {
            config.arbitrage_policy = v;
        }
        if let Some(v) = self.tree_mode {
            config.tree_mode = v;
        }
        Ok(config)
    }
}

fn run(cli: &Cli) -> Result<String, Box<dyn std::error::Error>> {
    let config = cli.config()?;
    tracing::debug!(?config, "resolved configuration");
    let report = PricingReport::compute(&config)?;
    Ok(match cli.output {
        OutputFormat::Table => report.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
