//! Taco units CLI
//!
//! Command-line access to mojo/coin conversion and locale formatting.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use taco_units::{
    coin_to_mojo_checked, coin_to_mojo_strict, convert_units, format::render, locale,
    mojo_to_coin, try_format_localized, AmountInput, CoinAmount, Config, DecimalPlaces,
    FormatOptions, Result, Unit, UnitKind, WalletDisplay,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "taco-units")]
#[command(about = "Convert and format Taco wallet amounts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Native,
    Cat,
}

impl From<KindArg> for UnitKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Native => UnitKind::Native,
            KindArg::Cat => UnitKind::Cat,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert mojos into TACO or CAT
    ToCoin {
        /// Amount in mojos
        #[arg(allow_hyphen_values = true)]
        mojos: String,

        /// Unit family
        #[arg(short, long, value_enum, default_value = "native")]
        kind: KindArg,

        /// Override the unit's decimal places
        #[arg(short, long, allow_negative_numbers = true)]
        decimals: Option<i64>,
    },

    /// Convert TACO or CAT into mojos (truncates toward zero)
    ToMojo {
        /// Display amount
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Unit family
        #[arg(short, long, value_enum, default_value = "native")]
        kind: KindArg,

        /// Override the unit's decimal places
        #[arg(short, long, allow_negative_numbers = true)]
        decimals: Option<i64>,

        /// Fail instead of truncating sub-mojo digits
        #[arg(long)]
        strict: bool,
    },

    /// Re-express an amount in another unit (taco, mojo, cat)
    Convert {
        #[arg(allow_hyphen_values = true)]
        amount: String,

        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,
    },

    /// Format a decimal amount for a locale
    Format {
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Locale tag (e.g., en-US, de-DE); defaults to the configured locale
        #[arg(short, long)]
        locale: Option<String>,

        /// Minimum fractional digits
        #[arg(long, default_value_t = 0)]
        min_fraction: u8,

        /// Maximum fractional digits (rounds half away from zero)
        #[arg(long)]
        max_fraction: Option<u8>,

        /// Disable digit grouping
        #[arg(long)]
        no_grouping: bool,

        /// Fail on unknown locales instead of falling back
        #[arg(long)]
        strict: bool,
    },

    /// Render a wallet balance the way the wallet UI shows it
    Display {
        /// Balance in mojos
        #[arg(allow_hyphen_values = true)]
        mojos: String,

        /// Unit family
        #[arg(short, long, value_enum, default_value = "native")]
        kind: KindArg,

        /// Symbol to append (defaults to the configured symbol)
        #[arg(short, long)]
        unit: Option<String>,

        /// Locale tag; defaults to the configured locale
        #[arg(short, long)]
        locale: Option<String>,
    },

    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    // Load .env file if present (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }

    // Load config
    let config = match cli.config {
        Some(ref path) => Config::from_file(path)?,
        None => Config::default(),
    }
    .with_env_overrides()?;

    match cli.command {
        Commands::ToCoin {
            mojos,
            kind,
            decimals,
        } => {
            let places = decimal_places(decimals, &config, kind.into())?;
            let amount = mojo_to_coin(mojos, kind.into(), Some(places))?;
            println!("{}", amount);
        }
        Commands::ToMojo {
            amount,
            kind,
            decimals,
            strict,
        } => {
            let places = decimal_places(decimals, &config, kind.into())?;
            if strict {
                println!("{}", coin_to_mojo_strict(amount, kind.into(), Some(places))?);
            } else {
                let conversion = coin_to_mojo_checked(amount, kind.into(), Some(places))?;
                if conversion.truncated {
                    tracing::warn!(mojos = %conversion.mojos, "Amount truncated to whole mojos");
                }
                println!("{}", conversion.mojos);
            }
        }
        Commands::Convert { amount, from, to } => {
            let from = Unit::parse(&from)?;
            let to = Unit::parse(&to)?;
            println!("{}", convert_units(amount, from, to)?);
        }
        Commands::Format {
            amount,
            locale,
            min_fraction,
            max_fraction,
            no_grouping,
            strict,
        } => {
            run_format(
                &config,
                amount,
                locale,
                FormatOptions {
                    min_fraction_digits: min_fraction,
                    max_fraction_digits: max_fraction,
                    grouping: !no_grouping,
                },
                strict,
            )?;
        }
        Commands::Display {
            mojos,
            kind,
            unit,
            locale,
        } => {
            let display = WalletDisplay::new(&config);
            println!(
                "{}",
                display.human_value(
                    kind.into(),
                    Some(AmountInput::from(mojos)),
                    unit.as_deref(),
                    locale.as_deref(),
                )
            );
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// Explicit `--decimals`, else the configured precision for the unit
fn decimal_places(decimals: Option<i64>, config: &Config, kind: UnitKind) -> Result<DecimalPlaces> {
    match decimals {
        Some(places) => DecimalPlaces::new(places),
        None => Ok(config.unit(kind).decimals),
    }
}

fn run_format(
    config: &Config,
    amount: String,
    locale_tag: Option<String>,
    options: FormatOptions,
    strict: bool,
) -> Result<()> {
    let amount = CoinAmount::parse(amount)?;
    let tag = locale_tag.as_deref().unwrap_or(&config.default_locale);

    tracing::debug!(amount = %amount, locale = tag, ?options, "Formatting amount");

    let formatted = if strict {
        try_format_localized(&amount, tag, &options)?
    } else {
        render(&amount, &locale::resolve_or(tag, &config.default_locale), &options)
    };
    println!("{}", formatted);
    Ok(())
}
