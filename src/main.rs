//! Premium Quote CLI
//!
//! Command-line interface for pricing quotes, inspecting the calculation trace
//! and maintaining the JSON configuration files

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use premium_quote::config::{ConfigSource, JsonConfigStore, EXPIRY_DATE_FORMAT};
use premium_quote::{
    BillingCycle, BrokersConfig, CheckoutRequest, ClaimsHistory, ContractTier, PricingConfig,
    PricingInput, PromotionConfig, QuoteRequest, QuoteService,
};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "premium_quote", version)]
#[command(about = "Company insurance premium quotes")]
struct Cli {
    /// Directory holding pricing.json, promo.json and brokers.json
    #[arg(long, global = true, default_value = "config")]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Price a quote
    Quote {
        #[command(flatten)]
        request: RequestArgs,
        #[arg(long)]
        json: bool,
    },
    /// Price a quote and print every calculation step
    Debug {
        #[command(flatten)]
        request: RequestArgs,
        #[arg(long)]
        json: bool,
    },
    /// Derive the amount charged for a contract
    Checkout {
        #[command(flatten)]
        request: RequestArgs,
        #[arg(long, value_enum, default_value = "standard")]
        tier: TierArg,
        #[arg(long)]
        monthly: bool,
        #[arg(long)]
        currency: Option<String>,
    },
    /// Inspect or edit configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the stored pricing, promotion and broker settings
    Show,
    /// Replace the pricing parameters from a JSON document
    SetPricing {
        #[arg(long)]
        file: PathBuf,
    },
    /// Replace the broker list from a JSON document
    SetBrokers {
        #[arg(long)]
        file: PathBuf,
    },
    /// Replace the promotion settings
    SetPromo {
        #[arg(long)]
        active: bool,
        #[arg(long, default_value_t = 0.0)]
        discount: f64,
        /// Last valid day, YYYY-MM-DD
        #[arg(long, default_value = "")]
        expires: String,
        #[arg(long, default_value = "")]
        label: String,
    },
}

#[derive(Args, Debug)]
struct RequestArgs {
    /// Total employees across establishments
    headcount: u32,
    /// Sector (CTN) code
    sector: String,
    /// Guarantee amount in euros
    guarantee: f64,
    #[arg(long, default_value_t = 0)]
    ip2: u32,
    #[arg(long, default_value_t = 0)]
    ip3: u32,
    #[arg(long, default_value_t = 0)]
    ip4: u32,
    #[arg(long, default_value_t = 0)]
    deces: u32,
    #[arg(long)]
    broker: Option<String>,
    /// Quote date for promotion expiry (defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl RequestArgs {
    fn to_request(&self) -> QuoteRequest {
        QuoteRequest {
            headcount: self.headcount,
            sector: self.sector.clone(),
            claims: ClaimsHistory {
                class2: self.ip2,
                class3: self.ip3,
                class4: self.ip4,
                fatality: self.deces,
            },
            guarantee_amount: self.guarantee,
            broker_code: self.broker.clone(),
        }
    }

    fn service(&self, store: JsonConfigStore) -> QuoteService<JsonConfigStore> {
        let service = QuoteService::new(store);
        match self.date {
            Some(date) => service.with_date(date),
            None => service,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TierArg {
    Standard,
    Premium,
}

impl From<TierArg> for ContractTier {
    fn from(value: TierArg) -> Self {
        match value {
            TierArg::Standard => Self::Standard,
            TierArg::Premium => Self::Premium,
        }
    }
}

fn read_json<T: DeserializeOwned>(file: &Path) -> Result<T> {
    let data = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    serde_json::from_str(&data).with_context(|| format!("Malformed JSON in {}", file.display()))
}

/// Validate and store the pricing document at `file`
fn set_pricing(store: &JsonConfigStore, file: &Path) -> Result<PricingConfig> {
    let pricing: PricingConfig = read_json(file)?;
    store
        .update_pricing(&pricing)
        .context("Failed to save pricing configuration")?;
    Ok(pricing)
}

/// Validate and store the broker list at `file`
fn set_brokers(store: &JsonConfigStore, file: &Path) -> Result<BrokersConfig> {
    let brokers: BrokersConfig = read_json(file)?;
    store
        .update_brokers(&brokers)
        .context("Failed to save brokers configuration")?;
    Ok(brokers)
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let store = JsonConfigStore::new(&cli.config_dir);

    match cli.command {
        Command::Quote { request, json } => {
            let service = request.service(store);
            let quote = service.quote_request(&request.to_request())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&quote)?);
                return Ok(());
            }

            println!("Quote: {} employees, sector {}, guarantee {:.0} EUR", request.headcount, request.sector, request.guarantee);
            println!("  Standard TTC: {:>10.2}", quote.pricing.standard_total);
            println!("  Premium TTC:  {:>10.2}", quote.pricing.premium_total);
            println!("  HT:           {:>10.2}", quote.pricing.net_amount);
            println!("  Taxes:        {:>10.2}", quote.pricing.tax_amount);
            if quote.pricing.promotion_applied {
                println!("  Promotion:    {}", quote.pricing.promotion_label.as_deref().unwrap_or(""));
            }
            if quote.fallback {
                println!("  (fallback prices: configuration unavailable)");
            }
        }
        Command::Debug { request, json } => {
            let service = request.service(store);
            let input = PricingInput::from(&request.to_request());
            let report = service.debug(&input);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            println!("{:<32} {:<60} {:>14}", "Step", "Formula", "Result");
            println!("{}", "-".repeat(108));
            for step in &report.trace {
                println!("{:<32} {:<60} {:>14}", step.step, step.formula, step.result);
            }
            println!();
            println!("Standard TTC: {:.2}", report.final_prices.standard_total);
            println!("Premium TTC:  {:.2}", report.final_prices.premium_total);
            if report.fallback {
                println!("(computed on default configuration)");
            }
        }
        Command::Checkout { request, tier, monthly, currency } => {
            let service = request.service(store);
            let checkout = CheckoutRequest {
                quote: request.to_request(),
                tier: tier.into(),
                billing_cycle: if monthly { BillingCycle::Monthly } else { BillingCycle::Annual },
                currency,
            };
            let amount = service.checkout(&checkout)?;
            println!("{}", serde_json::to_string_pretty(&amount)?);
        }
        Command::Config { action: ConfigAction::Show } => {
            let pricing = store.pricing().context("Failed to read pricing configuration")?;
            let promotion = store.promotion().context("Failed to read promotion configuration")?;
            let brokers = store.brokers().context("Failed to read brokers configuration")?;

            println!("Configuration directory: {}", store.dir().display());
            println!("\nPricing:\n{}", serde_json::to_string_pretty(&pricing)?);
            println!("\nPromotion:\n{}", serde_json::to_string_pretty(&promotion)?);
            println!("\nBrokers:\n{}", serde_json::to_string_pretty(&brokers)?);
        }
        Command::Config { action: ConfigAction::SetPricing { file } } => {
            let pricing = set_pricing(&store, &file)?;
            println!(
                "Pricing saved to {} (pivot {}, slope {})",
                store.dir().display(),
                pricing.pivot_headcount,
                pricing.slope
            );
        }
        Command::Config { action: ConfigAction::SetBrokers { file } } => {
            let brokers = set_brokers(&store, &file)?;
            println!("{} brokers saved to {}", brokers.brokers.len(), store.dir().display());
        }
        Command::Config { action: ConfigAction::SetPromo { active, discount, expires, label } } => {
            if !expires.is_empty() {
                NaiveDate::parse_from_str(&expires, EXPIRY_DATE_FORMAT)
                    .with_context(|| format!("Invalid expiry date {:?}", expires))?;
            }
            let promotion = PromotionConfig {
                active,
                discount_percent: discount,
                expires,
                label,
            };
            store
                .update_promotion(&promotion)
                .context("Failed to save promotion configuration")?;
            println!("Promotion saved to {}", store.dir().display());
        }
    }

    Ok(())
}
