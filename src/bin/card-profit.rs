//! card-profit CLI - fee, profit and grading calculations from the command line
//!
//! ## Example Usage
//!
//! ```bash
//! # Profit on a $50 sale of a card bought for $10
//! card-profit profit --price 50 --purchase-price 10
//!
//! # Rank three offers
//! card-profit offers --cost-basis 10.63 --offer 30,0.56 --offer 50,0.56 --offer 45,4.63,5
//!
//! # Should I grade it? Compare every tier that accepts the card
//! card-profit breakeven --raw-cost-basis 10 --raw-value 30 --graded-value 150 --all-tiers
//!
//! # Portfolio totals from exported records
//! card-profit portfolio --purchases purchases.json --sales sales.json --items
//! ```

use anyhow::{bail, Context as _, Result};
use card_profit::breakeven::{BreakevenAnalyzer, BreakevenInputs, BreakevenResult};
use card_profit::config::CalculatorConfig;
use card_profit::cost_basis::CostBasisCalculator;
use card_profit::error::CalcError;
use card_profit::fees::FeeProfile;
use card_profit::grading::{
    submission_cost, tiers_for_company, tiers_for_value, GradingOption, GradingTier,
};
use card_profit::offers::{Offer, OfferAnalysis, OfferComparator, OfferDecision};
use card_profit::portfolio::{PortfolioAggregator, Purchase, Sale};
use card_profit::profit::{ProfitEngine, ProfitResult};
use card_profit::shipping::ShippingOption;
use card_profit::types::{Money, Rate};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

/// card-profit: what a card sale really nets after fees, shipping and grading
#[derive(Parser)]
#[command(name = "card-profit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Profit, fee and grading breakeven calculator for card sales", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Fee profile name (default: the profile marked default)
    #[arg(short, long, global = true)]
    profile: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Profit on a single sale
    Profit {
        /// Item sale price
        #[arg(long)]
        price: Money,

        /// Shipping charged to the buyer
        #[arg(long, default_value = "0")]
        shipping_charged: Money,

        /// Seller shipping cost (default: configured raw shipping cost)
        #[arg(long)]
        shipping_cost: Option<Money>,

        /// What you paid for the card
        #[arg(long)]
        purchase_price: Money,

        /// Sales tax rate on the purchase (default: configured rate)
        #[arg(long)]
        tax_rate: Option<Rate>,

        /// Purchase price already includes tax
        #[arg(long)]
        tax_included: bool,

        /// Shipping you paid to receive the card
        #[arg(long, default_value = "0")]
        shipping_paid: Money,

        /// Grading already paid
        #[arg(long, default_value = "0")]
        grading_cost: Money,

        /// Ship to an international buyer
        #[arg(long)]
        international: bool,
    },

    /// Compare offers on the same card
    Offers {
        /// Total cost basis of the card
        #[arg(long)]
        cost_basis: Money,

        /// PRICE[,SHIPPING_COST[,SHIPPING_CHARGED[,intl]]]
        #[arg(long = "offer", value_name = "OFFER", value_parser = parse_offer)]
        offers: Vec<Offer>,

        /// JSON file with an array of offers
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Compare selling raw against grading
    Breakeven {
        /// Cost basis of the raw card
        #[arg(long)]
        raw_cost_basis: Money,

        /// Expected raw sale price
        #[arg(long)]
        raw_value: Money,

        /// Expected graded sale price
        #[arg(long)]
        graded_value: Money,

        /// Expected grade (informational)
        #[arg(long, default_value = "10")]
        grade: String,

        /// Grading company
        #[arg(long, default_value = "PSA")]
        company: String,

        /// Grading tier
        #[arg(long, default_value = "")]
        tier: String,

        /// Grading cost per card
        #[arg(long)]
        grading_cost: Option<Money>,

        /// Compare every configured tier that accepts the graded value
        #[arg(long, conflicts_with = "grading_cost")]
        all_tiers: bool,

        /// Raw shipping cost (default: configured)
        #[arg(long)]
        raw_shipping: Option<Money>,

        /// Graded shipping cost (default: configured)
        #[arg(long)]
        graded_shipping: Option<Money>,
    },

    /// Portfolio totals from purchase and sale records
    Portfolio {
        /// JSON array of purchases
        #[arg(long)]
        purchases: PathBuf,

        /// JSON array of sales
        #[arg(long)]
        sales: Option<PathBuf>,

        /// Also list each purchase joined to its sale
        #[arg(long)]
        items: bool,
    },

    /// List configured fee profiles
    Profiles,

    /// List configured shipping options
    Shipping,

    /// List configured grading tiers
    Grading {
        /// Only this company's tiers
        #[arg(long)]
        company: Option<String>,

        /// Show the submission cost for this many cards
        #[arg(long, default_value_t = 1)]
        cards: u32,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match CalculatorConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };

    if cli.verbose {
        println!(
            "{} v{}",
            "card-profit".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
        if let Some(path) = cli.config.clone().or_else(CalculatorConfig::default_path) {
            println!("Config: {}", path.display().to_string().dimmed());
        }
    }

    if let Err(e) = run(&cli, &config) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: &Cli, config: &CalculatorConfig) -> Result<()> {
    match &cli.command {
        Commands::Profiles => return show_profiles(config, cli.json),
        Commands::Shipping => {
            return print_or_json(config.shipping_options.as_slice(), cli.json, show_shipping)
        }
        Commands::Grading { company, cards } => {
            let tiers: Vec<&GradingTier> = match company {
                Some(name) => tiers_for_company(&config.grading_tiers, name)?,
                None => config.grading_tiers.iter().collect(),
            };
            return print_or_json(tiers.as_slice(), cli.json, |tiers: &[&GradingTier]| {
                show_grading(tiers, *cards)
            });
        }
        _ => {}
    }

    let profile = config.profile(cli.profile.as_deref())?;
    if cli.verbose {
        println!("Fee profile: {}", profile.profile_name.bold());
    }

    match &cli.command {
        Commands::Profit {
            price,
            shipping_charged,
            shipping_cost,
            purchase_price,
            tax_rate,
            tax_included,
            shipping_paid,
            grading_cost,
            international,
        } => {
            let basis = CostBasisCalculator::compute(
                *purchase_price,
                tax_rate.unwrap_or(config.sales_tax_rate),
                *tax_included,
                *shipping_paid,
                *grading_cost,
            );
            let result = ProfitEngine::calculate(
                *price,
                *shipping_charged,
                basis.total_cost_basis,
                shipping_cost.unwrap_or(config.raw_shipping_cost),
                &profile,
                *international,
            );
            print_or_json(&result, cli.json, show_profit)
        }

        Commands::Offers {
            cost_basis,
            offers,
            file,
        } => {
            let mut all = offers.clone();
            if let Some(path) = file {
                all.extend(read_json::<Vec<Offer>>(path)?);
            }
            if all.is_empty() {
                bail!("no offers given (use --offer or --file)");
            }
            let ranked = OfferComparator::compare(&all, *cost_basis, &profile);
            print_or_json(ranked.as_slice(), cli.json, show_offers)
        }

        Commands::Breakeven {
            raw_cost_basis,
            raw_value,
            graded_value,
            grade,
            company,
            tier,
            grading_cost,
            all_tiers,
            raw_shipping,
            graded_shipping,
        } => {
            let inputs = BreakevenInputs {
                raw_cost_basis: *raw_cost_basis,
                raw_market_value: *raw_value,
                graded_market_value: *graded_value,
                expected_grade: grade.clone(),
                raw_shipping_cost: raw_shipping.unwrap_or(config.raw_shipping_cost),
                graded_shipping_cost: graded_shipping.unwrap_or(config.graded_shipping_cost),
            };

            let options: Vec<GradingOption> = if *all_tiers {
                tiers_for_value(&config.grading_tiers, *graded_value)
                    .into_iter()
                    .map(GradingOption::from)
                    .collect()
            } else {
                let cost = (*grading_cost).context("--grading-cost or --all-tiers is required")?;
                vec![GradingOption::new(company.clone(), tier.clone(), cost)]
            };
            if options.is_empty() {
                bail!("no configured grading tier accepts a declared value of ${graded_value:.2}");
            }

            let ranked = BreakevenAnalyzer::compare_multi(&inputs, &options, &profile);
            print_or_json(ranked.as_slice(), cli.json, show_breakeven)
        }

        Commands::Portfolio {
            purchases,
            sales,
            items,
        } => {
            let purchases: Vec<Purchase> = read_json(purchases)?;
            let sales: Vec<Sale> = match sales {
                Some(path) => read_json(path)?,
                None => Vec::new(),
            };

            let summary = PortfolioAggregator::summarize(&purchases, &sales);
            if *items {
                let joined = PortfolioAggregator::item_performance(&purchases, &sales);
                if cli.json {
                    let out = serde_json::json!({ "summary": summary, "items": joined });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                    return Ok(());
                }
                print!("{summary}");
                println!();
                for item in joined {
                    let profit = item
                        .net_profit
                        .map(colored_money)
                        .unwrap_or_else(|| "unsold".dimmed().to_string());
                    println!(
                        "  {:<16} cost ${:>9.2}  profit {}",
                        item.card_id, item.cost_basis, profit
                    );
                }
                Ok(())
            } else {
                print_or_json(&summary, cli.json, |s| print!("{s}"))
            }
        }

        Commands::Profiles | Commands::Shipping | Commands::Grading { .. } => Ok(()),
    }
}

/// Parse `PRICE[,SHIPPING_COST[,SHIPPING_CHARGED[,intl]]]`
fn parse_offer(raw: &str) -> std::result::Result<Offer, CalcError> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let money = |idx: usize| -> std::result::Result<Money, CalcError> {
        match parts.get(idx) {
            Some(value) if !value.is_empty() => Decimal::from_str(value)
                .map_err(|e| CalcError::ParseError(format!("'{value}' in offer '{raw}': {e}"))),
            _ => Ok(Decimal::ZERO),
        }
    };

    let mut offer = Offer::new(money(0)?, money(1)?).with_shipping_charged(money(2)?);
    match parts.get(3) {
        None => {}
        Some(flag) if flag.eq_ignore_ascii_case("intl") => offer = offer.international(),
        Some(other) => {
            return Err(CalcError::ParseError(format!(
                "expected 'intl' as fourth field of offer '{raw}', got '{other}'"
            )))
        }
    }
    Ok(offer)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

fn print_or_json<T: Serialize + ?Sized>(
    value: &T,
    json: bool,
    show: impl FnOnce(&T),
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        show(value);
    }
    Ok(())
}

fn colored_money(amount: Money) -> String {
    let text = format!("${amount:.2}");
    if amount > Decimal::ZERO {
        text.green().to_string()
    } else if amount < Decimal::ZERO {
        text.red().to_string()
    } else {
        text
    }
}

fn show_profit(result: &ProfitResult) {
    println!("{}", "Sale".bold());
    println!("  Total Sale Amount:  ${:.2}", result.total_sale_amount());
    println!("  Final Value Fee:    ${:.2}", result.fees.fvf_amount);
    println!("  Per-Order Fee:      ${:.2}", result.fees.per_order_fee);
    println!("  International Fee:  ${:.2}", result.fees.intl_fee);
    println!("  Total Fees:         ${:.2}", result.total_fees());
    println!("  Shipping Cost:      ${:.2}", result.shipping_cost);
    println!("  Net Proceeds:       ${:.2}", result.net_proceeds);
    println!("  Cost Basis:         ${:.2}", result.cost_basis);
    println!("  Net Profit:         {}", colored_money(result.net_profit));
    println!("  Profit Margin:      {:.2}%", result.profit_margin_pct);
    println!("  ROI:                {:.2}%", result.roi_pct);
}

fn show_offers(ranked: &[OfferAnalysis]) {
    println!(
        "{:<14} {:>10} {:>10} {:>12} {:>10}  {}",
        "Offer", "Fees", "Proceeds", "Profit", "ROI", "Call"
    );
    for analysis in ranked {
        let call = match analysis.recommendation {
            OfferDecision::Accept => analysis.recommendation.to_string().green(),
            OfferDecision::Reject => analysis.recommendation.to_string().red(),
        };
        println!(
            "{:<14} {:>10.2} {:>10.2} {:>12.2} {:>9.2}%  {}",
            analysis.label,
            analysis.result.total_fees(),
            analysis.result.net_proceeds,
            analysis.net_profit(),
            analysis.result.roi_pct,
            call
        );
    }
}

fn show_breakeven(ranked: &[BreakevenResult]) {
    if let Some(first) = ranked.first() {
        println!(
            "Sell raw: profit {} on ${:.2}",
            colored_money(first.raw_profit()),
            first.raw.sale_price
        );
    }
    println!(
        "{:<5} {:<14} {:>8} {:>12} {:>12} {:>11}  {}",
        "Co.", "Tier", "Cost", "Graded P/L", "Extra", "Breakeven", "Call"
    );
    for result in ranked {
        println!(
            "{:<5} {:<14} {:>8.2} {:>12.2} {:>12.2} {:>11.2}  {}",
            result.option.company,
            result.option.tier,
            result.option.cost,
            result.graded_profit(),
            result.grading_extra_profit,
            result.breakeven_graded_price,
            result.recommendation.to_string().bold()
        );
    }
}

fn show_profiles(config: &CalculatorConfig, json: bool) -> Result<()> {
    print_or_json(config.fee_profiles.as_slice(), json, |profiles: &[FeeProfile]| {
        for profile in profiles {
            let marker = if profile.is_default { "*" } else { " " };
            println!(
                "{} {:<28} FVF {:.2}% (above ${:.0}: {:.2}%)  per-order ${:.2}/${:.2} at ${:.2}  intl {:.2}%",
                marker.yellow(),
                profile.profile_name,
                profile.fvf_rate * Decimal::ONE_HUNDRED,
                profile.fvf_cap_amount,
                profile.fvf_rate_above_cap * Decimal::ONE_HUNDRED,
                profile.per_order_fee_low,
                profile.per_order_fee_high,
                profile.per_order_threshold,
                profile.intl_fee_rate * Decimal::ONE_HUNDRED,
            );
        }
    })
}

fn show_shipping(options: &[ShippingOption]) {
    for option in options {
        let graded = if option.graded_eligible { "graded ok" } else { "raw only" };
        println!(
            "  ${:>5.2}  {:<42} {}",
            option.cost,
            option.method_name,
            graded.dimmed()
        );
    }
}

fn show_grading(tiers: &[&GradingTier], cards: u32) {
    for tier in tiers {
        println!(
            "  {:<4} {:<14} ${:>7.2}  {:>3} days  up to ${:<6} {} cards: ${:.2}",
            tier.company,
            tier.tier_name,
            tier.cost_per_card,
            tier.turnaround_days,
            tier.max_declared_value,
            cards,
            submission_cost(tier, cards)
        );
    }
}
