//! Development seeder for NestEgg.
//!
//! Registers a demo user with a bank, an account, two investments and a
//! monthly expense in an in-memory store, then logs the retirement countdown
//! and deposit projections.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use nestegg_core::auth::SecretHasher;
use nestegg_core::domain::{
    AccountInput, BankInput, BankName, ExpenseInput, InvestmentInput, InvestmentType, UserInput,
};
use nestegg_core::{Repositories, RepositoryContext, SystemClock};
use nestegg_db::MemoryStore;
use nestegg_shared::AppConfig;
use nestegg_shared::config::TelemetryConfig;
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Years of deposit growth to log.
const PROJECTION_YEARS: u32 = 5;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.telemetry);

    let hasher = SecretHasher::from_config(&config.credential)
        .context("invalid credential configuration")?;
    let store = Arc::new(MemoryStore::new());
    let ctx = RepositoryContext::new(store, Arc::new(SystemClock)).with_hasher(hasher);
    let repos = Repositories::new(ctx);

    seed(&repos).await
}

fn init_tracing(telemetry: &TelemetryConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&telemetry.log_filter));
    let registry = tracing_subscriber::registry().with(filter);

    if telemetry.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn seed(repos: &Repositories<MemoryStore>) -> anyhow::Result<()> {
    let user = repos
        .users
        .create(UserInput {
            full_name: "Demo Saver".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12).context("invalid birth date")?,
            email: "demo@nestegg.dev".to_string(),
            secret: "demo-secret".to_string(),
            income: 1_200_000,
            retirement_age: 60,
        })
        .await?;
    info!(
        user_id = %user.id,
        current_age = user.current_age,
        days_left = user.days_left,
        "seeded user"
    );

    let bank = repos
        .banks
        .create(BankInput {
            user_id: user.id,
            name: BankName::Sbi,
            interest: Decimal::new(270, 2),
            interest_on_fd: Decimal::new(680, 2),
            interest_on_rd: Decimal::new(650, 2),
        })
        .await?;
    info!(bank_id = %bank.bank.id, name = bank.bank.name.as_str(), "seeded bank");

    let account = repos
        .accounts
        .create(AccountInput {
            user_id: user.id,
            bank_id: bank.bank.id,
            number: "SBI-000123".to_string(),
            balance: 250_000,
        })
        .await?;
    info!(account_id = %account.account.id, number = %account.account.number, "seeded account");

    let maturity = NaiveDate::from_ymd_opt(2030, 3, 31).context("invalid maturity date")?;
    for (kind, amount) in [
        (InvestmentType::FixedDeposit, 100_000),
        (InvestmentType::MutualFund, 50_000),
    ] {
        let investment = repos
            .investments
            .create(InvestmentInput {
                user_id: user.id,
                account_id: account.account.id,
                kind,
                amount,
                end_date: maturity,
                total_return: 0,
                total_profit: 0,
                description: format!("{} seeded for development", kind.as_str()),
            })
            .await?;

        let projection = repos
            .investments
            .projected_value(investment.investment.id, user.id, PROJECTION_YEARS)
            .await?;
        match projection.as_deref().and_then(<[Decimal]>::last) {
            Some(value) => info!(
                investment_id = %investment.investment.id,
                kind = kind.as_str(),
                years = PROJECTION_YEARS,
                %value,
                "projected deposit value"
            ),
            None => info!(
                investment_id = %investment.investment.id,
                kind = kind.as_str(),
                "no bank rate for investment type"
            ),
        }
    }

    let expense = repos
        .expenses
        .create(ExpenseInput {
            user_id: user.id,
            reason: "Rent".to_string(),
            amount: 30_000,
            end_date: NaiveDate::from_ymd_opt(2027, 12, 31).context("invalid end date")?,
        })
        .await?;
    info!(expense_id = %expense.expense.id, reason = %expense.expense.reason, "seeded expense");

    let login = repos
        .users
        .authenticate(UserInput::login("demo@nestegg.dev", "demo-secret"))
        .await?;
    info!(
        user_id = %login.id,
        years_to_retirement = login.years_to_retirement(),
        "demo login verified"
    );

    info!("seeding complete");
    Ok(())
}
