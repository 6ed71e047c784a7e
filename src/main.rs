//! Contract Quota CLI
//!
//! Inspect and drive the quota ledger, the saved-contract history and the
//! backend session from the command line.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use secrecy::SecretString;
use tokio::sync::watch;
use tracing_subscriber::fmt;

use contract_quota::adapters::{FileKeyValueStore, HttpBackendClient, InMemoryKeyValueStore};
use contract_quota::application::handlers::{
    ClearHistoryHandler, ConfirmPaymentCommand, ConfirmPaymentHandler, ConfirmPaymentResult,
    CurrentSessionHandler, DeleteContractCommand, DeleteContractHandler, DeleteTemplateCommand,
    DeleteTemplateHandler, ListContractsHandler, ListTemplatesHandler, RegisterCommand,
    RegisterHandler, ResetPasswordCommand, ResetPasswordHandler, SelectPlanCommand,
    SelectPlanHandler, SelectPlanResult, SignInCommand, SignInHandler, SignOutHandler,
};
use contract_quota::application::{QuotaLedger, ResetTicker, ResetTickerConfig};
use contract_quota::config::{AppConfig, LogFormat, StorageBackend};
use contract_quota::domain::foundation::TemplateId;
use contract_quota::domain::quota::{ConsumeOutcome, QuotaSnapshot};
use contract_quota::ports::{KeyValueStore, SessionClaims, SystemClock};

#[derive(Parser)]
#[command(name = "contract-quota")]
#[command(author, version, about = "Daily quota ledger for contract authoring", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show plan and remaining balance
    Status,

    /// Check whether an action fits the balance, without spending
    Check {
        /// Action key, e.g. export-pdf
        action: String,
    },

    /// Spend the cost of an action
    Consume {
        /// Action key, e.g. export-pdf
        action: String,
    },

    /// Switch plan locally without payment
    Upgrade {
        /// free, basic, pro or unlimited
        plan: String,
    },

    /// Start a checkout for a plan
    Checkout {
        /// free, basic, pro or unlimited
        plan: String,
    },

    /// Confirm a payment and apply its plan
    Confirm {
        /// Payment identifier returned by the provider
        payment_id: String,
        /// Plan that was purchased
        plan: String,
    },

    /// Manage saved contracts
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Manage contract templates
    Templates {
        #[command(subcommand)]
        action: TemplateAction,
    },

    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long, env = "CONTRACT_QUOTA_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account and store the session
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long, env = "CONTRACT_QUOTA_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Set a new password for an account
    ResetPassword {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long, env = "CONTRACT_QUOTA_PASSWORD", hide_env_values = true)]
        new_password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Keep the balance current across midnight until Ctrl-C
    Watch,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List saved contracts, newest first
    List,
    /// Delete one saved contract
    Delete {
        /// Contract identifier
        id: String,
    },
    /// Delete every saved contract
    Clear,
}

#[derive(Subcommand)]
enum TemplateAction {
    /// List built-in and custom templates
    List,
    /// Delete a custom template
    Delete {
        /// Template identifier
        id: String,
    },
}

/// Shared state for command execution.
struct Context {
    config: AppConfig,
    store: Arc<dyn KeyValueStore>,
    ledger: Arc<QuotaLedger>,
}

impl Context {
    async fn build(config: AppConfig) -> Self {
        let store: Arc<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::File => Arc::new(FileKeyValueStore::new(&config.storage.data_dir)),
            StorageBackend::Memory => Arc::new(InMemoryKeyValueStore::new()),
        };
        let ledger = Arc::new(
            QuotaLedger::initialize(
                store.clone(),
                Arc::new(SystemClock),
                config.quota.to_catalog(),
            )
            .await,
        );
        Self {
            config,
            store,
            ledger,
        }
    }

    fn backend(&self) -> Result<Arc<HttpBackendClient>> {
        let client =
            HttpBackendClient::new(&self.config.backend.base_url, self.config.backend.timeout())?;
        Ok(Arc::new(client))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("loading configuration")?;
    config.validate().context("validating configuration")?;

    init_tracing(&config);

    let ctx = Context::build(config).await;
    execute(&ctx, cli.command).await
}

fn init_tracing(config: &AppConfig) {
    let filter = config.logging.env_filter();
    let builder = fmt().with_env_filter(filter).with_writer(io::stderr);
    match config.logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn execute(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Status => {
            print_snapshot(&ctx.ledger.snapshot().await);
        }
        Commands::Check { action } => {
            let cost = ctx.ledger.catalog().cost_of(&action.as_str().into());
            if ctx.ledger.can_perform(action.as_str()).await {
                println!("{action}: allowed (cost {cost})");
            } else {
                println!("{action}: not enough quota (cost {cost})");
            }
        }
        Commands::Consume { action } => match ctx.ledger.consume(action.as_str()).await {
            ConsumeOutcome::Consumed { cost, remaining } => {
                println!("{action}: spent {cost}, {remaining} left");
            }
            ConsumeOutcome::UpgradeRequired(pending) => {
                println!(
                    "{action} needs {} but only {} left on the {} plan. Upgrade to continue.",
                    pending.cost,
                    pending.remaining,
                    pending.plan.display_name()
                );
            }
        },
        Commands::Upgrade { plan } => {
            let snapshot = ctx.ledger.upgrade_plan(&plan).await?;
            print_snapshot(&snapshot);
        }
        Commands::Checkout { plan } => {
            let handler = SelectPlanHandler::new(
                ctx.ledger.clone(),
                ctx.backend()?,
                ctx.config.payment.to_pricing(),
            );
            match handler.handle(SelectPlanCommand { plan_id: plan }).await? {
                SelectPlanResult::Activated(snapshot) => print_snapshot(&snapshot),
                SelectPlanResult::CheckoutStarted {
                    plan,
                    price_cents,
                    preference,
                } => {
                    println!(
                        "{} plan: {} {}.{:02}",
                        plan.display_name(),
                        ctx.config.payment.currency,
                        price_cents / 100,
                        price_cents % 100
                    );
                    println!("Complete payment at {}", preference.init_point);
                }
            }
        }
        Commands::Confirm { payment_id, plan } => {
            let handler = ConfirmPaymentHandler::new(ctx.ledger.clone(), ctx.backend()?);
            let cmd = ConfirmPaymentCommand {
                payment_id,
                plan_id: plan,
            };
            match handler.handle(cmd).await? {
                ConfirmPaymentResult::Upgraded(snapshot) => print_snapshot(&snapshot),
                ConfirmPaymentResult::NotApproved(status) => {
                    println!("Payment not approved yet (status: {status})");
                }
            }
        }
        Commands::History { action } => execute_history(ctx, action).await?,
        Commands::Templates { action } => execute_templates(ctx, action).await,
        Commands::Login { email, password } => {
            let password = secret_or_prompt(password, "Password")?;
            let handler = SignInHandler::new(ctx.backend()?, ctx.store.clone());
            let claims = handler.handle(SignInCommand { email, password }).await?;
            println!("Signed in as {}", describe(&claims));
        }
        Commands::Register {
            name,
            email,
            password,
        } => {
            let password = secret_or_prompt(password, "Password")?;
            let handler = RegisterHandler::new(ctx.backend()?, ctx.store.clone());
            let claims = handler
                .handle(RegisterCommand {
                    name,
                    email,
                    password,
                })
                .await?;
            println!("Account created for {}", describe(&claims));
        }
        Commands::ResetPassword {
            email,
            new_password,
        } => {
            let new_password = secret_or_prompt(new_password, "New password")?;
            ResetPasswordHandler::new(ctx.backend()?)
                .handle(ResetPasswordCommand {
                    email,
                    new_password,
                })
                .await?;
            println!("Password updated");
        }
        Commands::Logout => {
            SignOutHandler::new(ctx.store.clone()).handle().await;
            println!("Signed out");
        }
        Commands::Whoami => match CurrentSessionHandler::new(ctx.store.clone()).handle().await {
            Some(claims) => println!("{}", describe(&claims)),
            None => println!("Not signed in"),
        },
        Commands::Watch => watch_resets(ctx).await?,
    }
    Ok(())
}

async fn execute_history(ctx: &Context, action: HistoryAction) -> Result<()> {
    match action {
        HistoryAction::List => {
            let contracts = ListContractsHandler::new(ctx.store.clone()).handle().await;
            if contracts.is_empty() {
                println!("No saved contracts");
            }
            for contract in contracts {
                println!(
                    "{}  {}  {}",
                    contract.id,
                    contract.saved_at.format("%Y-%m-%d %H:%M"),
                    contract.name
                );
            }
        }
        HistoryAction::Delete { id } => {
            let contract_id = id
                .parse()
                .with_context(|| format!("invalid contract id '{id}'"))?;
            let deleted = DeleteContractHandler::new(ctx.store.clone())
                .handle(DeleteContractCommand { contract_id })
                .await;
            if deleted {
                println!("Deleted {id}");
            } else {
                println!("No saved contract {id}");
            }
        }
        HistoryAction::Clear => {
            ClearHistoryHandler::new(ctx.store.clone()).handle().await;
            println!("History cleared");
        }
    }
    Ok(())
}

async fn execute_templates(ctx: &Context, action: TemplateAction) {
    match action {
        TemplateAction::List => {
            let listing = ListTemplatesHandler::new(ctx.store.clone()).handle().await;
            for template in listing.builtin.iter().chain(listing.custom.iter()) {
                println!(
                    "{:<28} {} ({} clauses)",
                    template.id.as_str(),
                    template.name,
                    template.clauses.len()
                );
            }
        }
        TemplateAction::Delete { id } => {
            let handler = DeleteTemplateHandler::new(ctx.store.clone());
            let deleted = match TemplateId::new(id.clone()) {
                Ok(template_id) => handler.handle(DeleteTemplateCommand { template_id }).await,
                Err(_) => false,
            };
            if deleted {
                println!("Deleted template {id}");
            } else {
                println!("No custom template {id}");
            }
        }
    }
}

async fn watch_resets(ctx: &Context) -> Result<()> {
    let ticker = ResetTicker::with_config(
        ctx.ledger.clone(),
        ResetTickerConfig::default().with_interval(ctx.config.quota.reset_check_interval()),
    );
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let handle = tokio::spawn(async move { ticker.run(shutdown_rx).await });

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");
    let _ = shutdown_tx.send(true);
    handle.await?;

    print_snapshot(&ctx.ledger.snapshot().await);
    Ok(())
}

fn print_snapshot(snapshot: &QuotaSnapshot) {
    println!(
        "Plan: {}  Remaining: {}  Day: {}",
        snapshot.plan_id.display_name(),
        snapshot.remaining_label(),
        snapshot.period_key
    );
    if snapshot.is_low() {
        println!("Running low. Upgrade for a larger daily allotment.");
    }
}

fn describe(claims: &SessionClaims) -> String {
    match (&claims.name, &claims.email) {
        (Some(name), Some(email)) => format!("{name} <{email}>"),
        (Some(name), None) => name.clone(),
        (None, Some(email)) => email.clone(),
        (None, None) => claims.sub.clone().unwrap_or_else(|| "unknown user".to_string()),
    }
}

fn secret_or_prompt(value: Option<String>, label: &str) -> Result<SecretString> {
    let value = match value {
        Some(value) => value,
        None => {
            eprint!("{label}: ");
            io::stderr().flush()?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };
    Ok(SecretString::new(value))
}
