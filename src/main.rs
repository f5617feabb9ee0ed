//! strichliste CLI - Command-line client for the strichliste tab ledger
//!
//! Queries and books users, articles and transactions against a strichliste
//! backend.

#![forbid(unsafe_code)]

use anyhow::{anyhow, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use rust_decimal::Decimal;
use std::path::PathBuf;
use strichliste_cli::accounts::Role;
use strichliste_cli::api::http::HttpClient;
use strichliste_cli::commands::{self, create_user, transact, update_article};
use strichliste_cli::config::{Context, StrichlisteCliConfig};
use strichliste_cli::config_file::ConfigFile;
use strichliste_cli::errors::NoUpdatesRequested;
use strichliste_cli::utils::colors::init_colors;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "strichliste-cli",
    version,
    about = "Command-line client for the strichliste tab ledger"
)]
struct Cli {
    /// Configuration file (JSON, or TOML by extension)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Your username on strichliste
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// strichliste API endpoint
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Output format
    #[arg(long, value_enum, global = true)]
    output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show or manage articles
    Article(ArticleArgs),

    /// Show or manage users; without a query shows yourself
    User(UserArgs),

    /// Buy some amount of an article
    Buy {
        /// Id of the article to buy
        #[arg(short, long)]
        article: String,

        /// How many to buy
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        count: i64,

        /// Add a comment to the transaction
        #[arg(long)]
        comment: Option<String>,
    },

    /// Deposit funds, or collect them from another user
    #[command(visible_alias = "deposit")]
    Credit(TransactArgs),

    /// Withdraw funds, or send them to another user
    #[command(visible_alias = "withdraw")]
    Debit(TransactArgs),

    /// Reverse a transaction
    #[command(visible_alias = "undo")]
    Revert {
        /// Id of the transaction
        transaction: String,

        /// Confirm the reversal; dry-runs otherwise
        #[arg(long)]
        confirm: bool,
    },

    /// Show a selection of metrics
    Metrics {
        /// Show system metrics instead of your own
        #[arg(long)]
        system: bool,
    },

    /// Show a selection of backend settings
    Settings,

    /// Show the effective client configuration
    Config,

    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
#[command(args_conflicts_with_subcommands = true, arg_required_else_help = true)]
struct ArticleArgs {
    /// Article id, name, or barcode to look up
    query: Option<String>,

    #[command(subcommand)]
    command: Option<ArticleCommands>,
}

#[derive(Subcommand, Debug)]
enum ArticleCommands {
    /// Add an article
    Create {
        /// Article name
        #[arg(long)]
        name: String,

        /// Article price, as a decimal
        #[arg(long)]
        value: Decimal,

        /// Article barcode
        #[arg(long)]
        barcode: Option<String>,
    },

    /// Change an article
    Update {
        /// Article id
        id: String,

        /// New name
        #[arg(long)]
        set_name: Option<String>,

        /// New price, as a decimal
        #[arg(long)]
        set_value: Option<Decimal>,

        /// New barcode
        #[arg(long)]
        set_barcode: Option<String>,
    },

    /// Disable an article
    Delete {
        /// Article id
        id: String,

        /// Confirm deletion; dry-runs otherwise
        #[arg(long)]
        confirm: bool,
    },
}

#[derive(Args, Debug)]
#[command(args_conflicts_with_subcommands = true)]
struct UserArgs {
    /// User id or name to look up
    query: Option<String>,

    #[command(subcommand)]
    command: Option<UserCommands>,
}

#[derive(Subcommand, Debug)]
enum UserCommands {
    /// Open a user account
    Create {
        /// User name
        #[arg(long)]
        name: String,

        /// User email
        #[arg(long)]
        email: Option<String>,

        /// Initial balance, as a decimal
        #[arg(long, allow_negative_numbers = true)]
        balance: Option<Decimal>,
    },

    /// Change your own name or email
    Update {
        /// New name
        #[arg(long)]
        set_name: Option<String>,

        /// New email
        #[arg(long)]
        set_email: Option<String>,
    },

    /// Disable a user account
    Delete {
        /// User id
        id: String,

        /// Confirm deletion; dry-runs otherwise
        #[arg(long)]
        confirm: bool,
    },
}

#[derive(Args, Debug)]
struct TransactArgs {
    /// Account to take the funds from
    #[arg(long)]
    from: Option<String>,

    /// Account to give the funds to
    #[arg(long)]
    to: Option<String>,

    /// Add a comment to the transaction
    #[arg(short, long)]
    comment: Option<String>,

    /// Amount, as a decimal
    #[arg(short, long, allow_negative_numbers = true)]
    amount: Decimal,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and succeed; usage errors exit 1
            let code = i32::from(e.use_stderr());
            e.print()?;
            std::process::exit(code);
        }
    };

    let output_format = cli.output.unwrap_or(OutputFormat::Human);
    init_colors(cli.no_color || output_format == OutputFormat::Json);

    match (run(&cli).await, output_format) {
        (Ok(output), OutputFormat::Human) => println!("{output}"),
        (Ok(output), OutputFormat::Json) => {
            let json_output = serde_json::json!({
                "success": true,
                "data": output
            });
            println!("{}", serde_json::to_string_pretty(&json_output)?);
        }
        (Err(e), format) => {
            let message = error_message(&e);
            if format == OutputFormat::Json {
                let json_output = serde_json::json!({
                    "success": false,
                    "error": message
                });
                println!("{}", serde_json::to_string_pretty(&json_output)?);
            } else {
                eprintln!("Error: {message}");
            }
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Error text shown to the user, with the update usage appended when nothing was requested
fn error_message(error: &anyhow::Error) -> String {
    let message = format!("{error:#}");
    error
        .downcast_ref::<NoUpdatesRequested>()
        .and_then(|no_updates| update_usage(no_updates.kind))
        .map_or_else(|| message.clone(), |usage| format!("{message}\n\n{usage}"))
}

/// Usage line of `<kind> update`
fn update_usage(kind: &str) -> Option<String> {
    let mut cli = Cli::command();
    cli.build();
    let update = cli.find_subcommand_mut(kind)?.find_subcommand_mut("update")?;
    Some(update.render_usage().to_string())
}

/// Resolve configuration and dispatch the selected command
async fn run(cli: &Cli) -> Result<String> {
    let env_config = StrichlisteCliConfig::new();
    let config_file = ConfigFile::load(cli.config.as_deref())?;
    let context = Context::resolve(
        cli.user.as_deref(),
        cli.api_url.as_deref(),
        &env_config,
        &config_file,
    );
    debug!("Resolved context: {:?}", context);

    // Only commands that talk to the backend build a client
    let client = || HttpClient::new(&context.api_url, env_config.http_timeout());

    match &cli.command {
        Commands::Article(args) => execute_article(&client()?, args).await,
        Commands::User(args) => execute_user(&client()?, &context, args).await,
        Commands::Buy {
            article,
            count,
            comment,
        } => {
            commands::execute_buy(&client()?, &context, article, *count, comment.as_deref()).await
        }
        Commands::Credit(args) => execute_transact(&client()?, &context, Role::Credit, args).await,
        Commands::Debit(args) => execute_transact(&client()?, &context, Role::Debit, args).await,
        Commands::Revert {
            transaction,
            confirm,
        } => commands::execute_revert(&client()?, &context, transaction, *confirm).await,
        Commands::Metrics { system } => {
            commands::execute_metrics(&client()?, &context, *system).await
        }
        Commands::Settings => commands::execute_settings(&client()?).await,
        Commands::Config => commands::execute_show_config(&context, &ConfigFile::search_dirs()),
        Commands::Completions { shell } => commands::execute_completions(*shell, Cli::command()),
    }
}

async fn execute_article(api: &HttpClient, args: &ArticleArgs) -> Result<String> {
    match (&args.command, &args.query) {
        (
            Some(ArticleCommands::Create {
                name,
                value,
                barcode,
            }),
            _,
        ) => commands::execute_create_article(api, name, *value, barcode.as_deref()).await,

        (
            Some(ArticleCommands::Update {
                id,
                set_name,
                set_value,
                set_barcode,
            }),
            _,
        ) => {
            let changes = update_article::ArticleChanges {
                name: set_name.as_deref(),
                value: *set_value,
                barcode: set_barcode.as_deref(),
            };
            commands::execute_update_article(api, id, &changes).await
        }

        (Some(ArticleCommands::Delete { id, confirm }), _) => {
            commands::execute_delete_article(api, id, *confirm).await
        }

        (None, Some(query)) => commands::execute_show_article(api, query).await,

        (None, None) => Err(anyhow!(
            "no article given; pass an id, name or barcode to look up"
        )),
    }
}

async fn execute_user(api: &HttpClient, context: &Context, args: &UserArgs) -> Result<String> {
    match &args.command {
        Some(UserCommands::Create {
            name,
            email,
            balance,
        }) => {
            let request = create_user::CreateUserRequest {
                name,
                email: email.as_deref(),
                balance: *balance,
            };
            commands::execute_create_user(api, &request).await
        }

        Some(UserCommands::Update {
            set_name,
            set_email,
        }) => {
            commands::execute_update_user(api, context, set_name.as_deref(), set_email.as_deref())
                .await
        }

        Some(UserCommands::Delete { id, confirm }) => {
            commands::execute_delete_user(api, id, *confirm).await
        }

        None => commands::execute_show_user(api, context, args.query.as_deref()).await,
    }
}

async fn execute_transact(
    api: &HttpClient,
    context: &Context,
    role: Role,
    args: &TransactArgs,
) -> Result<String> {
    let request = transact::TransactRequest {
        role,
        from: args.from.as_deref(),
        to: args.to.as_deref(),
        comment: args.comment.as_deref(),
        amount: args.amount,
    };
    commands::execute_transact(api, context, &request).await
}
