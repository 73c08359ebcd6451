use clap::{Parser, Subcommand};
use reckon_cli::{
    api_client::ReckonClient,
    config::{Credentials, partial_show_secret},
    error::{CliError, CliResult},
};
use reckon_core::{CalculationKind, CalculationRequest};
use reckon_http::models::{
    CalculationPayload, EvaluateResponse, ListKindsResponse, UpdateCalculationRequest,
};
use serde_json::json;
use std::io::{self, Write};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use uuid::Uuid;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API server URL
    #[arg(long, short = 'u', env = "RECKON_API_URL", global = true)]
    api_url: Option<String>,

    /// API key for authentication
    #[arg(long, short = 'k', env = "RECKON_API_KEY", global = true)]
    api_key: Option<String>,

    /// credentials directory
    #[arg(long, short = 'd', global = true)]
    credentials_dir: Option<String>,

    /// Print compact instead of pretty JSON
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a calculation locally
    Eval(EvalArgs),

    /// List supported calculation kinds
    Kinds,

    /// Manage stored calculations (remote API)
    Calc {
        #[command(subcommand)]
        command: CalcCommands,
    },

    /// Show and save API credentials
    Login(LoginArgs),

    /// Revoke the current API key and forget it
    Logout,
}

#[derive(Parser)]
struct EvalArgs {
    /// Calculation kind, e.g. addition or sin
    kind: String,

    /// Numeric inputs
    #[arg(allow_negative_numbers = true)]
    inputs: Vec<f64>,
}

#[derive(Parser)]
struct LoginArgs {
    /// Test the connection with the resulting credentials
    #[arg(short, long, default_value = "false")]
    test: bool,
}

#[derive(Subcommand)]
enum CalcCommands {
    /// List your calculations
    List,

    /// Get a calculation
    Get {
        /// Calculation ID
        #[arg()]
        id: Uuid,
    },

    /// Store a new calculation
    Create {
        /// Calculation kind
        kind: String,

        /// Numeric inputs
        #[arg(allow_negative_numbers = true)]
        inputs: Vec<f64>,
    },

    /// Change the kind and/or inputs of a calculation
    Update {
        /// Calculation ID
        #[arg()]
        id: Uuid,

        /// New calculation kind
        #[arg(long)]
        kind: Option<String>,

        /// New inputs
        #[arg(long, num_args = 1.., allow_negative_numbers = true)]
        inputs: Option<Vec<f64>>,
    },

    /// Delete a calculation
    Delete {
        /// Calculation ID
        #[arg()]
        id: Uuid,
    },
}

fn credentials(cli: &Cli) -> Credentials {
    Credentials::initialize(
        cli.credentials_dir.clone(),
        cli.api_url.clone(),
        cli.api_key.clone(),
    )
}

fn get_api_client(cli: &Cli) -> ReckonClient {
    let credentials = credentials(cli);
    ReckonClient::new(&credentials.api_url, &credentials.api_key)
}

fn output_json<T: serde::Serialize>(data: &T, pretty: bool) -> CliResult<()> {
    let output = if pretty {
        serde_json::to_string_pretty(data)
    } else {
        serde_json::to_string(data)
    }?;

    println!("{}", output);
    Ok(())
}

fn handle_eval(args: &EvalArgs, cli: &Cli) -> CliResult<()> {
    let kind = CalculationKind::parse(&args.kind)?;
    let request = CalculationRequest::new(kind, args.inputs.clone())?;
    let result = request.evaluate()?;
    debug!(%kind, result, "evaluated locally");

    output_json(
        &EvaluateResponse {
            kind,
            inputs: request.into_inputs(),
            result,
        },
        !cli.compact,
    )
}

async fn handle_calc_commands(cmd: &CalcCommands, cli: &Cli) -> CliResult<()> {
    let client = get_api_client(cli);
    let pretty = !cli.compact;

    match cmd {
        CalcCommands::List => {
            let response = client.list_calculations().await?;
            output_json(&response, pretty)?;
        }

        CalcCommands::Get { id } => {
            let response = client.get_calculation(*id).await?;
            output_json(&response, pretty)?;
        }

        CalcCommands::Create { kind, inputs } => {
            let payload = CalculationPayload::new(kind.clone(), json!(inputs));
            let response = client.create_calculation(&payload).await?;
            output_json(&response, pretty)?;
        }

        CalcCommands::Update { id, kind, inputs } => {
            if kind.is_none() && inputs.is_none() {
                return Err(CliError::Usage(
                    "Nothing to update; pass --kind and/or --inputs".to_string(),
                ));
            }
            let update = UpdateCalculationRequest {
                kind: kind.clone().map(serde_json::Value::String),
                inputs: inputs.as_ref().map(|inputs| json!(inputs)),
            };
            let response = client.update_calculation(*id, &update).await?;
            output_json(&response, pretty)?;
        }

        CalcCommands::Delete { id } => {
            client.delete_calculation(*id).await?;
            println!("Calculation {} deleted successfully", id);
        }
    }

    Ok(())
}

async fn handle_login_command(args: &LoginArgs, cli: &Cli) -> CliResult<()> {
    let credentials = credentials(cli);

    // Persist only what was explicitly provided
    if cli.api_key.is_some() || cli.api_url.is_some() {
        let path = credentials.save_credentials()?;
        println!("Saved credentials to {}", path.display());
    }

    println!("Current API settings:");
    println!("API URL: {}", credentials.api_url);

    if credentials.has_api_key() {
        println!("API Key: {}", partial_show_secret(&credentials.api_key));
    } else {
        println!("API Key: Not set");
    }

    if args.test {
        print!("Testing API connection... ");
        io::stdout().flush()?;

        let client = ReckonClient::new(&credentials.api_url, &credentials.api_key);
        if let Err(e) = client.health_check().await {
            println!("❌ Server unreachable: {}", e);
            return Ok(());
        }
        match client.current_user().await {
            Ok(user) => println!("✅ Success (authenticated as {})", user.username),
            Err(e) => println!("❌ Failed: {}", e),
        }
    }

    Ok(())
}

async fn handle_logout_command(cli: &Cli) -> CliResult<()> {
    let mut credentials = credentials(cli);
    let client = ReckonClient::new(&credentials.api_url, &credentials.api_key);
    let response = client.revoke().await?;

    credentials.clear_api_key();
    credentials.save_credentials()?;

    output_json(&response, !cli.compact)?;
    println!("Logged out; the API key has been revoked");
    Ok(())
}

async fn run(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Eval(args) => handle_eval(args, cli),
        Commands::Kinds => output_json(&ListKindsResponse::supported(), !cli.compact),
        Commands::Calc { command } => handle_calc_commands(command, cli).await,
        Commands::Login(args) => handle_login_command(args, cli).await,
        Commands::Logout => handle_logout_command(cli).await,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let _ = dotenv::dotenv();

    let cli = Cli::parse();

    if let Err(e) = run(&cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
