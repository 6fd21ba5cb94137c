//! `simplerity` — Simplerity control-plane command-line interface.
//!
//! Three subcommands, run in order, each in its own invocation:
//!
//! - **`login`** — exchange a username and password for session tokens and
//!   list the agents available to the user.
//! - **`select`** — pick the agent whose configuration to download.
//! - **`load`** — download the selected agent's packetbeat configuration.
//!
//! State between invocations lives in `user_credentials.json`. Requests are
//! signed with the secret in `agent_credentials.json`, which must be
//! provisioned beforehand.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use simplerity::config::{DEFAULT_AGENT_CREDENTIALS, DEFAULT_API_BASE, DEFAULT_USER_CREDENTIALS};
use simplerity::render::{render_load, render_login, render_select};
use simplerity::{Config, Simplerity, WorkflowError};

/// simplerity — Simplerity integration
///
/// Log in, select an agent, and download its packetbeat configuration.
#[derive(Parser, Debug)]
#[command(name = "simplerity", version, about, long_about = None)]
struct Cli {
    /// Base URL of the Simplerity API.
    #[arg(
        long,
        global = true,
        env = "SIMPLERITY_API_BASE",
        default_value = DEFAULT_API_BASE,
        value_name = "URL"
    )]
    api_base: String,

    /// Session credentials file, written by `login` and `select`.
    #[arg(
        long,
        global = true,
        env = "SIMPLERITY_USER_CREDENTIALS",
        default_value = DEFAULT_USER_CREDENTIALS,
        value_name = "FILE"
    )]
    user_credentials: PathBuf,

    /// Registration credentials file, provisioned out-of-band.
    #[arg(
        long,
        global = true,
        env = "SIMPLERITY_AGENT_CREDENTIALS",
        default_value = DEFAULT_AGENT_CREDENTIALS,
        value_name = "FILE"
    )]
    agent_credentials: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Log in to Simplerity.
    ///
    /// Stores the issued tokens and prints the agents you can select.
    Login {
        /// Account login.
        #[arg(short = 'l', long)]
        login: String,

        /// Account password.
        #[arg(short = 'p', long, env = "SIMPLERITY_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Select the agent to use.
    ///
    /// AGENT_ID is one of the ids printed by `login`.
    Select {
        /// Agent id.
        #[arg(short = 'a', long, value_name = "AGENT_ID")]
        agent: String,
    },

    /// Download the selected agent's packetbeat config.
    Load {
        /// Name of the file to save the config to.
        #[arg(long = "save-to-file", value_name = "FILE", default_value = "packetbeat.yml")]
        save_to_file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "simplerity=info,simplerity_cli=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::default()
        .with_api_base(cli.api_base)
        .with_credentials(cli.user_credentials, cli.agent_credentials);

    if let Err(e) = run(config, cli.command) {
        fatal(&e);
    }
}

/// Run one subcommand and print its follow-up instructions.
fn run(config: Config, command: Command) -> Result<(), WorkflowError> {
    let workflow = Simplerity::connect(config)?;

    match command {
        Command::Login { login, password } => {
            let outcome = workflow.login(&login, &password)?;
            print!("{}", render_login(&outcome.endpoints));
        }

        Command::Select { agent } => {
            workflow.select_agent(&agent)?;
            print!("{}", render_select());
        }

        Command::Load { save_to_file } => {
            let outcome = workflow.load_config(&save_to_file)?;
            print!("{}", render_load(&outcome.path));
        }
    }

    Ok(())
}

/// Print an error message to stderr and exit with code 1.
fn fatal(err: &WorkflowError) -> ! {
    tracing::debug!(precondition = err.is_precondition(), "command failed");
    eprintln!("simplerity: {err}");
    process::exit(1);
}
