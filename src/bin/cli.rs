//! envstore CLI
//!
//! Command-line interface for inspecting and editing a settings file
//! directly, with the same merge and reset rules as the server.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use envstore::policy::{self, SESSION_KEY};
use envstore::{Config, Settings, SettingsStore};
use tracing_subscriber::{fmt, EnvFilter};

/// envstore CLI
#[derive(Parser, Debug)]
#[command(name = "envstore-cli")]
#[command(about = "CLI for a .env settings file")]
#[command(version)]
struct Args {
    /// Settings file
    #[arg(short, long, env = "ENVSTORE_FILE", default_value = "./.env")]
    env_file: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every setting
    Show,

    /// Print one value
    Get {
        /// The key to get
        key: String,
    },

    /// Set a value (SESSION_ID accumulates)
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Replace all settings with the defaults
    Reset,

    /// List accumulated session tokens, oldest first
    Sessions,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args = Args::parse();
    let config = Config::builder().env_path(&args.env_file).build();
    let store = SettingsStore::open(&config);

    match run(&store, args.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run<B: envstore::store::Backend>(
    store: &SettingsStore<B>,
    command: Commands,
) -> envstore::Result<ExitCode> {
    match command {
        Commands::Show => print_settings(&store.read_all()),
        Commands::Get { key } => match store.read_all().get(&key) {
            Some(value) => println!("{}", value),
            None => return Ok(ExitCode::FAILURE),
        },
        Commands::Set { key, value } => {
            let mut update = Settings::new();
            update.insert(key.clone(), value);
            let settings = store.apply_update(&update)?;
            if let Some(stored) = settings.get(&key) {
                println!("{}={}", key, stored);
            }
        }
        Commands::Reset => print_settings(&store.reset_to_defaults()?),
        Commands::Sessions => {
            let settings = store.read_all();
            let stored = settings.get(SESSION_KEY).map(String::as_str).unwrap_or_default();
            for token in policy::tokens(stored) {
                println!("{}", token);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_settings(settings: &Settings) {
    for (key, value) in settings {
        println!("{}={}", key, value);
    }
}
