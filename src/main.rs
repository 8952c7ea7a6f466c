use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use phonebook::config::{ClientConfig, DEFAULT_CONFIG_FILE};
use phonebook::controller::{Controller, ControllerSettings, Settled, SubmitOutcome};
use phonebook::filter::find_exact;
use phonebook::model::{Person, PersonDraft, PersonId};
use phonebook::remote::RemoteClient;
use phonebook::tui::TuiRunOptions;
use phonebook::{logging, tui};

#[derive(Parser)]
#[command(name = "phonebook")]
#[command(about = "Contacts manager backed by a REST collection", long_about = None)]
struct Cli {
    /// Config file (defaults to ./phonebook.json when present)
    #[arg(long, global = true, env = "PHONEBOOK_CONFIG")]
    config: Option<PathBuf>,

    /// Remote base URL, overriding the config file
    #[arg(long, global = true, env = "PHONEBOOK_URL")]
    url: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all contacts
    List {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a contact, or update the number of an existing one with the same name
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        number: String,
        /// Answer yes to the update confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Delete a contact by id
    Delete {
        id: String,
        /// Answer yes to the delete confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Find the contact whose name (any case) or number matches exactly
    Search {
        text: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List contacts whose name contains the query (any case)
    Filter {
        query: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive terminal UI (the default)
    Tui,

    /// Show or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective config
    Show,
    /// Write a config file with defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config { command }) = &cli.command {
        return run_config(cli.config.as_deref(), cli.url.as_deref(), command);
    }

    let (mut config, _) = ClientConfig::discover(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        config.base_url = url;
        config.validate().context("--url")?;
    }

    let command = cli.command.unwrap_or(Commands::Tui);
    if let Commands::Tui = command {
        if let Some(dir) = &config.log_dir {
            logging::init_file_logging(&config.log_level, dir)?;
        }
        return tui::run_with_options(TuiRunOptions { config });
    }

    match &config.log_dir {
        Some(dir) => logging::init_file_logging(&config.log_level, dir)?,
        None => logging::init_stderr_logging(if cli.verbose { "debug" } else { "warn" })?,
    }

    let mut controller = connect(&config)?;
    match command {
        Commands::List { json } => {
            print_persons(controller.state().cache.as_slice(), json)?;
        }
        Commands::Add { name, number, yes } => {
            *controller.form_mut() = PersonDraft::new(name, number);
            let outcome = controller.submit(&mut |prompt: &str| yes || ask(prompt))?;
            finish(&mut controller, outcome)?;
        }
        Commands::Delete { id, yes } => {
            let id = PersonId::new(id);
            let name = controller
                .state()
                .cache
                .get(&id)
                .map(|p| p.name.clone())
                .with_context(|| format!("no contact with id {}", id))?;
            let outcome =
                controller.delete_entity(&id, &name, &mut |prompt: &str| yes || ask(prompt))?;
            finish(&mut controller, outcome)?;
        }
        Commands::Search { text, json } => {
            match find_exact(&controller.state().cache, &text) {
                Some(p) => print_persons(std::slice::from_ref(p), json)?,
                None => anyhow::bail!("no contact named or numbered {:?}", text),
            }
        }
        Commands::Filter { query, json } => {
            controller.lookup_mut().set_query(query);
            let state = controller.state();
            let hits: Vec<Person> = state.lookup.matches(&state.cache).into_iter().cloned().collect();
            print_persons(&hits, json)?;
        }
        Commands::Tui | Commands::Config { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Builds a controller and waits for the initial load.
fn connect(config: &ClientConfig) -> Result<Controller> {
    let client = RemoteClient::new(&config.base_url)?;
    let mut controller =
        Controller::new(Arc::new(client), ControllerSettings::from_config(config));
    controller.load()?;
    let settled = controller
        .wait_settled()
        .context("load did not settle")?;
    settled.outcome.context("load contacts")?;
    Ok(controller)
}

fn finish(controller: &mut Controller, outcome: SubmitOutcome) -> Result<()> {
    if outcome == SubmitOutcome::Declined {
        println!("Cancelled");
        return Ok(());
    }
    let Settled { outcome, .. } = controller
        .wait_settled()
        .context("operation did not settle")?;
    outcome?;
    if let Some(n) = controller
        .state()
        .notification
        .visible(std::time::Instant::now())
    {
        println!("{}", n.message);
    }
    Ok(())
}

fn ask(prompt: &str) -> bool {
    eprint!("{} [y/N] ", prompt);
    let _ = std::io::stderr().flush();
    let mut line = String::new();
    if std::io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn print_persons(persons: &[Person], json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(persons).context("serialize contacts")?
        );
        return Ok(());
    }
    for p in persons {
        println!("{}\t{}\t{}", p.id, p.name, p.number);
    }
    Ok(())
}

fn run_config(path: Option<&Path>, url: Option<&str>, command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let (mut config, used) = ClientConfig::discover(path)?;
            if let Some(url) = url {
                config.base_url = url.to_string();
            }
            match used {
                Some(p) => eprintln!("config: {}", p.display()),
                None => eprintln!("config: (defaults)"),
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&config).context("serialize config")?
            );
        }
        ConfigCommands::Init { force } => {
            let path = path
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force)", path.display());
            }
            let mut config = ClientConfig::default();
            if let Some(url) = url {
                config.base_url = url.to_string();
            }
            config.save(&path)?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}
