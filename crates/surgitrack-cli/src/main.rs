use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;
use surgitrack_cli::{commands, config};
use surgitrack_storage::history::PracticeStore;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "surgitrack")]
#[command(about = "Perioperative risk calculators and patient calculation history")]
struct Cli {
    /// Data directory (overrides the configured one)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available calculators
    Calculators,
    /// Show a calculator's description and parameters
    Describe {
        /// Calculator id (e.g. rcri, asa)
        calculator: String,
    },
    /// Run a calculator
    Calculate {
        /// Calculator id (e.g. rcri, asa)
        calculator: String,
        /// Parameter assignment, repeatable: -p "ASA Class=ASA III"
        #[arg(short = 'p', long = "param")]
        params: Vec<String>,
        /// Record the result in this patient's history
        #[arg(long)]
        patient: Option<Uuid>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage patients
    Patient {
        #[command(subcommand)]
        command: PatientCommands,
    },
    /// Show or prune a patient's calculation history
    History {
        patient: Uuid,
        /// Delete this calculation instead of listing
        #[arg(long)]
        delete: Option<Uuid>,
    },
    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum PatientCommands {
    /// Add a patient
    Add {
        name: String,
        /// Medical record number
        #[arg(long)]
        mrn: Option<String>,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: Option<String>,
    },
    /// List all patients
    List,
    /// Remove a patient and their history
    Remove { id: Uuid },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a config file with the current settings
    Init,
    /// Print the active config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = config::config_path()?;
    let mut settings = config::load_or_default(&config_path)?;
    if let Some(dir) = cli.data_dir {
        settings.data_dir = dir;
    }

    match cli.command {
        Commands::Calculators => print!("{}", commands::list_calculators()),
        Commands::Describe { calculator } => print!("{}", commands::describe(&calculator)?),
        Commands::Calculate {
            calculator,
            params,
            patient,
            json,
        } => {
            let store = PracticeStore::open(&settings.data_dir).await?;
            let (definition, result, record) =
                commands::calculate(&store, &calculator, &params, patient).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", commands::render_result(&definition, &result));
            }
            if let Some(record) = record {
                eprintln!("Recorded calculation {}", record.id);
            }
        }
        Commands::Patient { command } => {
            let store = PracticeStore::open(&settings.data_dir).await?;
            match command {
                PatientCommands::Add { name, mrn, dob } => {
                    let patient =
                        commands::add_patient(&store, &name, mrn, dob.as_deref()).await?;
                    println!("{}", patient.id);
                }
                PatientCommands::List => {
                    print!("{}", commands::render_patients(&store.list_patients().await?));
                }
                PatientCommands::Remove { id } => {
                    let removed = store.delete_patient(id).await?;
                    println!("Removed patient {id} and {removed} calculation(s).");
                }
            }
        }
        Commands::History { patient, delete } => {
            let store = PracticeStore::open(&settings.data_dir).await?;
            match delete {
                Some(calculation_id) => {
                    store.delete_calculation(patient, calculation_id).await?;
                    println!("Deleted calculation {calculation_id}.");
                }
                None => {
                    let record = store.get_patient(patient).await?;
                    let calculations = store.list_calculations(patient).await?;
                    print!("{}", commands::render_history(&record, &calculations));
                }
            }
        }
        Commands::Config { command } => match command {
            ConfigCommands::Init => {
                config::save_config(&config_path, &settings)?;
                println!("Wrote {}", config_path.display());
            }
            ConfigCommands::Show => {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            }
        },
    }

    Ok(())
}
