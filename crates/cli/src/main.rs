use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ward_core::constants::{DEFAULT_ROSTER_FILENAME, DEFAULT_WARD_NAME};
use ward_core::{
    flag_from_env_value, roster_path_from_env_value, CoreConfig, EventDispatcher, Nurse,
    NurseRegistration, VitalSigns, WardRoster,
};

mod console;
mod session;

use console::Console;
use session::Session;

#[derive(Parser)]
#[command(name = "ward")]
#[command(about = "Ward nursing workflow CLI")]
struct Cli {
    /// Roster file to load (overrides WARD_ROSTER; built-in roster when unset)
    #[arg(long, global = true)]
    roster: Option<PathBuf>,
    /// Ward name (overrides WARD_NAME)
    #[arg(long, global = true)]
    ward: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive nursing session
    Session {
        /// Nurse badge id (asked for when omitted)
        #[arg(long)]
        nurse_id: Option<String>,
        /// Nurse name (asked for when omitted)
        #[arg(long)]
        nurse_name: Option<String>,
        /// Registration authority, e.g. NMC
        #[arg(long, requires = "registration_number")]
        registration_authority: Option<String>,
        /// Registration number
        #[arg(long, requires = "registration_authority")]
        registration_number: Option<String>,
        /// Write each completed discharge summary to this file as YAML
        #[arg(long)]
        summary_out: Option<PathBuf>,
    },
    /// Check a set of vital signs against the discharge ranges
    CheckVitals {
        /// Temperature, degrees Fahrenheit
        temperature: f64,
        /// Systolic blood pressure, mmHg
        systolic: i32,
        /// Heart rate, beats per minute
        heart_rate: i32,
        /// Oxygen saturation, percent
        oxygen: i32,
    },
    /// Roster file operations
    Roster {
        #[command(subcommand)]
        command: RosterCommands,
    },
}

#[derive(Subcommand)]
enum RosterCommands {
    /// Parse a roster file and check its cross references
    Validate {
        #[arg(default_value = DEFAULT_ROSTER_FILENAME)]
        path: PathBuf,
    },
}

/// Resolve configuration once, from flags first and then the environment.
///
/// # Environment Variables
/// - `WARD_NAME`: ward name (default: "General Ward")
/// - `WARD_ROSTER`: roster file (default: built-in roster)
/// - `WARD_SIMULATE_PHYSICIAN_OUTAGE`: physician notifications fail when set
/// - `WARD_SIMULATE_PHARMACY_OUTAGE`: pharmacy notifications fail when set
fn resolve_config(roster: Option<PathBuf>, ward: Option<String>) -> anyhow::Result<CoreConfig> {
    let roster_path =
        roster.or_else(|| roster_path_from_env_value(std::env::var("WARD_ROSTER").ok()));
    let ward_name = ward
        .or_else(|| std::env::var("WARD_NAME").ok())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_WARD_NAME.into());

    let cfg = CoreConfig::new(ward_name, roster_path)?.with_simulated_outages(
        flag_from_env_value(std::env::var("WARD_SIMULATE_PHYSICIAN_OUTAGE").ok()),
        flag_from_env_value(std::env::var("WARD_SIMULATE_PHARMACY_OUTAGE").ok()),
    );
    Ok(cfg)
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ward_core=info".parse()?)
                .add_directive("ward=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Session {
            nurse_id,
            nurse_name,
            registration_authority,
            registration_number,
            summary_out,
        } => {
            let cfg = resolve_config(cli.roster, cli.ward)?;
            let mut ward = cfg.load_roster()?.into_ward(cfg.dispatcher())?;

            let mut console = Console::new(std::io::stdin().lock(), std::io::stdout().lock());
            let nurse = match (nurse_id, nurse_name) {
                (Some(id), Some(name)) => Nurse::new(id, name)?,
                _ => match session::login(&mut console)? {
                    Some(nurse) => nurse,
                    None => return Ok(()),
                },
            };
            let nurse = match (registration_authority, registration_number) {
                (Some(authority), Some(number)) => {
                    nurse.with_registration(NurseRegistration::new(authority, number)?)
                }
                _ => nurse,
            };

            Session::new(&mut ward, nurse, console)
                .with_summary_out(summary_out)
                .run(cfg.ward_name())?;
        }
        Commands::CheckVitals {
            temperature,
            systolic,
            heart_rate,
            oxygen,
        } => {
            let vitals = VitalSigns::new(temperature, systolic, heart_rate, oxygen);
            let failed = vitals.out_of_range();
            if failed.is_empty() {
                println!("SAFE: {vitals}");
            } else {
                let names: Vec<String> = failed.iter().map(ToString::to_string).collect();
                println!("UNSAFE ({}): {vitals}", names.join(", "));
            }
        }
        Commands::Roster {
            command: RosterCommands::Validate { path },
        } => {
            let roster = WardRoster::load(&path)?;
            let (patients, medications, schedules) = (
                roster.patients.len(),
                roster.medications.len(),
                roster.schedules.len(),
            );
            roster.into_ward(std::sync::Arc::new(EventDispatcher::logging()))?;
            println!(
                "Roster OK: {patients} patients, {medications} medications, {schedules} schedules"
            );
        }
    }

    Ok(())
}
