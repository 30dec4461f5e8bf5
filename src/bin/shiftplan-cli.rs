#![forbid(unsafe_code)]
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use shiftplan::{
    io,
    scheduler::{SchedOptions, Scheduler, DEFAULT_MIN_PER_SHIFT, DEFAULT_SEED, DEFAULT_WEEKLY_DAY_CAP},
    storage::{JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planification hebdomadaire (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du roster
    #[arg(long, global = true, default_value = "roster.json")]
    roster: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args, Debug, Clone, Copy)]
struct CapacityArgs {
    /// Nombre maximal de jours travaillés par semaine
    #[arg(long, default_value_t = DEFAULT_WEEKLY_DAY_CAP)]
    weekly_day_cap: u32,
    /// Effectif minimal par créneau
    #[arg(long, default_value_t = DEFAULT_MIN_PER_SHIFT)]
    min_per_shift: u32,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convertir un roster CSV en roster JSON
    ImportCsv {
        #[arg(long)]
        csv: String,
    },

    /// Vérifier la faisabilité sans planifier
    Check {
        #[command(flatten)]
        capacity: CapacityArgs,
    },

    /// Générer le planning de la semaine
    Run {
        #[command(flatten)]
        capacity: CapacityArgs,
        /// Plafond dur par créneau (variante plafonnée)
        #[arg(long)]
        max_per_shift: Option<u32>,
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
        /// Contrôle a posteriori du planning
        #[arg(long)]
        audit: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let storage = JsonStorage::open(&cli.roster)?;

    let code = match cli.cmd {
        Commands::ImportCsv { csv } => {
            let roster = io::import_roster_csv(csv)?;
            storage.save(&roster)?;
            println!(
                "Imported {} employee(s) into {}",
                roster.len(),
                storage.path().display()
            );
            0
        }
        Commands::Check { capacity } => {
            let roster = storage.load()?;
            let opts = SchedOptions {
                weekly_day_cap: capacity.weekly_day_cap,
                min_per_shift: capacity.min_per_shift,
                ..SchedOptions::default()
            };
            opts.validate()?;
            match Scheduler::new(opts).check_feasibility(roster.len()) {
                None => {
                    println!("OK: {} employee(s) can cover the week", roster.len());
                    0
                }
                Some(w) => {
                    eprintln!("WARN {w}");
                    2
                }
            }
        }
        Commands::Run {
            capacity,
            max_per_shift,
            seed,
            out_json,
            out_csv,
            audit,
        } => {
            let mut roster = storage.load()?;
            let opts = SchedOptions {
                weekly_day_cap: capacity.weekly_day_cap,
                min_per_shift: capacity.min_per_shift,
                max_per_shift,
                seed,
            };
            let mut scheduler = Scheduler::new(opts);
            let outcome = scheduler.schedule(&mut roster)?;

            if let Some(path) = &out_json {
                io::export_outcome_json(path, &outcome)?;
            }
            if let Some(path) = &out_csv {
                io::export_grid_csv(path, &outcome.grid)?;
            }
            if out_json.is_none() && out_csv.is_none() {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            }

            for w in &outcome.warnings {
                eprintln!("WARN {w}");
            }
            let violations = if audit {
                scheduler.audit(&outcome.grid)
            } else {
                Vec::new()
            };
            for v in &violations {
                eprintln!("AUDIT {v}");
            }

            // Code 2 = WARNING/INCOMPLETE
            if outcome.is_complete() && violations.is_empty() {
                0
            } else {
                2
            }
        }
    };

    std::process::exit(code);
}
