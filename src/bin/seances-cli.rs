#![forbid(unsafe_code)]
use anyhow::Result;
use clap::{Parser, Subcommand};
use seances::{
    config::Config,
    export,
    generator::{generate_schedule, RngSource},
    writer::{verify_output_dir, write_schedule, WriteMode},
};
use std::path::PathBuf;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de génération de séances factices
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier de configuration JSON (optionnel)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer les fichiers `day_<i>`
    Generate {
        /// Dossier de sortie (défaut : `./data`)
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Graine pour un tirage reproductible
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        days: Option<u32>,
        /// Date du jour 1 (YYYY-MM-DD), reprise dans les exports
        #[arg(long)]
        start_date: Option<String>,
        /// Remplace le contenu existant au lieu d'ajouter
        #[arg(long)]
        overwrite: bool,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Vérifier un dossier de sortie
    Check {
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Export CSV des anomalies (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Lister le catalogue de films
    Catalog,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let mut cfg = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let code = match cli.cmd {
        Commands::Generate {
            output_dir,
            seed,
            days,
            start_date,
            overwrite,
            out_json,
            out_csv,
        } => {
            if let Some(dir) = output_dir {
                cfg.output_dir = dir;
            }
            if let Some(days) = days {
                cfg.days = days;
            }
            if let Some(date) = start_date {
                cfg.start_date = Some(date.parse()?);
            }
            if seed.is_some() {
                cfg.seed = seed;
            }
            if overwrite {
                cfg.mode = WriteMode::Overwrite;
            }

            let mut source = match cfg.seed {
                Some(seed) => RngSource::seeded(seed),
                None => RngSource::from_entropy(),
            };
            let schedule = generate_schedule(&cfg.generate_options(), cfg.catalog(), &mut source)?;
            let written = write_schedule(&cfg.output_dir, &schedule, cfg.mode)?;

            if let Some(path) = out_json {
                export::export_schedule_json(path, &schedule)?;
            }
            if let Some(path) = out_csv {
                export::export_schedule_csv(path, &schedule)?;
            }
            println!(
                "{} file(s) written to {}",
                written.len(),
                cfg.output_dir.display()
            );
            0
        }
        Commands::Check { output_dir, report } => {
            if let Some(dir) = output_dir {
                cfg.output_dir = dir;
            }
            let issues =
                verify_output_dir(&cfg.output_dir, &cfg.generate_options(), cfg.catalog())?;
            if issues.is_empty() {
                println!("OK: {} day file(s) valid", cfg.days);
                0
            } else {
                eprintln!("Found {} issue(s)", issues.len());
                for i in &issues {
                    let line = i.line.map(|l| format!(":{l}")).unwrap_or_default();
                    eprintln!("day_{}{} [{}] {}", i.day, line, i.kind.as_str(), i.detail);
                }
                if let Some(path) = report {
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["day", "line", "kind", "detail"])?;
                    for i in &issues {
                        let line = i.line.map(|l| l.to_string()).unwrap_or_default();
                        w.write_record([
                            i.day.to_string().as_str(),
                            line.as_str(),
                            i.kind.as_str(),
                            i.detail.as_str(),
                        ])?;
                    }
                    w.flush()?;
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Catalog => {
            for title in cfg.catalog().titles() {
                println!("{title}");
            }
            0
        }
    };

    std::process::exit(code);
}
