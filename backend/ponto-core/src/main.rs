// src/main.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ponto_core::server::{self, AppState};
use ponto_core::source::load_records;
use ponto_core::{Config, ReportPeriod};

#[derive(Parser)]
#[command(name = "ponto")]
#[command(about = "Relatórios mensais de ponto a partir das exportações CSV", long_about = None)]
struct Cli {
    /// Directory holding dados_{mes}_{ano}.csv exports
    #[arg(long, global = true)]
    data_dir: Option<std::path::PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the monthly report for every employee
    Report {
        #[arg(short, long)]
        month: Option<String>,
        #[arg(short, long)]
        year: Option<String>,
        /// Output file name (.json or .txt)
        #[arg(short, long)]
        file_name: Option<String>,
    },
    /// List employees in an export, optionally filtered by name, role or CPF
    List {
        #[arg(short, long)]
        month: Option<String>,
        #[arg(short, long)]
        year: Option<String>,
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one employee's daily breakdown
    Show {
        #[arg(long)]
        cpf: String,
        #[arg(short, long)]
        month: Option<String>,
        #[arg(short, long)]
        year: Option<String>,
    },
    /// Serve the records and reports over HTTP
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env().context("Loading PONTO_* configuration failed")?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let generator = config.report_generator()?;

    match cli.command {
        Commands::Report {
            month,
            year,
            file_name,
        } => {
            let period = ReportPeriod::or_current(month.as_deref(), year.as_deref())?;
            let exported = generator
                .generate(&period, file_name.as_deref())
                .await
                .with_context(|| format!("Report generation for {} failed", period))?;
            println!(
                "Relatório {} gerado: {} funcionários, {} páginas -> {}",
                period.display_name(),
                exported.employee_count,
                exported.page_count,
                exported.path.display()
            );
        }
        Commands::List {
            month,
            year,
            search,
        } => {
            let period = ReportPeriod::or_current(month.as_deref(), year.as_deref())?;
            let records = load_records(generator.source(), &period).await?;
            let term = search.unwrap_or_default();
            println!("{:<14} {:<32} {:<24} {}", "CPF", "Nome", "Cargo", "Lotação");
            for record in records.iter().filter(|r| r.matches(&term)) {
                println!(
                    "{:<14} {:<32} {:<24} {}",
                    record.cpf, record.name, record.role, record.department
                );
            }
        }
        Commands::Show { cpf, month, year } => {
            let period = ReportPeriod::or_current(month.as_deref(), year.as_deref())?;
            let records = load_records(generator.source(), &period).await?;
            let record = records
                .iter()
                .find(|r| r.cpf == cpf)
                .with_context(|| format!("CPF {} not found in {}", cpf, period))?;

            println!("{} - {} ({})", record.name, record.role, record.department);
            let (days, total) = record.intervals();
            println!("{:>4} {:>8} {:>8} {:>8}", "Dia", "Entrada", "Saída", "Horas");
            for day in &days {
                println!(
                    "{:>4} {:>8} {:>8} {:>8}",
                    day.day,
                    day.check_in,
                    day.check_out,
                    day.duration_label()
                );
            }
            println!("{:>4} {:>8} {:>8} {:>8}", "Total", "-", "-", total.label());
        }
        Commands::Serve => {
            let addr = format!("{}:{}", config.server_host, config.server_port);
            info!("Starting report server");
            server::serve(AppState { generator }, &addr).await?;
        }
    }

    Ok(())
}
