use clap::Parser;
use crossterm::style::Stylize;
use shopr_core::board::BoardFile;
use shopr_core::config::{Prefs, DEFAULT_CONFIG_PATH};
use shopr_core::core::engine::RunSummary;
use shopr_core::service::ChecklistService;
use shopr_core::{ShoprEngine, ShoprResult};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Train, order and populate shopping lists on a board snapshot.
#[derive(Debug, Parser)]
#[command(name = "shopr", version, about)]
struct Args {
    /// Path to the preferences file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Print the board's lists and their ids, then exit
    #[arg(long)]
    list_ids: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> ShoprResult<()> {
    let args = Args::parse();
    let prefs = Prefs::load(&args.config)?;
    let mut board = BoardFile::open(&prefs.board_file)?;

    if args.list_ids {
        println!("Available lists on your board:");
        println!("{}", serde_json::to_string_pretty(&board.board_lists()?)?);
        return Ok(());
    }

    let mut engine = ShoprEngine::from_file_or_new(&prefs.scores_path, prefs.k_factor)?;
    let summary = engine.run(&mut board, &prefs)?;
    board.save()?;
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("{}", "shopr run complete".bold());
    println!("  {} {} checklists", "trained".green(), summary.trained_checklists);
    println!(
        "  {} {} items on {} cards ({} {})",
        "ordered".green(),
        summary.moved_items,
        summary.ordered_cards,
        summary.tagged_items,
        "unsorted".yellow()
    );
    println!(
        "  {} {} cards: {} added, {} updated, {} recipes returned",
        "populated".green(),
        summary.populated_cards,
        summary.created_items,
        summary.renamed_items,
        summary.recycled_recipes
    );
}
