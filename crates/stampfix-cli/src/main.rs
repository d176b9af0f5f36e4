use std::path::PathBuf;

use clap::Parser;

use stampfix_core::{Config, ProcessOptions};

#[derive(Parser)]
#[command(name = "stampfix", version, about = "Fix media file mtimes from filename and folder date evidence")]
struct Cli {
    /// Directories (or single files) to scan
    #[arg(required = true)]
    roots: Vec<PathBuf>,

    /// Timezone periods config (JSON)
    #[arg(short, long)]
    config: PathBuf,

    /// Report corrections without touching any file
    #[arg(long)]
    dry_run: bool,

    /// Print every rule decision
    #[arg(long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let t_total = std::time::Instant::now();

    let cfg = Config::load(&cli.config)?;
    let options = ProcessOptions {
        roots: cli.roots,
        dry_run: cli.dry_run,
        verbose: cli.verbose,
    };

    let result = stampfix_core::process(&options, &cfg)?;

    for warning in &result.warnings {
        eprintln!("Warning: {}", warning);
    }
    eprintln!(
        "Done! {} files scanned, {} corrected{}, {} in sync, {} without date evidence, {} skipped ({:.2}s)",
        result.files_scanned,
        result.corrected,
        if cli.dry_run { " (dry run)" } else { "" },
        result.in_sync,
        result.unmatched,
        result.skipped,
        t_total.elapsed().as_secs_f64()
    );

    Ok(())
}
