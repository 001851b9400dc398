use clap::Parser;
use dirhtml::config;
use dirhtml::index::{FailurePolicy, Indexer};
use dirhtml::output;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "dirhtml")]
#[command(about = "Write a static index.html listing for each directory")]
#[command(long_about = "\
Write a static index.html listing for each directory

Each directory gets a table of its entries (name, last modified, size) with a
link to the parent directory. Entries are sorted by name, byte-wise, so an
unchanged directory always produces the same page. If the directory contains
index.txt, its text is shown below the table.

  pub/
  ├── index.html        # written (replaced if present, never listed)
  ├── index.txt         # optional preview text
  ├── notes.md
  └── photos/           # listed, not descended into

Directories are processed in the order given. By default the run stops at the
first directory that fails; pages already written are kept.

Run 'dirhtml --gen-config' to print a documented config file.")]
#[command(version)]
struct Cli {
    /// Directories to index
    #[arg(value_name = "DIR")]
    dirs: Vec<PathBuf>,

    /// Index every directory even if some fail, then report all failures
    #[arg(long)]
    keep_going: bool,

    /// Read settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print a stock config file with all options documented
    #[arg(long, conflicts_with_all = ["dirs", "config", "keep_going"])]
    gen_config: bool,

    /// Don't print a line per indexed directory
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = config::load_config(cli.config.as_deref())?;
    let indexer = Indexer::new(&config)?;
    let policy = if cli.keep_going {
        FailurePolicy::KeepGoing
    } else {
        FailurePolicy::FailFast
    };

    let result = indexer.index_all(cli.dirs.as_slice(), policy, |report| {
        if !cli.quiet {
            output::print_index_report(report);
        }
    });

    if policy == FailurePolicy::KeepGoing && !cli.quiet {
        match &result {
            Ok(reports) => output::print_summary(reports.len(), cli.dirs.len()),
            Err(e) => output::print_summary(e.succeeded, e.attempted),
        }
    }

    result?;
    Ok(())
}
