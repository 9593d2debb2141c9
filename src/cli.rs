// src/cli.rs
//! Command-line surface: `scrape`, `classify`, `dedup-db`, `stats`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::AppOptions;
use crate::core::HttpFetcher;
use crate::error::Result;
use crate::eval;
use crate::progress::Progress;
use crate::report;
use crate::review::Recommendation;
use crate::scrape;
use crate::store::{ReviewStore, SqliteStore};

#[derive(Debug, Parser)]
#[command(name = "review_scrape", version, about = "Scrape store reviews and benchmark text classifiers on them")]
pub struct Cli {
    /// TOML options file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database (overrides the config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Walk app pages and store their reviews
    Scrape {
        /// Drop and recreate the reviews table first
        #[arg(long)]
        new: bool,
        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<usize>,
    },
    /// Evaluate the classifiers over growing training sizes
    Classify {
        /// Also write the accuracies as CSV
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Delete exact duplicate rows from the database
    DedupDb,
    /// Print row counts per label
    Stats,
}

/// Prints status lines to stdout.
#[derive(Default)]
struct ConsoleProgress {
    total: Option<usize>,
    done: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: Option<usize>) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self, item_number: u32, inserted: usize) {
        self.done += 1;
        if inserted > 0 {
            match self.total {
                Some(t) => println!("[{}/{t}] stored {inserted} from {item_number}", self.done),
                None => println!("[{}] stored {inserted} from {item_number}", self.done),
            }
        }
    }

    fn finish(&mut self) {
        println!("Done.");
    }
}

fn load_options(cli: &Cli) -> Result<AppOptions> {
    let mut opts = match &cli.config {
        Some(path) => AppOptions::load(path)?,
        None => AppOptions::default(),
    };
    if let Some(db) = &cli.db {
        opts.store.db_path = db.clone();
    }
    Ok(opts)
}

pub fn run(cli: Cli) -> Result<()> {
    let mut opts = load_options(&cli)?;
    let mut store = SqliteStore::open(&opts.store.db_path, opts.store.busy_timeout())?;
    info!("cli: database {}", opts.store.db_path.display());

    match cli.command {
        Command::Scrape { new, max_pages } => {
            if new {
                store.drop_table()?;
            }
            store.create_table()?;
            if max_pages.is_some() {
                opts.scrape.max_pages = max_pages;
            }

            let mut fetcher = HttpFetcher::new(opts.scrape.http_timeout())?;
            let mut progress = ConsoleProgress::default();
            let summary = scrape::run(&mut store, &mut fetcher, &opts.scrape, Some(&mut progress))?;
            println!(
                "{} pages, {} with reviews, {} stored, {} duplicates dropped",
                summary.pages, summary.pages_with_reviews, summary.inserted, summary.duplicates
            );
        }
        Command::Classify { report: out } => {
            store.create_table()?;
            let mut progress = ConsoleProgress::default();
            let rows = eval::evaluate(&store, &opts.eval, Some(&mut progress))?;
            if let Some(path) = out {
                report::write_eval_report(&path, &rows)?;
                println!("Wrote {}", path.display());
            }
        }
        Command::DedupDb => {
            store.create_table()?;
            let removed = store.remove_exact_duplicates()?;
            println!("Removed {removed} duplicate rows");
        }
        Command::Stats => {
            store.create_table()?;
            for label in [Recommendation::Recommended, Recommendation::NotRecommended, Recommendation::Undetected] {
                println!("{label}: {}", store.count_by_label(label)?);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scrape_flags() {
        let cli = Cli::try_parse_from(["review_scrape", "--db", "x.db", "scrape", "--new", "--max-pages", "3"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("x.db")));
        match cli.command {
            Command::Scrape { new, max_pages } => {
                assert!(new);
                assert_eq!(max_pages, Some(3));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from(["review_scrape", "stats", "--db", "y.db"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("y.db")));
        assert!(matches!(cli.command, Command::Stats));
    }

    #[test]
    fn db_flag_overrides_config() {
        let cli = Cli::try_parse_from(["review_scrape", "--db", "z.db", "dedup-db"]).unwrap();
        let opts = load_options(&cli).unwrap();
        assert_eq!(opts.store.db_path, PathBuf::from("z.db"));
    }
}
