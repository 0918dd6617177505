//! filmguess - terminal front-end for the film trivia quiz

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use filmguess::{Catalog, JsonFileStore, MemoryStore, Outcome, ProgressStore, Quiz, QuizConfig, QuizError, TitleMatcher};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON config file (threshold, storage_key, catalog_path, progress_path)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play the quiz: type `<number> <title>` to guess, `list` to reprint, `quit` to leave
    Play {
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Where found movies are kept; progress is not saved without it
        #[arg(long)]
        progress: Option<PathBuf>,
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Check a single guess against one or more titles (exit code 1 on a miss)
    Check {
        guess: String,
        #[arg(required = true)]
        targets: Vec<String>,
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Print the catalog as JSON
    Export {
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Show how many movies have been found
    Progress {
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(long)]
        progress: Option<PathBuf>,
        /// Forget every found movie
        #[arg(long)]
        reset: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => QuizConfig::load(path).context("failed to load configuration")?,
        None => QuizConfig::default(),
    };

    match cli.command {
        Commands::Play {
            catalog,
            progress,
            threshold,
        } => {
            if let Some(t) = threshold {
                config.threshold = t;
            }
            let catalog = load_catalog(catalog, &config)?;
            let store = open_store(progress, &config);
            let mut quiz = Quiz::new(catalog, store, &config)?;
            play(&mut quiz)
        }
        Commands::Check {
            guess,
            targets,
            threshold,
        } => {
            let matcher = TitleMatcher::new(threshold.unwrap_or(config.threshold));
            if let Some(best) = matcher.best_match(&guess, &targets) {
                println!("best: {:?} (score {:.3})", best.target, best.score);
            }
            if matcher.is_match(&guess, &targets) {
                println!("similar");
                Ok(())
            } else {
                println!("not similar");
                std::process::exit(1);
            }
        }
        Commands::Export { catalog } => {
            let catalog = load_catalog(catalog, &config)?;
            println!("{}", catalog.to_json()?);
            Ok(())
        }
        Commands::Progress {
            catalog,
            progress,
            reset,
        } => {
            let catalog = load_catalog(catalog, &config)?;
            let store = open_store(progress, &config);
            let mut quiz = Quiz::new(catalog, store, &config)?;
            if reset {
                quiz.reset()?;
            }
            let (found, total) = quiz.progress();
            println!("{found}/{total} found");
            Ok(())
        }
    }
}

fn setup_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout belongs to the game; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_catalog(arg: Option<PathBuf>, config: &QuizConfig) -> Result<Catalog> {
    let path = arg
        .or_else(|| config.catalog_path.clone())
        .context("no catalog given (use --catalog or catalog_path in the config)")?;
    Catalog::load(&path).with_context(|| format!("failed to load catalog {}", path.display()))
}

fn open_store(arg: Option<PathBuf>, config: &QuizConfig) -> Arc<dyn ProgressStore> {
    match arg.or_else(|| config.progress_path.clone()) {
        Some(path) => Arc::new(JsonFileStore::new(path)),
        None => {
            tracing::warn!("no progress file given, progress will not be kept");
            Arc::new(MemoryStore::new())
        }
    }
}

fn print_board<S: ProgressStore>(quiz: &Quiz<S>) {
    for movie in quiz.catalog() {
        if quiz.is_found(movie.number) {
            println!("{:>3}. [x] {}", movie.number, movie.display());
        } else {
            println!("{:>3}. [ ] ??? ({})", movie.number, movie.year);
        }
    }
    let (found, total) = quiz.progress();
    println!("{found}/{total} found");
}

fn play<S: ProgressStore>(quiz: &mut Quiz<S>) -> Result<()> {
    print_board(quiz);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let line = line.trim();

        match line {
            "" => continue,
            "quit" | "exit" => break,
            "list" => {
                print_board(quiz);
                continue;
            }
            _ => {}
        }

        let Some((number, guess)) = line
            .split_once(char::is_whitespace)
            .and_then(|(n, g)| Some((n.parse::<u32>().ok()?, g)))
        else {
            println!("Usage: <number> <title>");
            continue;
        };

        match quiz.submit(number, guess) {
            Ok(outcome) => {
                println!("{}", outcome.message());
                if outcome == Outcome::Correct && quiz.is_complete() {
                    println!("All {} movies found!", quiz.catalog().len());
                    break;
                }
            }
            Err(QuizError::UnknownMovie(n)) => println!("No movie numbered {n}."),
            Err(e) => return Err(e).context("failed to record progress"),
        }
    }

    Ok(())
}
