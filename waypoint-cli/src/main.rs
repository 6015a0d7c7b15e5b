use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use waypoint_core::{
    analyze_fit, complete_day, score_days, CoVisitGraph, DayScore, DestinationLookup, FitAdvisor,
    FitAnalysis, DEFAULT_RULES,
};
use waypoint_ingest::{load_trip, parse_visits_csv, Catalog, TripStore};

mod config;
mod replay;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "waypoint",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("WAYPOINT_BUILD_SHA"), ")"),
    about = "Itinerary fit scoring, next-place suggestions and drawer session tools"
)]
struct Cli {
    /// Print JSON (overrides config)
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recommend the best day of a trip for a destination
    Fit {
        /// Trip file (.json export or itinerary .csv)
        #[arg(long)]
        trip: PathBuf,

        /// Destination category (e.g. "restaurant", "art gallery")
        #[arg(long, conflicts_with = "destination")]
        category: Option<String>,

        /// Destination id, resolved through --catalog
        #[arg(long, requires = "catalog")]
        destination: Option<String>,

        /// Destination catalog CSV (id,name,category[,city])
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Show every day's score
        #[arg(long)]
        all_days: bool,
    },

    /// List the scoring rules in evaluation order
    Rules,

    /// Places most often visited right after a destination
    Next {
        /// Visit history CSV (user_id,destination_id,visited_at)
        #[arg(long)]
        visits: PathBuf,

        /// Current destination id
        #[arg(long)]
        from: String,

        /// Number of suggestions (default from config)
        #[arg(long)]
        limit: Option<usize>,

        /// Destination ids to leave out
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,

        /// Minimum co-visit count for an edge (default from config)
        #[arg(long)]
        min_weight: Option<u32>,
    },

    /// Chain the most common next places into a day, starting from a destination
    CompleteDay {
        /// Visit history CSV (user_id,destination_id,visited_at)
        #[arg(long)]
        visits: PathBuf,

        /// Starting destination id
        #[arg(long)]
        from: String,

        /// Destination catalog CSV, used for names and --category
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Preferred categories (repeatable)
        #[arg(long = "category", requires = "catalog")]
        categories: Vec<String>,

        /// Places in the day, start included (default from config)
        #[arg(long)]
        max_places: Option<usize>,

        /// Minimum co-visit count for an edge (default from config)
        #[arg(long)]
        min_weight: Option<u32>,
    },

    /// Drawer navigation tools
    Drawer {
        #[command(subcommand)]
        command: DrawerCommand,
    },

    /// Manage ~/.waypoint/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum DrawerCommand {
    /// Replay a recorded session (JSON list of steps) and print each state
    Replay {
        /// Session file
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_env("WAYPOINT_LOG")
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    init_logging(&cfg.log.filter);

    let json = cli.json || cfg.output.json;

    match cli.command {
        Command::Fit {
            trip,
            category,
            destination,
            catalog,
            all_days,
        } => {
            run_fit(trip, category, destination, catalog, all_days || cfg.output.all_days, json)?;
        }

        Command::Rules => {
            if json {
                let rows: Vec<_> = DEFAULT_RULES
                    .iter()
                    .map(|r| {
                        serde_json::json!({
                            "name": r.name,
                            "kind": r.kind,
                            "points": r.points,
                            "reason": r.reason,
                            "timeSlot": r.slot(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for r in DEFAULT_RULES {
                    println!(
                        "{:<18} {:<9} {:>+4}  {}{}",
                        r.name,
                        format!("{:?}", r.kind).to_lowercase(),
                        r.points,
                        r.reason.unwrap_or("-"),
                        r.slot().map(|s| format!(" @ {s}")).unwrap_or_default()
                    );
                }
            }
        }

        Command::Next {
            visits,
            from,
            limit,
            exclude,
            min_weight,
        } => {
            let graph = load_graph(&visits, min_weight.unwrap_or(cfg.sequence.min_weight))?;
            let exclude: HashSet<String> = exclude.into_iter().collect();
            let next = graph.suggest_next(&from, limit.unwrap_or(cfg.sequence.suggestions), &exclude);
            if json {
                println!("{}", serde_json::to_string_pretty(&next)?);
            } else if next.is_empty() {
                println!("No suggestions after {from}.");
            } else {
                for p in &next {
                    println!("{:<24} score={:.2}  {}", p.destination_id, p.score, p.reason);
                }
            }
        }

        Command::CompleteDay {
            visits,
            from,
            catalog,
            categories,
            max_places,
            min_weight,
        } => {
            let graph = load_graph(&visits, min_weight.unwrap_or(cfg.sequence.min_weight))?;
            let catalog = match catalog {
                Some(path) => Catalog::from_csv(&path)?,
                None => Catalog::new(),
            };
            let day = complete_day(
                &graph,
                &catalog,
                &from,
                &categories,
                max_places.unwrap_or(cfg.sequence.max_places),
            );
            print_day(&catalog, &from, &day, json)?;
        }

        Command::Drawer { command } => match command {
            DrawerCommand::Replay { file } => {
                let steps = replay::load_steps(&file)?;
                let mut drawer = replay::drawer_from_config(&cfg.drawer)?;
                let snaps = replay::replay(&mut drawer, &steps, Utc::now())
                    .with_context(|| format!("replaying {}", file.display()))?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&snaps)?);
                } else {
                    for s in &snaps {
                        println!(
                            "{:>3}. {:<16} open={:<5} mode={:<12} depth={} context={}{}",
                            s.step,
                            s.op,
                            s.is_open,
                            serde_json::to_string(&s.mode)?.trim_matches('"'),
                            s.depth,
                            serde_json::to_string(&s.context)?,
                            match s.applied {
                                Some(true) => " (applied)",
                                Some(false) => " (stale, dropped)",
                                None => "",
                            }
                        );
                    }
                }
            }
        },

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                println!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn run_fit(
    trip_path: PathBuf,
    category: Option<String>,
    destination: Option<String>,
    catalog: Option<PathBuf>,
    all_days: bool,
    json: bool,
) -> Result<()> {
    let trip = load_trip(&trip_path).with_context(|| format!("loading {}", trip_path.display()))?;
    tracing::info!(trip = %trip.id, days = trip.days.len(), "loaded trip");

    let (category, fit) = match (category, destination, catalog) {
        (Some(category), _, _) => {
            let fit = analyze_fit(&category, &trip.days);
            (category, fit)
        }
        (None, Some(destination), Some(catalog_path)) => {
            let catalog = Catalog::from_csv(&catalog_path)?;
            if catalog.get(&destination).is_none() {
                bail!("destination '{}' not found in {}", destination, catalog_path.display());
            }
            let trip_id = trip.id.clone();
            let mut store = TripStore::new();
            store.insert(trip.clone());
            let advisor = FitAdvisor::new(catalog, store);
            let fit = advisor.advise(&trip_id, &destination);
            // Blank catalog categories score generically, same as the advisor.
            let category = advisor.lookup().category_of(&destination).unwrap_or_default();
            (category, fit)
        }
        _ => bail!("pass --category <c> or --destination <id> --catalog <csv>"),
    };

    if json {
        let days = all_days.then(|| score_days(&category, &trip.days, DEFAULT_RULES));
        let report = fit_report(fit.as_ref(), days.as_deref());
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let Some(fit) = fit else {
        println!("No recommendation: {} has no days.", trip.name);
        return Ok(());
    };
    print_fit(&fit);

    if all_days {
        println!("\nAll days:");
        for d in score_days(&category, &trip.days, DEFAULT_RULES) {
            println!(
                "  day {:>2}  score={:>3}  {}",
                d.day_number,
                d.clamped(),
                d.matched.join(", ")
            );
        }
    }

    Ok(())
}

fn load_graph(visits: &Path, min_weight: u32) -> Result<CoVisitGraph> {
    let visits = parse_visits_csv(visits)?;
    Ok(CoVisitGraph::build(&visits, min_weight))
}

fn print_day(catalog: &Catalog, start: &str, day: &[String], json: bool) -> Result<()> {
    let stops: Vec<_> = day
        .iter()
        .map(|id| {
            let d = catalog.get(id);
            serde_json::json!({
                "destinationId": id,
                "name": d.map(|d| d.name.as_str()),
                "category": catalog.category_of(id),
            })
        })
        .collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&stops)?);
        return Ok(());
    }
    if day.is_empty() {
        println!("No visit history starts from {start}.");
        return Ok(());
    }
    for (i, id) in day.iter().enumerate() {
        match catalog.get(id) {
            Some(d) => println!("{:>2}. {} ({})", i + 1, d.name, id),
            None => println!("{:>2}. {}", i + 1, id),
        }
    }
    Ok(())
}

/// JSON shape of `waypoint fit`. A trip without days gives `"recommendation": null`.
fn fit_report(fit: Option<&FitAnalysis>, days: Option<&[DayScore]>) -> serde_json::Value {
    let Some(days) = days else {
        return match fit {
            Some(fit) => serde_json::json!(fit),
            None => serde_json::json!({ "recommendation": null }),
        };
    };
    let days: Vec<_> = days
        .iter()
        .map(|d| {
            serde_json::json!({
                "dayNumber": d.day_number,
                "score": d.clamped(),
                "reason": d.reason,
                "timeSlot": d.slot,
                "matchedRules": d.matched,
            })
        })
        .collect();
    serde_json::json!({ "best": fit, "days": days })
}

fn print_fit(fit: &FitAnalysis) {
    println!("Best day: {} ({:?}, score {})", fit.best_day, fit.category, fit.score);
    println!("Reason:   {}", fit.reason);
    if let Some(slot) = fit.time_slot {
        println!("Time:     {}", slot);
    }
    if !fit.matched_rules.is_empty() {
        println!("Rules:    {}", fit.matched_rules.join(", "));
    }
}
