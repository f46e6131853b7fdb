mod app;
mod input;
mod ui;

use app::App;
use ca_tracker::catalog::{load_catalog, Catalog, Tier};
use ca_tracker::config::Settings;
use ca_tracker::constants::INPUT_POLL_MS;
use ca_tracker::dashboard::ProfileSummary;
use ca_tracker::lookup::{CompletionSource, LookupWorker, PlayerCompletion};
use ca_tracker::planner::{build_plan, parse_goal_input, translate_goal, GoalMode, PrioritySpec};
use ca_tracker::team::{build_team_report, fetch_team, total_points, TeamView};
use ca_tracker::{build_info, logging, AchievementId, AppStore};
use chrono::Utc;
use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use input::InputResult;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::collections::{BTreeSet, HashSet};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "ca-tracker")]
#[command(about = "Track Old School RuneScape combat achievements and plan the next points goal")]
#[command(disable_version_flag = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Show version information
    #[arg(long, short = 'v')]
    version: bool,

    /// Directory for pins, planner state and the log
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Combat achievements JSON file
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest achievements that reach a points goal
    Plan {
        /// Points to earn, or the target total with --total
        points: String,

        /// Treat POINTS as a target total instead of points to earn
        #[arg(long)]
        total: bool,

        /// Skip what this player has already completed
        #[arg(long)]
        player: Option<String>,

        /// Prefer achievements of this type (repeatable)
        #[arg(long = "type")]
        types: Vec<String>,

        /// Prefer achievements of this tier (repeatable)
        #[arg(long = "tier", value_parser = parse_tier)]
        tiers: Vec<Tier>,

        /// Never suggest this achievement id (repeatable)
        #[arg(long)]
        exclude: Vec<AchievementId>,
    },

    /// Show a player's completion
    Lookup { player: String },

    /// Compare up to four players
    Team {
        #[arg(required = true, num_args = 1..=4)]
        players: Vec<String>,

        /// Include achievements only some of the team completed
        #[arg(long)]
        partial: bool,
    },

    /// Per-tier progress, optionally for a player
    Stats {
        #[arg(long)]
        player: Option<String>,
    },
}

fn parse_tier(s: &str) -> Result<Tier, String> {
    Tier::parse(s).ok_or_else(|| format!("unknown tier '{}'", s))
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("{}", build_info::version_line());
        return Ok(());
    }

    let mut settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => fail(&e.to_string()),
    };
    if let Some(dir) = cli.data_dir {
        settings.override_data_dir(dir);
    }
    if let Some(path) = cli.catalog {
        settings.catalog_path = path;
    }

    match cli.command {
        None => run_tui(&settings),
        Some(command) => {
            logging::init_stderr();
            run_command(command, &settings);
            Ok(())
        }
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

// --- Terminal UI ---

fn load_store(settings: &Settings) -> AppStore {
    let data_dir = settings.data();
    match load_catalog(&settings.catalog_path) {
        Ok(catalog) => AppStore::with_data_dir(catalog, data_dir),
        Err(e) => {
            error!(path = %settings.catalog_path.display(), error = %e, "catalog failed to load");
            let mut store = AppStore::with_data_dir(Catalog::new(), data_dir);
            store.set_catalog_error(e.to_string());
            store
        }
    }
}

fn run_tui(settings: &Settings) -> io::Result<()> {
    logging::init_file(&settings.data())?;
    info!(version = %build_info::version_line(), "starting dashboard");

    let client: Arc<dyn CompletionSource> = Arc::new(settings.lookup_client());
    let mut app = App::new(load_store(settings), LookupWorker::new(client));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("dashboard closed");
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        while let Some(reply) = app.worker.poll() {
            app.handle_reply(reply);
        }
        app.expire_status(Utc::now());

        terminal.draw(|frame| ui::draw_ui(frame, app))?;

        if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                if let InputResult::Quit = input::handle_key(app, key_event) {
                    return Ok(());
                }
            }
        }
    }
}

// --- One-shot commands ---

fn catalog_or_exit(settings: &Settings) -> Catalog {
    load_catalog(&settings.catalog_path).unwrap_or_else(|e| {
        fail(&format!(
            "could not load {}: {}",
            settings.catalog_path.display(),
            e
        ))
    })
}

fn completion_or_exit(settings: &Settings, player: &str) -> PlayerCompletion {
    settings
        .lookup_client()
        .fetch(player)
        .unwrap_or_else(|e| fail(&e.to_string()))
}

fn run_command(command: Commands, settings: &Settings) {
    let catalog = catalog_or_exit(settings);
    match command {
        Commands::Plan {
            points,
            total,
            player,
            types,
            tiers,
            exclude,
        } => {
            let raw = parse_goal_input(&points).unwrap_or_else(|e| fail(&e.to_string()));
            let completed: HashSet<AchievementId> = match &player {
                Some(name) => completion_or_exit(settings, name).completed_set(),
                None => HashSet::new(),
            };
            let mode = if total { GoalMode::Total } else { GoalMode::Additional };
            let current = catalog.points_for(|id| completed.contains(&id));
            let target = translate_goal(raw, mode, current);
            let priority = PrioritySpec::none().with_types(types).with_tiers(tiers);
            let excluded: BTreeSet<AchievementId> = exclude.into_iter().collect();

            let plan = build_plan(
                &catalog,
                |id| completed.contains(&id),
                |tier| tier.points(),
                target,
                &excluded,
                &priority,
            );

            println!("Current points: {}  Target: +{}", current, target);
            for record in &plan.suggested {
                println!(
                    "{:>5}  {:<12} {:<28} {} ({} pts)",
                    record.id,
                    record.tier.name(),
                    record.monster,
                    record.name,
                    record.points()
                );
            }
            if plan.reached() {
                println!("{} achievements, {} points", plan.len(), plan.accumulated);
            } else {
                println!(
                    "Only {} of {} points available ({} short)",
                    plan.accumulated,
                    plan.target,
                    plan.shortfall()
                );
            }
        }
        Commands::Lookup { player } => {
            let completion = completion_or_exit(settings, &player);
            let completed = completion.completed_set();
            println!(
                "{}: {} / {} achievements, {} / {} points",
                completion.player,
                completed.len(),
                catalog.len(),
                catalog.points_for(|id| completed.contains(&id)),
                catalog.total_points()
            );
        }
        Commands::Team { players, partial } => {
            let client = settings.lookup_client();
            let fetched = fetch_team(&client, &players).unwrap_or_else(|e| fail(&e.to_string()));
            let report = build_team_report(&catalog, fetched);
            let view = TeamView {
                show_partial: partial,
                ..TeamView::default()
            };
            let entries = view.displayed(&report);
            for entry in &entries {
                println!(
                    "{:<12} {:<28} {} ({}/{})",
                    entry.record.tier.name(),
                    entry.record.monster,
                    entry.record.name,
                    entry.completed_by,
                    entry.total_players
                );
            }
            println!(
                "{} achievements, {} points",
                entries.len(),
                total_points(&entries)
            );
        }
        Commands::Stats { player } => {
            let completed: HashSet<AchievementId> = match &player {
                Some(name) => completion_or_exit(settings, name).completed_set(),
                None => HashSet::new(),
            };
            let summary =
                ProfileSummary::build(&catalog, player.as_deref(), |id| completed.contains(&id));
            if let Some(name) = &summary.player {
                println!("{}", name);
            }
            for stats in &summary.tiers {
                println!(
                    "{:<12} {:>4} / {:<4} {:>3}%",
                    stats.tier.name(),
                    stats.completed,
                    stats.total,
                    stats.percent()
                );
            }
            println!(
                "Points: {} / {}  Completed: {}%",
                summary.current_points,
                summary.total_points,
                summary.completion_percent()
            );
        }
    }
}
