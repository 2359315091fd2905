use calorie_core::*;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "caltrack")]
#[command(about = "Daily calorie balance tracking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the daily balance (default)
    Status,

    /// Log a meal
    AddMeal {
        name: String,

        #[arg(allow_negative_numbers = true)]
        calories: i64,
    },

    /// Log a workout
    AddWorkout {
        name: String,

        #[arg(allow_negative_numbers = true)]
        calories: i64,
    },

    /// Remove a logged meal by id
    RemoveMeal { id: Uuid },

    /// Remove a logged workout by id
    RemoveWorkout { id: Uuid },

    /// Set the daily calorie limit
    Limit {
        #[arg(allow_negative_numbers = true)]
        calories: i64,
    },

    /// List logged meals and workouts
    List {
        /// Only show items whose name contains this text
        #[arg(long)]
        filter: Option<String>,
    },

    /// Wipe the tracked day
    Reset {
        /// Also clear the persisted daily limit
        #[arg(long)]
        clear_limit: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    calorie_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    match cli.command {
        Some(Commands::AddMeal { name, calories }) => {
            cmd_add_meal(&data_dir, &config, &name, calories)
        }
        Some(Commands::AddWorkout { name, calories }) => {
            cmd_add_workout(&data_dir, &config, &name, calories)
        }
        Some(Commands::RemoveMeal { id }) => cmd_remove_meal(&data_dir, &config, id),
        Some(Commands::RemoveWorkout { id }) => cmd_remove_workout(&data_dir, &config, id),
        Some(Commands::Limit { calories }) => cmd_limit(&data_dir, &config, calories),
        Some(Commands::List { filter }) => cmd_list(&data_dir, &config, filter),
        Some(Commands::Reset { clear_limit }) => cmd_reset(&data_dir, &config, clear_limit),
        Some(Commands::Status) | None => cmd_status(&data_dir, &config),
    }
}

/// Wire store, gateway, tracker and terminal view together
fn build_tracker(data_dir: &Path, config: &Config) -> Result<CalorieTracker<FileStore>> {
    let store = FileStore::new(data_dir);
    let gateway = StorageGateway::with_default_limit(store, config.tracker.default_limit);
    let tracker = CalorieTracker::new(gateway, Box::new(TerminalView))?
        .with_reset_clears_limit(config.tracker.reset_clears_limit);
    Ok(tracker)
}

fn cmd_status(data_dir: &Path, config: &Config) -> Result<()> {
    let mut tracker = build_tracker(data_dir, config)?;
    tracker.render();
    Ok(())
}

fn cmd_add_meal(data_dir: &Path, config: &Config, name: &str, calories: i64) -> Result<()> {
    let name = validated_name(name, "meal")?;
    let mut tracker = build_tracker(data_dir, config)?;
    tracker.add_meal(Meal::new(name, calories))?;
    println!("✓ Meal logged");
    Ok(())
}

fn cmd_add_workout(data_dir: &Path, config: &Config, name: &str, calories: i64) -> Result<()> {
    let name = validated_name(name, "workout")?;
    let mut tracker = build_tracker(data_dir, config)?;
    tracker.add_workout(Workout::new(name, calories))?;
    println!("✓ Workout logged");
    Ok(())
}

fn cmd_remove_meal(data_dir: &Path, config: &Config, id: Uuid) -> Result<()> {
    let mut tracker = build_tracker(data_dir, config)?;
    tracker.remove_meal(id)?;
    Ok(())
}

fn cmd_remove_workout(data_dir: &Path, config: &Config, id: Uuid) -> Result<()> {
    let mut tracker = build_tracker(data_dir, config)?;
    tracker.remove_workout(id)?;
    Ok(())
}

fn cmd_limit(data_dir: &Path, config: &Config, calories: i64) -> Result<()> {
    let mut tracker = build_tracker(data_dir, config)?;
    tracker.set_daily_limit(calories)?;
    println!("✓ Daily limit updated");
    Ok(())
}

fn cmd_list(data_dir: &Path, config: &Config, filter: Option<String>) -> Result<()> {
    let mut tracker = build_tracker(data_dir, config)?;

    match filter {
        Some(text) => {
            for meal in tracker.filter_meals(&text) {
                print_meal_line(meal);
            }
            for workout in tracker.filter_workouts(&text) {
                print_workout_line(workout);
            }
        }
        None => {
            if tracker.meals().is_empty() && tracker.workouts().is_empty() {
                println!("Nothing logged yet.");
                return Ok(());
            }
            tracker.load_items();
        }
    }

    Ok(())
}

fn cmd_reset(data_dir: &Path, config: &Config, clear_limit: bool) -> Result<()> {
    let mut tracker = build_tracker(data_dir, config)?;
    if clear_limit {
        tracker = tracker.with_reset_clears_limit(true);
    }
    tracker.reset()?;
    println!("✓ Day reset");
    Ok(())
}

/// Reject blank names before anything is mutated
fn validated_name(raw: &str, kind: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(Error::Input(format!("{} name must not be empty", kind)));
    }
    Ok(name.to_string())
}

/// Renders tracker state to the terminal
struct TerminalView;

impl TrackerView for TerminalView {
    fn refresh(&mut self, summary: &Summary) {
        print_summary(summary);
    }

    fn meal_added(&mut self, meal: &Meal) {
        print_meal_line(meal);
    }

    fn workout_added(&mut self, workout: &Workout) {
        print_workout_line(workout);
    }
}

fn print_summary(summary: &Summary) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  DAILY CALORIE BALANCE");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Limit      {:>6} kcal", summary.daily_limit);
    println!("  Consumed   {:>6} kcal", summary.consumed);
    println!("  Burned     {:>6} kcal", summary.burned);
    println!("  Net total  {:>6} kcal", summary.total);

    if summary.over_limit() {
        println!("  Remaining  {:>6} kcal  (over limit)", summary.remaining);
    } else {
        println!("  Remaining  {:>6} kcal", summary.remaining);
    }

    println!("  Progress   {:>5.1}%", summary.progress_percentage);
    println!();
}

fn print_meal_line(meal: &Meal) {
    println!(
        "  + meal     {:<24} {:>6} kcal  [{}]",
        meal.name, meal.calories, meal.id
    );
}

fn print_workout_line(workout: &Workout) {
    println!(
        "  - workout  {:<24} {:>6} kcal  [{}]",
        workout.name, workout.calories, workout.id
    );
}
