//! NFL ranking CLI
//!
//! Common-opponent team rankings and training-feature export over a
//! scraped game-result feed.

use clap::{Parser, Subcommand};
use nflrank::{Config, Result};

#[derive(Parser)]
#[command(name = "nflrank")]
#[command(about = "NFL common-opponent rankings and win/loss features", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Game feed commands
    Data {
        #[command(subcommand)]
        action: DataCommands,
    },
    /// Rank all teams by common-opponent record
    Rank {
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Compare two teams against their shared opponents
    Compare {
        /// First team, as named in the feed
        team1: String,
        /// Second team
        team2: String,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Show a team's win/loss window, as fed to the classifier
    Window {
        /// Team, as named in the feed
        team: String,
        /// Count games strictly before this date (YYYY-MM-DD); defaults
        /// to after the last game in the feed
        #[arg(long)]
        as_of: Option<String>,
        /// Override the configured lookback window
        #[arg(long)]
        size: Option<usize>,
    },
    /// Build and export the training feature matrix
    Dataset {
        /// Output CSV path
        #[arg(long, default_value = "nfl_features.csv")]
        output: String,
        /// Override the configured lookback window
        #[arg(long)]
        lookback: Option<usize>,
    },
    /// Initialize a new project with default config
    Init,
}

#[derive(Subcommand)]
enum DataCommands {
    /// Show feed status
    Status,
    /// List every team in the feed
    Teams,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use table or json.", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    let result = match cli.command {
        Commands::Data { action } => match action {
            DataCommands::Status => commands::data_status(&config),
            DataCommands::Teams => commands::data_teams(&config),
        },
        Commands::Rank { format } => commands::rank(&config, format),
        Commands::Compare {
            team1,
            team2,
            format,
        } => commands::compare(&config, &team1, &team2, format),
        Commands::Window { team, as_of, size } => {
            commands::window(&config, &team, as_of.as_deref(), size)
        }
        Commands::Dataset { output, lookback } => commands::dataset(&config, &output, lookback),
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use nflrank::data::GameStore;
    use nflrank::features::{DatasetConfig, TrainingSet};
    use nflrank::rankings;
    use nflrank::{Game, NflError, TeamName};

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        std::fs::create_dir_all("nfl_data")?;
        println!("Created nfl_data/ directory");

        println!("\nNext steps:");
        println!("  1. Edit {} to point at your game feed CSV", config_path);
        println!("  2. Run 'nflrank data status' to check the feed");
        println!("  3. Run 'nflrank rank' for common-opponent rankings");
        println!("  4. Run 'nflrank dataset' to export training features");

        Ok(())
    }

    pub fn data_status(config: &Config) -> Result<()> {
        let store = GameStore::load(&config.data.games_path)?;
        let stats = store.stats();

        println!("Feed Status");
        println!("───────────────────────────────");
        println!("  Path:   {}", config.data.games_path);
        println!("  Games:  {}", stats.game_count);
        println!("  Teams:  {}", stats.team_count);
        if let (Some(earliest), Some(latest)) = (stats.earliest_game, stats.latest_game) {
            println!("  Range:  {} to {}", earliest, latest);
        }

        Ok(())
    }

    pub fn data_teams(config: &Config) -> Result<()> {
        let store = GameStore::load(&config.data.games_path)?;
        for team in store.teams() {
            println!("{}", team);
        }
        Ok(())
    }

    pub fn rank(config: &Config, format: OutputFormat) -> Result<()> {
        let store = GameStore::load(&config.data.games_path)?;
        let standings = rankings::rank_all(&store);

        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&standings)?);
            }
            OutputFormat::Table => {
                println!("\nTeam Rankings (common-opponent record)");
                println!("========================================================");
                for (rank, s) in standings.iter().enumerate() {
                    println!(
                        "{:>2}. {:<30} Score: {:>3} points in {:>2} comparisons (Avg: {:.2})",
                        rank + 1,
                        s.team,
                        s.points,
                        s.comparisons,
                        s.average
                    );
                }
            }
        }

        Ok(())
    }

    pub fn compare(config: &Config, team1: &str, team2: &str, format: OutputFormat) -> Result<()> {
        let store = GameStore::load(&config.data.games_path)?;

        let team1 = TeamName::from(team1);
        let team2 = TeamName::from(team2);
        for team in [&team1, &team2] {
            if !store.contains_team(team) {
                return Err(NflError::UnknownTeam(team.to_string()));
            }
        }
        if team1 == team2 {
            return Err(NflError::SelfComparison(team1.to_string()));
        }

        let result = rankings::compare(&store, &team1, &team2);

        if let OutputFormat::Json = format {
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        println!("\nFound {} common opponents:", result.shared_opponent_count());
        for verdict in &result.shared {
            println!("- {}", verdict.opponent);
        }

        for verdict in &result.shared {
            println!("\nGames against {}:", verdict.opponent);
            print_series(&store, &team1, &verdict.opponent);
            print_series(&store, &team2, &verdict.opponent);

            match (verdict.team1_beat, verdict.team2_beat) {
                (true, false) => println!("Point to {} (beat a team that {} did not)", team1, team2),
                (false, true) => println!("Point to {} (beat a team that {} did not)", team2, team1),
                _ => println!("No points awarded (similar results)"),
            }
        }

        println!("\nFinal Score:");
        println!("{}: {} points", team1, result.points1);
        println!("{}: {} points", team2, result.points2);

        println!("\nPrediction:");
        match result.predicted_winner() {
            Some(winner) => {
                let margin = result.points1.abs_diff(result.points2);
                println!("{} predicted to win (+{} points)", winner, margin);
            }
            None => println!("Even matchup"),
        }

        Ok(())
    }

    /// Print one team's dated results against an opponent
    fn print_series(store: &GameStore, team: &TeamName, opponent: &TeamName) {
        println!("\n{} vs {}:", team, opponent);
        for game in store.games_between(team, opponent) {
            println!("{}", series_line(game, team));
        }
    }

    fn series_line(game: &Game, team: &TeamName) -> String {
        if game.won_by(team) == Some(true) {
            format!(
                "{}: {} WON {}-{}",
                game.date, team, game.winner_pts, game.loser_pts
            )
        } else {
            format!(
                "{}: {} LOST {}-{}",
                game.date, team, game.loser_pts, game.winner_pts
            )
        }
    }

    pub fn window(
        config: &Config,
        team: &str,
        as_of: Option<&str>,
        size: Option<usize>,
    ) -> Result<()> {
        use chrono::NaiveDate;
        use nflrank::features::require_history_window;

        let store = GameStore::load(&config.data.games_path)?;
        let team = TeamName::from(team);
        if !store.contains_team(&team) {
            return Err(NflError::UnknownTeam(team.to_string()));
        }

        let as_of = match as_of {
            Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|e| NflError::Parse(format!("bad --as-of date '{}': {}", s, e)))?,
            None => NaiveDate::MAX,
        };
        let size = size.unwrap_or(config.features.lookback);

        let window = require_history_window(&store, &team, as_of, size)?;
        let record: Vec<&str> = window
            .iter()
            .map(|v| if *v == 1.0 { "W" } else { "L" })
            .collect();

        println!("Last {} games for {} (oldest first):", size, team);
        println!("  Record:   {}", record.join(" "));
        println!(
            "  Features: [{}]",
            window
                .iter()
                .map(|v| format!("{}", v))
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(())
    }

    pub fn dataset(config: &Config, output: &str, lookback: Option<usize>) -> Result<()> {
        let store = GameStore::load(&config.data.games_path)?;

        let dataset_config = DatasetConfig {
            lookback: lookback.unwrap_or(config.features.lookback),
        };

        let set = TrainingSet::build(&store, dataset_config)?;

        println!("Feature preparation complete:");
        println!("  Samples:    {}", set.len());
        println!("  Skipped:    {}", set.skipped);
        println!("  Dimensions: {}", set.feature_dim());

        set.export(output)?;
        println!("\nWrote {}", output);

        Ok(())
    }
}
