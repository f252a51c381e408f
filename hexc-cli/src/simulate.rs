//! Simulate command - bot-vs-bot games played in-process
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_games(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use hexc_core::render::render_with_caption;
use hexc_core::{BasicBot, Color, Game, WinReason, TURN_ORDER};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Give up on a game after this many accepted submissions
    #[arg(long, default_value = "500")]
    pub max_turns: u32,

    /// Random seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the board after every move
    #[arg(long)]
    pub verbose: bool,
}

/// How a simulated game stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
enum GameEnd {
    Won { winner: Color, reason: WinReason },
    /// The side to move had no legal move
    Stalled { turn: Color },
    TurnLimit,
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
struct GameRecord {
    game_number: usize,
    end: GameEnd,
    turns: u32,
    final_message: String,
}

/// Win tally for one color
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
struct ColorWins {
    portal: usize,
    checkmate: usize,
}

/// Aggregated simulation results
#[derive(Clone, Debug, Serialize)]
struct SimulationResults {
    total_games: usize,
    blue: ColorWins,
    white: ColorWins,
    red: ColorWins,
    unfinished: usize,
    avg_turns: f32,
    games: Vec<GameRecord>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
///
/// This function reads like a table of contents:
/// 1. Play every game
/// 2. Report results
pub fn run(args: SimulateArgs) -> Result<()> {
    tracing::info!(
        "Simulating {} games (max {} turns, seed {:?})",
        args.games,
        args.max_turns,
        args.seed
    );

    let results = play_games(&args)?;

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games, one seeded bot per game
fn play_games(args: &SimulateArgs) -> Result<SimulationResults> {
    let mut rng = create_rng(args.seed);
    let progress = create_progress_bar(args)?;
    let mut games = Vec::with_capacity(args.games);

    for game_number in 1..=args.games {
        let mut bot = BasicBot::with_seed(rng.gen());
        let record = play_single_game(game_number, &mut bot, args)?;

        tracing::debug!(
            "Game {}: {:?} after {} turns",
            record.game_number,
            record.end,
            record.turns
        );

        games.push(record);
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(compute_statistics(games))
}

/// Report simulation results
fn report_results(results: &SimulationResults, args: &SimulateArgs) -> Result<()> {
    if args.json {
        let json = serde_json::to_string_pretty(results).context("failed to encode results")?;
        println!("{json}");
    } else {
        print_text_results(results);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Drive one game until it ends, stalls or hits the turn limit
fn play_single_game(game_number: usize, bot: &mut BasicBot, args: &SimulateArgs) -> Result<GameRecord> {
    let mut game = Game::new();
    let mut turns = 0;

    let end = loop {
        if let Some(winner) = game.winner() {
            break GameEnd::Won {
                winner: winner.color,
                reason: winner.reason,
            };
        }
        if turns >= args.max_turns {
            break GameEnd::TurnLimit;
        }

        let Some(pick) = bot.pick_move(&game) else {
            break GameEnd::Stalled { turn: game.turn() };
        };

        let mover = game.turn();
        game.submit_move(pick.piece.hex, pick.destination)
            .with_context(|| {
                format!(
                    "game {game_number}: engine refused its own legal move {} -> {}",
                    pick.piece.hex, pick.destination
                )
            })?;
        turns += 1;

        if args.verbose {
            let caption = format!(
                "Game {game_number}, turn {turns}: {mover} {} {} -> {} | {}",
                pick.piece.kind(),
                pick.piece.hex,
                pick.destination,
                game.status()
            );
            println!("{}", render_with_caption(game.board(), &caption));
        }
    };

    Ok(GameRecord {
        game_number,
        end,
        turns,
        final_message: game.status().to_string(),
    })
}

/// Compute aggregate statistics from game records
fn compute_statistics(games: Vec<GameRecord>) -> SimulationResults {
    let tally = |color: Color| {
        let mut wins = ColorWins::default();
        for game in &games {
            if let GameEnd::Won { winner, reason } = game.end {
                if winner == color {
                    match reason {
                        WinReason::Portal => wins.portal += 1,
                        WinReason::Checkmate => wins.checkmate += 1,
                    }
                }
            }
        }
        wins
    };

    let unfinished = games
        .iter()
        .filter(|game| !matches!(game.end, GameEnd::Won { .. }))
        .count();

    let total_turns: u32 = games.iter().map(|game| game.turns).sum();
    let avg_turns = if games.is_empty() {
        0.0
    } else {
        total_turns as f32 / games.len() as f32
    };

    SimulationResults {
        total_games: games.len(),
        blue: tally(Color::Blue),
        white: tally(Color::White),
        red: tally(Color::Red),
        unfinished,
        avg_turns,
        games,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Progress bar over games; hidden when the board is printed or JSON is requested
fn create_progress_bar(args: &SimulateArgs) -> Result<ProgressBar> {
    if args.verbose || args.json {
        return Ok(ProgressBar::hidden());
    }

    let progress = ProgressBar::new(args.games as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games")
            .context("invalid progress template")?
            .progress_chars("#>-"),
    );
    Ok(progress)
}

fn wins_for(results: &SimulationResults, color: Color) -> &ColorWins {
    match color {
        Color::Blue => &results.blue,
        Color::White => &results.white,
        Color::Red => &results.red,
    }
}

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as text
fn print_text_results(results: &SimulationResults) {
    let total = results.total_games;

    println!("\n=== Simulation Results ===");
    println!("Total games: {}", total);
    for color in TURN_ORDER {
        let wins = wins_for(results, color);
        let count = wins.portal + wins.checkmate;
        println!(
            "{:<6} wins: {} ({:.1}%) - portal {}, checkmate {}",
            color.name(),
            count,
            percent(count, total),
            wins.portal,
            wins.checkmate
        );
    }
    println!(
        "Unfinished:  {} ({:.1}%)",
        results.unfinished,
        percent(results.unfinished, total)
    );
    println!("Avg turns:   {:.1}", results.avg_turns);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {:?} in {} turns - {}",
            game.game_number, game.end, game.turns, game.final_message
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args(games: usize, max_turns: u32, seed: u64) -> SimulateArgs {
        SimulateArgs {
            games,
            max_turns,
            seed: Some(seed),
            json: true,
            verbose: false,
        }
    }

    fn record(game_number: usize, end: GameEnd, turns: u32) -> GameRecord {
        GameRecord {
            game_number,
            end,
            turns,
            final_message: String::new(),
        }
    }

    #[test]
    fn test_compute_statistics_empty() {
        let results = compute_statistics(vec![]);
        assert_eq!(results.total_games, 0);
        assert_eq!(results.unfinished, 0);
        assert_eq!(results.avg_turns, 0.0);
    }

    #[test]
    fn test_compute_statistics() {
        let games = vec![
            record(1, GameEnd::Won { winner: Color::Red, reason: WinReason::Portal }, 10),
            record(2, GameEnd::Won { winner: Color::Red, reason: WinReason::Checkmate }, 20),
            record(3, GameEnd::Won { winner: Color::Blue, reason: WinReason::Portal }, 30),
            record(4, GameEnd::TurnLimit, 40),
        ];
        let results = compute_statistics(games);
        assert_eq!(results.red, ColorWins { portal: 1, checkmate: 1 });
        assert_eq!(results.blue, ColorWins { portal: 1, checkmate: 0 });
        assert_eq!(results.white, ColorWins::default());
        assert_eq!(results.unfinished, 1);
        assert_eq!(results.avg_turns, 25.0);
    }

    #[test]
    fn test_turn_limit_stops_game() {
        let args = args(1, 3, 5);
        let mut bot = BasicBot::with_seed(5);
        let record = play_single_game(1, &mut bot, &args).unwrap();
        assert!(record.turns <= 3);
        if record.turns == 3 {
            assert!(matches!(record.end, GameEnd::TurnLimit | GameEnd::Won { .. }));
        }
    }

    #[test]
    fn test_simulation_is_reproducible() {
        let a = play_games(&args(3, 60, 11)).unwrap();
        let b = play_games(&args(3, 60, 11)).unwrap();
        let turns = |results: &SimulationResults| -> Vec<u32> {
            results.games.iter().map(|game| game.turns).collect()
        };
        assert_eq!(turns(&a), turns(&b));
        assert_eq!(a.games.len(), 3);
    }
}
