use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use std::io::{stdin, stdout, Stdin, Write};
use std::time::Duration;

use connect4_scout::{evaluator::Outlook, BitBoard, Engine, Player, WIDTH};

mod display;

fn init_tracing() {
    // keep the board readable unless asked otherwise
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn ask(stdin: &Stdin, question: &str) -> Result<bool> {
    loop {
        let mut buffer = String::new();
        print!("{} y/n: ", question);
        stdout().flush()?;
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    // each AI player follows its own search schedule
    let mut engines = (Engine::new(), Engine::new());

    loop {
        let ai_players = (
            ask(&stdin, "Is player 1 AI controlled?")?,
            ask(&stdin, "Is player 2 AI controlled?")?,
        );
        play_game(&stdin, &mut engines, ai_players)?;

        if !ask(&stdin, "Play again?")? {
            break;
        }
        engines.0.reset();
        engines.1.reset();
    }
    Ok(())
}

fn play_game(
    stdin: &Stdin,
    engines: &mut (Engine, Engine),
    ai_players: (bool, bool),
) -> Result<()> {
    let mut board = BitBoard::new();

    // game loop
    loop {
        display::draw(&board)?;

        // end states
        if let Some(winner) = board.winner() {
            println!("Player {} wins!", winner);
            return Ok(());
        }
        if board.is_board_full() {
            println!("Draw!");
            return Ok(());
        }

        let player = board.to_move();
        let (engine, ai_controlled) = match player {
            Player::One => (&mut engines.0, ai_players.0),
            Player::Two => (&mut engines.1, ai_players.1),
        };

        let column = if ai_controlled {
            // slow down play if both players are AI
            if ai_players == (true, true) {
                std::thread::sleep(Duration::new(1, 0));
            }

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}"));
            spinner.set_message("AI is thinking...");
            spinner.enable_steady_tick(100);
            let decision = engine.analyse(&board)?;
            spinner.finish_and_clear();

            match decision.outlook {
                Outlook::ForcedWin => println!("Player {} can force a win.", player),
                Outlook::ForcedLoss => println!("Player {} can force a win.", player.other()),
                Outlook::Undecided => {}
            }
            println!(
                "Best move: {} ({} positions in {:.2}s)",
                decision.column + 1,
                decision.node_count,
                decision.elapsed.as_secs_f64()
            );
            decision.column

        // human player
        } else {
            print!("Move input > ");
            stdout().flush()?;
            let mut input_str = String::new();
            stdin.read_line(&mut input_str)?;

            match input_str.trim().parse::<usize>() {
                Ok(column @ 1..=WIDTH) if !board.is_column_full(column - 1) => column - 1,
                Ok(column @ 1..=WIDTH) => {
                    println!("Invalid move, column {} full", column);
                    continue;
                }
                _ => {
                    println!(
                        "Invalid move: {}. Columns must be between 1 and {}",
                        input_str.trim(),
                        WIDTH
                    );
                    continue;
                }
            }
        };

        board.drop_chip(column);
    }
}
