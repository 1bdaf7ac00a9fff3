use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4_scout::{BitBoard, Player, HEIGHT, WIDTH};

/// Draws the board below the cursor, with column numbers on top
pub fn draw(board: &BitBoard) -> Result<()> {
    let mut stdout = stdout();

    let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;
    for _ in 0..HEIGHT {
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;

    // the cursor is now on the line below the bottom row
    let (origin_x, origin_y) = crossterm::cursor::position()?;
    let top_y = origin_y - HEIGHT as u16;

    for row in 0..HEIGHT {
        for column in 0..WIDTH {
            stdout
                .queue(MoveTo(origin_x + column as u16, top_y + row as u16))?
                .queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match board.cell(row, column) {
                            Some(Player::One) => Color::Red,
                            Some(Player::Two) => Color::Yellow,
                            None => Color::DarkBlue,
                        }),
                ))?;
        }
    }
    stdout
        .queue(MoveTo(origin_x, origin_y))?
        .queue(PrintStyledContent(style("\n")))?;
    stdout.flush()?;
    Ok(())
}
