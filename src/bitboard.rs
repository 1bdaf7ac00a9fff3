use std::fmt;
use std::hash::{Hash, Hasher};

use crate::{error::BoardError, HEIGHT, ROW_STRIDE, WIDTH};

/*
    Each player's tiles are stored in their own u64 like this:

        0  1  2  3  4  5  6
        8  9  10 11 12 13 14
        16 17 18 19 20 21 22
        24 25 26 27 28 29 30
        32 33 34 35 36 37 38
        40 41 42 43 44 45 46

    One byte per row, the least-significant byte is the top row. The last bit
    of every byte is never set, so runs of tiles can't carry over into the next
    row when the masks are shifted.
*/

mod static_masks {
    use crate::{HEIGHT, ROW_STRIDE, WIDTH};

    pub const fn row_mask(row: usize) -> u64 {
        ((1 << WIDTH) - 1) << (row * ROW_STRIDE)
    }
    pub const fn first_column_mask() -> u64 {
        let mut mask = 0;
        let mut row = 0;
        while row < HEIGHT {
            mask |= 1 << (row * ROW_STRIDE);
            row += 1;
        }
        mask
    }
    pub const fn full_board_mask() -> u64 {
        first_column_mask() * ((1 << WIDTH) - 1)
    }
    pub const fn bottom_row_mask() -> u64 {
        row_mask(HEIGHT - 1)
    }
    // rows 1, 3 and 5 when counting from the bottom starting at 1
    pub const fn odd_rows_mask() -> u64 {
        let mut mask = 0;
        let mut row = 0;
        while row < HEIGHT {
            if (HEIGHT - row) % 2 == 1 {
                mask |= row_mask(row);
            }
            row += 1;
        }
        mask
    }
    pub const fn even_rows_mask() -> u64 {
        full_board_mask() ^ odd_rows_mask()
    }
}

/// One of the two players, `One` always moves first
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "1"),
            Player::Two => write!(f, "2"),
        }
    }
}

/// Open three-in-a-rows of one player
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Threats {
    /// Empty tiles that would complete four in a row
    pub cells: u64,
    /// Vertical threats on the player's favourable rows, which the opponent
    /// can always answer by playing on top of them
    pub parity_subtract: i32,
}

impl Threats {
    pub fn contains(&self, row: usize, column: usize) -> bool {
        self.cells & BitBoard::tile_mask(row, column) != 0
    }

    pub fn count(&self) -> usize {
        self.cells.count_ones() as usize
    }
}

#[derive(Copy, Clone, Debug)]
pub struct BitBoard {
    // tiles of each player, indexed by `Player::index`
    layers: [u64; 2],
    to_move: Player,
    // set by the move that completes a four-in-a-row and never cleared
    winner: Option<Player>,
}

impl BitBoard {
    pub fn new() -> Self {
        Self {
            layers: [0, 0],
            to_move: Player::One,
            winner: None,
        }
    }

    /// Parses a game from a string of 1-indexed columns, e.g. `"4453"`
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self, BoardError> {
        let mut board = Self::new();

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    if board.winner.is_some() {
                        return Err(BoardError::GameOver);
                    }
                    if board.is_column_full(column - 1) {
                        return Err(BoardError::ColumnFull(column));
                    }
                    board.drop_chip(column - 1);
                }
                _ => return Err(BoardError::InvalidMove(column_char)),
            }
        }
        Ok(board)
    }

    /// Builds a board directly from tile masks. Player one is to move when both
    /// players have the same number of tiles.
    pub fn from_layers(player_one: u64, player_two: u64) -> Self {
        debug_assert_eq!(player_one & player_two, 0);
        let full = static_masks::full_board_mask();
        let (player_one, player_two) = (player_one & full, player_two & full);

        let to_move = if player_one.count_ones() > player_two.count_ones() {
            Player::Two
        } else {
            Player::One
        };
        let winner = if Self::check_win(player_one) {
            Some(Player::One)
        } else if Self::check_win(player_two) {
            Some(Player::Two)
        } else {
            None
        };
        Self {
            layers: [player_one, player_two],
            to_move,
            winner,
        }
    }

    pub fn tile_mask(row: usize, column: usize) -> u64 {
        1 << (row * ROW_STRIDE + column)
    }

    pub fn top_mask(column: usize) -> u64 {
        1 << column
    }

    pub fn column_mask(column: usize) -> u64 {
        static_masks::first_column_mask() << column
    }

    pub fn layer(&self, player: Player) -> u64 {
        self.layers[player.index()]
    }

    /// Mask of all tiles
    pub fn board_mask(&self) -> u64 {
        self.layers[0] | self.layers[1]
    }

    /// The player whose turn it is
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn num_moves(&self) -> usize {
        self.board_mask().count_ones() as usize
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<Player> {
        let tile = Self::tile_mask(row, column);
        if self.layers[0] & tile != 0 {
            Some(Player::One)
        } else if self.layers[1] & tile != 0 {
            Some(Player::Two)
        } else {
            None
        }
    }

    pub fn column_height(&self, column: usize) -> usize {
        (self.board_mask() & Self::column_mask(column)).count_ones() as usize
    }

    pub fn is_column_full(&self, column: usize) -> bool {
        self.board_mask() & Self::top_mask(column) != 0
    }

    pub fn is_board_full(&self) -> bool {
        self.board_mask() == static_masks::full_board_mask()
    }

    pub fn playable_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..WIDTH).filter(move |&column| !self.is_column_full(column))
    }

    /// Drops a tile for the current player into `column` and returns the row
    /// it landed in (0 is the top row).
    ///
    /// # Panics
    /// If the column is out of range or already full
    pub fn drop_chip(&mut self, column: usize) -> usize {
        assert!(
            column < WIDTH && !self.is_column_full(column),
            "Invalid move, column {} is not playable",
            column + 1
        );
        let occupied = self.board_mask() & Self::column_mask(column);
        let position = if occupied == 0 {
            (HEIGHT - 1) * ROW_STRIDE + column
        } else {
            // the lowest set bit is the top tile of the column
            occupied.trailing_zeros() as usize - ROW_STRIDE
        };

        let player = self.to_move;
        self.layers[player.index()] |= 1 << position;
        if self.winner.is_none() && Self::check_win(self.layers[player.index()]) {
            self.winner = Some(player);
        }
        self.to_move = player.other();

        position / ROW_STRIDE
    }

    /// Checks a single player's tiles for four in a row
    pub fn check_win(layer: u64) -> bool {
        // check horizontal alignment
        // mark all horizontal runs of 2
        let mut m = layer & (layer >> 1);
        // check for runs of 2 * (runs of 2)
        if m & (m >> 2) != 0 {
            return true;
        }

        // check vertical alignment
        m = layer & (layer >> ROW_STRIDE);
        if m & (m >> (2 * ROW_STRIDE)) != 0 {
            return true;
        }

        // check diagonal alignment /
        m = layer & (layer >> (ROW_STRIDE - 1));
        if m & (m >> (2 * (ROW_STRIDE - 1))) != 0 {
            return true;
        }

        // check diagonal alignment \
        m = layer & (layer >> (ROW_STRIDE + 1));
        if m & (m >> (2 * (ROW_STRIDE + 1))) != 0 {
            return true;
        }

        // no alignments
        false
    }

    // every tile that would complete an alignment of 4 for the given tiles,
    // occupied or not
    fn winning_positions(player_mask: u64) -> u64 {
        let mut r = 0;
        for &shift in [1, ROW_STRIDE - 1, ROW_STRIDE, ROW_STRIDE + 1].iter() {
            let mut p = (player_mask << shift) & (player_mask << (2 * shift));
            // find the far ends of 3-alignments
            r |= p & (player_mask << (3 * shift));
            // find holes of the type ...O O _ O...
            r |= p & (player_mask >> shift);

            p = (player_mask >> shift) & (player_mask >> (2 * shift));
            // find the near ends of 3-alignments
            r |= p & (player_mask >> (3 * shift));
            // find holes of the type ...O _ O O...
            r |= p & (player_mask << shift);
        }
        r
    }

    /// Finds the empty tiles that would complete four in a row for `player`
    pub fn open_three_in_a_rows(&self, player: Player) -> Threats {
        let own = self.layer(player);
        let empty = static_masks::full_board_mask() & !self.board_mask();

        // empty tiles sitting directly on top of a vertical three
        let vertical = (own >> ROW_STRIDE)
            & (own >> (2 * ROW_STRIDE))
            & (own >> (3 * ROW_STRIDE))
            & empty;
        let favourable_rows = match player {
            Player::One => static_masks::odd_rows_mask(),
            Player::Two => static_masks::even_rows_mask(),
        };

        Threats {
            cells: Self::winning_positions(own) & empty,
            parity_subtract: (vertical & favourable_rows).count_ones() as i32,
        }
    }

    /// Scores both players' open threats by row parity, from `player`'s side.
    ///
    /// With perfect play the first player can claim threats on odd rows and the
    /// second player threats on even rows (counting from the bottom, starting
    /// at 1). A threat with an opponent threat directly below it is worthless.
    pub fn weighted_open_three_in_a_rows(&self, player: Player) -> i32 {
        let first = self.open_three_in_a_rows(Player::One);
        let second = self.open_three_in_a_rows(Player::Two);

        // drop threats stacked on top of an opponent threat
        let first_open = first.cells & !(second.cells >> ROW_STRIDE);
        let second_open = second.cells & !(first.cells >> ROW_STRIDE);

        let odd_rows = static_masks::odd_rows_mask();
        let even_rows = static_masks::even_rows_mask();

        // the bottom row is filled too early to be of use as a threat
        let first_odd = first_open & odd_rows & !static_masks::bottom_row_mask();
        let first_score = first_odd.count_ones() as i32 - first.parity_subtract;

        let mut second_score =
            (second_open & even_rows).count_ones() as i32 - second.parity_subtract;
        // two odd threats are worth one even threat to the second player
        let second_odd = (second_open & odd_rows).count_ones() as i32;
        if second_odd > 1 {
            second_score += second_odd / 2;
        }

        let score = first_score - second_score;
        match player {
            Player::One => score,
            Player::Two => -score,
        }
    }

    /// Reflects the board left to right
    pub fn mirror(&self) -> Self {
        let reflect = |layer: u64| {
            let mut mirrored = 0;
            for column in 0..WIDTH {
                mirrored |= ((layer >> column) & static_masks::first_column_mask())
                    << (WIDTH - 1 - column);
            }
            mirrored
        };
        Self {
            layers: [reflect(self.layers[0]), reflect(self.layers[1])],
            to_move: self.to_move,
            winner: self.winner,
        }
    }
}

impl Default for BitBoard {
    fn default() -> Self {
        Self::new()
    }
}

// the winner is derived from the tiles, so it takes no part in identity
impl PartialEq for BitBoard {
    fn eq(&self, other: &Self) -> bool {
        self.layers == other.layers && self.to_move == other.to_move
    }
}

impl Eq for BitBoard {}

impl Hash for BitBoard {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.layers.hash(state);
        self.to_move.hash(state);
    }
}

impl fmt::Display for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..HEIGHT {
            for column in 0..WIDTH {
                let tile = match self.cell(row, column) {
                    Some(Player::One) => 'X',
                    Some(Player::Two) => 'O',
                    None => '.',
                };
                write!(f, "{}", tile)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
