//! Fixed column orderings for the game tree search

use crate::WIDTH;

/// Returns the columns ordered from the middle outwards, as
/// the middle columns are often better moves
pub const fn move_order() -> [usize; WIDTH] {
    let mut move_order = [0; WIDTH];
    let mut i = 0;
    while i < WIDTH {
        move_order[i] = (WIDTH / 2) + (i % 2) * (i / 2 + 1) - (1 - i % 2) * (i / 2);
        i += 1;
    }
    move_order
}

/// The middle-out order with `root` moved to the front
pub const fn rooted_move_order(root: usize) -> [usize; WIDTH] {
    let default = move_order();
    let mut order = [root; WIDTH];
    let mut next = 1;
    let mut i = 0;
    while i < WIDTH {
        if default[i] != root {
            order[next] = default[i];
            next += 1;
        }
        i += 1;
    }
    order
}

const fn all_move_orders() -> [[usize; WIDTH]; WIDTH] {
    let mut orders = [[0; WIDTH]; WIDTH];
    let mut root = 0;
    while root < WIDTH {
        orders[root] = rooted_move_order(root);
        root += 1;
    }
    orders
}

/// One ordering per column, each trying that column first
pub static MOVE_ORDERS: [[usize; WIDTH]; WIDTH] = all_move_orders();

/// Index of one of the orderings in [`MOVE_ORDERS`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MoveOrder(u8);

impl MoveOrder {
    /// Middle-out order, rooted at the centre column
    pub const DEFAULT: MoveOrder = MoveOrder((WIDTH / 2) as u8);

    pub fn rooted_at(column: usize) -> Self {
        debug_assert!(column < WIDTH);
        MoveOrder(column as u8)
    }

    pub fn columns(self) -> &'static [usize; WIDTH] {
        &MOVE_ORDERS[self.0 as usize]
    }
}

impl Default for MoveOrder {
    fn default() -> Self {
        Self::DEFAULT
    }
}
