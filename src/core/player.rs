//! Player identification and per-player data storage.
//!
//! ## Player
//!
//! Exactly two players. Each owns one token: `Player1` moves `TokenA`,
//! `Player2` moves `TokenB`.
//!
//! ## PlayerMap
//!
//! Fixed two-slot storage indexed by `Player`, used for display names and
//! other per-player data.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::square::Square;

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Moves first, owns `TokenA`.
    Player1,
    /// Owns `TokenB`.
    Player2,
}

impl Player {
    /// Both players in turn order.
    pub const ALL: [Player; 2] = [Player::Player1, Player::Player2];

    /// The other player.
    ///
    /// ```
    /// use rust_isolation::core::Player;
    ///
    /// assert_eq!(Player::Player1.opponent(), Player::Player2);
    /// assert_eq!(Player::Player1.opponent().opponent(), Player::Player1);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }

    /// The token value this player moves.
    #[must_use]
    pub const fn token(self) -> Square {
        match self {
            Player::Player1 => Square::TokenA,
            Player::Player2 => Square::TokenB,
        }
    }

    /// The player owning a token square, if it is one.
    #[must_use]
    pub const fn from_token(square: Square) -> Option<Self> {
        match square {
            Square::TokenA => Some(Player::Player1),
            Square::TokenB => Some(Player::Player2),
            Square::Empty | Square::Blocked => None,
        }
    }

    /// 0-based slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::Player1 => 0,
            Player::Player2 => 1,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use rust_isolation::core::{Player, PlayerMap};
///
/// let mut names = PlayerMap::new(|p| p.to_string());
/// assert_eq!(names[Player::Player2], "Player 2");
///
/// names[Player::Player1] = "Ada".to_string();
/// assert_eq!(names[Player::Player1], "Ada");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(Player) -> T) -> Self {
        Self {
            data: [factory(Player::Player1), factory(Player::Player2)],
        }
    }

    /// Create a PlayerMap from explicit values in turn order.
    pub fn from_pair(first: T, second: T) -> Self {
        Self {
            data: [first, second],
        }
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: Player) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: Player) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (Player, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Player, &T)> {
        Player::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Player> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: Player) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<Player> for PlayerMap<T> {
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        self.get_mut(player)
    }
}
