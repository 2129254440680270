//! Game Center model types.

mod achievement;
mod game_center_detail;
mod images;
mod leaderboard;
mod leaderboard_set;

pub use achievement::*;
pub use game_center_detail::*;
pub use images::*;
pub use leaderboard::*;
pub use leaderboard_set::*;
