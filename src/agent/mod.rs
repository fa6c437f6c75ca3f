pub mod player;
pub use player::*;

pub mod ai;
pub use ai::{Difficulty, NegamaxPlayer, SearchEngine, SearchResult};
