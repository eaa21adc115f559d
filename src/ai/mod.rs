pub mod eval;
pub mod policy;
pub mod search;

pub use eval::Evaluator;
pub use policy::{DifficultyPolicy, get_best_move};
pub use search::{HARD_SEARCH_DEPTH, SearchReport, Searcher};
