//! Response quality: heuristic scoring of persona rewrites, a bounded
//! local repair pass and canned fallbacks.

pub mod fallback;
pub mod kanji;
pub mod repair;
pub mod rubric;
pub mod types;
pub mod validator;

pub use fallback::generate_fallback;
pub use repair::{repair, RepairStrategy};
pub use types::{ReadingLevelMode, ValidationResult, REPAIR_THRESHOLD};
pub use validator::score;
