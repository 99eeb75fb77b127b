pub mod solve;

pub use solve::{PromptPair, build_solve_prompt};
