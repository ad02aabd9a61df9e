pub mod a_star;
pub mod backtracking;
pub mod common;
