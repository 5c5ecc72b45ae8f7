pub mod output;
pub mod trace;
