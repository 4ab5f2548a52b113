//! Persistence of the full edit history, not just the current state.

pub mod codec;
pub mod file;

pub use codec::{decode_history, encode_history};
pub use file::{history_path, load_history, save_history};
