//! Game sessions built on the engine.
//!
//! - `classic`: the standard single-player game (2048 on a 4×4 grid by default)

pub mod classic;
