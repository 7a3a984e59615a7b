pub mod error;
pub mod game_repr;
pub mod search;

pub use error::{EngineError, EngineResult};
