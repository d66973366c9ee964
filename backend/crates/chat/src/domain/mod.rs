//! Domain Layer

pub mod model;

pub use model::{ChatTurn, ModelClient, ModelError, TurnRole};
