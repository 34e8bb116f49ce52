pub mod serialization;
pub mod session;

pub use serialization::DuelSnapshot;
pub use session::{DuelOutcome, DuelSession, TurnReport};
