use uuid::Uuid;

pub mod prelude;

pub mod emotion_analyses;
pub mod sentiment;
pub mod user_sessions;

/// A type alias that represents any Entity's internal id field data type.
/// Aliased so that it's easy to change the underlying type if necessary.
pub type Id = Uuid;
