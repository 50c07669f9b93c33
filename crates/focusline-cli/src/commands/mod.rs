pub mod nudge;
pub mod poke;
pub mod queue;
pub mod score;
pub mod settings;
