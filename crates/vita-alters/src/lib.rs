pub mod crossovers;
pub mod mep;
pub mod mutators;

pub use mep::{MepRecombination, RecombinationParams};

pub use crossovers::UniformCrossover;
pub use mutators::UniformMutator;
