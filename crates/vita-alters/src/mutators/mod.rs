pub mod uniform;

pub use uniform::UniformMutator;
