pub mod uniform;

pub use uniform::UniformCrossover;
