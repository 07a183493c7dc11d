pub mod chromosomes;
pub mod ecosystem;
pub mod genotype;
pub mod phenotype;
pub mod population;
pub mod species;

pub use chromosomes::*;
pub use ecosystem::*;
pub use genotype::*;
pub use phenotype::*;
pub use population::*;
pub use species::*;
