pub mod cache;
pub mod category;
pub mod gene;
pub mod genome;
pub mod interpreter;
pub mod population;
pub mod symbol;
pub mod value;

pub use cache::{CacheEntry, TranspositionCache};
pub use category::{Category, CategorySet};
pub use gene::Gene;
pub use genome::{DEFAULT_PATCH_FRACTION, Genome};
pub use interpreter::Interpreter;
pub use population::{AgeCeiling, Coord, Individual, Population};
pub use symbol::{ArgCategories, K_ARGS, Symbol, SymbolBuilder, SymbolFn, SymbolTable};
pub use value::{Value, ValueType};
