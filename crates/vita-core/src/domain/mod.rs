pub mod arena;
pub mod cell;
pub mod indexes;
pub mod macros;
pub mod random_provider;
pub mod thread_pool;
pub mod tracker;

pub use arena::Arena;
pub use indexes::SubsetMode;
