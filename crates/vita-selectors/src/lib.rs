pub mod mep;

pub use mep::{AlpsTournamentSelector, MepTournamentSelector, ParetoSelector, RandomSelector};
