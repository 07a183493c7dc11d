//! Selection strategies over the MEP layered population (spec section on
//! selection / recombination / replacement): Tournament, ALPS tournament,
//! Pareto and Random.

pub mod alps;
pub mod pareto;
pub mod random;
pub mod tournament;

pub use alps::AlpsTournamentSelector;
pub use pareto::ParetoSelector;
pub use random::RandomSelector;
pub use tournament::MepTournamentSelector;

use vita_core::random_provider;
use vita_gp::{Coord, Population};

/// A uniformly chosen individual anywhere in the population.
pub(crate) fn pickup_any(population: &Population) -> Coord {
    if population.num_layers() == 1 {
        return Coord::new(0, random_provider::range(0..population.individuals(0).len()));
    }
    let layer = random_provider::range(0..population.num_layers());
    Coord::new(layer, random_provider::range(0..population.individuals(layer).len()))
}

/// An individual "near" `target`: same layer, index drawn from the ring
/// of radius `mate_zone` around `target.index`, wrapping at the layer's
/// bounds.
pub(crate) fn pickup_near(population: &Population, target: Coord, mate_zone: usize) -> Coord {
    let layer_len = population.individuals(target.layer).len();
    Coord::new(target.layer, ring_index(target.index, mate_zone, layer_len))
}

/// An individual in layer `l` with probability `p`, otherwise in layer
/// `l - 1` (clamped at 0).
pub(crate) fn pickup_layer(population: &Population, l: usize, p: f32) -> Coord {
    let layer = if l > 0 && !random_provider::bool(p) { l - 1 } else { l };
    Coord::new(layer, random_provider::range(0..population.individuals(layer).len()))
}

/// A uniformly chosen offset in `[-radius, radius]` added to `center`,
/// wrapped modulo `len`.
fn ring_index(center: usize, radius: usize, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let radius = radius.min(len - 1);
    let offset = random_provider::range(0..(2 * radius + 1)) as isize - radius as isize;
    (center as isize + offset).rem_euclid(len as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_index_stays_within_radius_distance_modulo_len() {
        for _ in 0..200 {
            let center = 10;
            let len = 20;
            let radius = 3;
            let idx = ring_index(center, radius, len);
            assert!(idx < len);
        }
    }

    #[test]
    fn ring_index_handles_singleton_layer() {
        assert_eq!(ring_index(0, 5, 1), 0);
    }
}
