use crate::genome::{Chromosome, Genotype};
use crate::genome::population::Population;
use crate::domain::random_provider;
use std::sync::Arc;

/// Produces a replacement [Genotype] for a phenotype the filter step has
/// decided to discard (too old, or invalid). `encoder` is the problem's
/// own genotype factory, always available as a fallback.
pub trait ReplacementStrategy<C: Chromosome>: Send + Sync {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
            .split("<")
            .next()
            .unwrap_or(std::any::type_name::<Self>())
            .split("::")
            .last()
            .unwrap_or("Unknown Replacement")
    }

    fn replace(
        &self,
        population: &Population<C>,
        encoder: Arc<dyn Fn() -> Genotype<C> + Send + Sync>,
    ) -> Genotype<C>;
}

/// Always re-encodes a brand-new random genotype. Simple and the
/// engine's default — a discarded individual is replaced by drawing
/// fresh from the same distribution new individuals are created from.
#[derive(Clone, Debug, Default)]
pub struct EncodeReplace;

impl<C: Chromosome> ReplacementStrategy<C> for EncodeReplace {
    fn replace(
        &self,
        _population: &Population<C>,
        encoder: Arc<dyn Fn() -> Genotype<C> + Send + Sync>,
    ) -> Genotype<C> {
        encoder()
    }
}

/// Replaces a discarded individual by cloning a uniformly-sampled
/// survivor's genotype instead of encoding from scratch, trading
/// diversity for faster convergence toward whatever the population
/// already favors.
#[derive(Clone, Debug, Default)]
pub struct PopulationSampleReplace;

impl<C: Chromosome> ReplacementStrategy<C> for PopulationSampleReplace {
    fn replace(
        &self,
        population: &Population<C>,
        encoder: Arc<dyn Fn() -> Genotype<C> + Send + Sync>,
    ) -> Genotype<C> {
        if population.is_empty() {
            return encoder();
        }
        let index = random_provider::range(0..population.len());
        population
            .get(index)
            .map(|pheno| pheno.genotype().clone())
            .unwrap_or_else(encoder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::{FloatChromosome, Phenotype};

    fn sample_population() -> Population<FloatChromosome> {
        let genotype: Genotype<FloatChromosome> =
            Genotype::from(vec![FloatChromosome::from(vec![1.0, 2.0, 3.0])]);
        Population::new(vec![Phenotype::from((genotype, 0))])
    }

    #[test]
    fn encode_replace_always_calls_encoder() {
        let population = sample_population();
        let called = Arc::new(std::sync::atomic::AtomicBool::new(false));
        let flag = Arc::clone(&called);
        let encoder: Arc<dyn Fn() -> Genotype<FloatChromosome> + Send + Sync> = Arc::new(move || {
            flag.store(true, std::sync::atomic::Ordering::SeqCst);
            Genotype::from(vec![FloatChromosome::from(vec![0.0])])
        });

        let _ = EncodeReplace.replace(&population, encoder);
        assert!(called.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[test]
    fn population_sample_replace_picks_an_existing_genotype() {
        let population = sample_population();
        let encoder: Arc<dyn Fn() -> Genotype<FloatChromosome> + Send + Sync> =
            Arc::new(|| Genotype::from(vec![FloatChromosome::from(vec![0.0])]));

        let replaced = PopulationSampleReplace.replace(&population, encoder);
        assert_eq!(replaced, population.get(0).unwrap().genotype().clone());
    }
}
