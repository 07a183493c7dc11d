use vita_error::{Result, ensure};

/// The full set of knobs governing one evolutionary run, matching the
/// configuration surface an embedding application sets once up front.
/// Construct via [`EvolutionConfigBuilder`]; `build()` validates every
/// field's own range before handing back a usable config.
#[derive(Clone, Debug)]
pub struct EvolutionConfig {
    pub individuals: usize,
    pub max_layers: usize,
    pub code_length: usize,
    pub p_cross: f32,
    pub p_mutation: f32,
    pub tournament_size: usize,
    pub mate_zone: usize,
    pub brood_size: usize,
    /// `0` means "auto": derive a sensible age gap from `individuals`
    /// and `max_layers` at build time instead of the caller naming one.
    pub age_gap: usize,
    pub p_same_layer: f32,
    pub generations: usize,
    /// Fraction of the dataset held out for validation; `0.0` disables
    /// the split (the "As-is" strategy).
    pub validation_percentage: f32,
    pub verbosity: u8,
}

impl EvolutionConfig {
    pub fn builder() -> EvolutionConfigBuilder {
        EvolutionConfigBuilder::default()
    }

    /// The age gap actually used at runtime: the configured value, or
    /// (when `0`) one derived from the population size so that a
    /// multi-layer ALPS run cycles through its layer cadence a handful
    /// of times over a typical `generations` budget.
    pub fn effective_age_gap(&self) -> usize {
        if self.age_gap > 0 {
            self.age_gap
        } else {
            (self.individuals / self.max_layers.max(1)).max(1)
        }
    }
}

pub struct EvolutionConfigBuilder {
    individuals: usize,
    max_layers: usize,
    code_length: usize,
    p_cross: f32,
    p_mutation: f32,
    tournament_size: usize,
    mate_zone: usize,
    brood_size: usize,
    age_gap: usize,
    p_same_layer: f32,
    generations: usize,
    validation_percentage: f32,
    verbosity: u8,
}

impl Default for EvolutionConfigBuilder {
    fn default() -> Self {
        EvolutionConfigBuilder {
            individuals: 100,
            max_layers: 1,
            code_length: 32,
            p_cross: 0.9,
            p_mutation: 0.04,
            tournament_size: 5,
            mate_zone: 20,
            brood_size: 1,
            age_gap: 0,
            p_same_layer: 0.75,
            generations: 100,
            validation_percentage: 0.0,
            verbosity: 0,
        }
    }
}

impl EvolutionConfigBuilder {
    pub fn individuals(mut self, n: usize) -> Self {
        self.individuals = n;
        self
    }

    pub fn max_layers(mut self, n: usize) -> Self {
        self.max_layers = n;
        self
    }

    pub fn code_length(mut self, n: usize) -> Self {
        self.code_length = n;
        self
    }

    pub fn p_cross(mut self, p: f32) -> Self {
        self.p_cross = p;
        self
    }

    pub fn p_mutation(mut self, p: f32) -> Self {
        self.p_mutation = p;
        self
    }

    pub fn tournament_size(mut self, n: usize) -> Self {
        self.tournament_size = n;
        self
    }

    pub fn mate_zone(mut self, n: usize) -> Self {
        self.mate_zone = n;
        self
    }

    pub fn brood_size(mut self, n: usize) -> Self {
        self.brood_size = n;
        self
    }

    pub fn age_gap(mut self, n: usize) -> Self {
        self.age_gap = n;
        self
    }

    pub fn p_same_layer(mut self, p: f32) -> Self {
        self.p_same_layer = p;
        self
    }

    pub fn generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    pub fn validation_percentage(mut self, p: f32) -> Self {
        self.validation_percentage = p;
        self
    }

    pub fn verbosity(mut self, v: u8) -> Self {
        self.verbosity = v;
        self
    }

    pub fn build(self) -> Result<EvolutionConfig> {
        ensure!(self.individuals > 0, InvalidParameter: "individuals must be positive, got {}", self.individuals);
        ensure!(self.max_layers > 0, InvalidParameter: "max_layers must be positive, got {}", self.max_layers);
        ensure!(self.code_length > 0, InvalidParameter: "code_length must be positive, got {}", self.code_length);
        ensure!((0.0..=1.0).contains(&self.p_cross), InvalidParameter: "p_cross must be in [0, 1], got {}", self.p_cross);
        ensure!((0.0..=1.0).contains(&self.p_mutation), InvalidParameter: "p_mutation must be in [0, 1], got {}", self.p_mutation);
        ensure!(self.tournament_size > 0, InvalidParameter: "tournament_size must be positive, got {}", self.tournament_size);
        ensure!(self.brood_size > 0, InvalidParameter: "brood_size must be positive, got {}", self.brood_size);
        ensure!((0.0..=1.0).contains(&self.p_same_layer), InvalidParameter: "p_same_layer must be in [0, 1], got {}", self.p_same_layer);
        ensure!(self.generations > 0, InvalidParameter: "generations must be positive, got {}", self.generations);
        ensure!((0.0..1.0).contains(&self.validation_percentage), InvalidParameter: "validation_percentage must be in [0, 1), got {}", self.validation_percentage);

        Ok(EvolutionConfig {
            individuals: self.individuals,
            max_layers: self.max_layers,
            code_length: self.code_length,
            p_cross: self.p_cross,
            p_mutation: self.p_mutation,
            tournament_size: self.tournament_size,
            mate_zone: self.mate_zone,
            brood_size: self.brood_size,
            age_gap: self.age_gap,
            p_same_layer: self.p_same_layer,
            generations: self.generations,
            validation_percentage: self.validation_percentage,
            verbosity: self.verbosity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build_successfully() {
        assert!(EvolutionConfig::builder().build().is_ok());
    }

    #[test]
    fn rejects_out_of_range_crossover_rate() {
        let err = EvolutionConfig::builder().p_cross(1.5).build().unwrap_err();
        assert!(matches!(err, vita_error::VitaError::InvalidParameter { .. }));
    }

    #[test]
    fn effective_age_gap_falls_back_to_population_derived_value() {
        let config = EvolutionConfig::builder().individuals(100).max_layers(4).age_gap(0).build().unwrap();
        assert_eq!(config.effective_age_gap(), 25);
    }

    #[test]
    fn effective_age_gap_honors_an_explicit_value() {
        let config = EvolutionConfig::builder().age_gap(7).build().unwrap();
        assert_eq!(config.effective_age_gap(), 7);
    }
}
