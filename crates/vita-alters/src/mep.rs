use vita_core::{Score, random_provider};
use vita_gp::{Category, Genome, SymbolTable};

/// Tunables for the MEP standard recombination operator, mirroring the
/// configuration table's `p_cross`/`p_mutation`/`brood_size` fields.
#[derive(Clone, Debug)]
pub struct RecombinationParams {
    pub p_cross: f32,
    pub p_mutation: f32,
    pub patch_fraction: f32,
    pub brood_size: usize,
}

impl Default for RecombinationParams {
    fn default() -> Self {
        RecombinationParams {
            p_cross: 0.7,
            p_mutation: 0.05,
            patch_fraction: vita_gp::DEFAULT_PATCH_FRACTION,
            brood_size: 0,
        }
    }
}

/// The MEP standard operator: crossover-or-copy, mutate, then a
/// signature-repulsion loop that keeps remutating while the offspring's
/// signature collides with either parent's — a collision means the
/// offspring is semantically identical to something already in the
/// mating pair, which wastes an evaluation slot. The retry budget is
/// capped at twice the genome length; the original left it uncapped,
/// which can spin forever against a saturated symbol set.
pub struct MepRecombination;

impl MepRecombination {
    pub fn recombine(
        table: &SymbolTable,
        root_category: Category,
        parent_a: &Genome,
        parent_b: &Genome,
        params: &RecombinationParams,
    ) -> Genome {
        Self::recombine_with_brood(table, root_category, parent_a, parent_b, params, None)
    }

    /// Brood recombination: generate `brood_size` candidate offspring
    /// this way and keep the one `fast_fitness` scores highest. Pass
    /// `brood_size: 0` (the default) to skip this and return the first
    /// candidate produced.
    pub fn recombine_with_brood(
        table: &SymbolTable,
        root_category: Category,
        parent_a: &Genome,
        parent_b: &Genome,
        params: &RecombinationParams,
        fast_fitness: Option<&mut dyn FnMut(&Genome) -> Score>,
    ) -> Genome {
        let make_one =
            || Self::make_offspring(table, root_category, parent_a, parent_b, params);

        let Some(fast_fitness) = fast_fitness else {
            return make_one();
        };
        if params.brood_size == 0 {
            return make_one();
        }

        let mut best = make_one();
        let mut best_score = fast_fitness(&best);
        for _ in 1..params.brood_size {
            let candidate = make_one();
            let score = fast_fitness(&candidate);
            if score > best_score {
                best = candidate;
                best_score = score;
            }
        }
        best
    }

    fn make_offspring(
        table: &SymbolTable,
        root_category: Category,
        parent_a: &Genome,
        parent_b: &Genome,
        params: &RecombinationParams,
    ) -> Genome {
        let mut offspring = if random_provider::bool(params.p_cross) {
            Genome::crossover(parent_a, parent_b)
        } else if random_provider::bool(0.5) {
            parent_a.clone()
        } else {
            parent_b.clone()
        };

        offspring.mutate_with_patch(table, root_category, params.p_mutation, params.patch_fraction);

        let parent_a_sig = parent_a.signature();
        let parent_b_sig = parent_b.signature();
        let retry_budget = 2 * offspring.len().max(1);
        let mut tries = 0;
        while tries < retry_budget {
            let sig = offspring.signature();
            if sig != parent_a_sig && sig != parent_b_sig {
                break;
            }
            offspring.mutate_with_patch(
                table,
                root_category,
                params.p_mutation,
                params.patch_fraction,
            );
            tries += 1;
        }

        offspring
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vita_gp::{Symbol, Value};

    fn table() -> SymbolTable {
        let mut t = SymbolTable::new();
        let num = Category(1);
        t.insert(Symbol::function("add", num, [num, num], 1.0, |a| {
            Value::from_finite(a[0].as_double().unwrap() + a[1].as_double().unwrap())
        }));
        t.insert(Symbol::terminal("x", num, 1.0, |_| Value::Double(1.0)));
        t
    }

    #[test]
    fn offspring_has_the_same_length_as_its_parents() {
        let t = table();
        let num = Category(1);
        let a = Genome::random(&t, 20, num);
        let b = Genome::random(&t, 20, num);
        let params = RecombinationParams::default();

        let child = MepRecombination::recombine(&t, num, &a, &b, &params);
        assert_eq!(child.len(), a.len());
    }

    #[test]
    fn brood_of_one_matches_plain_recombine() {
        let t = table();
        let num = Category(1);
        let a = Genome::random(&t, 10, num);
        let b = Genome::random(&t, 10, num);
        let mut params = RecombinationParams::default();
        params.brood_size = 1;

        let mut scorer = |_: &Genome| Score::from_vec(vec![0.0]);
        let child = MepRecombination::recombine_with_brood(
            &t,
            num,
            &a,
            &b,
            &params,
            Some(&mut scorer),
        );
        assert_eq!(child.len(), a.len());
    }
}
