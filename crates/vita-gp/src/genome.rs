use crate::category::Category;
use crate::gene::Gene;
use crate::symbol::{K_ARGS, SymbolTable};
use smallvec::SmallVec;
use std::collections::HashMap;
use vita_core::random_provider;

/// Default fraction of the genome reserved as the terminals-only
/// "patch" tail, guaranteeing that an argument index drawn from
/// `(locus, L)` always has somewhere to resolve.
pub const DEFAULT_PATCH_FRACTION: f32 = 0.2;

/// An MEP individual: `L` genes plus a designated entry locus `best`.
/// Argument indices only ever point forward (`args[k] > locus`), which
/// is what makes the representation acyclic and arena-shaped — a flat
/// `Vec` of genes, no pointer tree.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Genome {
    genes: Vec<Gene>,
    best: usize,
    age: usize,
}

impl Genome {
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn gene(&self, locus: usize) -> &Gene {
        &self.genes[locus]
    }

    pub fn best(&self) -> usize {
        self.best
    }

    pub fn set_best(&mut self, locus: usize) {
        assert!(locus < self.genes.len());
        self.best = locus;
    }

    pub fn age(&self) -> usize {
        self.age
    }

    pub fn inc_age(&mut self) {
        self.age += 1;
    }

    /// Random fill per the spec's creation rule: standard loci draw any
    /// compatible symbol (functions draw forward-pointing arg indices),
    /// patch loci draw terminals only.
    pub fn random(table: &SymbolTable, length: usize, root_category: Category) -> Genome {
        Self::random_with_patch(table, length, root_category, DEFAULT_PATCH_FRACTION)
    }

    pub fn random_with_patch(
        table: &SymbolTable,
        length: usize,
        root_category: Category,
        patch_fraction: f32,
    ) -> Genome {
        assert!(length > 0, "genome length must be positive");
        let patch_size = ((length as f32) * patch_fraction).ceil() as usize;
        let patch_size = patch_size.clamp(1, length);
        let patch_start = length - patch_size;

        // Generated right-to-left so that, by the time a standard locus
        // is built, every locus it could reference already exists and
        // its output category is known — `by_category` answers "which
        // later loci can satisfy this argument slot's category".
        let mut genes: Vec<Option<Gene>> = vec![None; length];
        let mut by_category: HashMap<Category, Vec<usize>> = HashMap::new();

        for locus in (0..length).rev() {
            let gene = if locus >= patch_start {
                Self::random_terminal(table, root_category)
            } else {
                Self::random_standard(table, locus, length, root_category, &by_category)
            };
            by_category.entry(table.get(gene.opcode).category()).or_default().push(locus);
            genes[locus] = Some(gene);
        }

        // best defaults to locus 0; callers pick a different entry if
        // their representation demands it (e.g. multi-output programs).
        Genome { genes: genes.into_iter().map(Option::unwrap).collect(), best: 0, age: 0 }
    }

    fn random_standard(
        table: &SymbolTable,
        locus: usize,
        genes_len: usize,
        category: Category,
        by_category: &HashMap<Category, Vec<usize>>,
    ) -> Gene {
        let opcode = table
            .roulette(category)
            .expect("no symbol compatible with the requested category");

        let symbol = table.get(opcode);
        if symbol.is_terminal() {
            Gene::new_terminal(opcode, symbol.init_param())
        } else {
            let mut args: SmallVec<[u32; K_ARGS]> = SmallVec::with_capacity(symbol.arity());
            for i in 0..symbol.arity() {
                let arg_cat = symbol.arg_category(i);
                let arg_locus = match by_category.get(&arg_cat) {
                    Some(candidates) if !candidates.is_empty() => {
                        *random_provider::choose(candidates)
                    }
                    // No later locus of the exact category exists (can
                    // only happen past the patch boundary when a closure
                    // violation slipped through table construction);
                    // falling back to any later locus keeps the genome
                    // well-formed, at the cost of that argument reading
                    // as `Void` at evaluation time.
                    _ => random_provider::range((locus + 1)..genes_len),
                };
                args.push(arg_locus as u32);
            }
            Gene::new_function(opcode, args)
        }
    }

    fn random_terminal(table: &SymbolTable, category: Category) -> Gene {
        let opcode = table
            .roulette_terminal(category)
            .expect("no terminal compatible with the requested category");
        let symbol = table.get(opcode);
        Gene::new_terminal(opcode, symbol.init_param())
    }

    /// Uniform, position-preserving crossover: at each locus, the
    /// offspring inherits `p`'s gene with probability 1/2, else `q`'s.
    /// No repair is needed — both parents already satisfy the
    /// acyclicity and category invariants, and copying a whole gene
    /// (symbol + its own argument indices) preserves both.
    pub fn crossover(p: &Genome, q: &Genome) -> Genome {
        assert_eq!(p.len(), q.len(), "crossover requires equal-length parents");

        let genes = p
            .genes
            .iter()
            .zip(q.genes.iter())
            .map(|(pg, qg)| if random_provider::bool(0.5) { pg.clone() } else { qg.clone() })
            .collect();

        Genome { genes, best: p.best, age: p.age.max(q.age) }
    }

    /// Replaces the gene at each locus with probability `p_mutation`,
    /// resampling under the same rule creation used (patch vs standard).
    /// Returns the number of loci changed.
    pub fn mutate(&mut self, table: &SymbolTable, root_category: Category, p_mutation: f32) -> usize {
        self.mutate_with_patch(table, root_category, p_mutation, DEFAULT_PATCH_FRACTION)
    }

    pub fn mutate_with_patch(
        &mut self,
        table: &SymbolTable,
        root_category: Category,
        p_mutation: f32,
        patch_fraction: f32,
    ) -> usize {
        let length = self.genes.len();
        let patch_size = ((length as f32) * patch_fraction).ceil() as usize;
        let patch_size = patch_size.clamp(1, length);
        let patch_start = length - patch_size;

        // Same right-to-left, category-tracked construction as
        // `random_with_patch`: a locus kept as-is still needs recording
        // in `by_category` so loci to its left can reference it, and a
        // locus resampled here must see every later locus's *final*
        // category, mutated or not.
        let mut changed = 0;
        let mut by_category: HashMap<Category, Vec<usize>> = HashMap::new();

        for locus in (0..length).rev() {
            if random_provider::bool(p_mutation) {
                self.genes[locus] = if locus >= patch_start {
                    Self::random_terminal(table, root_category)
                } else {
                    Self::random_standard(table, locus, length, root_category, &by_category)
                };
                changed += 1;
            }
            let category = table.get(self.genes[locus].opcode).category();
            by_category.entry(category).or_default().push(locus);
        }
        changed
    }

    /// The active sub-DAG: loci reachable from `best` by following
    /// argument indices, computed by a straightforward reachability
    /// closure (depth-first, memoized by a visited set — a locus can be
    /// the argument of more than one parent).
    pub fn active_loci(&self) -> Vec<usize> {
        let mut visited = vec![false; self.genes.len()];
        let mut stack = vec![self.best];
        let mut order = Vec::new();

        while let Some(locus) = stack.pop() {
            if visited[locus] {
                continue;
            }
            visited[locus] = true;
            order.push(locus);
            for &arg in &self.genes[locus].args {
                stack.push(arg as usize);
            }
        }

        order
    }

    /// 128-bit hash over the active sub-DAG in evaluation order: each
    /// locus's signature folds in its opcode, its parameter (if any) and
    /// its children's signatures. Two genomes with identical active
    /// semantics produce identical signatures regardless of inactive
    /// loci, since those are never visited.
    pub fn signature(&self) -> u128 {
        let mut memo: Vec<Option<u128>> = vec![None; self.genes.len()];
        self.locus_signature(self.best, &mut memo)
    }

    fn locus_signature(&self, locus: usize, memo: &mut [Option<u128>]) -> u128 {
        if let Some(h) = memo[locus] {
            return h;
        }

        let gene = &self.genes[locus];
        let mut hasher = SignatureHasher::new();
        hasher.write_u64(gene.opcode as u64);
        if let Some(p) = gene.param {
            hasher.write_u64(p.to_bits());
        }
        for &arg in &gene.args {
            let child = self.locus_signature(arg as usize, memo);
            hasher.write_u128(child);
        }

        let h = hasher.finish();
        memo[locus] = Some(h);
        h
    }

    /// Candidate loci for ADF/ADT extraction: active loci whose subtree
    /// has at least two genes. Not required for the basic evolutionary
    /// loop, supports automatically-defined function extraction.
    pub fn blocks(&self) -> Vec<usize> {
        self.active_loci()
            .into_iter()
            .filter(|&locus| Self::subtree_size(&self.genes, locus) >= 2)
            .collect()
    }

    fn subtree_size(genes: &[Gene], locus: usize) -> usize {
        let mut visited = vec![false; genes.len()];
        let mut stack = vec![locus];
        let mut count = 0;
        while let Some(l) = stack.pop() {
            if visited[l] {
                continue;
            }
            visited[l] = true;
            count += 1;
            for &a in &genes[l].args {
                stack.push(a as usize);
            }
        }
        count
    }

    /// Copies out the subtree rooted at `loc` as a standalone genome,
    /// renumbering loci so that argument indices remain forward-pointing
    /// within the extracted copy.
    pub fn get_block(&self, loc: usize) -> Genome {
        let reachable = {
            let mut visited = vec![false; self.genes.len()];
            let mut stack = vec![loc];
            let mut order = Vec::new();
            while let Some(l) = stack.pop() {
                if visited[l] {
                    continue;
                }
                visited[l] = true;
                order.push(l);
                for &a in &self.genes[l].args {
                    stack.push(a as usize);
                }
            }
            order.sort_unstable();
            order
        };

        let remap: std::collections::HashMap<usize, u32> = reachable
            .iter()
            .enumerate()
            .map(|(new_idx, &old_idx)| (old_idx, new_idx as u32))
            .collect();

        let genes = reachable
            .iter()
            .map(|&old_idx| {
                let gene = &self.genes[old_idx];
                let args = gene.args.iter().map(|a| remap[&(*a as usize)]).collect();
                Gene { opcode: gene.opcode, args, param: gene.param }
            })
            .collect();

        Genome { genes, best: remap[&loc] as usize, age: self.age }
    }
}

/// Minimal 128-bit non-cryptographic hash (two FNV-1a-style 64-bit
/// lanes mixed independently). Deterministic across runs and platforms
/// for a fixed input sequence, which is all the signature contract
/// requires — cryptographic strength is not needed here.
struct SignatureHasher {
    lo: u64,
    hi: u64,
}

impl SignatureHasher {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        SignatureHasher { lo: Self::FNV_OFFSET, hi: Self::FNV_OFFSET.rotate_left(32) }
    }

    fn write_u64(&mut self, v: u64) {
        self.lo = (self.lo ^ v).wrapping_mul(Self::FNV_PRIME);
        self.hi = (self.hi ^ v.swap_bytes()).wrapping_mul(Self::FNV_PRIME).rotate_left(17);
    }

    fn write_u128(&mut self, v: u128) {
        self.write_u64((v >> 64) as u64);
        self.write_u64(v as u64);
    }

    fn finish(self) -> u128 {
        ((self.hi as u128) << 64) | (self.lo as u128)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;
    use crate::value::Value;

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
    fn crossover_preserves_length_and_takes_max_age() {
        let t = table();
        let num = Category(1);
        let mut p = Genome::random(&t, 10, num);
        let mut q = Genome::random(&t, 10, num);
        p.age = 3;
        q.age = 7;

        let child = Genome::crossover(&p, &q);
        assert_eq!(child.len(), p.len());
        assert_eq!(child.age(), 7);
    }

    #[test]
    fn mutation_with_zero_rate_is_identity() {
        let t = table();
        let num = Category(1);
        let mut g = Genome::random(&t, 10, num);
        let before = g.genes.clone();
        let changed = g.mutate(&t, num, 0.0);
        assert_eq!(changed, 0);
        assert_eq!(g.genes, before);
    }

    #[test]
    fn every_argument_index_points_forward() {
        let t = table();
        let num = Category(1);
        let g = Genome::random(&t, 20, num);
        for (i, gene) in g.genes().iter().enumerate() {
            for &arg in &gene.args {
                assert!(arg as usize > i);
            }
        }
    }

    #[test]
    fn signature_ignores_inactive_loci() {
        let t = table();
        let num = Category(1);
        let mut g1 = Genome::random(&t, 10, num);
        g1.set_best(0);
        let mut g2 = g1.clone();

        // mutate a locus that is not in the active sub-DAG from best=0.
        let active: std::collections::HashSet<_> = g1.active_loci().into_iter().collect();
        if let Some(inactive) = (0..g1.len()).find(|l| !active.contains(l)) {
            g2.genes[inactive] = Gene::new_terminal(1, None);
            assert_eq!(g1.signature(), g2.signature());
        }
    }
}
