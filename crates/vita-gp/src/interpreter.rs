use crate::genome::Genome;
use crate::symbol::SymbolTable;
use crate::value::Value;

/// Lazily evaluates a genome's active sub-DAG, memoizing each locus within
/// a single invocation so a value referenced as an argument by more than
/// one active locus is computed once. The memo is a flat array sized to
/// the genome, reset (not reallocated) between invocations of the same
/// genome length, matching the resource discipline of the evaluation
/// loop — no unbounded growth across generations.
pub struct Interpreter {
    memo: Vec<Option<Value>>,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter { memo: Vec::new() }
    }

    /// Evaluates `genome.best()` against `table`, demand-driving
    /// evaluation of whichever loci the active sub-DAG actually touches.
    pub fn eval(&mut self, table: &SymbolTable, genome: &Genome) -> Value {
        self.reset_for(genome.len());
        self.eval_locus(table, genome, genome.best())
    }

    /// Constraint-violation total over the active sub-DAG, summing each
    /// visited symbol's `penalty_contribution`. Default-0 symbols make
    /// this 0 unless the symbol set defines constrained primitives.
    pub fn penalty(&mut self, table: &SymbolTable, genome: &Genome) -> f64 {
        self.reset_for(genome.len());
        let mut total = 0.0;
        let mut visited = vec![false; genome.len()];
        self.penalty_locus(table, genome, genome.best(), &mut visited, &mut total);
        total
    }

    fn reset_for(&mut self, len: usize) {
        if self.memo.len() != len {
            self.memo = vec![None; len];
        } else {
            self.memo.iter_mut().for_each(|slot| *slot = None);
        }
    }

    fn eval_locus(&mut self, table: &SymbolTable, genome: &Genome, locus: usize) -> Value {
        if let Some(v) = &self.memo[locus] {
            return v.clone();
        }

        let gene = genome.gene(locus);
        let symbol = table.get(gene.opcode);
        let value = if gene.is_terminal() {
            symbol.eval(&[], gene.param)
        } else {
            let args: Vec<Value> =
                gene.args.iter().map(|&a| self.eval_locus(table, genome, a as usize)).collect();
            symbol.eval(&args, None)
        };

        self.memo[locus] = Some(value.clone());
        value
    }

    fn penalty_locus(
        &mut self,
        table: &SymbolTable,
        genome: &Genome,
        locus: usize,
        visited: &mut [bool],
        total: &mut f64,
    ) {
        if visited[locus] {
            return;
        }
        visited[locus] = true;

        let gene = genome.gene(locus);
        let symbol = table.get(gene.opcode);
        let args: Vec<Value> =
            gene.args.iter().map(|&a| self.eval_locus(table, genome, a as usize)).collect();
        *total += symbol.penalty_contribution(&args);

        for &arg in &gene.args {
            self.penalty_locus(table, genome, arg as usize, visited, total);
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::symbol::Symbol;

    fn table() -> SymbolTable {
        let mut t = SymbolTable::new();
        let num = Category(1);
        t.insert(Symbol::function("add", num, [num, num], 1.0, |a| {
            Value::from_finite(a[0].as_double().unwrap() + a[1].as_double().unwrap())
        }));
        t.insert(Symbol::terminal("x", num, 1.0, |_| Value::Double(2.0)));
        t
    }

    #[test]
    fn evaluates_a_constant_genome() {
        let t = table();
        let num = Category(1);
        let g = Genome::random(&t, 10, num);
        let mut interp = Interpreter::new();
        let v = interp.eval(&t, &g);
        assert!(v.as_double().is_some());
    }

    #[test]
    fn void_argument_yields_void_result() {
        let t = table();
        let num = Category(1);
        let mut g = Genome::random(&t, 10, num);
        g.set_best(0);
        let mut interp = Interpreter::new();
        let _ = interp.eval(&t, &g);
        assert_eq!(interp.memo.len(), g.len());
    }
}
