use crate::category::Category;
use crate::value::Value;
use smallvec::SmallVec;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;
use vita_core::random_provider;

/// Upper bound on a function symbol's arity. Sufficient for the widest
/// primitive a host library defines; genes store argument indices inline
/// up to this many slots instead of heap-allocating per locus.
pub const K_ARGS: usize = 4;

pub type ArgCategories = SmallVec<[Category; K_ARGS]>;

/// The function a symbol evaluates: either a stateless n-ary function
/// over already-evaluated argument `Value`s, or a terminal supplier that
/// may read an embedded parameter (parametric terminals, e.g. ephemeral
/// random constants).
#[derive(Clone)]
pub enum SymbolFn {
    Function(Arc<dyn Fn(&[Value]) -> Value + Send + Sync>),
    Terminal(Arc<dyn Fn(Option<f64>) -> Value + Send + Sync>),
}

impl Debug for SymbolFn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SymbolFn::Function(_) => write!(f, "Function(..)"),
            SymbolFn::Terminal(_) => write!(f, "Terminal(..)"),
        }
    }
}

/// Immutable after registration. `opcode` is assigned sequentially by the
/// owning `SymbolTable` and is a process-wide-unique identifier for the
/// lifetime of that table.
#[derive(Clone, Debug)]
pub struct Symbol {
    name: Arc<str>,
    opcode: u32,
    category: Category,
    arg_categories: ArgCategories,
    associative: bool,
    parametric: bool,
    weight: f32,
    func: SymbolFn,
}

impl Symbol {
    pub fn terminal(
        name: impl Into<Arc<str>>,
        category: Category,
        weight: f32,
        func: impl Fn(Option<f64>) -> Value + Send + Sync + 'static,
    ) -> SymbolBuilder {
        SymbolBuilder {
            name: name.into(),
            category,
            arg_categories: ArgCategories::new(),
            associative: false,
            parametric: false,
            weight,
            func: SymbolFn::Terminal(Arc::new(func)),
        }
    }

    pub fn function(
        name: impl Into<Arc<str>>,
        category: Category,
        arg_categories: impl Into<ArgCategories>,
        weight: f32,
        func: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) -> SymbolBuilder {
        SymbolBuilder {
            name: name.into(),
            category,
            arg_categories: arg_categories.into(),
            associative: false,
            parametric: false,
            weight,
            func: SymbolFn::Function(Arc::new(func)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn opcode(&self) -> u32 {
        self.opcode
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn arity(&self) -> usize {
        self.arg_categories.len()
    }

    pub fn arg_category(&self, i: usize) -> Category {
        self.arg_categories[i]
    }

    pub fn is_terminal(&self) -> bool {
        self.arity() == 0
    }

    pub fn is_associative(&self) -> bool {
        self.associative
    }

    pub fn is_parametric(&self) -> bool {
        self.parametric
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// `params` holds the parametric terminal's embedded value, `None`
    /// for anything else.
    pub fn eval(&self, args: &[Value], param: Option<f64>) -> Value {
        match &self.func {
            SymbolFn::Function(f) => {
                if args.iter().any(Value::is_void) {
                    Value::Void
                } else {
                    f(args)
                }
            }
            SymbolFn::Terminal(f) => f(param),
        }
    }

    /// Sampled once at gene-creation time for parametric terminals.
    pub fn init_param(&self) -> Option<f64> {
        if self.parametric { Some(random_provider::range(-1.0..1.0)) } else { None }
    }

    /// Constraint-violation contribution at this locus; default 0 means
    /// most symbols never participate in a penalty walk.
    pub fn penalty_contribution(&self, _args: &[Value]) -> f64 {
        0.0
    }
}

pub struct SymbolBuilder {
    name: Arc<str>,
    category: Category,
    arg_categories: ArgCategories,
    associative: bool,
    parametric: bool,
    weight: f32,
    func: SymbolFn,
}

impl SymbolBuilder {
    pub fn associative(mut self, yes: bool) -> Self {
        self.associative = yes;
        self
    }

    pub fn parametric(mut self, yes: bool) -> Self {
        self.parametric = yes;
        self
    }

    fn build(self, opcode: u32) -> Symbol {
        Symbol {
            name: self.name,
            opcode,
            category: self.category,
            arg_categories: self.arg_categories,
            associative: self.associative,
            parametric: self.parametric,
            weight: self.weight,
            func: self.func,
        }
    }
}

/// Owns opcode assignment and roulette selection. Explicit, per-problem
/// state rather than a global singleton, so multi-problem / multi-run /
/// test isolation needs no shared mutable state.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self { symbols: Vec::new() }
    }

    /// Registers `symbol`, assigning the next opcode. Opcode uniqueness
    /// is guaranteed by construction: it is simply the insertion index.
    pub fn insert(&mut self, symbol: SymbolBuilder) -> u32 {
        let opcode = self.symbols.len() as u32;
        self.symbols.push(symbol.build(opcode));
        opcode
    }

    pub fn get(&self, opcode: u32) -> &Symbol {
        &self.symbols[opcode as usize]
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    fn weighted_choice<'a>(candidates: impl Iterator<Item = &'a Symbol>) -> Option<u32> {
        let pool: Vec<&Symbol> = candidates.collect();
        if pool.is_empty() {
            return None;
        }

        let total: f32 = pool.iter().map(|s| s.weight().max(0.0)).sum();
        if total <= 0.0 {
            return Some(pool[random_provider::range(0..pool.len())].opcode());
        }

        let mut pick = random_provider::range(0.0..total);
        for s in &pool {
            pick -= s.weight().max(0.0);
            if pick <= 0.0 {
                return Some(s.opcode());
            }
        }
        Some(pool.last().unwrap().opcode())
    }

    /// Functions whose output category matches `category`, drawn with
    /// probability proportional to `weight`.
    pub fn roulette_function(&self, category: Category) -> Option<u32> {
        Self::weighted_choice(
            self.symbols.iter().filter(|s| !s.is_terminal() && s.category() == category),
        )
    }

    /// Same as [`Self::roulette_function`] but restricted to terminals
    /// (arity 0); function/terminal partitions are kept disjoint so a
    /// caller can force a terminal where genome position demands one.
    pub fn roulette_terminal(&self, category: Category) -> Option<u32> {
        Self::weighted_choice(
            self.symbols.iter().filter(|s| s.is_terminal() && s.category() == category),
        )
    }

    /// Either partition, whichever a compatible symbol belongs to.
    pub fn roulette(&self, category: Category) -> Option<u32> {
        Self::weighted_choice(self.symbols.iter().filter(|s| s.category() == category))
    }

    /// The GP closure property: every function's every argument category
    /// must have at least one compatible terminal, or initialization
    /// cannot guarantee termination of a random genome fill.
    pub fn enough_terminals(&self) -> bool {
        self.symbols
            .iter()
            .filter(|s| !s.is_terminal())
            .all(|f| (0..f.arity()).all(|i| self.roulette_terminal(f.arg_category(i)).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn opcodes_are_sequential_and_unique() {
        let t = table();
        assert_eq!(t.get(0).opcode(), 0);
        assert_eq!(t.get(1).opcode(), 1);
    }

    #[test]
    fn enough_terminals_detects_closure() {
        let t = table();
        assert!(t.enough_terminals());

        let mut broken = SymbolTable::new();
        let num = Category(1);
        let other = Category(2);
        broken.insert(Symbol::function("add", num, [num, other], 1.0, |_| Value::Void));
        broken.insert(Symbol::terminal("x", num, 1.0, |_| Value::Double(1.0)));
        assert!(!broken.enough_terminals());
    }

    #[test]
    fn void_argument_propagates() {
        let t = table();
        let add = t.get(0);
        assert_eq!(add.eval(&[Value::Void, Value::Double(1.0)], None), Value::Void);
    }
}
