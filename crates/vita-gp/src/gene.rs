use crate::symbol::K_ARGS;
use smallvec::SmallVec;

/// A single locus of an MEP genome: `(symbol, argument indices, optional
/// parameter)`. For a function gene, `args[i]` is an index strictly
/// later in the genome (the acyclicity invariant) whose symbol has the
/// category the function's `i`-th argument slot demands. For a
/// parametric terminal, `param` holds the value sampled at creation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gene {
    pub opcode: u32,
    pub args: SmallVec<[u32; K_ARGS]>,
    pub param: Option<f64>,
}

impl Gene {
    pub fn new_terminal(opcode: u32, param: Option<f64>) -> Self {
        Gene { opcode, args: SmallVec::new(), param }
    }

    pub fn new_function(opcode: u32, args: impl Into<SmallVec<[u32; K_ARGS]>>) -> Self {
        Gene { opcode, args: args.into(), param: None }
    }

    pub fn is_terminal(&self) -> bool {
        self.args.is_empty()
    }
}
