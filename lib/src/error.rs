use thiserror::Error;

/// Errors that can occur while balancing an equation
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum BalanceError {
    /// A formula could not be parsed
    #[error("invalid formula `{formula}` at position {position}: {reason}")]
    Parse {
        formula: String,
        /// Byte offset of the offending character
        position: usize,
        reason: ParseFault,
    },
    /// The molecule lists do not form a matrix that can be solved
    #[error("{0}")]
    Structural(StructuralFault),
    /// Only the all-zero vector satisfies the system
    #[error("no balance exists: {molecules} molecules, but the element matrix has rank {rank}")]
    NoSolution { molecules: usize, rank: usize },
    /// The solution does not split into positive reactants and positive products
    #[error("{0}")]
    Sign(SignFault),
}

impl BalanceError {
    /// Returns the kind of the error without its details
    pub fn kind(&self) -> ErrorKind {
        match self {
            BalanceError::Parse { .. } => ErrorKind::Parse,
            BalanceError::Structural(_) => ErrorKind::Structural,
            BalanceError::NoSolution { .. } => ErrorKind::NoSolution,
            BalanceError::Sign(_) => ErrorKind::Sign,
        }
    }
}

/// Kind of a [`BalanceError`]
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    Parse,
    Structural,
    NoSolution,
    Sign,
}

/// Reason a formula was rejected by the parser
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Error)]
pub enum ParseFault {
    #[error("formula is empty")]
    Empty,
    #[error("unexpected character `{0}`")]
    UnexpectedCharacter(char),
    /// An element symbol must start with an uppercase letter
    #[error("token starts with lowercase letter `{0}`")]
    LowercaseToken(char),
    #[error("`(` is never closed")]
    UnclosedGroup,
    #[error("`)` has no matching `(`")]
    UnopenedGroup,
    #[error("group contains no atoms")]
    EmptyGroup,
    #[error("count or multiplier is zero")]
    ZeroCount,
    #[error("atom count overflows")]
    CountOverflow,
}

/// Reason the stoichiometric matrix could not be built
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Error)]
pub enum StructuralFault {
    #[error("at least one reactant is required")]
    NoReactants,
    #[error("at least one product is required")]
    NoProducts,
    #[error("the molecules contain no elements")]
    NoElements,
    #[error("molecule {0} contains no elements")]
    EmptyMolecule(usize),
    #[error("reactant count {reactants} does not split {molecules} molecules into two sides")]
    InvalidSplit { reactants: usize, molecules: usize },
}

/// Reason a null-space vector could not be turned into coefficients
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Error)]
pub enum SignFault {
    /// The molecule does not take part in the reaction
    #[error("molecule {0} has a zero coefficient")]
    ZeroCoefficient(usize),
    /// The molecule would have to move to the other side of the arrow
    #[error("molecule {0} has a coefficient on the wrong side of the equation")]
    MixedSigns(usize),
}

pub type Result<T> = std::result::Result<T, BalanceError>;
