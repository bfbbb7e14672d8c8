//! Balancing of chemical equations.
//!
//! Formulas are parsed into atom counts, the counts form a matrix with one row per element and one
//! column per molecule, and the null space of that matrix is computed with exact rational
//! arithmetic. The null-space vector is then scaled to the smallest positive integers.
//!
//! ```
//! use chembalance::balance_equation;
//!
//! let equation = balance_equation(&["CH3CH2OH", "O2"], &["CO2", "H2O"]).unwrap();
//! assert_eq!(equation, "CH3CH2OH + 3O2 --> 2CO2 + 3H2O");
//! ```

mod equation;
mod error;
mod format;
mod formula;
mod matrix;
mod normalize;
mod nullspace;

pub use equation::{balance, balance_equation, balance_equation_with_style, Equation};
pub use error::{BalanceError, ErrorKind, ParseFault, Result, SignFault, StructuralFault};
pub use format::{format, format_with_style, EquationStyle};
pub use formula::{parse, AtomVector, Compound};
pub use matrix::{build, ElementUniverse, StoichiometricMatrix};
pub use normalize::{normalize, Coefficients};
pub use nullspace::{null_space, reduced_row_echelon, solve, NullSpaceVector, RowEchelon};

pub use malachite::{Natural, Rational};
