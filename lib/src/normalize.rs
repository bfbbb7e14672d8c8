use crate::error::{BalanceError, Result, SignFault, StructuralFault};
use crate::matrix::StoichiometricMatrix;
use malachite::num::arithmetic::traits::{Gcd, Lcm};
use malachite::num::basic::traits::{One, Zero};
use malachite::{Natural, Rational};
use std::cmp::Ordering;

/// Stoichiometric coefficients of an equation, reactants followed by products
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Coefficients {
    values: Vec<Natural>,
    reactant_count: usize,
}
impl Coefficients {
    /// All coefficients in equation order
    pub fn values(&self) -> &[Natural] {
        &self.values
    }

    /// Coefficients of the reactants
    pub fn reactants(&self) -> &[Natural] {
        &self.values[..self.reactant_count]
    }

    /// Coefficients of the products
    pub fn products(&self) -> &[Natural] {
        &self.values[self.reactant_count..]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns whether every element of the matrix has the same atom count on both sides
    pub fn conserves(&self, matrix: &StoichiometricMatrix) -> bool {
        if matrix.column_count() != self.values.len() || matrix.reactant_count() != self.reactant_count {
            return false;
        }

        matrix.rows().iter().all(|row| {
            let mut left = Natural::ZERO;
            let mut right = Natural::ZERO;
            for (col, (&count, coeff)) in row.iter().zip(self.values.iter()).enumerate() {
                let atoms = Natural::from(count) * coeff;
                if col < self.reactant_count {
                    left += atoms;
                } else {
                    right += atoms;
                }
            }
            left == right
        })
    }

    pub fn into_vec(self) -> Vec<Natural> {
        self.values
    }
}

/// Scales a null-space vector to the smallest positive integer coefficients
/// # Arguments
/// * `vector` - null-space vector, reactants first
/// * `reactant_count` - number of leading entries that belong to reactants
/// # Returns
/// * `Ok` - coefficients with a greatest common divisor of 1
/// * `Err` - [`BalanceError::Sign`] if a molecule drops out or sits on the wrong side of the equation
/// # Example
/// ```
/// use chembalance::normalize;
/// use malachite::{Natural, Rational};
///
/// let vector = vec![Rational::from(-1), Rational::from_signeds(-1, 2), Rational::from(1)];
/// let coefficients = normalize(&vector, 2).unwrap();
///
/// assert_eq!(coefficients.values(), [Natural::from(2u32), Natural::from(1u32), Natural::from(2u32)]);
/// ```
pub fn normalize(vector: &[Rational], reactant_count: usize) -> Result<Coefficients> {
    if reactant_count == 0 || reactant_count >= vector.len() {
        return Err(BalanceError::Structural(StructuralFault::InvalidSplit {
            reactants: reactant_count,
            molecules: vector.len(),
        }));
    }

    // multiply solutions by the least common multiple of denominators to get integer solutions
    let mut lcm = Natural::ONE;
    for x in vector.iter() {
        lcm = lcm.lcm(x.denominator_ref());
    }
    let scaled: Vec<(Ordering, Natural)> = vector
        .iter()
        .map(|x| (x.cmp(&Rational::ZERO), x.numerator_ref() * (&lcm / x.denominator_ref())))
        .collect();

    if let Some(zero) = scaled.iter().position(|(sign, _)| *sign == Ordering::Equal) {
        return Err(BalanceError::Sign(SignFault::ZeroCoefficient(zero)));
    }

    // reactants and products must have opposite signs, whichever way round they come out
    let reactant_sign = scaled[0].0;
    let product_sign = reactant_sign.reverse();
    let misplaced = scaled.iter().enumerate().position(|(i, (sign, _))| {
        *sign != if i < reactant_count { reactant_sign } else { product_sign }
    });
    if let Some(misplaced) = misplaced {
        return Err(BalanceError::Sign(SignFault::MixedSigns(misplaced)));
    }

    let gcd = scaled
        .iter()
        .fold(Natural::ZERO, |gcd, (_, magnitude)| gcd.gcd(magnitude));
    let values: Vec<Natural> = scaled.into_iter().map(|(_, magnitude)| magnitude / &gcd).collect();
    log::debug!("coefficients {:?} (lcm {}, gcd {})", values, lcm, gcd);

    Ok(Coefficients { values, reactant_count })
}
