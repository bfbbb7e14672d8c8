use crate::error::Result;
use crate::format::{format_with_style, EquationStyle};
use crate::formula::Compound;
use crate::matrix::{build, ElementUniverse, StoichiometricMatrix};
use crate::normalize::{normalize, Coefficients};
use crate::nullspace::solve;
use malachite::Natural;
use std::fmt::{Display, Formatter};

/// A struct that represents a chemical equation (e.g. H2 + O2 --> H2O)
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Equation {
    /// A vector of reactants
    reactants: Vec<Compound>,
    /// A vector of products
    products: Vec<Compound>,
    /// Stoichiometric coefficients, set by [`Equation::solve`]
    solution: Option<Coefficients>,
}
impl Equation {
    /// Create new equation from reactant and product formulas
    /// # Arguments
    /// * `reactants` - formulas on the left side of the arrow
    /// * `products` - formulas on the right side of the arrow
    /// # Returns
    /// * `Ok` - equation
    /// * `Err` - the first formula that could not be parsed
    /// # Example
    /// ```
    /// use chembalance::{Compound, Equation};
    ///
    /// let equation = Equation::new(&["H2", "O2"], &["H2O"]).unwrap();
    ///
    /// assert_eq!(equation.reactants()[1], Compound::from_formula("O2").unwrap());
    /// assert_eq!(equation.products().len(), 1);
    /// assert!(equation.solution().is_none());
    /// ```
    pub fn new<R, P>(reactants: &[R], products: &[P]) -> Result<Self>
    where
        R: AsRef<str>,
        P: AsRef<str>,
    {
        let reactants = reactants
            .iter()
            .map(|formula| Compound::from_formula(formula.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let products = products
            .iter()
            .map(|formula| Compound::from_formula(formula.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            reactants,
            products,
            solution: None,
        })
    }

    pub fn reactants(&self) -> &[Compound] {
        &self.reactants
    }

    pub fn products(&self) -> &[Compound] {
        &self.products
    }

    /// Builds the element universe and the stoichiometric matrix of the equation
    pub fn matrix(&self) -> Result<(ElementUniverse, StoichiometricMatrix)> {
        build(
            self.reactants.iter().map(Compound::elements),
            self.products.iter().map(Compound::elements),
        )
    }

    /// Computes the coefficients without storing them in the equation
    pub fn coefficients(&self) -> Result<Coefficients> {
        let (_, matrix) = self.matrix()?;
        let vector = solve(&matrix)?;
        let coefficients = normalize(&vector, matrix.reactant_count())?;
        debug_assert!(coefficients.conserves(&matrix));

        Ok(coefficients)
    }

    /// Solves the equation
    /// # Returns
    /// * `Ok` - if the equation was solved successfully
    /// * `Err` - if the equation was not solved successfully
    pub fn solve(&mut self) -> Result<()> {
        self.solution = Some(self.coefficients()?);
        Ok(())
    }

    /// Returns the coefficients if the equation was solved
    pub fn solution(&self) -> Option<&Coefficients> {
        self.solution.as_ref()
    }

    /// Returns the solved equation as a string
    /// # Returns
    /// * `Some` - balanced equation, e.g. `2H2 + O2 --> 2H2O`
    /// * `None` - if the equation was not solved yet
    /// # Example
    /// ```
    /// use chembalance::Equation;
    ///
    /// let mut equation = Equation::new(&["H2", "O2"], &["H2O"]).unwrap();
    /// assert_eq!(equation.solution_str(), None);
    ///
    /// equation.solve().unwrap();
    /// assert_eq!(equation.solution_str().unwrap(), "2H2 + O2 --> 2H2O");
    /// ```
    pub fn solution_str(&self) -> Option<String> {
        self.solution_str_with_style(&EquationStyle::default())
    }

    /// Same as [`Equation::solution_str`], with custom tokens
    pub fn solution_str_with_style(&self, style: &EquationStyle) -> Option<String> {
        let solution = self.solution.as_ref()?;
        Some(self.render(solution, style))
    }

    fn render(&self, solution: &Coefficients, style: &EquationStyle) -> String {
        let reactants: Vec<&str> = self.reactants.iter().map(Compound::original_str).collect();
        let products: Vec<&str> = self.products.iter().map(Compound::original_str).collect();

        format_with_style(&reactants, solution.reactants(), &products, solution.products(), style)
    }
}
impl Display for Equation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.solution_str() {
            Some(solution) => write!(f, "{}", solution),
            None => {
                let side = |compounds: &[Compound]| {
                    compounds.iter().map(Compound::original_str).collect::<Vec<_>>().join(" + ")
                };
                write!(f, "{} {} {}", side(&self.reactants), EquationStyle::default().arrow, side(&self.products))
            },
        }
    }
}

/// Computes the smallest positive integer coefficients of an equation
/// # Example
/// ```
/// use chembalance::balance;
/// use malachite::Natural;
///
/// let coefficients = balance(&["CH4", "Cl2"], &["CH3Cl", "H2"]).unwrap();
/// let expected: Vec<Natural> = [2u32, 1, 2, 1].into_iter().map(Natural::from).collect();
///
/// assert_eq!(coefficients, expected);
/// ```
pub fn balance<R, P>(reactants: &[R], products: &[P]) -> Result<Vec<Natural>>
where
    R: AsRef<str>,
    P: AsRef<str>,
{
    let equation = Equation::new(reactants, products)?;
    Ok(equation.coefficients()?.into_vec())
}

/// Balances an equation and renders it
/// # Example
/// ```
/// use chembalance::balance_equation;
///
/// let equation = balance_equation(&["KOH", "Co3(PO4)2"], &["K3PO4", "Co(OH)2"]).unwrap();
///
/// assert_eq!(equation, "6KOH + Co3(PO4)2 --> 2K3PO4 + 3Co(OH)2");
/// ```
pub fn balance_equation<R, P>(reactants: &[R], products: &[P]) -> Result<String>
where
    R: AsRef<str>,
    P: AsRef<str>,
{
    balance_equation_with_style(reactants, products, &EquationStyle::default())
}

/// Same as [`balance_equation`], with custom tokens
pub fn balance_equation_with_style<R, P>(reactants: &[R], products: &[P], style: &EquationStyle) -> Result<String>
where
    R: AsRef<str>,
    P: AsRef<str>,
{
    let equation = Equation::new(reactants, products)?;
    let coefficients = equation.coefficients()?;
    Ok(equation.render(&coefficients, style))
}





#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BalanceError, ErrorKind, ParseFault, SignFault, StructuralFault};

    fn test_equation(reactants: &[&str], products: &[&str], solved_equation: &str) {
        let mut eq = Equation::new(reactants, products).unwrap();
        eq.solve().unwrap();
        let solution = eq.solution_str().unwrap();

        assert_eq!(solution, solved_equation);
    }


    #[test]
    fn eq1() {
        test_equation(&["CH4", "Cl2"], &["CH3Cl", "H2"], "2CH4 + Cl2 --> 2CH3Cl + H2");
    }

    #[test]
    fn eq2() {
        test_equation(&["KOH", "Co3(PO4)2"], &["K3PO4", "Co(OH)2"], "6KOH + Co3(PO4)2 --> 2K3PO4 + 3Co(OH)2");
    }

    #[test]
    fn eq3() {
        test_equation(&["CH3CH2OH", "O2"], &["CO2", "H2O"], "CH3CH2OH + 3O2 --> 2CO2 + 3H2O");
    }

    #[test]
    fn eq4() {
        test_equation(&["P4O10", "H2O"], &["H3PO4"], "P4O10 + 6H2O --> 4H3PO4");
    }

    #[test]
    fn eq5() {
        test_equation(&["N2", "H2"], &["NH3"], "N2 + 3H2 --> 2NH3");
    }

    #[test]
    fn eq6() {
        test_equation(&["CH4", "Cl2"], &["CCl4", "H2"], "CH4 + 2Cl2 --> CCl4 + 2H2");
    }

    #[test]
    fn eq7() {
        test_equation(&["Fe2(SO4)3", "KOH"], &["K2SO4", "Fe(OH)3"], "Fe2(SO4)3 + 6KOH --> 3K2SO4 + 2Fe(OH)3");
    }

    #[test]
    fn eq8() {
        test_equation(&["KClO3"], &["KClO4", "KCl"], "4KClO3 --> 3KClO4 + KCl");
    }

    #[test]
    fn eq9() {
        test_equation(&["C57H110O6", "O2"], &["CO2", "H2O"], "2C57H110O6 + 163O2 --> 114CO2 + 110H2O");
    }

    #[test]
    fn eq10() {
        test_equation(
            &["K4(Fe(SCN)6)", "K2Cr2O7", "H2SO4"],
            &["Fe2(SO4)3", "Cr2(SO4)3", "CO2", "H2O", "K2SO4", "KNO3"],
            "6K4(Fe(SCN)6) + 97K2Cr2O7 + 355H2SO4 --> 3Fe2(SO4)3 + 97Cr2(SO4)3 + 36CO2 + 355H2O + 91K2SO4 + 36KNO3",
        );
    }

    #[test]
    fn eq11() {
        test_equation(&["Cu", "HNO3"], &["Cu(NO3)2", "NO", "H2O"], "3Cu + 8HNO3 --> 3Cu(NO3)2 + 2NO + 4H2O");
    }

    #[test]
    fn same_molecule_on_both_sides() {
        test_equation(&["H2"], &["H2"], "H2 --> H2");
    }

    #[test]
    fn coefficients_leave_equation_unsolved() {
        let mut equation = Equation::new(&["Al", "HCl"], &["AlCl3", "H2"]).unwrap();
        let coefficients = equation.coefficients().unwrap();
        assert_eq!(coefficients.values(), [2u32, 6, 2, 3].map(Natural::from));
        assert!(equation.solution().is_none());

        equation.solve().unwrap();
        assert_eq!(equation.solution(), Some(&coefficients));
    }

    #[test]
    fn matrix_uses_compound_atoms() {
        let equation = Equation::new(&["KOH", "Co3(PO4)2"], &["K3PO4", "Co(OH)2"]).unwrap();
        let (universe, matrix) = equation.matrix().unwrap();
        assert_eq!(universe.symbols(), ["H", "K", "O", "Co", "P"]);
        assert_eq!(matrix.column_count(), 4);
        assert_eq!(matrix.reactant_count(), 2);
        assert_eq!(matrix.rows()[2], [1, 8, 4, 2]);
    }

    #[test]
    fn balanced_string_is_never_empty() {
        let equation = balance_equation(&["Na"], &["Na"]).unwrap();
        assert_eq!(equation, "Na --> Na");
        assert_eq!(balance(&["Na"], &["Na"]).unwrap(), [Natural::from(1u32), Natural::from(1u32)]);
    }

    #[test]
    fn unsolved_equation_display() {
        let equation = Equation::new(&["H2", "O2"], &["H2O"]).unwrap();
        assert_eq!(equation.to_string(), "H2 + O2 --> H2O");
    }

    #[test]
    fn solved_equation_display() {
        let mut equation = Equation::new(&["Al", "HCl"], &["AlCl3", "H2"]).unwrap();
        equation.solve().unwrap();
        assert_eq!(equation.to_string(), "2Al + 6HCl --> 2AlCl3 + 3H2");
    }

    #[test]
    fn custom_style() {
        let style = EquationStyle { arrow: String::from("=") };
        let equation = balance_equation_with_style(&["Mg", "N2"], &["Mg3N2"], &style).unwrap();
        assert_eq!(equation, "3Mg + N2 = Mg3N2");
    }

    #[test]
    fn no_solution() {
        let err = balance_equation(&["H2"], &["O2"]).unwrap_err();
        assert_eq!(err, BalanceError::NoSolution { molecules: 2, rank: 2 });
        assert_eq!(err.kind(), ErrorKind::NoSolution);
    }

    #[test]
    fn parse_error_is_returned_unchanged() {
        let err = balance_equation(&["H2", "O2"], &["H2o"]).unwrap_err();
        assert_eq!(err, BalanceError::Parse {
            formula: String::from("H2o"),
            position: 2,
            reason: ParseFault::LowercaseToken('o'),
        });
    }

    #[test]
    fn empty_side() {
        let err = balance(&["H2"], &[] as &[&str]).unwrap_err();
        assert_eq!(err, BalanceError::Structural(StructuralFault::NoProducts));
    }

    #[test]
    fn molecule_drops_out() {
        // oxygen only appears on the left, so O2 gets a zero coefficient
        let err = balance(&["H2", "O2"], &["H2"]).unwrap_err();
        assert_eq!(err, BalanceError::Sign(SignFault::ZeroCoefficient(1)));
        assert_eq!(err.kind(), ErrorKind::Sign);
    }

    #[test]
    fn molecule_on_wrong_side() {
        // the only balance is 2H2O2 --> 2H2O + O2, so H2O belongs on the right
        let err = balance(&["H2O2", "H2O"], &["O2"]).unwrap_err();
        assert_eq!(err, BalanceError::Sign(SignFault::MixedSigns(1)));
    }
}
