use crate::error::{BalanceError, Result, StructuralFault};
use crate::formula::AtomVector;

/// Ordered set of the element symbols used in an equation (one per matrix row)
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ElementUniverse {
    symbols: Vec<String>,
}
impl ElementUniverse {
    /// Collects the symbols of all molecules in first-seen order
    pub fn from_molecules<'a, I>(molecules: I) -> Self
    where
        I: IntoIterator<Item = &'a AtomVector>,
    {
        let mut symbols: Vec<String> = Vec::new();
        for molecule in molecules {
            for symbol in molecule.symbols() {
                if !symbols.iter().any(|s| s == symbol) {
                    symbols.push(symbol.to_string());
                }
            }
        }
        Self { symbols }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Row index of the element
    pub fn position(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Atom counts of every element (rows) in every molecule (columns)
///
/// Columns hold the reactants followed by the products, both with non-negative counts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoichiometricMatrix {
    rows: Vec<Vec<u64>>,
    columns: usize,
    reactant_count: usize,
}
impl StoichiometricMatrix {
    /// Rows of the matrix, one per element
    pub fn rows(&self) -> &[Vec<u64>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of molecules
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Number of leading columns that belong to reactants
    pub fn reactant_count(&self) -> usize {
        self.reactant_count
    }

    pub fn get(&self, row: usize, col: usize) -> u64 {
        self.rows[row][col]
    }
}

/// Builds the element universe and the stoichiometric matrix of an equation
/// # Arguments
/// * `reactants` - atom counts of the reactants in equation order (any iterator of `&AtomVector`)
/// * `products` - atom counts of the products in equation order
/// # Returns
/// * `Ok` - universe and matrix with one column per molecule (reactants first)
/// * `Err` - [`BalanceError::Structural`] if a side is empty or a molecule has no atoms
/// # Example
/// ```
/// use chembalance::{build, parse};
///
/// let reactants = [parse("H2").unwrap(), parse("O2").unwrap()];
/// let products = [parse("H2O").unwrap()];
/// let (universe, matrix) = build(&reactants, &products).unwrap();
///
/// assert_eq!(universe.symbols(), ["H", "O"]);
/// assert_eq!(matrix.rows(), [vec![2, 0, 2], vec![0, 2, 1]]);
/// ```
pub fn build<'a, R, P>(reactants: R, products: P) -> Result<(ElementUniverse, StoichiometricMatrix)>
where
    R: IntoIterator<Item = &'a AtomVector>,
    P: IntoIterator<Item = &'a AtomVector>,
{
    let reactants: Vec<&AtomVector> = reactants.into_iter().collect();
    let products: Vec<&AtomVector> = products.into_iter().collect();

    let universe = ElementUniverse::from_molecules(reactants.iter().chain(products.iter()).copied());
    if universe.is_empty() {
        return Err(BalanceError::Structural(StructuralFault::NoElements));
    }
    if reactants.is_empty() {
        return Err(BalanceError::Structural(StructuralFault::NoReactants));
    }
    if products.is_empty() {
        return Err(BalanceError::Structural(StructuralFault::NoProducts));
    }

    let reactant_count = reactants.len();
    let molecules: Vec<&AtomVector> = reactants.into_iter().chain(products).collect();
    if let Some(empty) = molecules.iter().position(|m| m.is_empty()) {
        return Err(BalanceError::Structural(StructuralFault::EmptyMolecule(empty)));
    }

    let rows = universe
        .symbols()
        .iter()
        .map(|symbol| molecules.iter().map(|molecule| molecule.get(symbol)).collect())
        .collect();

    let matrix = StoichiometricMatrix {
        rows,
        columns: molecules.len(),
        reactant_count,
    };
    log::debug!("built {}x{} matrix over elements {:?}", matrix.row_count(), matrix.column_count(), universe.symbols());

    Ok((universe, matrix))
}





#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::parse;

    fn atoms(formulas: &[&str]) -> Vec<AtomVector> {
        formulas.iter().map(|f| parse(f).unwrap()).collect()
    }


    #[test]
    fn universe_in_first_seen_order() {
        let (universe, _) = build(&atoms(&["KOH", "Co3(PO4)2"]), &atoms(&["K3PO4", "Co(OH)2"])).unwrap();
        // within one molecule the symbols come alphabetically
        assert_eq!(universe.symbols(), ["H", "K", "O", "Co", "P"]);
        assert_eq!(universe.position("Co"), Some(3));
        assert_eq!(universe.position("Fe"), None);
    }

    #[test]
    fn columns_follow_input_order() {
        let (universe, matrix) = build(&atoms(&["CH4", "Cl2"]), &atoms(&["CH3Cl", "H2"])).unwrap();
        assert_eq!(universe.symbols(), ["C", "H", "Cl"]);
        assert_eq!(matrix.rows(), [vec![1, 0, 1, 0], vec![4, 0, 3, 2], vec![0, 2, 1, 0]]);
        assert_eq!(matrix.column_count(), 4);
        assert_eq!(matrix.reactant_count(), 2);
        assert_eq!(matrix.get(1, 3), 2);
    }

    #[test]
    fn no_zero_rows_or_columns() {
        let (_, matrix) = build(&atoms(&["Na", "Cl"]), &atoms(&["NaCl2"])).unwrap();
        assert!(matrix.rows().iter().all(|row| row.iter().any(|&x| x > 0)));
        for col in 0..matrix.column_count() {
            assert!(matrix.rows().iter().any(|row| row[col] > 0));
        }
    }

    #[test]
    fn accepts_borrowed_iterators() {
        let reactants = atoms(&["H2", "O2"]);
        let products = atoms(&["H2O"]);
        let from_slices = build(&reactants, &products).unwrap();
        let from_iterators = build(reactants.iter().rev().skip(1), products.iter()).unwrap();

        assert_eq!(from_slices.1.rows(), [vec![2, 0, 2], vec![0, 2, 1]]);
        // only H2 on the left
        assert_eq!(from_iterators.0.symbols(), ["H", "O"]);
        assert_eq!(from_iterators.1.rows(), [vec![2, 2], vec![0, 1]]);
        assert_eq!(from_iterators.1.reactant_count(), 1);
    }

    #[test]
    fn structural_errors() {
        let none: [AtomVector; 0] = [];
        assert_eq!(build(&none, &none), Err(BalanceError::Structural(StructuralFault::NoElements)));
        assert_eq!(build(&none, &atoms(&["H2"])), Err(BalanceError::Structural(StructuralFault::NoReactants)));
        assert_eq!(build(&atoms(&["H2"]), &none), Err(BalanceError::Structural(StructuralFault::NoProducts)));
        assert_eq!(
            build(&atoms(&["H2"]), &[AtomVector::new()]),
            Err(BalanceError::Structural(StructuralFault::EmptyMolecule(1))),
        );
    }
}
