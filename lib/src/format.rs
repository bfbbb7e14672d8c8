use malachite::num::basic::traits::One;
use malachite::Natural;
use std::iter::zip;

/// Tokens used to render an equation
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct EquationStyle {
    /// Token between the two sides of the equation
    pub arrow: String,
}
impl Default for EquationStyle {
    fn default() -> Self {
        Self { arrow: String::from("-->") }
    }
}

/// Renders a balanced equation such as `2H2 + O2 --> 2H2O`
///
/// Coefficients equal to 1 are omitted.
/// # Example
/// ```
/// use chembalance::format;
/// use malachite::Natural;
///
/// let two = Natural::from(2u32);
/// let one = Natural::from(1u32);
/// let equation = format(&["H2", "O2"], &[two.clone(), one], &["H2O"], &[two]);
///
/// assert_eq!(equation, "2H2 + O2 --> 2H2O");
/// ```
pub fn format<R, P>(reactant_formulas: &[R], reactant_coeffs: &[Natural], product_formulas: &[P], product_coeffs: &[Natural]) -> String
where
    R: AsRef<str>,
    P: AsRef<str>,
{
    format_with_style(reactant_formulas, reactant_coeffs, product_formulas, product_coeffs, &EquationStyle::default())
}

/// Same as [`format`], with custom tokens
pub fn format_with_style<R, P>(
    reactant_formulas: &[R],
    reactant_coeffs: &[Natural],
    product_formulas: &[P],
    product_coeffs: &[Natural],
    style: &EquationStyle,
) -> String
where
    R: AsRef<str>,
    P: AsRef<str>,
{
    format!(
        "{} {} {}",
        format_side(reactant_formulas, reactant_coeffs),
        style.arrow,
        format_side(product_formulas, product_coeffs),
    )
}

fn format_side<F: AsRef<str>>(formulas: &[F], coeffs: &[Natural]) -> String {
    let mut side = String::new();
    for (i, (formula, quantity)) in zip(formulas.iter(), coeffs.iter()).enumerate() {
        if i != 0 { side.push_str(" + "); }
        if *quantity != Natural::ONE {
            side.push_str(&quantity.to_string());
        }
        side.push_str(formula.as_ref());
    }
    side
}
