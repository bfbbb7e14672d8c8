use crate::error::{BalanceError, ParseFault, Result};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt::{Display, Formatter};
use std::iter::Peekable;
use std::str::CharIndices;

/// Atom counts of one molecule, keyed by element symbol
///
/// Every stored count is strictly positive, elements that do not occur are simply absent.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AtomVector {
    counts: BTreeMap<String, u64>,
}
impl AtomVector {
    /// Create an empty atom vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the count of the given element (0 if the element is absent)
    pub fn get(&self, symbol: &str) -> u64 {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    /// Returns whether the element occurs in the molecule
    pub fn contains(&self, symbol: &str) -> bool {
        self.counts.contains_key(symbol)
    }

    /// Iterates over `(symbol, count)` pairs in alphabetical order of symbols
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(symbol, &count)| (symbol.as_str(), count))
    }

    /// Returns the element symbols in alphabetical order
    pub fn symbols(&self) -> impl Iterator<Item = &str> + '_ {
        self.counts.keys().map(String::as_str)
    }

    /// Number of distinct elements
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of atoms in the molecule
    pub fn total_atoms(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Adds `count` atoms of an element, `None` on overflow
    fn add(&mut self, symbol: &str, count: u64) -> Option<()> {
        match self.counts.entry(symbol.to_string()) {
            btree_map::Entry::Occupied(mut entry) => {
                *entry.get_mut() = entry.get().checked_add(count)?;
            },
            btree_map::Entry::Vacant(entry) => {
                entry.insert(count);
            },
        }
        Some(())
    }

    /// Adds every count of `other` multiplied by `multiplier`, `None` on overflow
    fn merge_scaled(&mut self, other: AtomVector, multiplier: u64) -> Option<()> {
        for (symbol, count) in other.counts {
            self.add(&symbol, count.checked_mul(multiplier)?)?;
        }
        Some(())
    }
}
impl<'a, const N: usize> From<[(&'a str, u64); N]> for AtomVector {
    fn from(pairs: [(&'a str, u64); N]) -> Self {
        let counts = pairs
            .into_iter()
            .filter(|&(_, count)| count > 0)
            .map(|(symbol, count)| (symbol.to_string(), count))
            .collect();
        Self { counts }
    }
}

/// A molecule of the equation: the formula as written plus its atom counts
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Compound {
    /// String from which the compound was parsed
    original_str: String,
    /// Atom counts of the compound
    elements: AtomVector,
}
impl Compound {
    /// Create new compound from a formula such as `Co3(PO4)2`
    /// # Arguments
    /// * `input` - formula string
    /// # Returns
    /// * `Ok` - compound
    /// * `Err` - [`BalanceError::Parse`] if the formula is malformed
    /// # Example
    /// ```
    /// use chembalance::Compound;
    ///
    /// let compound = Compound::from_formula("Co3(PO4)2").unwrap();
    ///
    /// assert_eq!(compound.original_str(), "Co3(PO4)2");
    /// assert_eq!(compound.elements().get("Co"), 3);
    /// assert_eq!(compound.elements().get("P"), 2);
    /// assert_eq!(compound.elements().get("O"), 8);
    /// ```
    pub fn from_formula(input: &str) -> Result<Self> {
        Ok(Self {
            original_str: input.to_string(),
            elements: parse(input)?,
        })
    }

    /// Returns the formula exactly as it was given
    pub fn original_str(&self) -> &str {
        &self.original_str
    }

    /// Returns the atom counts of the compound
    pub fn elements(&self) -> &AtomVector {
        &self.elements
    }
}
impl Display for Compound {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.original_str)
    }
}

/// Parses a formula into its atom counts
///
/// Element symbols are one uppercase letter followed by any number of lowercase letters, optionally
/// followed by a count. Parenthesised groups may be nested and take an optional multiplier.
/// Whitespace between tokens is ignored.
/// # Example
/// ```
/// use chembalance::{parse, AtomVector};
///
/// assert_eq!(parse("CH3CH2OH").unwrap(), AtomVector::from([("C", 2), ("H", 6), ("O", 1)]));
/// assert!(parse("(OH").is_err());
/// ```
pub fn parse(formula: &str) -> Result<AtomVector> {
    scan(formula).map_err(|(position, reason)| BalanceError::Parse {
        formula: formula.to_string(),
        position,
        reason,
    })
}

type ScanResult<T> = std::result::Result<T, (usize, ParseFault)>;

fn scan(formula: &str) -> ScanResult<AtomVector> {
    // one frame per open group, the bottom frame is the formula itself
    // each frame remembers where its `(` was so an unclosed group can be reported
    let mut stack: Vec<(usize, AtomVector)> = vec![(0, AtomVector::new())];
    let mut chars = formula.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            c if c.is_ascii_whitespace() => {},
            '(' => stack.push((pos, AtomVector::new())),
            ')' => {
                if stack.len() == 1 {
                    return Err((pos, ParseFault::UnopenedGroup));
                }
                let (_, group) = stack.pop().ok_or((pos, ParseFault::UnopenedGroup))?;
                if group.is_empty() {
                    return Err((pos, ParseFault::EmptyGroup));
                }
                let multiplier = read_count(&mut chars)?.unwrap_or(1);
                let (_, parent) = stack.last_mut().ok_or((pos, ParseFault::UnopenedGroup))?;
                parent.merge_scaled(group, multiplier).ok_or((pos, ParseFault::CountOverflow))?;
            },
            'A'..='Z' => {
                let mut end = pos + c.len_utf8();
                while let Some(&(i, next)) = chars.peek() {
                    if !next.is_ascii_lowercase() { break; }
                    end = i + next.len_utf8();
                    chars.next();
                }
                let symbol = &formula[pos..end];
                let count = read_count(&mut chars)?.unwrap_or(1);
                let (_, frame) = stack.last_mut().ok_or((pos, ParseFault::UnopenedGroup))?;
                frame.add(symbol, count).ok_or((pos, ParseFault::CountOverflow))?;
            },
            'a'..='z' => return Err((pos, ParseFault::LowercaseToken(c))),
            _ => return Err((pos, ParseFault::UnexpectedCharacter(c))),
        }
    }

    if stack.len() > 1 {
        let (open_pos, _) = stack[stack.len() - 1];
        return Err((open_pos, ParseFault::UnclosedGroup));
    }
    match stack.pop() {
        Some((_, atoms)) if !atoms.is_empty() => Ok(atoms),
        _ => Err((0, ParseFault::Empty)),
    }
}

/// Reads the decimal number directly following the current token (if any)
fn read_count(chars: &mut Peekable<CharIndices<'_>>) -> ScanResult<Option<u64>> {
    let mut count: Option<u64> = None;
    let mut start = 0;
    while let Some(&(i, c)) = chars.peek() {
        let Some(digit) = c.to_digit(10) else { break; };
        if count.is_none() {
            start = i;
        }
        count = Some(
            count.unwrap_or(0)
                .checked_mul(10)
                .and_then(|n| n.checked_add(u64::from(digit)))
                .ok_or((start, ParseFault::CountOverflow))?,
        );
        chars.next();
    }

    match count {
        Some(0) => Err((start, ParseFault::ZeroCount)),
        count => Ok(count),
    }
}
