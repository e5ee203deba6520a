use std::fmt;

use crate::error::{PuzzleError, PuzzleResult};

/// A variable reference plus its polarity bit (`negated == true` is polarity 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lit {
    pub var: u32,
    pub negated: bool,
}

impl Lit {
    pub fn new(var: u32, negated: bool) -> Self {
        Self { var, negated }
    }

    pub fn pos(var: u32) -> Self {
        Self::new(var, false)
    }

    pub fn neg(var: u32) -> Self {
        Self::new(var, true)
    }

    /// Effective value under `assignment`: the stored bit XOR the polarity.
    pub fn value(self, assignment: &[bool]) -> PuzzleResult<bool> {
        let bit = assignment
            .get(self.var as usize)
            .copied()
            .ok_or(PuzzleError::VarOutOfRange {
                var: self.var,
                n: assignment.len() as u32,
            })?;
        Ok(bit ^ self.negated)
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "!x{}", self.var)
        } else {
            write!(f, "x{}", self.var)
        }
    }
}

/// Exactly three literals. Variables may repeat within a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Clause(pub [Lit; 3]);

impl Clause {
    pub fn new(a: Lit, b: Lit, c: Lit) -> Self {
        Self([a, b, c])
    }

    pub fn lits(&self) -> &[Lit; 3] {
        &self.0
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "({a} | {b} | {c})")
    }
}

/// OR over the clause's literals. Every literal is checked, so an
/// out-of-range index is reported even when an earlier literal is true.
pub fn evaluate_clause(assignment: &[bool], clause: &Clause) -> PuzzleResult<bool> {
    let mut any = false;
    for lit in clause.lits() {
        any |= lit.value(assignment)?;
    }
    Ok(any)
}

/// AND over the formula's clauses. Short-circuits on the first false clause
/// once the assignment length has been checked against the formula.
pub fn evaluate_formula(assignment: &[bool], formula: &Formula) -> PuzzleResult<bool> {
    formula.check_assignment(assignment)?;
    for clause in &formula.clauses {
        if !evaluate_clause(assignment, clause)? {
            return Ok(false);
        }
    }
    Ok(true)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    pub num_vars: u32,
    pub clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(num_vars: u32, clauses: Vec<Clause>) -> PuzzleResult<Self> {
        for clause in &clauses {
            for lit in clause.lits() {
                if lit.var >= num_vars {
                    return Err(PuzzleError::VarOutOfRange {
                        var: lit.var,
                        n: num_vars,
                    });
                }
            }
        }
        Ok(Self { num_vars, clauses })
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn is_satisfied_by(&self, assignment: &[bool]) -> PuzzleResult<bool> {
        evaluate_formula(assignment, self)
    }

    /// Per-clause satisfaction, index-aligned with `clauses`.
    pub fn clause_status(&self, assignment: &[bool]) -> PuzzleResult<Vec<bool>> {
        self.check_assignment(assignment)?;
        self.clauses
            .iter()
            .map(|c| evaluate_clause(assignment, c))
            .collect()
    }

    fn check_assignment(&self, assignment: &[bool]) -> PuzzleResult<()> {
        if assignment.len() != self.num_vars as usize {
            return Err(PuzzleError::AssignmentLength {
                expected: self.num_vars as usize,
                actual: assignment.len(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" & ")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}

/// The player's switch positions, one bit per variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment(Vec<bool>);

impl Assignment {
    pub fn zeros(n: usize) -> Self {
        Self(vec![false; n])
    }

    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self(bits)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        self.0.get(index).copied()
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn toggle(&mut self, index: usize) -> PuzzleResult<bool> {
        let n = self.0.len();
        let bit = self
            .0
            .get_mut(index)
            .ok_or(PuzzleError::ToggleOutOfRange { index, n })?;
        *bit = !*bit;
        Ok(*bit)
    }
}

impl AsRef<[bool]> for Assignment {
    fn as_ref(&self) -> &[bool] {
        &self.0
    }
}
