use std::fmt::Write;

use super::cnf::{Formula, Lit};

pub fn to_dimacs(formula: &Formula) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "p cnf {} {}", formula.num_vars, formula.len());
    for clause in &formula.clauses {
        for &lit in clause.lits() {
            let _ = write!(out, "{} ", lit_to_dimacs_int(lit));
        }
        out.push_str("0\n");
    }
    out
}

// dimacs variables are 1-based
fn lit_to_dimacs_int(lit: Lit) -> i64 {
    let v = i64::from(lit.var) + 1;
    if lit.negated { -v } else { v }
}
