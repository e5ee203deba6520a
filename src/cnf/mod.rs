#[allow(clippy::module_inception)]
pub mod cnf;
pub mod dimacs;
pub mod generate;

pub use cnf::{Assignment, Clause, Formula, Lit, evaluate_clause, evaluate_formula};
pub use generate::generate_formula;
