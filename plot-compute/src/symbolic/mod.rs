//! Symbolic manipulation of expressions: a flattened expression tree, a light simplifier, and the
//! derivative and integral transforms.
//!
//! Every transform takes an expression and returns a new one; nothing is modified in place.

pub mod derivative;
pub mod expr;
pub mod integral;
pub mod simplify;

pub use derivative::derivative;
pub use expr::{Primary, SymExpr};
pub use integral::integral;
pub use simplify::simplify;
