//! SeaORM entity definitions
//!
//! Table-level models. Domain code works with `crate::domain::entities`;
//! adapters convert between the two.

pub mod choices;
pub mod questions;
