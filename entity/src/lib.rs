//! SeaORM entities backing the employee directory.

pub mod employees;
