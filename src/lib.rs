pub mod config;
pub mod ingredient;
pub mod recipe;
pub mod reference;
pub mod report;

pub use recipe::{Calculation, Calculator, CalculatorOptions, LineResult, Totals};
