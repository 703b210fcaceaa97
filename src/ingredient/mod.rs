pub mod mass;
pub mod matcher;
pub mod normalizer;
pub mod parser;

#[cfg(test)]
mod tests;

pub use mass::*;
pub use matcher::*;
pub use normalizer::*;
pub use parser::*;
