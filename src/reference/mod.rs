pub mod defaults;
pub mod error;
pub mod loader;
pub mod nutrients;
pub mod units;
pub mod validation;


pub use error::*;
pub use loader::*;
pub use nutrients::*;
pub use units::*;
pub use validation::*;
