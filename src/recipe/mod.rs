pub mod aggregator;
pub mod calculator;
pub mod scaler;


pub use aggregator::*;
pub use calculator::*;
pub use scaler::*;
