mod validation;
mod wear;

pub use validation::*;
pub use wear::*;
