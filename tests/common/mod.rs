pub mod builders;
pub mod mock_builder;
pub mod strategies;

pub use builders::*;
pub use mock_builder::*;
pub use strategies::*;
