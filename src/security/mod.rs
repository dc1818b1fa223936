pub mod memory;
pub mod validation;

pub use memory::SecureString;
pub use validation::InputValidator;
