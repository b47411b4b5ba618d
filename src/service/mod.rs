//! ResourceService: generic CRUD using the safe SQL builder.

mod crud;
mod validation;
pub use crud::ResourceService;
pub use validation::RequestValidator;
