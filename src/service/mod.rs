//! Services: typed SQL against one checked-out connection.

mod adoptions;
mod pets;
mod validation;
pub use adoptions::AdoptionService;
pub use pets::PetService;
pub use validation::{parse_id, RequestValidator};
