//! Business logic between the HTTP routes and the repositories.

pub mod tasks;
pub mod users;

pub use tasks::TaskService;
pub use users::{seed_admin, SeedOutcome, UserService};
