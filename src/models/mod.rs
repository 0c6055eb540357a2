pub mod task;
pub mod user;

pub use task::{Task, TaskInput, TaskPriority, TaskQuery, TaskStatus};
pub use user::{
    normalize_email, ActiveUpdate, NewUser, PasswordChange, Role, RoleUpdate, User, UserInput,
};
