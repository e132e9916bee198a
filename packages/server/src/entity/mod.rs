pub mod department;
pub mod role;
pub mod role_permission;
pub mod score;
pub mod user;
