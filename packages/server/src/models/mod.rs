pub mod auth;
pub mod department;
pub mod score;
pub mod shared;
pub mod standings;
