pub mod appwrite;
pub mod auth;
pub mod cli;
pub mod depot;
