pub mod access;
pub mod identity;
pub mod ticket;
pub mod user;
