pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::access;
pub use domain::identity;
pub use domain::ticket;
pub use domain::user;
pub use outbound::repositories;
