pub mod memory;
pub mod ticket;
pub mod user;

pub use memory::InMemoryTicketRepository;
pub use memory::InMemoryUserRepository;
pub use ticket::PostgresTicketRepository;
pub use user::PostgresUserRepository;
