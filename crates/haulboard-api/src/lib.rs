pub mod drivers;
pub mod error;
pub mod messages;
pub mod routes;
pub mod schedule;
pub mod state;
