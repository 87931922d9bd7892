pub mod connection;
pub use connection::Connection;

pub mod results;
pub mod schema;

pub mod contributions;
pub mod events;
pub mod members;
pub mod projects;
pub mod tasks;
pub mod transactions;
