pub mod connection;
pub use connection::Connection;

pub mod results;
pub mod schema;

mod conditions;

pub mod lessons;
pub mod lookups;
pub mod members;
