mod members;
pub use members::*;

mod lessons;
pub use lessons::*;

mod quarter;
pub use quarter::*;

mod auth;
pub use auth::*;
