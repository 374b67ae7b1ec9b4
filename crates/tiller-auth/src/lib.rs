mod session;
pub use session::*;

mod login;
pub use login::*;
