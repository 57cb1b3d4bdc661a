pub mod comments;
pub mod users;

pub use comments::*;
pub use users::*;
