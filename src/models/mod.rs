pub mod bookmark;
pub mod interview;
pub mod user;
pub mod views;

pub use bookmark::*;
pub use interview::*;
pub use user::*;
pub use views::*;
