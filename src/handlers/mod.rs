//! API handlers for the motorbid backend

pub mod auctions;
pub mod auth;
pub mod inquiries;
pub mod users;
pub mod vehicles;

pub use auctions::*;
pub use auth::*;
pub use inquiries::*;
pub use users::*;
pub use vehicles::*;
