//! Motorbid backend library.
//!
//! CRUD backend for a vehicle auction marketplace: JWT-authenticated
//! users, role-gated vehicle/auction/inquiry management, and an image
//! upload adapter.

pub mod app_state;
pub mod auctions;
pub mod config;
pub mod error;
pub mod handlers;
pub mod inquiries;
pub mod middleware;
pub mod models;
pub mod policy;
pub mod routes;
pub mod token;
pub mod uploads;
pub mod users;
pub mod vehicles;
