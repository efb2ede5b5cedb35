//! Staynest backend library
//!
//! Hotel booking and administration backend: profiles, hotel and room
//! inventory, the booking lifecycle, and the admin dashboard aggregations.

pub mod auth;
pub mod booking;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod hotel;
pub mod middleware;
pub mod models;
pub mod profile;
pub mod routes;
pub mod services;
pub mod state;
