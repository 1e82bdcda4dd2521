//! HTTP handlers

pub mod health;
pub mod inquiries;
pub mod products;
