// src/models/mod.rs

pub mod customer;
pub mod genre;
pub mod movie;
pub mod rental;
pub mod user;
