//! `gestion-inventory` — inventory entities.

pub mod warehouse;

pub use warehouse::Warehouse;
