//! To-do items: domain types, storage abstraction, and business service.

pub mod domain;
pub mod repository;
pub mod service;
