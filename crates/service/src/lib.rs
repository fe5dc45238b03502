//! Service layer for the to-do list: business rules on top of `models`.
//! - `item::repository` is the storage seam (SeaORM and in-memory implementations).
//! - `item::service` applies existence checks and wraps storage failures.
//! - `pagination` holds the page request and the page envelope.

pub mod errors;
pub mod item;
pub mod pagination;
