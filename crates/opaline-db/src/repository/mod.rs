//! # Repository Implementations
//!
//! Repositories encapsulate all SQL for one aggregate. Handlers never write
//! SQL; they call repository methods and map the typed errors.

pub mod order;
