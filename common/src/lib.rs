//! Models shared between the term generation backend and its clients.

pub mod model;
pub mod requests;
