//! HTTP endpoints of the term service, one sub-module per resource.

pub mod condominiums;
pub mod documents;
pub mod terms;
