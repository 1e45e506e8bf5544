pub mod condominium;
pub mod document;
