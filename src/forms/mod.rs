pub mod form_type;
pub mod mapping;
pub mod navigation;
pub mod steps;
pub mod store;
