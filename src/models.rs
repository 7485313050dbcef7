pub mod member;
pub mod settings;
pub mod slot;
pub mod store;
