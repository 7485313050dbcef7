pub mod calendar;
pub mod members;
pub mod recommend;
pub mod settings;
pub mod status;
