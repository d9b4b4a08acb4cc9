pub mod factories;
pub mod factory;
pub mod scripted_scanner;
