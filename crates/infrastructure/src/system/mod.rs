pub mod interfaces;

pub use interfaces::SystemInterfaces;
