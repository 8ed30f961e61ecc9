pub mod dns;
pub mod random;
pub mod system;
