pub mod clock;
pub mod expo;
pub mod memory;
pub mod smtp;
pub mod stripe;
