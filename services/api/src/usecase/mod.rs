pub mod otp;
pub mod payment;
pub mod push;
pub mod token;
