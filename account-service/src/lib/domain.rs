pub mod account;
pub mod lockout;
pub mod session;
