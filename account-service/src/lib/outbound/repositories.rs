pub mod account;
pub mod lockout;
pub mod session;

pub use account::SqliteAccountRepository;
pub use lockout::SqliteLockoutRepository;
pub use session::SqliteSessionRepository;
