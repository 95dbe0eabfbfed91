pub mod users_file;

pub use users_file::parse_users_file;
pub use users_file::read_users_file;
