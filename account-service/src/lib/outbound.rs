pub mod legacy;
pub mod repositories;
