pub mod menu;
pub mod profile;
pub mod role;
pub mod session;
pub mod stats;
pub mod ticket;
pub mod worker;
