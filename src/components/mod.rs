pub mod connect;
pub mod create;
pub mod details;
pub mod home;
pub mod layout;
