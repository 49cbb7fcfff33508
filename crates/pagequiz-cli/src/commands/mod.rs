pub mod generate;
pub mod init;
pub mod reconcile;
pub mod validate;
