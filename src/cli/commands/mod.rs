pub mod analyze;
pub mod archetypes;
pub mod clean;
pub mod config;
pub mod init;
pub mod inspect;
pub mod recent;
pub mod show;
pub mod whoami;
