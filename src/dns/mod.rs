//! The read-and-project pipeline for node DNS settings.

pub mod application;
