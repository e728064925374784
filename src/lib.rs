pub mod boundary;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod inspector;
pub mod publish;
pub mod ui;
pub mod validator;

pub use error::{PublishError, Result};
