extern crate alloc;

pub mod auth;
pub mod bootstrap;
pub mod client;
pub mod config;
pub mod constructors;
pub mod controllers;
pub mod entities;
pub mod errors;
pub(crate) mod interactors;
pub mod middleware;
pub mod oauth_helper;
pub mod presenters;
pub mod repositories;
pub mod usecases;
pub(crate) mod utils;
pub mod validation;

pub use constructors::*;
