#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

pub mod app;
pub mod assistant;
pub mod cli;
pub mod config;
pub mod error;
pub mod geo;
pub mod providers;
pub mod session;
pub mod traffic;
pub mod ui;
pub mod util;

pub use config::Config;
pub use error::{Result, RoutewiseError};
