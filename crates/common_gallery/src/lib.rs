#![allow(clippy::missing_errors_doc)]

mod db;
mod db_model;
mod settings;
mod utils;

pub use db::*;
pub use db_model::*;
pub use settings::*;
pub use utils::*;
