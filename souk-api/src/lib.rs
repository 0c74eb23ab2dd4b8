pub mod endpoints;

mod client;
mod error;
mod loading;
mod macros;
mod request;
mod settings;

pub use crate::client::Client;
pub use crate::error::ApiError;
pub use crate::request::{ApiRequest, Body, FormParts};
pub use crate::settings::Settings;
