pub mod api;
pub mod datacube;
pub mod groups;
pub mod media;
pub mod menu;
pub mod pay;
pub mod token;
pub mod xml;

pub use crate::domain::model::AccessToken;
pub use crate::domain::ports::{SettingsProvider, TokenProvider};
pub use crate::utils::error::Result;
