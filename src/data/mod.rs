pub mod element;
pub mod profile;
pub mod config;

pub use element::{ElementKind, ElementRecord};
pub use profile::KindProfile;
pub use config::{SceneConfig, Populations, ApproachRates};
