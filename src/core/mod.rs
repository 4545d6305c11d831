pub mod catalog;
pub mod engine;
pub mod land_resolver;
pub mod pipeline;
pub mod route_builder;
pub mod sea_resolver;

pub use crate::domain::ports::{ConfigProvider, DistanceResolver, Pipeline, Resolution, Storage};
pub use crate::utils::error::Result;
