//! Image Adapters

mod http_image_host;

pub use http_image_host::{HttpImageHost, HttpImageHostConfig};
