//! Recorded sound asset adapters

mod rodio_loader;

pub use rodio_loader::RodioAssetLoader;
