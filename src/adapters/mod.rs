// Adapters layer: concrete implementations for external systems (filesystem, bundled resources).

pub mod resource;
pub mod storage;
