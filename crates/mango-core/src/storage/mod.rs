//! Asset store trait (port)

pub mod asset_store;

pub use asset_store::AssetStore;

#[cfg(test)]
pub use asset_store::MockAssetStore;
