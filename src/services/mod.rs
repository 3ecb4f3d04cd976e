// Service exports
pub mod cache;
pub mod catalog;
pub mod registry;
pub mod reward_central;

pub use cache::CachedPointProvider;
pub use catalog::{AttractionCatalog, CatalogError, StaticCatalog};
pub use registry::UserRegistry;
pub use reward_central::{HttpRewardCentral, RewardPointProvider};
