pub mod app_config;
pub mod memory_repo;
pub mod seed;

pub use memory_repo::{MemoryOrderRepository, MemoryProductRepository, MemorySalesRepository};
pub use seed::SeedError;
