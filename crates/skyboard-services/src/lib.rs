pub mod favorites;
pub mod storage;

pub use favorites::{FavoriteSet, FavoritesStore, FAVORITES_KEY};
pub use storage::{FileStorage, LocalStorage, MemoryStorage, StorageResult};
