pub mod book;
pub mod config;
pub mod detail;
pub mod list;
pub mod lookup;
pub mod model;
pub mod storage;
pub mod store;

pub use book::{BookError, Confirm, RecipeBook};
pub use config::{Config, ConfigOverrides};
pub use detail::{DetailPanel, DetailView, MetadataState, SelectionToken};
pub use list::{render_list, ListQuery, ListView, SortMode};
pub use lookup::{MealDbClient, MetadataLookup};
pub use model::*;
pub use storage::{FileStore, KeyValueStore, MemoryStore, Persistence};
pub use store::{RecipeStore, StoreError};
