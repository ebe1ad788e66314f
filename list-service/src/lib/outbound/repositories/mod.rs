pub mod item;
pub mod list;
pub mod memory;
pub mod user;

pub use item::PostgresItemRepository;
pub use list::PostgresListRepository;
pub use memory::InMemoryRepository;
pub use user::PostgresUserRepository;
