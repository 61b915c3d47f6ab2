//! Domain models shared between the API layer and the database layer.
//!
//! Each entity comes with `Create` / `Update` payload structs. Status-like
//! columns are stored as TEXT and parsed with the matching enum's `from_db`.

pub mod account;
pub mod drink;
pub mod menu;
pub mod order;
pub mod plate;
pub mod product;
pub mod restaurant;
pub mod table;
pub mod tenant;

pub use account::*;
pub use drink::*;
pub use menu::*;
pub use order::*;
pub use plate::*;
pub use product::*;
pub use restaurant::*;
pub use table::*;
pub use tenant::*;
