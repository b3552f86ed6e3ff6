mod entries;
mod health;

pub use entries::{add_entry, list_animals, list_trees};
pub use health::health_check;
