pub mod explorer_model;

pub use explorer_model::{EntryForm, ExplorerModel, UiState, ENTRY_INCOMPLETE, ENTRY_SAVE_FAILED};
