//! Dashboard core library
//!
//! The in-memory table engine behind the dashboard's data page (row store,
//! sort and filter stages, validated add-record gateway) together with the
//! pieces the shell around it needs: theme context, settings store, profile
//! form, navbar search, routes and notifications.

pub mod busy;
pub mod error;
pub mod model;
pub mod notify;
pub mod profile;
pub mod route;
pub mod search;
pub mod settings;
pub mod table;
pub mod theme;

pub use model::{Record, SortConfig, SortDirection, SortKey};
pub use table::DataTable;
