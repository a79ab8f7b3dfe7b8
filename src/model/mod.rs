pub mod catalogue;
pub mod config;
pub mod display;
pub mod list_view;
pub mod mode;
pub mod reconcile;
pub mod record;
pub mod store;
