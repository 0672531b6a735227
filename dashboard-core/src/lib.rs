//! Domain core of the awareness dashboard demo: mock data, report lookup,
//! action-item and team state, and the scripted search chat.

pub mod actions;
pub mod chat;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod model;
pub mod reports;
pub mod route;
pub mod sidebar;
pub mod store;
pub mod teams;

pub use error::{DashboardError, Result};
pub use fixtures::{DataProvider, FixtureProvider};
