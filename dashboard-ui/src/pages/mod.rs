mod dashboard;
mod reports;
mod search;
mod team;

pub use dashboard::DashboardPage;
pub use reports::ReportsPage;
pub use search::SearchPage;
pub use team::TeamPage;
