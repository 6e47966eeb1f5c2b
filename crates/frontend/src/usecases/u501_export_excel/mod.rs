pub mod api;
pub mod outcome;
pub mod view;

pub use view::AdminDashboardPage;
