pub mod dashboard;

pub use dashboard::{format_rupiah, DashboardView};
