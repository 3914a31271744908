//! Common reusable components.

pub mod job_row;
pub mod progressbar;
pub mod stat_card;
pub mod status_badge;

pub use job_row::JobRow;
pub use progressbar::JobProgress;
pub use stat_card::StatCard;
pub use status_badge::StatusBadge;
