pub mod account_summary;
pub mod user_identity_display;

pub use account_summary::AccountSummary;
pub use user_identity_display::{render_user_avatar, render_user_name};
