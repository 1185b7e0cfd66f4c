pub mod blog_view;
pub mod color;
pub mod confirm_delete;
pub mod dashboard_view;
pub mod diet_view;
pub mod form;
pub mod help;
pub mod input;
pub mod login_view;
pub mod popup;
pub mod profile_view;
pub mod progress_view;
pub mod status_bar;
pub mod tabs;
