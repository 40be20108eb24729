pub mod diff_view;
pub mod drop_zone;
pub mod font;
pub mod summary_bar;
pub mod title_bar;
pub mod viewport;
