pub mod filter_bar;
pub mod panels;
pub mod report_table;
pub mod report_view;

pub use report_view::ReportView;
