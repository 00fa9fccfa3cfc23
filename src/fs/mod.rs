pub mod output_tree;
pub mod scan;

pub use output_tree::OutputTree;
pub use scan::{count_by_kind, recent_files, RecentFile};
