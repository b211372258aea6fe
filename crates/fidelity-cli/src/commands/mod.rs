pub mod compare;
pub mod pair_index;
pub mod select_archive;
pub mod status_summary;
