pub mod inspect_cmd;
pub mod scan_cmd;
pub mod search_cmd;

pub use inspect_cmd::cmd_inspect;
pub use scan_cmd::cmd_scan;
pub use search_cmd::cmd_search;
