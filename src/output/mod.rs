mod report;
mod response;

pub use report::print_human_result;
pub use response::print_json_result;
