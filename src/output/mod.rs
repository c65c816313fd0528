mod csv;
mod format;
mod json;
mod session;
mod table;

pub(crate) use csv::{output_export_csv, write_export_csv};
pub(crate) use json::output_summary_json;
pub(crate) use session::{print_conflict, print_current, print_separator, print_started, print_stopped};
pub(crate) use table::print_summary_table;
