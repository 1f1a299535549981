//! Output documents for the weekly menu.
//!
//! - **JSON plan**: the menu snapshot as-is, no envelope (`menu-plan.json`)
//! - **Offline view**: a standalone HTML page of one week with embedded CSS

mod error;
mod export;
mod html;

pub use error::{ReportError, Result};
pub use export::{EXPORT_FILE_NAME, export_document, read_import_file, write_export};
pub use html::{offline_file_name, render_offline_html, write_offline_html};
