//! Board CLI command.

use clap::Parser;
use labtrack_core::study::board::BoardFilter;

/// Show your studies grouped by progress (patient).
#[derive(Debug, Parser)]
pub struct BoardCommand {
    /// all, open, completed, in-progress, partial or pending.
    #[arg(long, default_value = "all")]
    pub filter: BoardFilter,
}
