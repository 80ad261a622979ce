//! List command implementation

use crate::cli::args::GlobalOptions;
use crate::cli::{ProbeContext, TableArgs, TransportArgs};
use crate::error::Result;
use crate::output;

/// Print the requests a sweep would issue
pub fn run(opts: &GlobalOptions, table: &TableArgs, skip_create: bool) -> Result<()> {
    let ctx = ProbeContext::new(opts, table, &TransportArgs::default(), !skip_create)?;
    let plan = ctx.prober()?.plan()?;
    output::print_plan(&plan, ctx.format)
}
