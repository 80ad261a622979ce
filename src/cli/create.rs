//! Create command implementation

use crate::cli::args::GlobalOptions;
use crate::cli::{CreateArgs, ProbeContext, TableArgs};
use crate::error::Result;
use crate::output::{self, ConsoleObserver};

/// Send only the fixed createXnode call
pub async fn run(opts: &GlobalOptions, args: &CreateArgs) -> Result<()> {
    let ctx = ProbeContext::new(opts, &TableArgs::default(), &args.transport, true)?;
    let prober = ctx.prober()?;

    if args.headers.show_headers {
        output::print_headers(prober.headers(), args.headers.reveal_secrets);
    }

    let mut observer = ConsoleObserver::new(ctx.format);
    let report = prober.run_create(&mut observer).await?;
    output::print_report(&report, ctx.format)
}
