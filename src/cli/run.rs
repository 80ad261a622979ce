//! Run command implementation

use log::info;

use crate::cli::args::GlobalOptions;
use crate::cli::{ProbeContext, RunArgs};
use crate::error::{Error, Result};
use crate::output::{self, ConsoleObserver};

/// Run the full sweep: create call, then every endpoint table entry
pub async fn run(opts: &GlobalOptions, args: &RunArgs) -> Result<()> {
    let ctx = ProbeContext::new(opts, &args.table, &args.transport, !args.skip_create)?;
    let prober = ctx.prober()?;

    if args.headers.show_headers {
        output::print_headers(prober.headers(), args.headers.reveal_secrets);
    }

    if args.dry_run {
        return output::print_plan(&prober.plan()?, ctx.format);
    }

    info!(
        "Probing {} endpoints at {}",
        ctx.table.len(),
        ctx.settings.base_url
    );
    let mut observer = ConsoleObserver::new(ctx.format);
    let report = prober.run(&mut observer).await?;
    output::print_report(&report, ctx.format)?;

    if args.strict && !report.is_clean() {
        return Err(Error::Other(format!(
            "{} of {} requests failed at the transport level",
            report.failures().len(),
            report.len()
        )));
    }

    Ok(())
}
