mod args;
mod sync;

use clap::Parser;
use log::{error, info, warn, LevelFilter};
use snafu::OptionExt;

use crate::args::Args;
use crate::sync::config_reader::ServiceConfig;
use crate::sync::export::run_reverse;
use crate::sync::remote::HttpFormService;
use crate::sync::*;

fn summarize(reports: &[EntryReport]) {
    let failed: Vec<&EntryReport> = reports
        .iter()
        .filter(|r| r.status != SyncStatus::Success && r.status != SyncStatus::AlreadyExists)
        .collect();
    info!(
        "Processed {} forms, {} failed",
        reports.len(),
        failed.len()
    );
    for r in failed {
        warn!("{}: {:?}", r.sheet, r.status);
    }
}

fn run(args: &Args) -> SyncResult<()> {
    let config = ServiceConfig::from_env()?;

    if args.direct {
        warn!("Direct mode is not implemented, nothing to do");
        return Ok(());
    }

    let service = HttpFormService::new(&config)?;

    if args.reverse {
        let form_id = args
            .form_id
            .as_deref()
            .whatever_context("--reverse requires --form-id")?;
        let path = args
            .path
            .as_deref()
            .whatever_context("--reverse requires --path")?;
        return run_reverse(&service, form_id, path);
    }

    let base = args
        .base
        .as_deref()
        .whatever_context("Missing survey file: pass --base")?;
    let plan = SyncPlan {
        mode: if args.update {
            Mode::Update
        } else {
            Mode::Create
        },
        preserve_logic: args.translation.is_none(),
        dry_run: args.dry_run,
    };
    let sheet = args.sheet.as_deref();

    let reports = match &args.translation {
        Some(translation) => run_translations(
            &service,
            &config,
            &args.workspace,
            base,
            translation,
            sheet,
            &plan,
        )?,
        None => run_base(&service, &config, &args.workspace, base, sheet, &plan)?,
    };
    summarize(&reports);
    Ok(())
}

fn main() {
    let args = Args::parse();

    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();

    if let Err(e) = run(&args) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
