use std::ffi::OsString;
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use reqtime::app::{print_report, run_sampler};
use reqtime::args::SamplerArgs;
use reqtime::config::DEFAULT_CONFIG_FILES;
use reqtime::error::{AppError, AppResult, ValidationError};

pub(crate) fn run() -> AppResult<()> {
    let (args, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(()),
    };

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(runtime_build_error)?;

    runtime.block_on(run_async(args, &matches))
}

fn runtime_build_error(err: std::io::Error) -> AppError {
    AppError::validation(ValidationError::RuntimeBuildFailed { source: err })
}

fn parse_args() -> AppResult<Option<(SamplerArgs, ArgMatches)>> {
    let mut cmd = SamplerArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = SamplerArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty || std::env::var_os("REQTIME_URL").is_some() {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

async fn run_async(mut args: SamplerArgs, matches: &ArgMatches) -> AppResult<()> {
    if let Some(config) = reqtime::config::load_config(args.config.as_deref())
        .inspect_err(|err| tracing::error!("Failed to load config: {}", err))?
    {
        reqtime::config::apply_config(&mut args, matches, &config)
            .inspect_err(|err| tracing::error!("Invalid config: {}", err))?;
    }

    let report = run_sampler(&args)
        .await
        .inspect_err(|err| tracing::error!("Sampling failed: {}", err))?;
    print_report(&report, args.output_format)
}
