//! `r3 run`, `r3 build` and `r3 test`: package scripts in a project.

use tracing::instrument;

use crate::{
    cli::{ProjectPathArgs, RunArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(script = %args.script))]
pub fn execute_run(args: RunArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let root = super::resolve_dir(args.project.path.as_deref())?;
    let builder = super::project_builder(config);
    run_step(
        &format!("Running script \"{}\"...", args.script),
        &format!("Script \"{}\" finished", args.script),
        output,
        || builder.run_script(&root, &args.script).map_err(Into::into),
    )
}

pub fn execute_build(
    args: ProjectPathArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let root = super::resolve_dir(args.path.as_deref())?;
    let builder = super::project_builder(config);
    run_step("Building project...", "Build finished", output, || {
        builder.build(&root).map_err(Into::into)
    })
}

pub fn execute_test(
    args: ProjectPathArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let root = super::resolve_dir(args.path.as_deref())?;
    let builder = super::project_builder(config);
    run_step("Running tests...", "Tests passed", output, || {
        builder.test(&root).map_err(Into::into)
    })
}

fn run_step<F>(start: &str, done: &str, output: &OutputManager, step: F) -> CliResult<()>
where
    F: FnOnce() -> CliResult<()>,
{
    let spinner = output.spinner(start);
    match step() {
        Ok(()) => {
            spinner.finish_success(done);
            Ok(())
        }
        Err(e) => {
            spinner.finish_error();
            Err(e)
        }
    }
}
