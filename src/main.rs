use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{value_parser, Arg, ArgAction, Command};
use tracing_subscriber::EnvFilter;

use cellvm::interpreter::{Interpreter, VmParams};
use cellvm::loader;

/// One argument of the load plan, in command-line order.
enum Step {
    /// `-l OFFSET`: move the load cursor.
    Seek(u32),
    /// A program image to load at the cursor.
    Load(PathBuf),
}

fn cli() -> Command {
    Command::new("cellvm")
        .about("Byte-addressed virtual machine with typed memory cells")
        .arg(
            Arg::new("load")
                .short('l')
                .long("load")
                .value_name("OFFSET")
                .help("Set the load cursor to a byte offset for the files that follow")
                .action(ArgAction::Append)
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("mem-max")
                .long("mem-max")
                .value_name("BYTES")
                .help("Ceiling for memory growth")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("trace")
                .long("trace")
                .help("Dump the memory image to stdout between cycles")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .help("Program images, loaded in order at the current cursor")
                .action(ArgAction::Append)
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
}

/// Replay `-l` offsets and file paths in the order they appeared on the
/// command line, so an offset applies exactly to the files that follow it.
fn load_plan(matches: &clap::ArgMatches) -> Vec<Step> {
    let mut steps: Vec<(usize, Step)> = Vec::new();

    if let (Some(indices), Some(offsets)) =
        (matches.indices_of("load"), matches.get_many::<u32>("load"))
    {
        steps.extend(indices.zip(offsets).map(|(i, o)| (i, Step::Seek(*o))));
    }
    if let (Some(indices), Some(paths)) = (
        matches.indices_of("file"),
        matches.get_many::<PathBuf>("file"),
    ) {
        steps.extend(indices.zip(paths).map(|(i, p)| (i, Step::Load(p.clone()))));
    }

    steps.sort_by_key(|(index, _)| *index);
    steps.into_iter().map(|(_, step)| step).collect()
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let matches = cli().get_matches();

    let mut params = VmParams::default();
    if let Some(brk_max) = matches.get_one::<u32>("mem-max") {
        params.brk_max = *brk_max;
    }

    let mut vm = Interpreter::with_params(params);
    if matches.get_flag("trace") {
        vm = vm.with_trace(Box::new(io::stdout()));
    }

    let mut cursor = 0u32;
    for step in load_plan(&matches) {
        match step {
            Step::Seek(offset) => cursor = offset,
            Step::Load(path) => {
                if let Err(err) = loader::load_file(vm.memory_mut(), &mut cursor, &path) {
                    eprintln!("cellvm: {err}");
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    match vm.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("cellvm: {err}");
            ExitCode::FAILURE
        }
    }
}
