use primedraw::{
    cli::{self, Cli},
    config::{self, DrawConfig},
    draw::parse_count,
    err_new_io,
    error::{Kind, Result},
    input,
    prelude::debug_print,
    runner::{self, DrawJob},
};
use std::{
    io::{self, Write},
    process::ExitCode,
};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "primedraw=debug"
    } else {
        "primedraw=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli, how_many: usize) -> Result<()> {
    let file_config = match cli.config {
        Some(ref path) => config::read_config(path)?,
        None => DrawConfig::default(),
    };
    let config = cli.resolve(file_config);

    let candidates = input::read_candidates(&cli.source_list, config.skip_blank)?;
    let init_seed = match config.init_seed {
        Some(ref seed) => seed.trim().to_string(),
        None => input::prompt_seed(io::stdin().lock(), io::stderr())?,
    };
    let seeds = input::read_seed_lines(&cli.seed_list)?;

    let job = DrawJob {
        hash: config.hash,
        init_seed,
        candidates,
        seeds,
        how_many,
    };
    debug_print(&job);
    let report = runner::run(job)?;

    let mut out = io::stdout().lock();
    for item in &report.chosen {
        writeln!(out, "{}", item.trim()).map_err(|e| err_new_io!(e))?;
    }
    if let Some(ref path) = config.report {
        input::write_json(path, &report)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = match cli::parse_args(std::env::args_os()) {
        Ok(Some(cli)) => cli,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) if e.kind() == &Kind::Usage => {
            eprint!("{}", e.message());
            return ExitCode::from(1);
        }
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(3);
        }
    };
    init_tracing(cli.verbose);

    let how_many = match parse_count(&cli.how_many) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("how-many must be a non-negative integer ({})", e.message());
            return ExitCode::from(2);
        }
    };

    match run(&cli, how_many) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(3)
        }
    }
}
