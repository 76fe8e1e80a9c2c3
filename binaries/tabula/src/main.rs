use {
    clap::{arg, Command},
    snafu::prelude::*,
    std::{
        io::{self, IsTerminal},
        process,
    },
    tabula::{
        cmd::{self, Session},
        config::{self, Config},
    },
    tracing_subscriber::EnvFilter,
};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("invalid configuration: {}", source))]
    Configure {
        #[snafu(backtrace)]
        source: config::Error,
    },

    #[snafu(display("failed to talk to the terminal: {}", source))]
    Terminal { source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;

fn cli() -> Command {
    let pkg_name = env!("CARGO_PKG_NAME");

    Command::new(pkg_name)
        .bin_name(pkg_name)
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .after_help(cmd::HELP)
        .arg(arg!(-d --"data-dir" <PATH> "directory holding <database>.json files"))
        .arg(arg!(--"strict-load" "decode loaded rows again and reject those that do not fit"))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{}", err);
        process::exit(2);
    }
}

fn try_main() -> Result<()> {
    let matches = cli().get_matches();

    init_tracing();

    let config = Config::from_env(
        matches.get_one::<String>("data-dir").map(String::as_str),
        matches.get_flag("strict-load"),
    )
    .context(ConfigureSnafu)?;
    tracing::debug!(?config, "starting");

    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    let mut session = Session::new(config);

    cmd::run(&mut session, stdin.lock(), io::stdout().lock(), prompt).context(TerminalSnafu)
}
