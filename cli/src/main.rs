use clap::Parser;
use gridstart_cli::commands::{cli, construct, kinds};
use gridstart_core::error::{self, PostScriptError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

fn main() {
    let exit = match real_main() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

fn real_main() -> Result<i32, error::CliError> {
    let args = cli::Args::parse();
    let cfg = gridstart_core::config::load_default(args.config.as_deref())
        .map_err(|e| error::CliError::Config(format!("{e:#}")))?;
    init_tracing(&cfg.logging).map_err(error::CliError::Config)?;

    match args.command {
        cli::Commands::Construct(construct_args) => {
            construct::handle_construct(construct_args, &cfg)
        }
        cli::Commands::Kinds => Ok(kinds::handle_kinds()),
    }
}

fn exit_code_for_error(e: &error::CliError) -> i32 {
    // 0: success
    // 11: config error
    // 12: invalid argument / unparsable job
    // 20: IO error
    match e {
        error::CliError::Config(_) => 11,
        error::CliError::PostScript(pe) => match pe {
            PostScriptError::Config(_) => 11,
            PostScriptError::InvalidArgument(_) => 12,
        },
        error::CliError::Parse(_) => 12,
        error::CliError::Io(_) => 20,
    }
}

fn init_tracing(logging: &gridstart_core::config::LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("gridstart"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("gridstart.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
