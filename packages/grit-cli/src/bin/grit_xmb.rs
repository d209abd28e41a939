/**
 * Grit CLI - grit-xmb
 *
 * Export the translatable messages of a resource document as an XMB bundle
 */
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use grit::logging::{ConsoleLogger, LogLevel, Logger};
use grit_cli::config::{XmbConfig, XmbJob};
use grit_cli::perform_xmb::perform_xmb;

fn command() -> Command {
    Command::new("grit-xmb")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Export the messages of a .grd document as an XML message bundle")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("GRD")
                .value_parser(clap::value_parser!(PathBuf))
                .required_unless_present("config")
                .help("Resource document to export"),
        )
        .arg(
            Arg::new("output")
                .value_name("OUTPUT")
                .required_unless_present("config")
                .help("Bundle to write, - for stdout"),
        )
        .arg(
            Arg::new("limit")
                .short('l')
                .long("limit")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Only export the identifiers listed in FILE, one per line"),
        )
        .arg(
            Arg::new("limit-is-grd")
                .short('g')
                .long("limit-is-grd")
                .action(ArgAction::SetTrue)
                .requires("limit")
                .help("Read the limit file as a resource document and keep its messages"),
        )
        .arg(
            Arg::new("base-dir")
                .short('D')
                .long("base-dir")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Directory structure files are resolved against"),
        )
        .arg(
            Arg::new("lang")
                .long("lang")
                .value_name("LANG")
                .help("Language recorded on the bundle (default: en)"),
        )
        .arg(
            Arg::new("gather")
                .long("gather")
                .action(ArgAction::SetTrue)
                .help("Read structure files so their text is exported too"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log progress, twice for debug output"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .help("Only log errors"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("JSON")
                .value_parser(clap::value_parser!(PathBuf))
                .conflicts_with_all(["input", "output", "limit", "base-dir"])
                .help("Run the export jobs described in a JSON file"),
        )
}

fn log_level(matches: &ArgMatches) -> LogLevel {
    if matches.get_flag("quiet") {
        return LogLevel::Error;
    }
    match matches.get_count("verbose") {
        0 => LogLevel::Warn,
        1 => LogLevel::Info,
        _ => LogLevel::Debug,
    }
}

fn config_from_args(matches: &ArgMatches) -> anyhow::Result<XmbConfig> {
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        let mut config = XmbConfig::load(path)?;
        if let Some(lang) = matches.get_one::<String>("lang") {
            config.lang = Some(lang.clone());
        }
        config.gather |= matches.get_flag("gather");
        return Ok(config);
    }

    let input = matches
        .get_one::<PathBuf>("input")
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("--input is required"))?;
    let output = matches
        .get_one::<String>("output")
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("OUTPUT is required"))?;

    Ok(XmbConfig {
        input,
        base_dir: matches.get_one::<PathBuf>("base-dir").cloned(),
        lang: matches.get_one::<String>("lang").cloned(),
        handler: None,
        gather: matches.get_flag("gather"),
        jobs: vec![XmbJob {
            output,
            limit: matches.get_one::<PathBuf>("limit").cloned(),
            limit_is_grd: matches.get_flag("limit-is-grd"),
        }],
    })
}

fn main() {
    let matches = command().get_matches();
    let logger: Arc<dyn Logger> = Arc::new(ConsoleLogger::new(log_level(&matches)));

    let result =
        config_from_args(&matches).and_then(|config| perform_xmb(&config, logger.clone()));

    match result {
        Ok(reports) => {
            for report in reports.iter().filter(|report| !report.writes_to_stdout()) {
                logger.info(&format!("Wrote {} ({} bytes)", report.output, report.bytes_written));
            }
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(1);
        }
    }
}
