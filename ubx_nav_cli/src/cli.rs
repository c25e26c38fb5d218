use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::LevelFilter;
use ubx_nav::{FixValidityPolicy, UpdateRate, DEFAULT_MAX_PAYLOAD_LEN};

pub fn build() -> Command {
    Command::new("ubx-nav")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about("Decode NAV-PVT solutions from a UBX byte stream and generate receiver setup commands")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Increase log verbosity, repeat for more"),
        )
        .subcommand(
            Command::new("decode")
                .about("Feed a UBX capture byte by byte and report every decoded message")
                .arg(
                    Arg::new("file")
                        .value_name("FILE")
                        .required(false)
                        .value_parser(value_parser!(PathBuf))
                        .help("Capture to read, standard input when omitted"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print one JSON object per NAV-PVT solution instead of the text report"),
                )
                .arg(
                    Arg::new("max-payload")
                        .value_name("N")
                        .long("max-payload")
                        .required(false)
                        .default_value("512")
                        .value_parser(value_parser!(usize))
                        .help("Drop frames declaring a longer payload"),
                )
                .arg(
                    Arg::new("require-gnss-fix-ok")
                        .long("require-gnss-fix-ok")
                        .action(ArgAction::SetTrue)
                        .help("Only count a position as valid if the receiver flags gnssFixOK"),
                )
                .arg(
                    Arg::new("no-2d")
                        .long("no-2d")
                        .action(ArgAction::SetTrue)
                        .help("Do not count 2D fixes as valid positions"),
                ),
        )
        .subcommand(
            Command::new("setup")
                .about("Emit the commands that switch a receiver to NAV-PVT output")
                .arg(
                    Arg::new("rate")
                        .long("rate")
                        .required(false)
                        .default_value("1")
                        .value_parser(["1", "2", "5", "10"])
                        .help("Navigation solution rate in Hz"),
                )
                .arg(
                    Arg::new("hex")
                        .long("hex")
                        .action(ArgAction::SetTrue)
                        .help("Print each command as a line of hex instead of raw bytes"),
                )
                .arg(
                    Arg::new("output")
                        .value_name("FILE")
                        .short('o')
                        .long("output")
                        .required(false)
                        .value_parser(value_parser!(PathBuf))
                        .help("Write to FILE instead of standard output"),
                ),
        )
}

pub fn log_level(matches: &ArgMatches) -> LevelFilter {
    match matches.get_count("verbose") {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[derive(Debug)]
pub struct DecodeOptions {
    pub file: Option<PathBuf>,
    pub json: bool,
    pub max_payload_len: usize,
    pub policy: FixValidityPolicy,
}

impl DecodeOptions {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let policy = FixValidityPolicy {
            require_gnss_fix_ok: matches.get_flag("require-gnss-fix-ok"),
            allow_2d: !matches.get_flag("no-2d"),
            ..FixValidityPolicy::default()
        };
        Self {
            file: matches.get_one::<PathBuf>("file").cloned(),
            json: matches.get_flag("json"),
            max_payload_len: matches
                .get_one::<usize>("max-payload")
                .copied()
                .unwrap_or(DEFAULT_MAX_PAYLOAD_LEN),
            policy,
        }
    }
}

#[derive(Debug)]
pub struct SetupOptions {
    pub rate: UpdateRate,
    pub hex: bool,
    pub output: Option<PathBuf>,
}

impl SetupOptions {
    pub fn from_matches(matches: &ArgMatches) -> anyhow::Result<Self> {
        let hz: u32 = matches
            .get_one::<String>("rate")
            .map(|s| s.parse())
            .transpose()?
            .unwrap_or(1);
        let rate = UpdateRate::from_hz(hz)
            .ok_or_else(|| anyhow::anyhow!("unsupported rate {} Hz", hz))?;
        Ok(Self {
            rate,
            hex: matches.get_flag("hex"),
            output: matches.get_one::<PathBuf>("output").cloned(),
        })
    }
}
