use std::{
    fs::File,
    io::{self, BufWriter, Read, Write},
};

use anyhow::{Context, Result};
use ubx_nav::{
    nav_pvt_setup_commands, CfgRateBuilder, FixTracker, NavigationFix, ParserBuilder, Receiver,
};

mod cli;
mod report;

use cli::{DecodeOptions, SetupOptions};

fn main() -> Result<()> {
    let matches = cli::build().get_matches();

    env_logger::Builder::new()
        .filter_level(cli::log_level(&matches))
        .parse_default_env()
        .init();

    match matches.subcommand() {
        Some(("decode", sub)) => decode(&DecodeOptions::from_matches(sub)),
        Some(("setup", sub)) => setup(&SetupOptions::from_matches(sub)?),
        _ => anyhow::bail!("No subcommand given, see --help"),
    }
}

fn decode(opts: &DecodeOptions) -> Result<()> {
    let mut input: Box<dyn Read> = match &opts.file {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        ),
        None => Box::new(io::stdin().lock()),
    };

    let parser = ParserBuilder::new()
        .with_max_payload_len(opts.max_payload_len)
        .build();
    let mut receiver = Receiver::new(parser, FixTracker::new().with_policy(opts.policy));
    if !opts.json {
        receiver.set_fix_handler(|fix: &NavigationFix| {
            log::info!("Callback Fix#={}", fix.fix_number());
        });
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut buf = [0u8; 4096];
    let mut last_printed = 0;
    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("Failed to read UBX input"),
        };
        for &byte in &buf[..n] {
            let Some(frame) = receiver.feed(byte) else {
                continue;
            };
            if opts.json {
                match receiver.last_fix() {
                    Some(fix) if fix.fix_number() != last_printed => {
                        last_printed = fix.fix_number();
                        let value = report::json_report(fix, receiver.is_valid_fix_position());
                        serde_json::to_writer(&mut out, &value)?;
                        writeln!(out)?;
                    },
                    _ => {},
                }
            } else {
                report::write_report(&mut out, &receiver, &frame)?;
                writeln!(out)?;
            }
        }
    }
    out.flush()?;

    log::info!(
        "{} messages, {} fixes",
        receiver.message_number(),
        receiver.fix_number()
    );
    Ok(())
}

fn setup(opts: &SetupOptions) -> Result<()> {
    let mut commands: Vec<Vec<u8>> = nav_pvt_setup_commands()
        .iter()
        .map(|cmd| cmd.to_vec())
        .collect();
    commands.push(CfgRateBuilder::from(opts.rate).into_packet_bytes().to_vec());

    let mut out: Box<dyn Write> = match &opts.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    for cmd in &commands {
        if opts.hex {
            let line: Vec<String> = cmd.iter().map(|b| format!("{:02X}", b)).collect();
            writeln!(out, "{}", line.join(" "))?;
        } else {
            out.write_all(cmd)?;
        }
    }
    out.flush()?;
    log::debug!("wrote {} commands", commands.len());
    Ok(())
}
