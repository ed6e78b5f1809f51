//! Simple command that prints one or '-n count' UUIDv1 strings
//!
//! Usage: uuid1 [-n count] [-l standard|serial|reversed] [-s shift] [-v]

use std::{env, io, io::Write, process::ExitCode};

use serial_uuid::{
    unix_ms_from_ticks, ClockSource, Layout, ReversedLayout, SerialLayout, StandardLayout,
    SystemClock, TimeBasedGenerator,
};

#[derive(Debug, Default)]
struct Options {
    count: Option<usize>,
    layout: Option<String>,
    shift: Option<i32>,
    verbose: bool,
}

fn main() -> io::Result<ExitCode> {
    let mut args = env::args();
    let program = args.next();
    let opts = match parse_args(args) {
        Ok(opts) => opts,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!(
                "Usage: {} [-n count] [-l standard|serial|reversed] [-s shift] [-v]",
                program.as_deref().unwrap_or("uuid1")
            );
            return Ok(ExitCode::FAILURE);
        }
    };

    let clock = SystemClock::default();
    let count = opts.count.unwrap_or(1);
    let result = match opts.layout.as_deref().unwrap_or("serial") {
        "standard" => print_uuids(&TimeBasedGenerator::new(StandardLayout, &clock), count, &opts),
        "reversed" => print_uuids(&TimeBasedGenerator::new(ReversedLayout, &clock), count, &opts),
        "serial" => match SerialLayout::new(opts.shift.unwrap_or(0)) {
            Ok(layout) => print_uuids(&TimeBasedGenerator::new(layout, &clock), count, &opts),
            Err(err) => {
                eprintln!("Error: {}", err);
                return Ok(ExitCode::FAILURE);
            }
        },
        other => {
            eprintln!("Error: unknown layout '{}'", other);
            return Ok(ExitCode::FAILURE);
        }
    };

    result.map(|_| ExitCode::SUCCESS)
}

fn print_uuids<L: Layout, C: ClockSource>(
    g: &TimeBasedGenerator<L, C>,
    count: usize,
    opts: &Options,
) -> io::Result<()> {
    let mut buf = io::BufWriter::new(io::stdout());
    for _ in 0..count {
        let uuid = g.generate();
        if opts.verbose {
            writeln!(
                buf,
                "{} (version={}, variant={}, MSBs=0x{:016X}, clock-sequence={}, unix_ms={})",
                uuid,
                uuid.version().unwrap_or_default(),
                u8::from(uuid.variant()),
                uuid.as_u64_pair().0,
                uuid.clock_sequence(),
                unix_ms_from_ticks(g.timestamp_of(&uuid)),
            )?;
        } else {
            writeln!(buf, "{}", uuid)?;
        }
    }
    buf.flush()
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut opts = Options::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-v" => opts.verbose = true,
            "-n" | "-l" | "-s" => {
                let Some(value) = args.next() else {
                    return Err(format!("argument to option '{}' missing", &arg[1..]));
                };
                let given_twice = match arg.as_str() {
                    "-n" => opts.count.replace(parse_value(&arg, &value)?).is_some(),
                    "-s" => opts.shift.replace(parse_value(&arg, &value)?).is_some(),
                    _ => opts.layout.replace(value).is_some(),
                };
                if given_twice {
                    return Err(format!("option '{}' given more than once", &arg[1..]));
                }
            }
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        }
    }

    if let Some(layout) = opts.layout.as_deref().filter(|&e| e != "serial") {
        if opts.shift.is_some() {
            return Err(format!("option 's' not applicable to layout '{}'", layout));
        }
    }
    Ok(opts)
}

fn parse_value<T: std::str::FromStr>(option: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("invalid argument to option '{}': '{}'", &option[1..], value))
}
