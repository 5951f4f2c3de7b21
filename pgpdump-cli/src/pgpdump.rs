/// Dumps OpenPGP packets.

use anyhow::Context as _;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::process::exit;

use sequoia_pgpdump::{Options, Result, parse::Parser};

mod pgpdump_cli;

fn read_input(f: Option<&str>) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    match f {
        Some(f) if f != "-" => {
            File::open(f)
                .with_context(|| format!("Failed to open {:?}", f))?
                .read_to_end(&mut data)
                .with_context(|| format!("Failed to read {:?}", f))?;
        },
        _ => {
            io::stdin().read_to_end(&mut data)
                .context("Failed to read stdin")?;
        },
    }
    Ok(data)
}

fn create_or_stdout(f: Option<&str>) -> Result<Box<dyn io::Write>> {
    match f {
        None => Ok(Box::new(io::stdout())),
        Some(p) if p == "-" => Ok(Box::new(io::stdout())),
        Some(f) => Ok(Box::new(OpenOptions::new()
                               .write(true)
                               .truncate(true)
                               .create(true)
                               .open(f)
                               .context("Failed to create output file")?)),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let matches = pgpdump_cli::build().get_matches();

    let options = Options::default()
        .armor(matches.is_present("armor"))
        .debug(matches.is_present("debug"))
        .utc(matches.is_present("utc"))
        .literal(matches.is_present("literal"))
        .marker(matches.is_present("marker"))
        .private(matches.is_present("private"))
        .integer(matches.is_present("int"));

    let input = read_input(matches.value_of("input"))?;
    let dump = Parser::new(options).parse(&input);

    let mut output = create_or_stdout(matches.value_of("output"))?;
    if matches.is_present("json") {
        writeln!(output, "{}", dump.to_json(true)?)?;
    } else {
        dump.write_text(&mut output)?;
    }
    output.flush()?;

    for e in dump.errors() {
        eprintln!("pgpdump: {:#}", e);
    }
    if ! dump.is_ok() {
        exit(1);
    }
    Ok(())
}
