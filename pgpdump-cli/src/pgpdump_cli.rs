/// Command-line parser for pgpdump.

use clap::{App, Arg};

pub fn build() -> App<'static, 'static> {
    App::new("pgpdump")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Dumps the packets of OpenPGP data.  Nothing is decrypted \
                or verified.")
        .arg(Arg::with_name("input").value_name("FILE")
             .help("Reads from FILE instead of stdin"))
        .arg(Arg::with_name("output").value_name("FILE")
             .long("output")
             .short("o")
             .takes_value(true)
             .help("Writes to FILE instead of stdout"))
        .arg(Arg::with_name("json")
             .long("json")
             .short("j")
             .help("Emits JSON instead of a text tree"))
        .arg(Arg::with_name("armor")
             .long("armor")
             .short("a")
             .help("Accepts ASCII armored input only"))
        .arg(Arg::with_name("debug")
             .long("debug")
             .short("d")
             .help("Dumps raw octets of coded values and other masked \
                    fields"))
        .arg(Arg::with_name("utc")
             .long("utc")
             .short("u")
             .help("Prints times in UTC"))
        .arg(Arg::with_name("literal")
             .long("literal")
             .short("l")
             .help("Dumps the content of literal data packets"))
        .arg(Arg::with_name("marker")
             .long("marker")
             .short("m")
             .help("Dumps the content of marker packets"))
        .arg(Arg::with_name("private")
             .long("private")
             .short("p")
             .help("Dumps the content of private packets"))
        .arg(Arg::with_name("int")
             .long("int")
             .short("i")
             .help("Dumps multi-precision integers"))
}
