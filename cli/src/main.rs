mod commands;
mod flatten;
mod parse;
mod tessellate;

use clap::*;
use commands::*;
use conifer::tessellation::{ConicOverflow, StripOptions};

use std::fs::File;
use std::io::{self, stdin, stdout, Read};
use std::process;
use std::result::Result;

fn flattening_args() -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name("TOLERANCE")
            .short("t")
            .long("tolerance")
            .help("Sets the tolerance threshold for conics (0.25 by default)")
            .value_name("TOLERANCE")
            .takes_value(true),
        Arg::with_name("MAX_DEPTH")
            .long("max-depth")
            .help("Sets the maximum quadratic bézier subdivision depth (15 by default)")
            .value_name("DEPTH")
            .takes_value(true),
        Arg::with_name("MAX_EXPONENT")
            .long("max-exponent")
            .help("Conics are approximated with at most 2^EXPONENT quadratic curves (5 by default)")
            .value_name("EXPONENT")
            .takes_value(true),
        Arg::with_name("STRICT")
            .long("strict")
            .help("Fails instead of exceeding the tolerance when a conic needs too many curves"),
        Arg::with_name("LOG")
            .long("log")
            .help("Enables the tessellator's debug logging (debug builds only)"),
    ]
}

fn main() {
    env_logger::init();

    let matches = App::new("conifer command-line interface")
        .version("0.1")
        .author("The conifer developers")
        .about("Conic path flattener and strip tessellator")
        .subcommand(
            SubCommand::with_name("tessellate")
                .about("Tessellates a path into a triangle strip")
                .args(&flattening_args())
                .arg(
                    Arg::with_name("COUNT")
                        .short("c")
                        .long("count")
                        .help("Only prints the number of triangles and vertices"),
                ),
        )
        .subcommand(
            SubCommand::with_name("flatten")
                .about("Flattens a path into its boundary polygon")
                .args(&flattening_args())
                .arg(
                    Arg::with_name("COUNT")
                        .short("c")
                        .long("count")
                        .help("Only prints the number of vertices"),
                ),
        )
        .arg(
            Arg::with_name("PATH")
                .value_name("PATH")
                .help("A path, for example \"M 0 100 K 0 200 100 200 0.7071 Z\"")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("INPUT")
                .help("Sets the input file to use (reads stdin without PATH or INPUT)")
                .short("i")
                .long("input")
                .value_name("FILE")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Sets the output file to use")
                .value_name("FILE")
                .short("o")
                .long("output")
                .takes_value(true)
                .required(false),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let input = read_input(matches)?;
    let path = parse::parse_path(&input)?;

    log::debug!(
        "parsed {} verbs, {} points, {} weights",
        path.verbs.len(),
        path.points.len(),
        path.weights.len()
    );

    let output: Box<dyn io::Write> = match matches.value_of("OUTPUT") {
        Some(output_file) => Box::new(File::create(output_file)?),
        None => Box::new(stdout()),
    };

    if let Some(tess_matches) = matches.subcommand_matches("tessellate") {
        let cmd = TessellateCmd {
            path,
            output,
            options: get_options(tess_matches)?,
            count: tess_matches.is_present("COUNT"),
            log: tess_matches.is_present("LOG"),
        };

        tessellate::tessellate(cmd)?;
    } else if let Some(flatten_matches) = matches.subcommand_matches("flatten") {
        let cmd = FlattenCmd {
            path,
            output,
            options: get_options(flatten_matches)?,
            count: flatten_matches.is_present("COUNT"),
            log: flatten_matches.is_present("LOG"),
        };

        flatten::flatten(cmd)?;
    } else {
        eprintln!("{}", matches.usage());
    }

    Ok(())
}

fn read_input(matches: &ArgMatches) -> Result<String, CliError> {
    let mut input_buffer = matches.value_of("PATH").unwrap_or("").to_string();

    if let Some(input_file) = matches.value_of("INPUT") {
        File::open(input_file)?.read_to_string(&mut input_buffer)?;
    } else if input_buffer.is_empty() {
        stdin().read_to_string(&mut input_buffer)?;
    }

    Ok(input_buffer)
}

fn get_options(matches: &ArgMatches) -> Result<StripOptions, CliError> {
    let mut options = StripOptions::DEFAULT;

    if let Some(tolerance) = get_value(matches, "TOLERANCE")? {
        options = options.with_tolerance(tolerance);
    }
    if let Some(depth) = get_value(matches, "MAX_DEPTH")? {
        options = options.with_max_flattening_depth(depth);
    }
    if let Some(exponent) = get_value(matches, "MAX_EXPONENT")? {
        options = options.with_max_quad_exponent(exponent);
    }
    if matches.is_present("STRICT") {
        options = options.with_conic_overflow(ConicOverflow::Error);
    }

    Ok(options)
}

fn get_value<T: std::str::FromStr>(
    matches: &ArgMatches,
    name: &'static str,
) -> Result<Option<T>, CliError> {
    match matches.value_of(name) {
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| CliError::InvalidArgument {
                name,
                value: value.to_string(),
            }),
        None => Ok(None),
    }
}
