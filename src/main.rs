#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;
extern crate loggerv;

extern crate kubewright;

use kubewright::generate::{manifest_stdout, manifest_to_disk};
use kubewright::logging::parse_level;
use kubewright::util::{crc32_checksum, generate_password};
use kubewright::*;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::LevelFilter;
use std::path::Path;
use std::process;

const LOG_LEVEL_ENV: &str = "KUBEWRIGHT_LOG_LEVEL";

fn print_error_debug(e: &Error) {
    for cause in e.iter().skip(1) {
        warn!("caused by: {}", cause);
    }
}

fn result_exit<T>(name: &str, x: Result<T>) {
    let _ = x.map_err(|e| {
        println!(); // add a separator
        error!("{} error: {}", name, e);
        print_error_debug(&e);
        process::exit(1);
    });
    process::exit(0);
}

fn conditional_exit<T>(x: Result<T>) -> T {
    match x {
        Ok(v) => v,
        Err(e) => {
            error!("error: {}", e);
            print_error_debug(&e);
            process::exit(1);
        }
    }
}

fn build_cli() -> App<'static, 'static> {
    let mut app = App::new("kubewright")
        .version(crate_version!())
        .setting(AppSettings::VersionlessSubcommands)
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::DeriveDisplayOrder)
        .global_settings(&[AppSettings::ColoredHelp])
        .about("Build kubernetes manifests from small typed configs")
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .global(true)
            .help("Increase verbosity"))
        .arg(Arg::with_name("debug")
            .short("d")
            .long("debug")
            .global(true)
            .help("Adds line numbers to log statements"));

    for kind in Kind::all() {
        app = app.subcommand(SubCommand::with_name(kind.as_str())
            .about(build_about(kind))
            .arg(Arg::with_name("file")
                .short("f")
                .long("file")
                .takes_value(true)
                .required(true)
                .help("Config file to build from"))
            .arg(Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("Output file to save to"))
            .arg(Arg::with_name("verify")
                .long("verify")
                .help("Check the config before building")));
    }

    app.subcommand(SubCommand::with_name("validate")
            .about("Check a config without building anything")
            .arg(Arg::with_name("kind")
                .short("k")
                .long("kind")
                .takes_value(true)
                .required(true)
                .possible_values(&["deployment", "ingress", "secret", "configmap", "pushsecret", "externalsecret"])
                .help("Kind of config"))
            .arg(Arg::with_name("file")
                .short("f")
                .long("file")
                .takes_value(true)
                .required(true)
                .help("Config file to check")))
        .subcommand(SubCommand::with_name("checksum")
            .about("CRC-32 of a string as uppercase hex")
            .arg(Arg::with_name("input")
                .required(true)
                .help("String to checksum")))
        .subcommand(SubCommand::with_name("password")
            .about("Generate a random password")
            .arg(Arg::with_name("length")
                .short("l")
                .long("length")
                .takes_value(true)
                .default_value("32")
                .help("Number of characters"))
            .arg(Arg::with_name("exclude-ambiguous")
                .long("exclude-ambiguous")
                .help("Leave out symbols that break config files and shells")))
}

fn build_about(kind: Kind) -> &'static str {
    match kind {
        Kind::Deployment => "Build a Deployment from a workload config",
        Kind::Ingress => "Build an Ingress from a routing config",
        Kind::Secret => "Build an Opaque Secret",
        Kind::ConfigMap => "Build a ConfigMap",
        Kind::PushSecret => "Build a PushSecret sending a Secret to a store",
        Kind::ExternalSecret => "Build an ExternalSecret pulling from a store",
    }
}

/// Level from the environment, or from the number of -v flags
fn log_level(args: &ArgMatches) -> Result<LevelFilter> {
    if std::env::var(LOG_LEVEL_ENV).is_ok() {
        return parse_level(&env::get_string(LOG_LEVEL_ENV)?);
    }
    Ok(match args.occurrences_of("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    })
}

fn verbosity(level: LevelFilter) -> u64 {
    match level {
        LevelFilter::Off | LevelFilter::Error => 0,
        LevelFilter::Warn => 1,
        LevelFilter::Info => 2,
        LevelFilter::Debug => 3,
        LevelFilter::Trace => 4,
    }
}

fn main() {
    let args = build_cli().get_matches();
    run(&args);
}

fn run(args: &ArgMatches) {
    // the log level env var is read before the logger exists
    // so its errors go straight to stderr
    let level = match log_level(args) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };
    loggerv::Logger::new()
        .verbosity(verbosity(level))
        .module_path(true)
        .line_numbers(args.is_present("debug"))
        .init()
        .unwrap_or_else(|e| eprintln!("logger already initialized: {}", e));

    let log = Logger::new("kubewright").with_level(level);
    dispatch_commands(args, &log)
}

fn dispatch_commands(args: &ArgMatches, log: &Logger) {
    if let Some(a) = args.subcommand_matches("checksum") {
        let input = a.value_of("input").unwrap_or_default();
        println!("{}", crc32_checksum(input));
        process::exit(0);
    }
    if let Some(a) = args.subcommand_matches("password") {
        let length = conditional_exit(value_t!(a, "length", usize).map_err(|e| {
            Error::from(ErrorKind::PasswordGeneration(e.message))
        }));
        let pw = conditional_exit(generate_password(length, a.is_present("exclude-ambiguous")));
        println!("{}", pw);
        process::exit(0);
    }
    if let Some(a) = args.subcommand_matches("validate") {
        let kind: Kind = conditional_exit(a.value_of("kind").unwrap_or_default().parse());
        let file = Path::new(a.value_of("file").unwrap_or_default());
        let res = kind.verify_file(file).map(|_| {
            log.info("Config verified", &[
                ("kind", &kind as &dyn std::fmt::Display),
                ("file", &file.display() as &dyn std::fmt::Display),
            ]);
        });
        result_exit(args.subcommand_name().unwrap_or("validate"), res)
    }

    for kind in Kind::all() {
        if let Some(a) = args.subcommand_matches(kind.as_str()) {
            let res = build_kind(kind, a, &log.child(kind.as_str()));
            result_exit(kind.as_str(), res)
        }
    }

    unreachable!("Subcommand valid, but not implemented");
}

fn build_kind(kind: Kind, args: &ArgMatches, log: &Logger) -> Result<()> {
    let file = Path::new(args.value_of("file").unwrap_or_default());
    let mf = kind.build(file, args.is_present("verify"), log)?;
    if let Some(o) = args.value_of("output") {
        manifest_to_disk(&mf, Path::new(o))
    } else {
        manifest_stdout(&mf)
    }
}
