//! Program configurations.

use std::env;

use clap::{Arg, ArgMatches, Command, builder::RangedU64ValueParser};
use validators::{models::Protocol, prelude::*};

use xy_corelib::err::ErrResp;

use super::Config;

#[derive(Validator)]
#[validator(http_ftp_url(local(Allow)))]
struct HttpFtpURL {
    url: url::Url,
    protocol: Protocol,
}

pub const DEF_API: &'static str = "http://localhost:8080";
pub const DEF_POLL_MILLIS: u64 = 2000;
pub const DEF_SUCCESS_DELAY_MILLIS: u64 = 1000;

/// To register Clap arguments.
pub fn reg_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("xy-cli.api")
            .long("xy-cli.api")
            .help("backend API base path with host")
            .num_args(1),
    )
    .arg(
        Arg::new("xy-cli.token")
            .long("xy-cli.token")
            .help("backend bearer token")
            .num_args(1),
    )
    .arg(
        Arg::new("xy-cli.poll-millis")
            .long("xy-cli.poll-millis")
            .help("QR-code login polling interval in milliseconds")
            .num_args(1)
            .value_parser(RangedU64ValueParser::<u64>::new().range(1..)),
    )
    .arg(
        Arg::new("xy-cli.success-delay-millis")
            .long("xy-cli.success-delay-millis")
            .help("delay in milliseconds before closing the login flow after success")
            .num_args(1)
            .value_parser(RangedU64ValueParser::<u64>::new().range(1..)),
    )
}

/// To read input arguments from command-line arguments and environment variables.
///
/// This function will call [`apply_default()`] to fill missing values so you do not need call it
/// again.
pub fn read_args(args: &ArgMatches) -> Result<Config, ErrResp> {
    apply_default(&Config {
        api: match args.get_one::<String>("xy-cli.api") {
            None => env::var("XYCLI_API").ok(),
            Some(v) => Some(v.clone()),
        },
        token: match args.get_one::<String>("xy-cli.token") {
            None => env::var("XYCLI_TOKEN").ok(),
            Some(v) => Some(v.clone()),
        },
        poll_millis: match args.get_one::<u64>("xy-cli.poll-millis") {
            None => env_millis("XYCLI_POLL_MILLIS")?,
            Some(v) => Some(*v),
        },
        success_delay_millis: match args.get_one::<u64>("xy-cli.success-delay-millis") {
            None => env_millis("XYCLI_SUCCESS_DELAY_MILLIS")?,
            Some(v) => Some(*v),
        },
    })
}

/// To validate the configuration and to fill missing values with default values.
pub fn apply_default(config: &Config) -> Result<Config, ErrResp> {
    Ok(Config {
        api: match config.api.as_ref() {
            None => Some(DEF_API.to_string()),
            Some(v) => match HttpFtpURL::parse_string(v.as_str()) {
                Ok(HttpFtpURL {
                    protocol: Protocol::HTTP | Protocol::HTTPS,
                    ..
                }) => Some(v.clone()),
                _ => {
                    let msg = format!("[config] invalid `xy-cli.api` {}", v);
                    return Err(ErrResp::ErrParam(Some(msg)));
                }
            },
        },
        token: match config.token.as_ref() {
            Some(v) if v.len() > 0 => Some(v.clone()),
            _ => None,
        },
        poll_millis: match config.poll_millis {
            None | Some(0) => Some(DEF_POLL_MILLIS),
            Some(v) => Some(v),
        },
        success_delay_millis: match config.success_delay_millis {
            None | Some(0) => Some(DEF_SUCCESS_DELAY_MILLIS),
            Some(v) => Some(v),
        },
    })
}

fn env_millis(name: &str) -> Result<Option<u64>, ErrResp> {
    match env::var(name) {
        Err(_) => Ok(None),
        Ok(v) => match v.parse::<u64>() {
            Err(_) => {
                let msg = format!("[config] invalid `{}` {}", name, v);
                Err(ErrResp::ErrParam(Some(msg)))
            }
            Ok(v) => Ok(Some(v)),
        },
    }
}
