use std::error::Error as StdError;

use clap::{ArgMatches, Command};
use serde::Deserialize;

use xy_corelib::{
    err::{self, ErrResp},
    strings,
};
use xy_sdk::{
    api::http::{Client, ClientOptions, Error},
    login::FlowOptions,
};

mod account;
mod analytics;
mod card;
pub mod config;
mod login;

/// Application configurations.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Config {
    /// Backend API base path with host. For example: `http://localhost:8080`.
    pub api: Option<String>,
    /// The bearer token if the backend requires one.
    pub token: Option<String>,
    /// QR-code login status polling interval in milliseconds.
    #[serde(rename = "pollMillis")]
    pub poll_millis: Option<u64>,
    /// Time in milliseconds from login success to closing the login flow.
    #[serde(rename = "successDelayMillis")]
    pub success_delay_millis: Option<u64>,
}

/// To register Clap arguments.
pub fn reg_args(cmd: Command) -> Command {
    cmd.subcommand(login::reg_args(Command::new("qr-login")))
        .subcommand(account::reg_args(Command::new("account")))
        .subcommand(analytics::reg_args(Command::new("analytics")))
        .subcommand(card::reg_args(Command::new("card")))
}

pub async fn run(conf: &Config, args: &ArgMatches) -> Result<Option<()>, Box<dyn StdError>> {
    match args.subcommand() {
        Some(("qr-login", args)) => login::run(conf, args).await,
        Some(("account", args)) => account::run(conf, args).await,
        Some(("analytics", args)) => analytics::run(conf, args).await,
        Some(("card", args)) => card::run(conf, args).await,
        _ => Ok(None),
    }
}

/// The value parser of `YYYY-MM-DD` dates.
pub fn validate_date(date_str: &str) -> Result<String, String> {
    match strings::parse_date(date_str) {
        None => Err("should be a valid date in YYYY-MM-DD".to_string()),
        Some(_) => Ok(date_str.to_string()),
    }
}

/// To map SDK errors to [`ErrResp`] with the `[scope]` prefix.
pub fn api_err(scope: &str, e: Error) -> ErrResp {
    match e {
        Error::Std(e) => ErrResp::ErrRsc(Some(format!("[{}] request error: {}", scope, e))),
        Error::Api(e) => {
            let msg = Some(match e.message {
                None => format!("[{}] {}", scope, e.code),
                Some(message) => format!("[{}] {}", scope, message),
            });
            match e.code.as_str() {
                err::E_AUTH => ErrResp::ErrAuth(msg),
                err::E_NOT_FOUND => ErrResp::ErrNotFound(msg),
                err::E_PARAM => ErrResp::ErrParam(msg),
                err::E_PERM => ErrResp::ErrPerm(msg),
                err::E_UNKNOWN => ErrResp::ErrUnknown(msg),
                _ => ErrResp::ErrIntMsg(msg),
            }
        }
    }
}

fn new_client(conf: &Config) -> Client {
    Client::new(ClientOptions {
        base: match conf.api.as_ref() {
            None => config::DEF_API.to_string(),
            Some(api) => api.clone(),
        },
        token: conf.token.clone(),
    })
}

fn flow_options(conf: &Config) -> FlowOptions {
    FlowOptions {
        poll_millis: conf.poll_millis.unwrap_or(config::DEF_POLL_MILLIS),
        success_delay_millis: conf
            .success_delay_millis
            .unwrap_or(config::DEF_SUCCESS_DELAY_MILLIS),
    }
}
