use clap::Command;
use laboratory::{SpecContext, expect};

use xy_admin_cli::libs::cli::{self, config};
use xy_corelib::err::{self, ErrResp};
use xy_sdk::api::http::{ApiError, Error};

use crate::TestState;

/// Test [`cli::reg_args`].
pub fn reg_args(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    let cmd = || config::reg_args(cli::reg_args(Command::new("test")));

    let args = cmd().try_get_matches_from(vec!["test", "analytics", "orders"]);
    let args = match args {
        Err(e) => return Err(format!("parse orders error: {}", e)),
        Ok(args) => args,
    };
    let range = match args.subcommand() {
        Some(("analytics", args)) => match args.subcommand() {
            Some(("orders", args)) => args.get_one::<String>("range").cloned(),
            _ => None,
        },
        _ => None,
    };
    expect(range.as_deref()).to_equal(Some("7days"))?;

    let args = cmd().try_get_matches_from(vec![
        "test",
        "analytics",
        "orders",
        "--range",
        "custom",
        "--start",
        "2024-02-01",
        "--end",
        "2024-02-29",
    ]);
    expect(args.is_ok()).to_equal(true)?;

    let args = cmd().try_get_matches_from(vec!["test", "analytics", "orders", "--range", "week"]);
    expect(args.is_err()).to_equal(true)?;
    let args = cmd().try_get_matches_from(vec![
        "test",
        "analytics",
        "orders",
        "--range",
        "custom",
        "--start",
        "2024-02-30",
    ]);
    expect(args.is_err()).to_equal(true)?;

    let args = cmd().try_get_matches_from(vec!["test", "qr-login", "--retry", "2"]);
    let args = match args {
        Err(e) => return Err(format!("parse qr-login error: {}", e)),
        Ok(args) => args,
    };
    let retry = match args.subcommand() {
        Some(("qr-login", args)) => args.get_one::<u64>("retry").copied(),
        _ => None,
    };
    expect(retry).to_equal(Some(2))?;

    let args = cmd().try_get_matches_from(vec!["test", "card", "details"]);
    expect(args.is_err()).to_equal(true)?;
    let args = cmd().try_get_matches_from(vec!["test", "card", "details", "--id", "3"]);
    expect(args.is_ok()).to_equal(true)?;
    let args = cmd().try_get_matches_from(vec!["test", "account", "list"]);
    expect(args.is_ok()).to_equal(true)
}

/// Test [`cli::validate_date`].
pub fn validate_date(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    expect(cli::validate_date("2024-02-29")).to_equal(Ok("2024-02-29".to_string()))?;
    expect(cli::validate_date("2023-02-29").is_err()).to_equal(true)?;
    expect(cli::validate_date("2024-2-1").is_err()).to_equal(true)?;
    expect(cli::validate_date("").is_err()).to_equal(true)
}

/// Test [`cli::api_err`].
pub fn api_err(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    let e = Error::Api(ApiError {
        code: err::E_NOT_FOUND.to_string(),
        message: Some("card not found".to_string()),
    });
    match cli::api_err("API", e) {
        ErrResp::ErrNotFound(Some(msg)) => expect(msg.as_str()).to_equal("[API] card not found")?,
        e => return Err(format!("unexpected error {}", e)),
    }

    let e = Error::Api(ApiError {
        code: err::E_AUTH.to_string(),
        message: None,
    });
    match cli::api_err("API", e) {
        ErrResp::ErrAuth(Some(msg)) => expect(msg.as_str()).to_equal("[API] err_auth")?,
        e => return Err(format!("unexpected error {}", e)),
    }

    let e = Error::Api(ApiError::unexpected("bad body".to_string()));
    expect(cli::api_err("API", e).code()).to_equal(err::E_INT_MSG)?;

    let e = Error::Std(Box::new(std::io::Error::other("refused")));
    expect(cli::api_err("API", e).code()).to_equal(err::E_RSC)
}
