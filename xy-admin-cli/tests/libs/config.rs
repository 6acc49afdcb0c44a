use clap::Command;
use laboratory::{SpecContext, expect};

use xy_admin_cli::libs::cli::{Config, config};

use super::{remove_env_var, set_env_var};
use crate::TestState;

const ENV_NAMES: [&'static str; 4] = [
    "XYCLI_API",
    "XYCLI_TOKEN",
    "XYCLI_POLL_MILLIS",
    "XYCLI_SUCCESS_DELAY_MILLIS",
];

/// Test [`config::apply_default`].
pub fn apply_default(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    let conf = match config::apply_default(&Config::default()) {
        Err(e) => return Err(format!("apply default error: {}", e)),
        Ok(conf) => conf,
    };
    expect(conf.api.as_deref()).to_equal(Some(config::DEF_API))?;
    expect(conf.token).to_equal(None)?;
    expect(conf.poll_millis).to_equal(Some(config::DEF_POLL_MILLIS))?;
    expect(conf.success_delay_millis).to_equal(Some(config::DEF_SUCCESS_DELAY_MILLIS))?;

    let conf = Config {
        api: Some("https://example.com/api".to_string()),
        token: Some("".to_string()),
        poll_millis: Some(0),
        success_delay_millis: Some(500),
    };
    let conf = match config::apply_default(&conf) {
        Err(e) => return Err(format!("apply default error: {}", e)),
        Ok(conf) => conf,
    };
    expect(conf.api.as_deref()).to_equal(Some("https://example.com/api"))?;
    expect(conf.token).to_equal(None)?;
    expect(conf.poll_millis).to_equal(Some(config::DEF_POLL_MILLIS))?;
    expect(conf.success_delay_millis).to_equal(Some(500))?;

    for api in ["localhost", "ftp://localhost/api", "http//localhost"] {
        let conf = Config {
            api: Some(api.to_string()),
            ..Default::default()
        };
        if config::apply_default(&conf).is_ok() {
            return Err(format!("api {} should be invalid", api));
        }
    }
    Ok(())
}

/// Test [`config::reg_args`].
pub fn reg_args(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    let args = config::reg_args(Command::new("test")).try_get_matches_from(vec![
        "test",
        "--xy-cli.api",
        "http://127.0.0.1:9000",
        "--xy-cli.token",
        "token",
        "--xy-cli.poll-millis",
        "100",
        "--xy-cli.success-delay-millis",
        "200",
    ]);
    let args = match args {
        Err(e) => return Err(format!("parse arguments error: {}", e)),
        Ok(args) => args,
    };
    let conf = match config::read_args(&args) {
        Err(e) => return Err(format!("read arguments error: {}", e)),
        Ok(conf) => conf,
    };
    expect(conf.api.as_deref()).to_equal(Some("http://127.0.0.1:9000"))?;
    expect(conf.token.as_deref()).to_equal(Some("token"))?;
    expect(conf.poll_millis).to_equal(Some(100))?;
    expect(conf.success_delay_millis).to_equal(Some(200))?;

    let args = config::reg_args(Command::new("test"))
        .try_get_matches_from(vec!["test", "--xy-cli.poll-millis", "0"]);
    expect(args.is_err()).to_equal(true)?;
    let args = config::reg_args(Command::new("test"))
        .try_get_matches_from(vec!["test", "--xy-cli.success-delay-millis", "-1"]);
    expect(args.is_err()).to_equal(true)
}

/// Test [`config::read_args`].
pub fn read_args(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    for name in ENV_NAMES {
        remove_env_var(name);
    }
    let args = config::reg_args(Command::new("test")).get_matches_from(vec!["test"]);
    let conf = match config::read_args(&args) {
        Err(e) => return Err(format!("read default error: {}", e)),
        Ok(conf) => conf,
    };
    expect(conf.api.as_deref()).to_equal(Some(config::DEF_API))?;
    expect(conf.token).to_equal(None)?;
    expect(conf.poll_millis).to_equal(Some(config::DEF_POLL_MILLIS))?;

    set_env_var("XYCLI_API", "http://localhost:18080");
    set_env_var("XYCLI_TOKEN", "env-token");
    set_env_var("XYCLI_POLL_MILLIS", "300");
    set_env_var("XYCLI_SUCCESS_DELAY_MILLIS", "400");
    let conf = match config::read_args(&args) {
        Err(e) => return Err(format!("read env error: {}", e)),
        Ok(conf) => conf,
    };
    expect(conf.api.as_deref()).to_equal(Some("http://localhost:18080"))?;
    expect(conf.token.as_deref()).to_equal(Some("env-token"))?;
    expect(conf.poll_millis).to_equal(Some(300))?;
    expect(conf.success_delay_millis).to_equal(Some(400))?;

    set_env_var("XYCLI_POLL_MILLIS", "soon");
    let result = config::read_args(&args);
    expect(result.is_err()).to_equal(true)?;

    set_env_var("XYCLI_POLL_MILLIS", "300");
    set_env_var("XYCLI_API", "not a url");
    let result = config::read_args(&args);
    expect(result.is_err()).to_equal(true)?;

    for name in ENV_NAMES {
        remove_env_var(name);
    }
    Ok(())
}
