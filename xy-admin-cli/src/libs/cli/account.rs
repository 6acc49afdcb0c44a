use std::error::Error as StdError;

use clap::{ArgMatches, Command};

use xy_corelib::err::ErrResp;
use xy_sdk::api::account::{self, AccountDetail};

use super::{Config, api_err, new_client};

pub fn reg_args(cmd: Command) -> Command {
    cmd.about("Marketplace account management")
        .subcommand(Command::new("list").about("Get account list with details"))
}

pub async fn run(conf: &Config, args: &ArgMatches) -> Result<Option<()>, Box<dyn StdError>> {
    match args.subcommand() {
        Some(("list", _)) => {
            let data = list(conf).await?;
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(Some(()))
        }
        _ => Ok(None),
    }
}

async fn list(conf: &Config) -> Result<Vec<AccountDetail>, ErrResp> {
    match account::list(&new_client(conf)).await {
        Err(e) => Err(api_err("API", e)),
        Ok(list) => Ok(list),
    }
}
