use std::error::Error as StdError;

use clap::{Arg, ArgMatches, Command, builder::RangedU64ValueParser};
use log::debug;
use serde::Serialize;

use xy_corelib::err::ErrResp;
use xy_sdk::api::card::{self, Card, CardDetails};

use super::{Config, api_err, new_client};

#[derive(Serialize)]
struct DetailsData {
    card: Card,
    details: CardDetails,
}

pub fn reg_args(cmd: Command) -> Command {
    cmd.about("Dispatch card management")
        .subcommand(Command::new("list").about("Get card list"))
        .subcommand(
            Command::new("details")
                .about("Get inventory and dispatch records of a card")
                .arg(
                    Arg::new("id")
                        .short('i')
                        .long("id")
                        .help("Card ID")
                        .num_args(1)
                        .required(true)
                        .value_parser(RangedU64ValueParser::<u64>::new().range(1..)),
                ),
        )
}

pub async fn run(conf: &Config, args: &ArgMatches) -> Result<Option<()>, Box<dyn StdError>> {
    match args.subcommand() {
        Some(("list", _)) => {
            let data = list(conf).await?;
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(Some(()))
        }
        Some(("details", args)) => {
            let card_id = match args.get_one::<u64>("id") {
                None => return Err(Box::new(ErrResp::ErrParam(Some("[card] missing id".into())))),
                Some(v) => *v,
            };
            let data = details(conf, card_id).await?;
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(Some(()))
        }
        _ => Ok(None),
    }
}

async fn list(conf: &Config) -> Result<Vec<Card>, ErrResp> {
    const FN_NAME: &'static str = "list";

    let list = match card::list(&new_client(conf)).await {
        Err(e) => return Err(api_err("API", e)),
        Ok(list) => list,
    };
    for item in list.iter() {
        debug!(
            "[{}] card {} ({}) {}",
            FN_NAME,
            item.id,
            item.content.kind(),
            item.name
        );
    }
    Ok(list)
}

async fn details(conf: &Config, card_id: u64) -> Result<DetailsData, ErrResp> {
    let client = new_client(conf);
    let card = match card::get(&client, card_id).await {
        Err(e) => return Err(api_err("API", e)),
        Ok(card) => card,
    };
    let details = match card::details(&client, &card).await {
        Err(e) => return Err(api_err("API", e)),
        Ok(details) => details,
    };
    Ok(DetailsData { card, details })
}
