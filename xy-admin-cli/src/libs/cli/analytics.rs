use std::error::Error as StdError;

use clap::{Arg, ArgMatches, Command};
use log::debug;
use serde::Serialize;

use xy_corelib::err::ErrResp;
use xy_sdk::{
    api::analytics::{self, AdminStats, OrderAnalytics},
    range::{self, DateRange, SEL_7DAYS, SELECTORS},
};

use super::{Config, api_err, new_client, validate_date};

#[derive(Serialize)]
struct OrdersData {
    range: DateRange,
    #[serde(flatten)]
    analytics: OrderAnalytics,
    /// Average order amount of each day.
    daily_avg_amount: Vec<f64>,
}

pub fn reg_args(cmd: Command) -> Command {
    cmd.about("Statistics and order analytics")
        .subcommand(Command::new("stats").about("Get overall statistics"))
        .subcommand(
            Command::new("orders")
                .about("Get order analytics of a time range")
                .arg(
                    Arg::new("range")
                        .long("range")
                        .help("Time range")
                        .num_args(1)
                        .default_value(SEL_7DAYS)
                        .value_parser(SELECTORS),
                )
                .arg(
                    Arg::new("start")
                        .long("start")
                        .help("Start date of the `custom` range in YYYY-MM-DD")
                        .num_args(1)
                        .value_parser(validate_date),
                )
                .arg(
                    Arg::new("end")
                        .long("end")
                        .help("End date of the `custom` range in YYYY-MM-DD")
                        .num_args(1)
                        .value_parser(validate_date),
                ),
        )
}

pub async fn run(conf: &Config, args: &ArgMatches) -> Result<Option<()>, Box<dyn StdError>> {
    match args.subcommand() {
        Some(("stats", _)) => {
            let data = stats(conf).await?;
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(Some(()))
        }
        Some(("orders", args)) => {
            let data = orders(conf, args).await?;
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(Some(()))
        }
        _ => Ok(None),
    }
}

async fn stats(conf: &Config) -> Result<AdminStats, ErrResp> {
    match analytics::stats(&new_client(conf)).await {
        Err(e) => Err(api_err("API", e)),
        Ok(stats) => Ok(stats),
    }
}

async fn orders(conf: &Config, args: &ArgMatches) -> Result<OrdersData, ErrResp> {
    const FN_NAME: &'static str = "orders";

    let selector = match args.get_one::<String>("range") {
        None => SEL_7DAYS,
        Some(v) => v.as_str(),
    };
    let range = range::resolve(
        selector,
        args.get_one::<String>("start").map(|v| v.as_str()),
        args.get_one::<String>("end").map(|v| v.as_str()),
    );
    debug!(
        "[{}] range {} from {} to {}",
        FN_NAME, selector, range.start_date, range.end_date
    );

    let analytics = match analytics::orders(&new_client(conf), &range).await {
        Err(e) => return Err(api_err("API", e)),
        Ok(analytics) => analytics,
    };
    let daily_avg_amount = analytics
        .daily_stats
        .iter()
        .map(|stats| stats.avg_amount())
        .collect();
    Ok(OrdersData {
        range,
        analytics,
        daily_avg_amount,
    })
}
