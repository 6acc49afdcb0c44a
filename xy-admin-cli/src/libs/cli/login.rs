use std::{error::Error as StdError, sync::Arc};

use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command, builder::RangedU64ValueParser};
use log::{info, warn};
use tokio::{
    signal,
    sync::mpsc::{self, UnboundedSender},
};

use xy_corelib::err::ErrResp;
use xy_sdk::{
    api::{
        account::{self, AccountDetail},
        http::Client,
    },
    login::{EventHandler, FlowStatus, QrLoginFlow},
};

use super::{Config, api_err, flow_options, new_client};

/// Results that the command waits for.
enum Outcome {
    /// Login succeeded and the account list is refreshed.
    Complete(Result<Vec<AccountDetail>, ErrResp>),
    /// The attempt failed or expired.
    Failed,
}

struct LoginHandler {
    client: Client,
    tx: UnboundedSender<Outcome>,
}

pub fn reg_args(cmd: Command) -> Command {
    cmd.about("Log-in a marketplace account by scanning the QR code").arg(
        Arg::new("retry")
            .short('r')
            .long("retry")
            .help("Times to start a new session after failure or expiration")
            .num_args(1)
            .default_value("0")
            .value_parser(RangedU64ValueParser::<u64>::new().range(0..)),
    )
}

pub async fn run(conf: &Config, args: &ArgMatches) -> Result<Option<()>, Box<dyn StdError>> {
    let retry = match args.get_one::<u64>("retry") {
        None => 0,
        Some(v) => *v,
    };
    let list = login(conf, retry).await?;
    println!("{}", serde_json::to_string_pretty(&list)?);
    Ok(Some(()))
}

async fn login(conf: &Config, retry: u64) -> Result<Vec<AccountDetail>, ErrResp> {
    const FN_NAME: &'static str = "login";

    let client = new_client(conf);
    info!("[{}] log in with backend {}", FN_NAME, client.base());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let flow = QrLoginFlow::new(Arc::new(client.clone()), flow_options(conf));
    flow.set_handler(Some(Arc::new(LoginHandler { client, tx })));

    let mut retry_left = retry;
    flow.start().await;
    loop {
        let outcome = tokio::select! {
            outcome = rx.recv() => outcome,
            _ = signal::ctrl_c() => {
                flow.cancel();
                return Err(ErrResp::ErrParam(Some("[login] cancelled".to_string())));
            }
        };
        match outcome {
            None => {
                flow.cancel();
                return Err(ErrResp::ErrUnknown(Some(
                    "[login] flow handler closed".to_string(),
                )));
            }
            Some(Outcome::Complete(result)) => return result,
            Some(Outcome::Failed) => {
                if retry_left == 0 {
                    flow.cancel();
                    return Err(ErrResp::ErrIntMsg(Some(
                        "[login] login failed or QR code expired".to_string(),
                    )));
                }
                retry_left -= 1;
                warn!("[{}] retry login, {} times left", FN_NAME, retry_left);
                flow.retry().await;
            }
        }
    }
}

#[async_trait]
impl EventHandler for LoginHandler {
    async fn on_status_change(&self, flow: &QrLoginFlow, status: FlowStatus) {
        const FN_NAME: &'static str = "LoginHandler::on_status_change";

        info!("[{}] status {:?}", FN_NAME, status);
        match status {
            FlowStatus::Loading => println!("Generating QR code..."),
            FlowStatus::Waiting => {
                if let Some(session) = flow.session() {
                    println!("Scan the QR code to log in: {}", session.qr_code_url);
                }
            }
            FlowStatus::Success => println!("Login succeeded"),
            FlowStatus::Error => {
                println!("Login failed or QR code expired");
                let _ = self.tx.send(Outcome::Failed);
            }
            FlowStatus::Idle => (),
        }
    }

    async fn on_complete(&self, _flow: &QrLoginFlow) {
        let result = match account::list(&self.client).await {
            Err(e) => Err(api_err("API", e)),
            Ok(list) => Ok(list),
        };
        let _ = self.tx.send(Outcome::Complete(result));
    }
}
