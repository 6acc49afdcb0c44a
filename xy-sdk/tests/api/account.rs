use laboratory::{SpecContext, Suite, describe, expect};

use xy_corelib::err;
use xy_sdk::api::{account, http::Error};

use super::{STATE, after_all_fn, before_all_fn, new_client, new_fail_client};
use crate::TestState;

pub fn suite() -> Suite<TestState> {
    describe("account", |context| {
        context.it("list()", test_list);
        context.it("list() with error", test_list_err);

        context.before_all(before_all_fn).after_all(after_all_fn);
    })
}

fn test_list(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();

    runtime.block_on(async move {
        let list = match account::list(&new_client()).await {
            Err(e) => return Err(format!("list error: {}", e)),
            Ok(list) => list,
        };
        expect(list.len()).to_equal(2)?;

        let item = &list[0];
        expect(item.id.as_str()).to_equal("shop-a")?;
        expect(item.enabled).to_equal(true)?;
        expect(item.nickname.as_deref()).to_equal(Some("Shop A"))?;
        expect(item.remark.as_deref()).to_equal(Some("main"))?;
        expect(item.auto_confirm).to_equal(true)?;
        expect(item.pause_duration).to_equal(10)?;

        let item = &list[1];
        expect(item.id.as_str()).to_equal("shop-b")?;
        expect(item.enabled).to_equal(false)?;
        expect(item.nickname.is_none()).to_equal(true)?;
        expect(item.auto_confirm).to_equal(false)?;
        expect(item.pause_duration).to_equal(0)
    })
}

fn test_list_err(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();

    runtime.block_on(async move {
        match account::list(&new_fail_client()).await {
            Err(Error::Api(e)) => {
                expect(e.code.as_str()).to_equal(err::E_UNKNOWN)?;
                expect(e.message.as_deref()).to_equal(Some("database unavailable"))
            }
            Err(e) => Err(format!("unexpected error type: {}", e)),
            Ok(_) => Err("list should fail".to_string()),
        }
    })
}
