use laboratory::{SpecContext, Suite, describe, expect};

use xy_corelib::err;
use xy_sdk::{
    api::{
        analytics::{self, DailyStats},
        http::Error,
    },
    range::{self, DateRange},
};

use super::{STATE, after_all_fn, before_all_fn, new_client, new_fail_client};
use crate::TestState;

pub fn suite() -> Suite<TestState> {
    describe("analytics", |context| {
        context.it("stats()", test_stats);
        context.it("stats() with error", test_stats_err);
        context.it("orders()", test_orders);
        context.it("orders() with resolved range", test_orders_range);
        context.it("DailyStats::avg_amount()", test_avg_amount);

        context.before_all(before_all_fn).after_all(after_all_fn);
    })
}

fn test_stats(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();

    runtime.block_on(async move {
        let stats = match analytics::stats(&new_client()).await {
            Err(e) => return Err(format!("stats error: {}", e)),
            Ok(stats) => stats,
        };
        expect(stats.total_cookies).to_equal(2)?;
        expect(stats.active_cookies).to_equal(1)?;
        expect(stats.total_orders).to_equal(30)?;
        expect(stats.total_cards).to_equal(4)
    })
}

fn test_stats_err(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();

    runtime.block_on(async move {
        match analytics::stats(&new_fail_client()).await {
            Err(Error::Api(e)) => {
                expect(e.code.as_str()).to_equal(err::E_AUTH)?;
                expect(e.message.as_deref()).to_equal(Some("no token"))
            }
            Err(e) => Err(format!("unexpected error type: {}", e)),
            Ok(_) => Err("stats should fail".to_string()),
        }
    })
}

fn test_orders(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();

    runtime.block_on(async move {
        let range = DateRange {
            start_date: "2024-02-27".to_string(),
            end_date: "2024-03-01".to_string(),
        };
        let data = match analytics::orders(&new_client(), &range).await {
            Err(e) => return Err(format!("orders error: {}", e)),
            Ok(data) => data,
        };
        expect(data.revenue_stats.total_amount).to_equal(150.5)?;
        expect(data.revenue_stats.total_orders).to_equal(3)?;
        expect(data.daily_stats.len()).to_equal(2)?;
        expect(data.daily_stats[0].date.as_str()).to_equal("2024-02-27")?;
        expect(data.daily_stats[0].order_count).to_equal(2)?;
        expect(data.daily_stats[1].date.as_str()).to_equal("2024-03-01")
    })
}

fn test_orders_range(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();

    runtime.block_on(async move {
        let range = range::resolve("custom", Some("2024-01-01"), None);
        let data = match analytics::orders(&new_client(), &range).await {
            Err(e) => return Err(format!("orders error: {}", e)),
            Ok(data) => data,
        };
        expect(data.daily_stats[0].date.clone()).to_equal(range.start_date)?;
        expect(data.daily_stats[1].date.clone()).to_equal(range.end_date)
    })
}

fn test_avg_amount(_: &mut SpecContext<TestState>) -> Result<(), String> {
    let stats = DailyStats {
        date: "2024-03-01".to_string(),
        amount: 90.0,
        order_count: 3,
    };
    expect(stats.avg_amount()).to_equal(30.0)?;

    let stats = DailyStats {
        date: "2024-03-01".to_string(),
        amount: 0.0,
        order_count: 0,
    };
    expect(stats.avg_amount()).to_equal(0.0)
}
