//! One-shot broker commands behind `brokerctl`.

use log::info;
use weightbook::{Side, Symbol};
use weightbook_broker::{Broker, Order, OrderId, OrderRequest};

use crate::error::{Error, Result};

/// Print account summary.
pub fn show_account(broker: &dyn Broker) -> Result<()> {
    let account = broker.account()?;
    println!("account_number: {}", account.account_number);
    println!("status:         {}", account.status);
    println!("currency:       {}", account.currency);
    println!("cash:           {:.2}", account.cash);
    println!("buying_power:   {:.2}", account.buying_power);
    println!("equity:         {:.2}", account.equity);
    Ok(())
}

/// Print current positions.
pub fn show_positions(broker: &dyn Broker) -> Result<()> {
    let positions = broker.positions()?;
    if positions.is_empty() {
        println!("No positions.");
        return Ok(());
    }

    println!(
        "{:8} {:>10} {:>12} {:>12}",
        "Symbol", "Qty", "AvgEntry", "UnrealPnL"
    );
    for p in &positions {
        println!(
            "{:8} {:>10} {:>12.2} {:>+12.2}",
            p.symbol, p.quantity, p.avg_entry_price, p.unrealized_pl
        );
    }
    Ok(())
}

/// Print the most recent orders, newest first.
pub fn show_orders(broker: &dyn Broker, limit: usize) -> Result<()> {
    let orders = broker.orders(limit)?;
    if orders.is_empty() {
        println!("No orders.");
        return Ok(());
    }

    for o in &orders {
        println!(
            "{} | {} | {} {} qty={} | status={} | type={} tif={} | filled={}",
            o.created_at,
            o.id,
            o.symbol,
            o.side.as_str(),
            o.quantity,
            o.status,
            o.order_type,
            o.time_in_force,
            o.filled_quantity
        );
    }
    Ok(())
}

/// Print one order.
pub fn show_order(broker: &dyn Broker, id: &str) -> Result<()> {
    let order = broker.order(&OrderId(id.to_string()))?;
    print_order(&order);
    Ok(())
}

fn print_order(o: &Order) {
    println!("id:               {}", o.id);
    println!("symbol:           {}", o.symbol);
    println!("side:             {}", o.side.as_str());
    println!("status:           {}", o.status);
    println!("qty:              {}", o.quantity);
    println!("filled_qty:       {}", o.filled_quantity);
    match o.filled_avg_price {
        Some(px) => println!("filled_avg_price: {px:.4}"),
        None => println!("filled_avg_price: -"),
    }
    println!("created_at:       {}", o.created_at);
}

/// Place a DAY market order.
///
/// `confirm` is asked before anything is sent; returning `false` aborts.
pub fn place_market_order(
    broker: &dyn Broker,
    symbol: &str,
    side: Side,
    quantity: u64,
    confirm: impl FnOnce(&str) -> Result<bool>,
) -> Result<Order> {
    let symbol = Symbol::try_new(&symbol.to_ascii_uppercase())
        .ok_or_else(|| Error::Config(format!("invalid symbol {symbol:?}")))?;
    if quantity == 0 {
        return Err(Error::Config("quantity must be greater than zero".into()));
    }

    let prompt = format!("{} {quantity} {symbol} at market (DAY)?", side);
    if !confirm(&prompt)? {
        return Err(Error::Aborted("order not confirmed".into()));
    }

    let order = broker.submit_order(&OrderRequest::market(symbol, side, quantity))?;
    info!("Order {} submitted: {}", order.id, order.status);
    print_order(&order);
    Ok(order)
}

/// Interactive yes/no prompt, defaulting to no.
pub fn confirm_prompt(prompt: &str) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| Error::Aborted(format!("confirmation prompt failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use weightbook_broker::mock::MockBroker;

    #[test]
    fn declined_order_is_not_sent() {
        let broker = MockBroker::builder().build();
        let err = place_market_order(&broker, "spy", Side::Buy, 1, |_| Ok(false)).unwrap_err();
        assert!(matches!(err, Error::Aborted(_)));
        assert!(broker.submitted_orders().is_empty());
    }

    #[test]
    fn confirmed_order_is_sent_uppercased() {
        let broker = MockBroker::builder().build();
        let mut seen = String::new();
        let order = place_market_order(&broker, "spy", Side::Sell, 2, |p| {
            seen = p.to_string();
            Ok(true)
        })
        .unwrap();

        assert_eq!(order.symbol, "SPY");
        assert_eq!(seen, "SELL 2 SPY at market (DAY)?");
        let sent = broker.submitted_orders();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].side, Side::Sell);
        assert_eq!(sent[0].quantity, 2);
    }

    #[test]
    fn zero_quantity_rejected_before_prompt() {
        let broker = MockBroker::builder().build();
        let result = place_market_order(&broker, "SPY", Side::Buy, 0, |_| {
            panic!("should not prompt")
        });
        assert!(result.is_err());
    }

    #[test]
    fn listing_commands_run_against_mock() {
        let broker = MockBroker::builder()
            .with_position(Symbol::new("SPY"), 3.0, 500.0)
            .build();
        let order = broker
            .submit_order(&OrderRequest::market(Symbol::new("QQQ"), Side::Buy, 1))
            .unwrap();

        show_account(&broker).unwrap();
        show_positions(&broker).unwrap();
        show_orders(&broker, 50).unwrap();
        show_order(&broker, &order.id.0).unwrap();
        assert!(show_order(&broker, "missing").is_err());
    }
}
