use anyhow::Result;

use encore_application::{CartView, LoadOutcome};
use encore_core::cart::AddItemRequest;
use encore_core::catalog::price_type_label;

use crate::commands::context::App;

pub async fn show(app: &App) -> Result<()> {
    let outcome = app.session.load_cart().await?;
    render(&outcome);
    Ok(())
}

pub async fn add(
    app: &App,
    performance: i64,
    price_type: i64,
    zone: Option<i64>,
    quantity: u32,
) -> Result<()> {
    let request = AddItemRequest {
        performance_id: performance,
        price_type_id: price_type,
        zone_id: zone.unwrap_or(0),
        quantity,
    };
    app.session.add_item(&request).await?;
    println!(
        "✅ Added {} x {} to your cart.",
        quantity,
        price_type_label(price_type)
    );

    let outcome = app.session.load_cart().await?;
    render(&outcome);
    Ok(())
}

pub async fn remove(app: &App, line_item: i64, sub_line_item: i64) -> Result<()> {
    let outcome = app.session.remove_item(line_item, sub_line_item).await?;
    if outcome.removed {
        println!("✅ Removed one ticket.");
    }
    render(&outcome.load);
    Ok(())
}

pub async fn clear(app: &App) -> Result<()> {
    app.session.clear().await?;
    println!("Cart cleared.");
    Ok(())
}

fn render(outcome: &LoadOutcome) {
    if outcome.session_renewed {
        println!("⚠ Your previous cart expired; a fresh cart was started.");
    }

    let cart = match &outcome.view {
        CartView::NoCart => {
            println!("Your cart is empty.");
            return;
        }
        CartView::Ready(cart) => cart,
    };

    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for item in cart.items() {
        println!("{}", item.title());
        println!("  {}", item.date_display());
        if !item.detail().is_empty() {
            println!("  {}", item.detail());
        }
        println!(
            "  Qty {} @ ${}  (line item {}, ticket {})",
            item.quantity(),
            item.unit_price_display(),
            item.line_item_id().unwrap_or(0),
            item.sub_line_item_id().unwrap_or(0)
        );
    }
    println!();
    println!("Subtotal  ${}", cart.subtotal_display());
    println!("Fees      ${}", cart.fees_display());
    println!("Total     ${}", cart.total_display());
}
