use anyhow::Result;

use encore_core::catalog::price_type_label;

use crate::commands::context::App;

pub async fn list(app: &App) -> Result<()> {
    let performances = app.gateway.list_performances().await?;
    if performances.is_empty() {
        println!("No performances published.");
        return Ok(());
    }

    for performance in performances {
        println!(
            "{:>6}  {}  {}",
            performance.id,
            performance.date.as_deref().unwrap_or("TBA"),
            performance.description
        );
        if let Some(venue) = &performance.venue {
            println!("        {}", venue);
        }
    }
    Ok(())
}

pub async fn show(app: &App, performance_id: i64) -> Result<()> {
    let detail = app.gateway.performance_detail(performance_id).await?;

    println!("{}", detail.title());
    if let Some(date) = detail.date_raw() {
        println!("  {}", date);
    }
    if let Some(venue) = detail.venue() {
        println!("  {}", venue);
    }
    println!();

    if detail.prices.is_empty() {
        println!("No prices published for this performance.");
        return Ok(());
    }

    if detail.is_general_admission() {
        for price in &detail.prices {
            println!(
                "  {:<16} ${:.2}  --price-type {}",
                price_type_label(price.price_type_id),
                price.price,
                price.price_type_id
            );
        }
    } else {
        for (zone_id, prices) in detail.prices_by_zone() {
            println!("  {} (--zone {})", detail.zone_label(zone_id), zone_id);
            for price in prices {
                println!(
                    "    {:<16} ${:.2}  --price-type {}",
                    price_type_label(price.price_type_id),
                    price.price,
                    price.price_type_id
                );
            }
        }
    }
    Ok(())
}
