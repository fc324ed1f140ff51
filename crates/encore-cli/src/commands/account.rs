use anyhow::Result;

use encore_application::AccountService;
use encore_core::profile::AccountUpdate;

use crate::commands::context::App;

pub async fn show(app: &App) -> Result<()> {
    let profile = AccountService::new(app.gateway.clone()).profile().await?;

    println!("{} {}", profile.first_name, profile.last_name);
    println!("  {}", profile.email);
    if !profile.phone.is_empty() {
        println!("  {}", profile.phone);
    }
    if let Some(address) = &profile.address {
        println!("  {}", address.street1);
        println!("  {} {} {}", address.city, address.province, address.postal_code);
    }
    Ok(())
}

pub async fn update(
    app: &App,
    first_name: String,
    last_name: String,
    phone: Option<String>,
) -> Result<()> {
    let update = AccountUpdate {
        first_name,
        last_name,
        phone,
        address: None,
    };
    AccountService::new(app.gateway.clone()).update(&update).await?;
    println!("✅ Profile updated.");
    Ok(())
}
