use anyhow::Result;
use clap::Args;

use encore_application::{CheckoutUseCase, PaymentFlow};
use encore_core::payment::CardDetails;

use crate::commands::context::App;

#[derive(Args)]
pub struct CheckoutArgs {
    /// Billing overrides; fields left unset keep the profile prefill
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub province: Option<String>,
    #[arg(long)]
    pub postal_code: Option<String>,

    /// Optional donation amount, free-form (sanitized before charging)
    #[arg(long, default_value = "")]
    pub donation: String,
    /// Optional order note
    #[arg(long, default_value = "")]
    pub note: String,

    #[arg(long)]
    pub card_number: String,
    #[arg(long)]
    pub exp_month: String,
    #[arg(long)]
    pub exp_year: String,
    #[arg(long)]
    pub cvv: String,
    /// Card billing postal code; defaults to the billing postal code
    #[arg(long)]
    pub card_postal_code: Option<String>,
}

pub async fn run(app: &App, args: CheckoutArgs) -> Result<()> {
    let usecase = CheckoutUseCase::new(app.session.clone(), app.gateway.clone());
    let mut draft = usecase.prepare().await?;

    if draft.session_renewed {
        println!("⚠ Your previous cart expired; review the fresh cart before paying.");
    }

    if let Some(v) = args.first_name {
        draft.billing.first_name = v;
    }
    if let Some(v) = args.last_name {
        draft.billing.last_name = v;
    }
    if let Some(v) = args.email {
        draft.billing.email = v;
    }
    if let Some(v) = args.phone {
        draft.billing.phone = v;
    }
    if let Some(v) = args.address {
        draft.billing.address = v;
    }
    if let Some(v) = args.city {
        draft.billing.city = v;
    }
    if let Some(v) = args.province {
        draft.billing.province = v;
    }
    if let Some(v) = args.postal_code {
        draft.billing.postal_code = v;
    }
    draft.donation = args.donation;
    draft.order_note = args.note;

    for item in draft.cart.items() {
        println!(
            "{} x{} @ ${}",
            item.title(),
            item.quantity(),
            item.unit_price_display()
        );
    }
    println!("Amount due: ${:.2}", draft.display_total());

    // Validation happens before any payment traffic.
    let handoff = usecase.confirm(&draft)?;

    let card = CardDetails {
        number: args.card_number,
        exp_month: args.exp_month,
        exp_year: args.exp_year,
        cvv: args.cvv,
        postal_code: args
            .card_postal_code
            .unwrap_or_else(|| handoff.billing.postal_code.clone()),
    };

    let order = PaymentFlow::new(app.gateway.clone()).pay(&handoff, card).await?;
    println!("✅ Order confirmed: {}", order.order_number);
    Ok(())
}
