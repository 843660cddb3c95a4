//! `fabquote checkout` command - checkout intent
//!
//! The demo cannot take payment; expressing checkout intent always leads
//! to the sign-up prompt. The headline depends on whether the demo quota
//! is already used up.

use miette::{IntoDiagnostic, Result};

use crate::cli::commands::utils::{print_upsell, UpsellReason};
use crate::cli::GlobalOpts;
use crate::session::{QuotaState, SessionStore};

#[derive(clap::Args, Debug)]
pub struct CheckoutArgs {}

pub fn run(_args: CheckoutArgs, _global: &GlobalOpts) -> Result<()> {
    let store = SessionStore::open().into_diagnostic()?;
    let session = store.load_or_start().into_diagnostic()?;

    let reason = match session.quota.state() {
        QuotaState::Exhausted => UpsellReason::DemoComplete {
            limit: session.quota.limit(),
        },
        QuotaState::Available => UpsellReason::CheckoutIntent,
    };
    print_upsell(reason);

    Ok(())
}
