//! Shared utilities for CLI commands

use console::style;

use crate::session::QuotaGuard;

/// Where to send visitors who want more than the demo offers
pub const SIGNUP_URL: &str = "https://primavera3d.mx/quote";

/// Why the sign-up prompt is being shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsellReason {
    /// The session's demo quota is used up
    DemoComplete { limit: u32 },
    /// The user asked to order; ordering requires an account
    CheckoutIntent,
}

/// Print the sign-up prompt
///
/// Shown on quota refusal and on every checkout attempt. This is a
/// conversion prompt, not an error, so it goes to stdout and the caller
/// exits successfully.
pub fn print_upsell(reason: UpsellReason) {
    println!();
    match reason {
        UpsellReason::DemoComplete { limit } => {
            println!("{}", style("Demo complete!").bold().green());
            println!(
                "You've explored {} quotes in this demo session. Sign up to get",
                style(limit).cyan()
            );
            println!("unlimited quotes and place real orders.");
        }
        UpsellReason::CheckoutIntent => {
            println!("{}", style("Ready to order?").bold().green());
            println!("Create a free account to save your quote and complete your");
            println!("order with secure payment.");
        }
    }
    println!();
    for benefit in [
        "Unlimited instant quotes",
        "Secure payment via OXXO, SPEI, or card",
        "Real-time order tracking",
        "Upload your own CAD files",
    ] {
        println!("  {} {}", style("✓").green(), benefit);
    }
    println!();
    println!(
        "Get started free: {}",
        style(SIGNUP_URL).cyan().underlined()
    );
}

/// One-line session quota status for command footers
pub fn quota_line(quota: &QuotaGuard) -> String {
    format!(
        "{} of {} demo quotes left",
        quota.remaining(),
        quota.limit()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_line_counts_down() {
        let mut quota = QuotaGuard::default();
        assert_eq!(quota_line(&quota), "5 of 5 demo quotes left");
        quota.try_consume().unwrap();
        assert_eq!(quota_line(&quota), "4 of 5 demo quotes left");
    }
}
