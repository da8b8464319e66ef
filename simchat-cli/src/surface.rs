//! The interactive conversation surface: owns the per-open session (sequencer
//! plus escalation trigger), renders through [`TerminalSink`], and maps stdin
//! input back to quick-reply selections. Leaving the surface closes both
//! timer owners in the same call, so nothing fires after close.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use pushinpay_client::PushinPayClient;
use script::{Persona, Script};
use sequencer::{EscalationTrigger, Sequencer};
use simchat_core::Action;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::checkout::{is_valid_email, print_charge};
use crate::config::FunnelConfig;
use crate::terminal::{SurfaceEvent, TerminalSink};
use crate::urgency::UrgencyCounter;

/// Opens the conversation surface and runs it until the visitor leaves.
pub async fn run_surface(config: &FunnelConfig, persona: Persona, script: Script) -> Result<()> {
    script.validate()?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let sink = Arc::new(TerminalSink::new(persona.clone(), tx));
    let sequencer = Sequencer::new(sink.clone());
    let trigger = EscalationTrigger::new(sink.clone());
    let urgency = UrgencyCounter::new();

    println!("Chatting with {} ({})", persona.name, persona.presence());
    println!("This conversation is simulated for the experience; no real person is replying.");
    println!("Reply with an option number, 'buy' to open checkout, or 'q' to leave.");
    println!();

    sequencer.start(script).await;
    trigger
        .arm(Duration::from_secs(config.escalation_delay_secs))
        .await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut current_choices: Vec<String> = Vec::new();
    let mut prompt_pending = false;

    loop {
        let mut do_checkout = false;
        tokio::select! {
            event = rx.recv() => {
                match event {
                    Some(SurfaceEvent::ChoicesReady(labels)) => current_choices = labels,
                    Some(SurfaceEvent::ActionRequested(Action::OpenCheckout)) => do_checkout = true,
                    Some(SurfaceEvent::ActionRequested(Action::ScrollToCheckout)) => {
                        println!(">> Checkout: {}", config.checkout_url);
                    }
                    Some(SurfaceEvent::PaymentPromptDue) => {
                        prompt_pending = true;
                        print_payment_prompt(config, &persona, &urgency);
                    }
                    None => break,
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = line.trim().to_string();
                if input.eq_ignore_ascii_case("q") {
                    break;
                }
                if prompt_pending {
                    prompt_pending = false;
                    if input.eq_ignore_ascii_case("y") {
                        do_checkout = true;
                    } else {
                        println!("No pressure. I'll ping you once more in a bit.");
                        trigger
                            .arm(Duration::from_secs(config.reminder_delay_secs))
                            .await;
                    }
                } else if input.eq_ignore_ascii_case("buy") {
                    do_checkout = true;
                } else if let Ok(n) = input.parse::<usize>() {
                    match n.checked_sub(1).and_then(|i| current_choices.get(i)) {
                        Some(label) => {
                            let label = label.clone();
                            current_choices.clear();
                            sequencer.select_choice(&label).await;
                        }
                        None => println!("No such option."),
                    }
                } else if !input.is_empty() {
                    println!("Reply with an option number, 'buy', or 'q'.");
                }
            }
        }
        if do_checkout {
            run_interactive_checkout(config, &mut lines).await?;
        }
    }

    sequencer.close().await;
    trigger.disarm().await;
    info!("surface closed");
    println!("Conversation closed.");
    Ok(())
}

fn print_payment_prompt(config: &FunnelConfig, persona: &Persona, urgency: &UrgencyCounter) {
    println!();
    println!("*** {} saved you a spot ***", persona.name);
    println!(
        "Full club access for R${},{:02}. Only {} spots left today (simulated counter).",
        config.checkout_value_cents / 100,
        config.checkout_value_cents % 100,
        urgency.remaining()
    );
    println!("Type 'y' to open checkout, anything else to dismiss.");
}

/// Checkout inside the chat: with a configured token, asks for an e-mail and
/// generates a PIX charge; without one, shows the static link. A failed
/// charge prints a generic notice; the visitor can type 'buy' to try again.
async fn run_interactive_checkout(
    config: &FunnelConfig,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<()> {
    println!();
    println!("--- Checkout ---");
    let Some(token) = config.pushinpay_token.as_deref() else {
        println!("Finish securing your access at: {}", config.checkout_url);
        return Ok(());
    };

    println!("Enter your e-mail (used to send your access):");
    let Some(line) = lines.next_line().await? else {
        return Ok(());
    };
    let email = line.trim();
    if !is_valid_email(email) {
        println!("That e-mail doesn't look right. Type 'buy' to try again.");
        return Ok(());
    }

    let client = PushinPayClient::with_base_url(token, &config.pushinpay_api_url)?;
    match client
        .create_pix_charge(config.checkout_value_cents, Some(email))
        .await
    {
        Ok(charge) => print_charge(&charge, config.checkout_value_cents),
        Err(e) => {
            warn!(error = %e, "PIX charge failed");
            println!("Could not generate a payment code. Type 'buy' to try again.");
        }
    }
    Ok(())
}
