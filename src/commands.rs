use anyhow::Result;

use crate::controller::{AlwaysConfirm, Confirmation, Controller, TerminalConfirm};
use crate::models::{Activity, StatusKind};

/// Print the catalog the way the dashboard renders it: one card per
/// activity, spots left, and the roster (or the no-participants line).
pub async fn run_list(controller: &Controller) -> Result<()> {
    controller.load_activities().await;

    let catalog = match controller.catalog() {
        Some(c) => c,
        None => {
            println!("Failed to load activities. Please try again later.");
            return Ok(());
        }
    };

    if catalog.is_empty() {
        println!("No activities found.");
        return Ok(());
    }

    for (name, activity) in &catalog {
        print_card(name, activity);
        println!();
    }

    Ok(())
}

fn print_card(name: &str, activity: &Activity) {
    println!("{name}");
    println!("  {}", activity.description);
    println!("  Schedule: {}", activity.schedule);
    println!("  Availability: {} spots left", activity.spots_left());
    if activity.participants.is_empty() {
        println!("  Participants: No participants yet");
    } else {
        println!("  Participants:");
        for email in &activity.participants {
            println!("    - {email}");
        }
    }
}

pub async fn run_signup(controller: &Controller, activity: &str, email: &str) -> Result<()> {
    let accepted = controller.submit_signup(activity, email).await;
    print_status(controller);
    if !accepted {
        std::process::exit(1);
    }
    Ok(())
}

pub async fn run_unregister(
    controller: &Controller,
    activity: &str,
    email: &str,
    yes: bool,
) -> Result<()> {
    let confirm: &dyn Confirmation = if yes { &AlwaysConfirm } else { &TerminalConfirm };

    match controller.unregister(activity, email, confirm).await {
        None => {
            println!("Cancelled.");
            Ok(())
        }
        Some(accepted) => {
            print_status(controller);
            if !accepted {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn print_status(controller: &Controller) {
    let status = controller.status();
    match status.kind {
        StatusKind::Success => println!("{}", status.text),
        StatusKind::Error => eprintln!("Error: {}", status.text),
    }
}
