//! Create Goal Example
//!
//! Validates a draft, creates the goal, then lists what is still pending.
//!
//! Prerequisites:
//! - An Orbit goals service running on localhost:3333
//!
//! Run with:
//! ```sh
//! cargo run --example create_goal
//! ```

use orbit_core::{GoalDraft, validate};
use orbit_sdk::{CreateGoalRequest, OrbitClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = OrbitClient::new("http://localhost:3333");

    println!("=== Orbit SDK Create Goal Example ===\n");

    println!("1. Validating draft...");
    let goal = validate(&GoalDraft::new("Meditar", 3))?;
    println!(
        "   {} / {}",
        goal.title(),
        goal.desired_weekly_frequency().option().label
    );

    println!("\n2. Creating goal...");
    if let Err(e) = client.create_goal(&CreateGoalRequest::from(&goal)).await {
        eprintln!("   Failed to create goal: {}", e);
        eprintln!("   Make sure the goals service is running on localhost:3333");
        return Err(e.into());
    }
    println!("   Created");

    println!("\n3. Pending goals...");
    for pending in client.pending_goals().await? {
        println!(
            "   {} ({}/{})",
            pending.title, pending.completion_count, pending.desired_weekly_frequency
        );
    }

    println!("\n4. Weekly summary...");
    let summary = client.summary().await?;
    println!(
        "   {}/{} completed ({}%)",
        summary.completed,
        summary.total,
        summary.progress_percent()
    );

    Ok(())
}
