//! Basic example demonstrating the App Store Connect Game Center client.
//!
//! Run with:
//! ```
//! ASC_BEARER_TOKEN=your-token APP_ID=1234567890 cargo run --example list_achievements
//! ```

use ascapi::{
    AscClient, GameCenterAchievement, GameCenterAchievementLocalization, GameCenterDetail,
    GameCenterLeaderboard, List, ListQuery,
};

#[tokio::main]
async fn main() -> ascapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    let app_id = std::env::var("APP_ID").unwrap_or_else(|_| "1234567890".to_string());

    // Create client from environment variables
    println!("Creating App Store Connect client...");
    let client = AscClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // Resolve the Game Center detail for the app
    println!("\n--- Game Center Detail ---");
    let detail = GameCenterDetail::for_app(&client, &app_id).await?;
    println!("Detail: {}", detail.id);
    println!("  Achievements enabled: {}", detail.attributes.achievement_enabled);
    println!("  Leaderboards enabled: {}", detail.attributes.leaderboard_enabled);

    // List all achievements, following pagination cursors
    println!("\n--- Achievements ---");
    let achievements =
        GameCenterAchievement::list_all(&client, &detail.id, ListQuery::new()).await?;
    println!("Found {} achievements", achievements.len());

    for achievement in achievements.iter().take(5) {
        let points = achievement.attributes.points.unwrap_or(0);
        println!(
            "  - {} ({}, {} points)",
            achievement.attributes.reference_name, achievement.attributes.vendor_identifier, points
        );
    }

    // Show the localizations of the first achievement
    if let Some(first) = achievements.first() {
        println!("\n--- Localizations of {} ---", first.attributes.reference_name);
        let localizations =
            GameCenterAchievementLocalization::list_all(&client, &first.id, ListQuery::new())
                .await?;
        for localization in &localizations {
            println!(
                "  {} - {}",
                localization.attributes.locale, localization.attributes.name
            );
        }
    }

    // List the first page of non-archived leaderboards
    println!("\n--- Leaderboards (first page) ---");
    let query = ListQuery::new()
        .filter("archived", ["false"])
        .sort(["referenceName"])
        .limit(10);
    let page = GameCenterLeaderboard::list_page(&client, &detail.id, &query).await?;
    println!("Found {} leaderboards on the first page", page.len());

    for leaderboard in &page {
        println!(
            "  - {} ({})",
            leaderboard.attributes.reference_name, leaderboard.attributes.vendor_identifier
        );
    }

    println!("\nDone!");
    Ok(())
}
