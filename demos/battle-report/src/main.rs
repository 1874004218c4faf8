//! Battle Report Demo
//!
//! Walks the whole arena flow: seed the builtin catalogs, enroll a user,
//! inspect stat cards, run two battles (default and custom weights), and
//! print the resulting progression state.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vibebuff_arena::Arena;
use vibebuff_core::{BattleWeights, ToolId, UserId};
use vibebuff_db::Store;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    println!("=== VibeBuff Battle Report ===\n");

    let arena = Arena::new(Store::in_memory()?);
    let seeded = arena.bootstrap_builtin()?;
    println!(
        "Seeded {} tools and {} achievements\n",
        seeded.tools_added, seeded.achievements_added
    );

    let user = UserId::new("demo-user");
    let profile = arena.enroll(&user, Some("Demo"))?;
    println!(
        "Enrolled {} - level {} ({})\n",
        user, profile.level, profile.title
    );

    println!("Stat cards:");
    for slug in ["react", "vite", "supabase", "datadog"] {
        let card = arena.tool_stats(&ToolId::new(slug))?;
        println!(
            "  {:<10} power {:>3} [{}]  HP {:>3}  ATK {:>3}  DEF {:>3}  SPD {:>3}  MANA {:>3}",
            card.tool.name,
            card.total_power,
            card.power_level,
            card.stats.hp,
            card.stats.attack,
            card.stats.defense,
            card.stats.speed,
            card.stats.mana,
        );
    }

    println!("\nBattle 1: react vs datadog (default weights)");
    let outcome = arena.simulate(&ToolId::new("react"), &ToolId::new("datadog"), None)?;
    for row in &outcome.comparisons {
        println!(
            "  {:<5} {:>3} vs {:>3}  -> {}",
            row.stat, row.val1, row.val2, row.winner
        );
    }
    println!(
        "  {} wins {:.0} to {:.0} (diff {:.0})",
        outcome.winner, outcome.score1, outcome.score2, outcome.score_diff
    );

    let report = arena.save_battle(Some(&user), &outcome)?;
    if let Some(gain) = report.xp {
        println!("  XP for playing - balance now {}", gain.new_xp);
    }
    for def in &report.unlocked {
        println!("  Achievement unlocked: {} (+{} XP)", def.name, def.xp_reward);
    }

    println!("\nBattle 2: supabase vs vite (speed and mana weighted)");
    let weights = BattleWeights {
        speed: 3.0,
        mana: 2.0,
        ..BattleWeights::default()
    };
    let outcome = arena.simulate(&ToolId::new("supabase"), &ToolId::new("vite"), Some(weights))?;
    println!(
        "  {} wins {:.0} to {:.0}",
        outcome.winner, outcome.score1, outcome.score2
    );
    arena.save_battle(Some(&user), &outcome)?;

    let profile = arena
        .store()
        .profile(&user)?
        .expect("profile was enrolled above");
    println!(
        "\nFinal profile: level {} ({}), {} XP, {} won / {} lost",
        profile.level,
        profile.title,
        profile.xp,
        profile.counters.battles_won,
        profile.counters.battles_lost,
    );

    println!("\nBattle leaderboard:");
    for standing in arena.store().battle_leaderboard(5)? {
        println!(
            "  {:<10} {} wins / {} losses ({:.0}%)",
            standing.tool, standing.wins, standing.losses, standing.win_rate
        );
    }

    println!(
        "\n{} unread notifications",
        arena.store().unread_count(&user)?
    );

    Ok(())
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
