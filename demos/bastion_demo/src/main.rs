//! Bastion Demo
//!
//! Walks a small bastion through a few turns: two owners build facilities,
//! start orders, roll events and weather a casualty check.
//!
//! Pass a RON config path as the first argument to use a database file;
//! set `RUST_LOG=info` to see the service log.

use bastion_core::{
    facility_definition, DiceExpr, FacilityType, GuildType, Language, NewDefender, NewFacility,
};
use bastion_service::{BastionConfig, BastionService};

fn main() -> bastion_service::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .init();

    println!("=== Bastion Demo ===\n");

    let config = match std::env::args().nth(1) {
        Some(path) => BastionConfig::load(path)?,
        None => BastionConfig {
            default_name: "Tresendar Manor".to_string(),
            ..BastionConfig::default().with_seed(42)
        },
    };
    let mut service = BastionService::open(config)?;

    let bastion = service.update_details(None, Some("Phandalin".to_string()))?;
    println!("Bastion: {} ({})", bastion.name, bastion.location);

    // Owners
    let aria = service.add_owner("Aria", 9, Some("Ranger".to_string()))?;
    let bram = service.add_owner("Bram", 17, Some("Cleric".to_string()))?;
    println!("Owners:");
    for owner in [&aria, &bram] {
        println!(
            "  {} (level {}, {} slots, color {})",
            owner.name, owner.level, owner.max_facilities, owner.color
        );
    }

    let choices = service.available_facilities(aria.id)?.unwrap_or_default();
    println!(
        "{} can build {} kinds of facility at level {}",
        aria.name,
        choices.len(),
        aria.level
    );

    // Facilities, including two that the rules turn down
    let smithy = service.add_facility(NewFacility::new(aria.id, FacilityType::Smithy))?;
    let garden = service.add_facility(NewFacility::new(aria.id, FacilityType::Garden))?;
    let barrack = service.add_facility(NewFacility::new(bram.id, FacilityType::Barrack))?;
    let hall = service.add_facility(NewFacility::new(bram.id, FacilityType::Guildhall))?;
    let war_room = service.add_facility(NewFacility::new(aria.id, FacilityType::WarRoom))?;
    println!("\nFacilities:");
    for (label, facility) in [
        ("Smithy", &smithy),
        ("Garden", &garden),
        ("Barrack", &barrack),
        ("Guildhall without a guild", &hall),
        ("War Room at level 9", &war_room),
    ] {
        match facility {
            Some(f) => println!("  built {} ({:?})", f.display_name(), f.size),
            None => println!("  {}: not built", label),
        }
    }
    let hall = service.add_facility(
        NewFacility::new(bram.id, FacilityType::Guildhall).with_guild(GuildType::Adventurers),
    )?;
    if let Some(hall) = &hall {
        println!("  built {} for the {:?} guild", hall.display_name(), hall.guild);
    }

    // Treasury and orders
    service.add_gold_transaction(250, "Reward from the Townmaster")?;
    let mut facilities = Vec::new();
    if let Some(smithy) = &smithy {
        service.add_hireling(smithy.id, "Tomas", "Blacksmith", Some(2))?;
        for hireling in service.hirelings_of(smithy.id)? {
            println!("  {} works the smithy as {}", hireling.name, hireling.role);
        }
        let option = facility_definition(FacilityType::Smithy).options[1].clone();
        if let Some(order) = service.start_order(smithy.id, option, None)? {
            println!(
                "\nSmithy started '{}' for {} gp ({} turns)",
                order.description, order.gold_cost, order.turns_required
            );
        }
        facilities.push(smithy.id);
    }
    if let Some(barrack) = &barrack {
        let option = facility_definition(FacilityType::Barrack).options[0].clone();
        service.start_order(barrack.id, option, None)?;
        facilities.push(barrack.id);
    }

    // Turns
    println!("\nAdvancing turns...");
    for _ in 0..3 {
        let report = service.advance_turn()?;
        let event = service.roll_event()?;
        println!(
            "  Turn {}: {} order(s) completed; event d100={} {}",
            report.turn,
            report.completions.len(),
            event.roll,
            event.title.get(Language::En)
        );
    }

    // Orders that are not due yet can be finished by hand
    for facility_id in facilities {
        if let Some(done) = service.complete_order(facility_id, None)? {
            println!(
                "  completed '{}' ({} recruit(s))",
                done.order.description,
                done.recruited_defenders.len()
            );
        }
    }

    // Garrison
    service.add_defender(NewDefender::hired("Sildar"))?;
    let casualties = service.roll_defender_casualties(None)?;
    println!(
        "\nCasualty check: rolls {:?}, {} death(s), lost {:?}",
        casualties.rolls,
        casualties.deaths,
        casualties
            .removed
            .iter()
            .map(|d| d.name.as_str())
            .collect::<Vec<_>>()
    );

    let siege: DiceExpr = "2d6+1".parse()?;
    let damage = service.roll_dice(&siege.to_string())?;
    println!(
        "Siege damage {} ({}-{}): {:?} = {}",
        siege,
        siege.min(),
        siege.max(),
        damage.rolls,
        damage.total
    );

    // Summary
    let stats = service.get_bastion_stats()?;
    println!("\n=== Summary (turn {}) ===", stats.current_turn);
    println!("  Owners: {}", stats.owners);
    println!(
        "  Facilities: {} ({} cramped, {} roomy, {} vast)",
        stats.facilities, stats.cramped_facilities, stats.roomy_facilities, stats.vast_facilities
    );
    println!("  Hirelings: {} ({} gp salaries)", stats.hirelings, stats.hireling_salaries);
    println!("  Gold: {} (earned {}, spent {})", stats.gold, stats.gold_earned, stats.gold_spent);
    println!("  Defenders: {}", stats.defenders);
    println!("  Events: {} ({} unresolved)", stats.events, stats.unresolved_events);
    println!("  Orders: {} active, {} completed", stats.active_orders, stats.completed_orders);

    let bastion = service.get_or_create_bastion()?;
    if let Some(saved) = service.last_saved_at()? {
        println!(
            "  Saved at {} (version {}, stale: {})",
            saved.format("%Y-%m-%d %H:%M:%S"),
            bastion.version,
            service.is_stale(&bastion)?
        );
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
