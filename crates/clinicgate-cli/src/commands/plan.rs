//! Plan command - print the tuple set and assertion plan, no network.

use anyhow::{Context, Result};
use clinicgate_config::ConfigLoader;
use clinicgate_scenario::{ScenarioConfig, build_tuples, verification_plan};
use clinicgate_types::iso_utc;

pub fn run(at: Option<&str>) -> Result<()> {
    let config = ConfigLoader::new().load()?;
    config.validate().context("invalid configuration")?;

    let reference = super::reference_instant(at)?;
    let scenario = ScenarioConfig::resolve(&config, reference)?;

    println!("Reference instant: {}", iso_utc(scenario.reference));
    println!(
        "Internal care window: {} .. {}",
        iso_utc(scenario.internal_window.start),
        iso_utc(scenario.internal_window.end)
    );
    println!(
        "Appointment window:   {} .. {}",
        iso_utc(scenario.appointment_window.start),
        iso_utc(scenario.appointment_window.end)
    );

    let tuples = build_tuples(&scenario);
    println!("\nTuples ({}):", tuples.len());
    for tuple in &tuples {
        println!("  {tuple}");
    }

    let plan = verification_plan(&scenario);
    println!("\nAssertions ({}):", plan.len());
    for check in &plan.checks {
        println!(
            "  check({}, {}, {}) expects {} -- {}",
            check.user, check.relation, check.object, check.expect_allowed, check.label
        );
    }
    for lo in &plan.list_objects {
        println!(
            "  list_objects({}, {}, {}) must contain {} -- {}",
            lo.user, lo.relation, lo.object_type, lo.must_contain, lo.label
        );
    }

    Ok(())
}
