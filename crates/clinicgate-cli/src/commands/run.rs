//! Run command - the full provision-and-verify pipeline.

use anyhow::{Context, Result, bail};
use clinicgate::{RunState, VerificationRun, load_model_document};
use clinicgate_client::HttpDecisionService;
use clinicgate_config::{ClinicgateConfig, ConfigLoader};
use clinicgate_scenario::{ScenarioConfig, build_tuples, verification_plan};
use clinicgate_types::{StoreId, iso_utc};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use tracing::info;

pub fn run(store_id: Option<String>, model_file: Option<PathBuf>, at: Option<&str>) -> Result<()> {
    let config = ConfigLoader::new().load()?;
    config.validate().context("invalid configuration")?;

    let reference = super::reference_instant(at)?;
    let scenario = ScenarioConfig::resolve(&config, reference)?;

    let model_path = model_file.unwrap_or_else(|| config.service.model_file.clone());
    let model_document =
        load_model_document(&model_path).context("authorization model document")?;

    let pinned = resolve_pinned_store(store_id, &config)?;

    let service = HttpDecisionService::new(
        config.service.api_url.clone(),
        config.service.api_token.clone(),
    );

    let mut pipeline = VerificationRun::new(&service);
    let store = pipeline
        .ensure_store(pinned, &config.service.store_name)
        .context("store creation")?;
    let model = pipeline
        .install_model(&store, &model_document)
        .context("model installation")?;

    // Record the ids as soon as they exist, so a later invocation can pin
    // the store even if verification below fails.
    RunState {
        api_url: config.service.api_url.clone(),
        store_id: store.clone(),
        model_id: model.clone(),
    }
    .save(&config.service.state_file)
    .context("persisting run state")?;
    info!(path = %config.service.state_file.display(), "run state saved");

    pipeline
        .write_tuples(&store, &model, &build_tuples(&scenario))
        .context("tuple write")?;

    let plan = verification_plan(&scenario);
    let report = pipeline
        .verify(&store, &model, &scenario, &plan)
        .context("verification")?;

    println!(
        "\nVerification at {} (store {store}, model {model})",
        iso_utc(scenario.reference)
    );
    for result in &report.results {
        let tag = if result.outcome.is_pass() {
            format!("{}", "PASS".green())
        } else {
            format!("{}", "FAIL".red())
        };
        println!("  [{tag}] {} -- {}", result.label, result.query);
        if !result.outcome.is_pass() {
            println!("         {}", format!("{}", result.outcome).red());
        }
    }
    println!(
        "\n{} passed, {} mismatched, {} errored",
        report.passed(),
        report.mismatched(),
        report.errored()
    );

    if !report.verified() {
        bail!(
            "verification failed: {} mismatch(es), {} query error(s)",
            report.mismatched(),
            report.errored()
        );
    }
    println!("{}", "All expectations hold.".green());
    Ok(())
}

/// Which store to use, in precedence order: the CLI flag, then the config
/// (CLG_SERVICE__STORE_ID / clinicgate.toml), then state persisted by a
/// prior run against the same service URL.
fn resolve_pinned_store(
    flag: Option<String>,
    config: &ClinicgateConfig,
) -> Result<Option<StoreId>> {
    if let Some(id) = flag {
        return Ok(Some(StoreId::new(id)));
    }
    if let Some(id) = &config.service.store_id {
        return Ok(Some(StoreId::new(id.clone())));
    }
    match RunState::load(&config.service.state_file).context("reading run state")? {
        Some(state) if state.api_url == config.service.api_url => {
            info!(store = %state.store_id, "pinning store from saved run state");
            Ok(Some(state.store_id))
        }
        _ => Ok(None),
    }
}
