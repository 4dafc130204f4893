// system-tests/tests/suites/put_products.rs
// ============================================================================
// Module: PUT Products Suite
// Description: Live coverage for replacing products.
// Purpose: Validate update echoes, round trips, and invalid target handling.
// Dependencies: system-tests helpers
// ============================================================================

//! Live PUT scenarios for the products resource.

use helpers::checks;
use helpers::harness::Scenario;
use helpers::harness::TestResult;

use crate::helpers;

#[tokio::test(flavor = "multi_thread")]
async fn update_existing_product_echoes_fields() -> TestResult {
    let mut scenario = Scenario::live("update_existing_product_echoes_fields")?;
    checks::update_existing(&mut scenario).await?;
    scenario.pass()
}

#[tokio::test(flavor = "multi_thread")]
async fn created_product_round_trips_through_update() -> TestResult {
    let mut scenario = Scenario::live("created_product_round_trips_through_update")?;
    checks::create_then_update_round_trip(&mut scenario).await?;
    scenario.pass()
}

#[tokio::test(flavor = "multi_thread")]
async fn partial_update_never_fails_server_side() -> TestResult {
    let mut scenario = Scenario::live("partial_update_never_fails_server_side")?;
    checks::update_partial(&mut scenario).await?;
    scenario.pass()
}

#[tokio::test(flavor = "multi_thread")]
async fn update_unknown_id_is_handled() -> TestResult {
    let mut scenario = Scenario::live("update_unknown_id_is_handled")?;
    checks::update_unknown_id(&mut scenario).await?;
    scenario.pass()
}

#[tokio::test(flavor = "multi_thread")]
async fn update_non_numeric_id_is_handled() -> TestResult {
    let mut scenario = Scenario::live("update_non_numeric_id_is_handled")?;
    checks::update_non_numeric_id(&mut scenario).await?;
    scenario.pass()
}

#[tokio::test(flavor = "multi_thread")]
async fn update_negative_price_is_handled() -> TestResult {
    let mut scenario = Scenario::live("update_negative_price_is_handled")?;
    checks::update_negative_price(&mut scenario).await?;
    scenario.pass()
}
