// system-tests/tests/helpers/checks.rs
// ============================================================================
// Module: Scenario Checks
// Description: Request-and-assert bodies shared by live and stub suites.
// Purpose: Run the same scenarios against the public service or a local stub.
// Dependencies: products-system-tests, products-contract, tokio
// ============================================================================

//! ## Overview
//! Each check drives one scenario through a [`Scenario`] and propagates the
//! first failed assertion. Checks on invalid input route the observed status
//! through [`assertions::expect_rejection`]; when the service accepts such
//! input, the response must still echo what was sent.

use products_contract::PayloadField;
use products_contract::fixtures;
use products_system_tests::ApiResponse;
use products_system_tests::Disposition;
use products_system_tests::JsonType;
use products_system_tests::assertions;
use products_system_tests::config::endpoints;
use products_system_tests::config::endpoints::SortOrder;
use products_system_tests::config::endpoints::status;
use serde_json::Value;
use serde_json::json;
use tokio::task::JoinSet;

use super::harness::Scenario;
use super::harness::TestResult;

/// Number of requests issued by the fan-out checks.
pub const FAN_OUT: usize = 3;

// ============================================================================
// SECTION: Shared Assertions
// ============================================================================

/// Returns the positive integer `id` of a body.
pub fn positive_id(body: &Value) -> TestResult<u64> {
    assertions::field_type(body, "id", JsonType::Integer)?;
    assertions::number_in_range(body, "id", 1.0, f64::MAX)?;
    let id = body.get("id");
    id.and_then(Value::as_u64)
        .or_else(|| id.and_then(Value::as_f64).and_then(|float| format!("{float:.0}").parse().ok()))
        .ok_or_else(|| "id is not a positive integer".into())
}

/// Asserts a body is the full catalogue product with the given id.
fn assert_catalogue_product(scenario: &Scenario, body: &Value, id: u64) -> TestResult {
    assertions::matches_schema(&scenario.product_schema, body)?;
    assertions::payload_subset(&json!({ "id": id }), body)?;
    assertions::non_empty_string(body, "title")?;
    assertions::non_empty_string(body, "category")?;
    let category = body.get("category").and_then(Value::as_str).unwrap_or_default();
    if !fixtures::is_known_category(category) {
        return Err(format!("unknown catalogue category `{category}`").into());
    }
    assertions::number_in_range(
        body,
        "rating.rate",
        fixtures::RATING_RANGE.0,
        fixtures::RATING_RANGE.1,
    )?;
    Ok(())
}

/// Asserts a successful create echoed the submission and returns the new id.
fn assert_created(
    scenario: &mut Scenario,
    submitted: &Value,
    response: &ApiResponse,
) -> TestResult<u64> {
    assertions::status_in(response, &status::CREATE_SUCCESS)?;
    assertions::content_type_contains(response, "application/json")?;
    assertions::payload_subset(submitted, &response.json)?;
    let id = positive_id(&response.json)?;
    scenario.track_created(&response.json);
    Ok(id)
}

/// Applies the invalid-input policy and checks an accepted response echoes
/// what was sent.
fn assert_invalid_handled(
    scenario: &mut Scenario,
    label: &str,
    submitted: &Value,
    response: &ApiResponse,
) -> TestResult<Disposition> {
    let disposition = assertions::expect_rejection(scenario.config.strictness, response)?;
    if disposition == Disposition::Accepted {
        assertions::payload_subset(submitted, &response.json)?;
    }
    scenario.note(format!("{label}: {disposition} with status {}", response.status));
    Ok(disposition)
}

// ============================================================================
// SECTION: GET
// ============================================================================

/// Lists the catalogue and validates every entry.
pub async fn list_catalogue(scenario: &mut Scenario) -> TestResult {
    let response = scenario.client.list_products().await?;
    assertions::status_eq(&response, status::OK)?;
    assertions::content_type_contains(&response, "application/json")?;
    let items = assertions::non_empty_array(&response.json, "", 1)?;
    for item in items {
        assertions::matches_schema(&scenario.product_schema, item)?;
    }
    let count = items.len();
    scenario.note(format!("listed {count} products"));
    Ok(())
}

/// Lists with `limit` and descending `sort`.
pub async fn list_with_limit_and_sort(scenario: &mut Scenario) -> TestResult {
    let limit = 5;
    let response = scenario.client.list_products_with(Some(limit), None).await?;
    assertions::status_eq(&response, status::OK)?;
    let items = assertions::non_empty_array(&response.json, "", limit)?;
    if items.len() != limit {
        return Err(format!("limit={limit} returned {} products", items.len()).into());
    }

    let response = scenario.client.list_products_with(None, Some(SortOrder::Desc)).await?;
    assertions::status_eq(&response, status::OK)?;
    let ids: Vec<u64> = assertions::non_empty_array(&response.json, "", 2)?
        .iter()
        .filter_map(|item| item.get("id").and_then(Value::as_u64))
        .collect();
    if !ids.windows(2).all(|pair| pair[0] >= pair[1]) {
        return Err(format!("sort=desc returned ids out of order: {ids:?}").into());
    }
    Ok(())
}

/// Fetches one catalogue product and validates it.
pub async fn get_by_id(scenario: &mut Scenario, id: u64) -> TestResult {
    let response = scenario.client.get_product(id).await?;
    assertions::status_eq(&response, status::OK)?;
    assertions::content_type_contains(&response, "application/json")?;
    assert_catalogue_product(scenario, &response.json, id)
}

/// Fetches every id in the catalogue range.
pub async fn get_every_valid_id(scenario: &mut Scenario) -> TestResult {
    for id in fixtures::VALID_ID_RANGE {
        get_by_id(scenario, id).await?;
    }
    Ok(())
}

/// Fetches the first and last catalogue ids.
pub async fn get_boundary_ids(scenario: &mut Scenario) -> TestResult {
    let ids = scenario.generator.boundary_ids();
    for id in ids {
        get_by_id(scenario, id).await?;
    }
    Ok(())
}

/// Fetches an id far outside the catalogue.
pub async fn get_unknown_id(scenario: &mut Scenario) -> TestResult {
    let id = scenario.generator.invalid_id();
    let response = scenario.client.get_product(id).await?;
    let disposition = assertions::expect_rejection(scenario.config.strictness, &response)?;
    if disposition == Disposition::Accepted && !response.is_empty_body() {
        assertions::payload_subset(&json!({ "id": id }), &response.json)?;
    }
    scenario.note(format!("unknown id {id}: {disposition} with status {}", response.status));
    Ok(())
}

/// Fetches a non-numeric id.
pub async fn get_non_numeric_id(scenario: &mut Scenario) -> TestResult {
    let id = scenario.generator.non_numeric_id();
    let response = scenario.client.get_product(&id).await?;
    let disposition = assertions::expect_rejection(scenario.config.strictness, &response)?;
    if disposition == Disposition::Accepted && scenario.product_schema.is_valid(&response.json) {
        return Err(format!("non-numeric id `{id}` resolved to a product").into());
    }
    scenario.note(format!("non-numeric id: {disposition} with status {}", response.status));
    Ok(())
}

/// Checks the listing completes within the configured deadline.
pub async fn list_within_timeout(scenario: &mut Scenario) -> TestResult {
    let response = scenario.client.list_products().await?;
    assertions::status_eq(&response, status::OK)?;
    if response.elapsed > scenario.config.timeout {
        return Err(format!(
            "listing took {:?}, deadline {:?}",
            response.elapsed, scenario.config.timeout
        )
        .into());
    }
    Ok(())
}

/// Fetches several ids concurrently and joins before asserting.
pub async fn get_concurrently(scenario: &mut Scenario) -> TestResult {
    let mut tasks = JoinSet::new();
    for _ in 0 .. FAN_OUT {
        let id = scenario.generator.valid_id();
        let client = scenario.client.clone();
        tasks.spawn(async move { (id, client.get_product(id).await) });
    }
    let mut results = Vec::with_capacity(FAN_OUT);
    while let Some(joined) = tasks.join_next().await {
        let (id, response) = joined?;
        results.push((id, response?));
    }
    for (id, response) in &results {
        assertions::status_eq(response, status::OK)?;
        assert_catalogue_product(scenario, &response.json, *id)?;
    }
    Ok(())
}

// ============================================================================
// SECTION: POST
// ============================================================================

/// Creates the premium headphones fixture.
pub async fn create_premium_headphones(scenario: &mut Scenario) -> TestResult {
    let payload = fixtures::premium_headphones();
    let response = scenario.client.create_product(&payload).await?;
    assert_created(scenario, &payload.to_value(), &response)?;
    assertions::price_exact_cents(&response.json, "price", payload.price)?;
    Ok(())
}

/// Creates a generated product.
pub async fn create_generated(scenario: &mut Scenario) -> TestResult {
    let payload = scenario.generator.payload();
    let response = scenario.client.create_product(&payload).await?;
    assert_created(scenario, &payload.to_value(), &response)?;
    assertions::non_empty_string(&response.json, "title")?;
    Ok(())
}

/// Creates a product at the minimum price and checks there is no drift.
pub async fn create_min_price(scenario: &mut Scenario) -> TestResult {
    let payload = scenario.generator.min_price();
    let response = scenario.client.create_product(&payload).await?;
    assert_created(scenario, &payload.to_value(), &response)?;
    assertions::price_exact_cents(&response.json, "price", fixtures::MIN_PRICE)?;
    Ok(())
}

/// Creates a product priced at zero.
pub async fn create_zero_price(scenario: &mut Scenario) -> TestResult {
    let payload = scenario.generator.zero_price();
    let response = scenario.client.create_product(&payload).await?;
    assert_created(scenario, &payload.to_value(), &response)?;
    assertions::price_exact_cents(&response.json, "price", 0.0)?;
    Ok(())
}

/// Creates a product with very long strings.
pub async fn create_oversized_strings(scenario: &mut Scenario) -> TestResult {
    let payload = scenario.generator.oversized_strings(fixtures::OVERSIZED_LEN);
    let response = scenario.client.create_product(&payload).await?;
    assertions::not_server_error(&response)?;
    if response.is_success() {
        assertions::payload_subset(&payload.to_value(), &response.json)?;
    }
    scenario.note(format!("oversized strings: status {}", response.status));
    Ok(())
}

/// Submits a negative price.
pub async fn create_negative_price(scenario: &mut Scenario) -> TestResult {
    let body = scenario.generator.negative_price().to_value();
    let response = scenario.client.create(&endpoints::products(), &body).await?;
    assert_invalid_handled(scenario, "negative price", &body, &response)?;
    Ok(())
}

/// Submits empty title, description, and category.
pub async fn create_empty_strings(scenario: &mut Scenario) -> TestResult {
    let body = scenario.generator.empty_strings().to_value();
    let response = scenario.client.create(&endpoints::products(), &body).await?;
    assert_invalid_handled(scenario, "empty strings", &body, &response)?;
    Ok(())
}

/// Submits payloads each missing one required field.
pub async fn create_missing_fields(scenario: &mut Scenario) -> TestResult {
    for field in PayloadField::ALL {
        let body = scenario.generator.missing_field(field);
        let response = scenario.client.create(&endpoints::products(), &body).await?;
        let label = format!("missing {field}");
        if assert_invalid_handled(scenario, &label, &body, &response)? == Disposition::Accepted {
            positive_id(&response.json)?;
        }
    }
    Ok(())
}

/// Submits a payload whose every field has the wrong JSON type.
pub async fn create_wrong_types(scenario: &mut Scenario) -> TestResult {
    let body = scenario.generator.wrong_types();
    let response = scenario.client.create(&endpoints::products(), &body).await?;
    assert_invalid_handled(scenario, "wrong types", &body, &response)?;
    Ok(())
}

/// Creates several products concurrently and joins before asserting.
pub async fn create_concurrently(scenario: &mut Scenario) -> TestResult {
    let mut tasks = JoinSet::new();
    for _ in 0 .. FAN_OUT {
        let payload = scenario.generator.payload();
        let client = scenario.client.clone();
        tasks.spawn(async move {
            let response = client.create_product(&payload).await;
            (payload, response)
        });
    }
    let mut results = Vec::with_capacity(FAN_OUT);
    while let Some(joined) = tasks.join_next().await {
        let (payload, response) = joined?;
        results.push((payload, response?));
    }
    for (payload, response) in &results {
        assert_created(scenario, &payload.to_value(), response)?;
    }
    if scenario.created.len() != FAN_OUT {
        let ids = scenario.created.ids();
        return Err(format!("expected {FAN_OUT} created ids, got {ids:?}").into());
    }
    Ok(())
}

// ============================================================================
// SECTION: PUT
// ============================================================================

/// Replaces a catalogue product.
pub async fn update_existing(scenario: &mut Scenario) -> TestResult {
    let id = scenario.generator.valid_id();
    let payload = scenario.generator.payload();
    let response = scenario.client.update_product(id, &payload).await?;
    assertions::status_eq(&response, status::OK)?;
    assertions::content_type_contains(&response, "application/json")?;
    assertions::payload_subset(&payload.to_value(), &response.json)?;
    assertions::payload_subset(&json!({ "id": id }), &response.json)?;
    Ok(())
}

/// Creates a product, then resubmits its returned fields to its own id.
pub async fn create_then_update_round_trip(scenario: &mut Scenario) -> TestResult {
    let payload = scenario.generator.payload();
    let created = scenario.client.create_product(&payload).await?;
    let id = assert_created(scenario, &payload.to_value(), &created)?;

    let mut resubmitted = created.json.clone();
    if let Some(fields) = resubmitted.as_object_mut() {
        fields.remove("id");
        fields.remove("rating");
    }
    let response = scenario.client.update(&endpoints::product(id), &resubmitted).await?;
    assertions::status_eq(&response, status::OK)?;
    assertions::payload_subset(&resubmitted, &response.json)?;
    Ok(())
}

/// Sends a PUT carrying only some fields.
pub async fn update_partial(scenario: &mut Scenario) -> TestResult {
    let id = scenario.generator.valid_id();
    let body = json!({
        "title": scenario.generator.title(),
        "price": scenario.generator.price(),
    });
    let response = scenario.client.update(&endpoints::product(id), &body).await?;
    assertions::not_server_error(&response)?;
    if response.is_success() {
        assertions::payload_subset(&body, &response.json)?;
    }
    scenario.note(format!("partial update: status {}", response.status));
    Ok(())
}

/// Replaces an id outside the catalogue.
pub async fn update_unknown_id(scenario: &mut Scenario) -> TestResult {
    let id = scenario.generator.invalid_id();
    let body = scenario.generator.payload().to_value();
    let response = scenario.client.update(&endpoints::product(id), &body).await?;
    assert_invalid_handled(scenario, "update unknown id", &body, &response)?;
    Ok(())
}

/// Replaces a non-numeric id.
pub async fn update_non_numeric_id(scenario: &mut Scenario) -> TestResult {
    let id = scenario.generator.non_numeric_id();
    let body = scenario.generator.payload().to_value();
    let response = scenario.client.update(&endpoints::product(&id), &body).await?;
    assert_invalid_handled(scenario, "update non-numeric id", &body, &response)?;
    Ok(())
}

/// Replaces a catalogue product with a negative price.
pub async fn update_negative_price(scenario: &mut Scenario) -> TestResult {
    let id = scenario.generator.valid_id();
    let body = scenario.generator.negative_price().to_value();
    let response = scenario.client.update(&endpoints::product(id), &body).await?;
    assert_invalid_handled(scenario, "update negative price", &body, &response)?;
    Ok(())
}

// ============================================================================
// SECTION: DELETE
// ============================================================================

/// Deletes a catalogue product.
pub async fn delete_existing(scenario: &mut Scenario) -> TestResult {
    let id = scenario.generator.valid_id();
    let response = scenario.client.delete_product(id).await?;
    assertions::status_eq(&response, status::OK)?;
    if !response.is_empty_body() {
        assertions::payload_subset(&json!({ "id": id }), &response.json)?;
    }
    Ok(())
}

/// Deletes the same id twice.
pub async fn delete_twice(scenario: &mut Scenario) -> TestResult {
    let id = scenario.generator.valid_id();
    let first = scenario.client.delete_product(id).await?;
    assertions::status_in(&first, &status::DELETE_OUTCOMES)?;
    let second = scenario.client.delete_product(id).await?;
    assertions::status_in(&second, &status::DELETE_OUTCOMES)?;
    scenario.note(format!("double delete of {id}: {} then {}", first.status, second.status));
    Ok(())
}

/// Deletes an id outside the catalogue.
pub async fn delete_unknown_id(scenario: &mut Scenario) -> TestResult {
    let id = scenario.generator.invalid_id();
    let response = scenario.client.delete_product(id).await?;
    assertions::status_in(&response, &status::DELETE_OUTCOMES)?;
    Ok(())
}

/// Deletes a non-numeric id.
pub async fn delete_non_numeric_id(scenario: &mut Scenario) -> TestResult {
    let id = scenario.generator.non_numeric_id();
    let response = scenario.client.delete_product(&id).await?;
    let disposition = assertions::expect_rejection(scenario.config.strictness, &response)?;
    scenario.note(format!("delete non-numeric id: {disposition}"));
    Ok(())
}

/// Deletes a product and reads it back.
pub async fn delete_then_get(scenario: &mut Scenario) -> TestResult {
    let id = scenario.generator.valid_id();
    let deleted = scenario.client.delete_product(id).await?;
    assertions::status_in(&deleted, &status::DELETE_OUTCOMES)?;
    let response = scenario.client.get_product(id).await?;
    assertions::not_server_error(&response)?;
    let still_present = response.is_success() && !response.is_empty_body();
    scenario.note(format!(
        "product {id} after delete: status {}, present {still_present}",
        response.status
    ));
    Ok(())
}
