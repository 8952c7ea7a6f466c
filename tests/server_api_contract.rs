mod common;

use anyhow::{Context, Result};

#[test]
fn server_api_contract_persons_crud() -> Result<()> {
    let server = common::spawn_server()?;
    let client = reqwest::blocking::Client::new();

    let health: serde_json::Value = client
        .get(format!("{}/healthz", server.base_url))
        .send()
        .context("healthz")?
        .json()
        .context("parse healthz")?;
    assert_eq!(health["status"], "ok");

    // Fresh store is empty.
    let persons: Vec<serde_json::Value> = client
        .get(format!("{}/persons", server.base_url))
        .send()
        .context("list persons")?
        .error_for_status()?
        .json()
        .context("parse persons")?;
    assert!(persons.is_empty());

    // Create assigns an id.
    let created = client
        .post(format!("{}/persons", server.base_url))
        .json(&serde_json::json!({"name": "Ada Lovelace", "number": "39-44-5323523"}))
        .send()
        .context("create person")?;
    assert_eq!(created.status(), reqwest::StatusCode::CREATED);
    let created: serde_json::Value = created.json().context("parse created")?;
    let id = created["id"].as_str().context("created id")?.to_string();
    assert_eq!(created["name"], "Ada Lovelace");
    assert_eq!(created["number"], "39-44-5323523");

    // Get by id.
    let fetched: serde_json::Value = client
        .get(format!("{}/persons/{}", server.base_url, id))
        .send()
        .context("get person")?
        .error_for_status()?
        .json()
        .context("parse person")?;
    assert_eq!(fetched, created);

    // Partial update keeps the name.
    let updated: serde_json::Value = client
        .put(format!("{}/persons/{}", server.base_url, id))
        .json(&serde_json::json!({"number": "040-123456"}))
        .send()
        .context("update person")?
        .error_for_status()?
        .json()
        .context("parse updated")?;
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["name"], "Ada Lovelace");
    assert_eq!(updated["number"], "040-123456");

    // Delete, then the id is gone.
    let deleted = client
        .delete(format!("{}/persons/{}", server.base_url, id))
        .send()
        .context("delete person")?;
    assert!(deleted.status().is_success());

    let missing = client
        .get(format!("{}/persons/{}", server.base_url, id))
        .send()
        .context("get deleted")?;
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);

    Ok(())
}

#[test]
fn server_rejects_empty_fields_and_unknown_ids() -> Result<()> {
    let server = common::spawn_server()?;
    let client = reqwest::blocking::Client::new();

    for body in [
        serde_json::json!({"name": "", "number": "1"}),
        serde_json::json!({"name": "Ada", "number": "  "}),
        serde_json::json!({"name": "Ada"}),
    ] {
        let resp = client
            .post(format!("{}/persons", server.base_url))
            .json(&body)
            .send()
            .context("create invalid")?;
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST, "{}", body);
        let err: serde_json::Value = resp.json().context("parse error body")?;
        assert!(err["error"].as_str().is_some());
    }

    let put = client
        .put(format!("{}/persons/nope", server.base_url))
        .json(&serde_json::json!({"number": "1"}))
        .send()
        .context("update unknown")?;
    assert_eq!(put.status(), reqwest::StatusCode::NOT_FOUND);

    let del = client
        .delete(format!("{}/persons/nope", server.base_url))
        .send()
        .context("delete unknown")?;
    assert_eq!(del.status(), reqwest::StatusCode::NOT_FOUND);

    let persons: Vec<serde_json::Value> = client
        .get(format!("{}/persons", server.base_url))
        .send()
        .context("list persons")?
        .json()
        .context("parse persons")?;
    assert!(persons.is_empty());

    Ok(())
}
