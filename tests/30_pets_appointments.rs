mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{appointment, expect_error, TestServer};

#[tokio::test]
async fn pet_lifecycle() -> Result<()> {
    let server = TestServer::start().await?;
    let admin = server.admin().await?;

    // No existence check on owner_id
    let res = admin
        .post(server.url("/api/pets"))
        .json(&json!({ "pet_id": "4", "owner_id": 404, "name": "Rex", "species": "dog", "gender": "M" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.json::<Value>().await?, json!({ "message": "Pet created", "pet_id": 4 }));

    let res = admin
        .put(server.url("/api/pets/4"))
        .json(&json!({ "owner_id": 1, "name": "Rex", "species": "dog", "gender": "M" }))
        .send()
        .await?;
    assert_eq!(res.json::<Value>().await?, json!({ "message": "Pet updated" }));

    let pet: Value = admin.get(server.url("/api/pets/4")).send().await?.json().await?;
    assert_eq!(pet["owner_id"], 1);

    let res = admin.delete(server.url("/api/pets/4")).send().await?;
    assert_eq!(res.json::<Value>().await?, json!({ "message": "Pet deleted" }));

    let res = admin.get(server.url("/api/pets/4")).send().await?;
    expect_error(res, 404, "Pet not found").await
}

#[tokio::test]
async fn pet_validation_messages() -> Result<()> {
    let server = TestServer::start().await?;
    let admin = server.admin().await?;

    let res = admin
        .post(server.url("/api/pets"))
        .json(&json!({ "pet_id": 1, "owner_id": "one", "name": "Rex", "species": "dog", "gender": "M" }))
        .send()
        .await?;
    expect_error(res, 400, "pet_id and owner_id must be integers").await?;

    let res = admin
        .post(server.url("/api/pets"))
        .json(&json!({ "pet_id": 1, "owner_id": 1, "name": "Rex", "species": "dog" }))
        .send()
        .await?;
    expect_error(res, 400, "name, species, and gender are required").await?;

    let res = admin
        .put(server.url("/api/pets/1"))
        .json(&json!({ "name": "Rex", "species": "dog", "gender": "M" }))
        .send()
        .await?;
    expect_error(res, 400, "owner_id must be an integer").await?;

    let res = admin.get(server.url("/api/pets/rex")).send().await?;
    expect_error(res, 400, "Invalid pet_id").await
}

#[tokio::test]
async fn appointment_validation_messages() -> Result<()> {
    let server = TestServer::start().await?;
    let admin = server.admin().await?;

    let mut body = appointment(1, "2024-01-15", "09:00", "booked");
    body["vet_id"] = json!("");
    let res = admin.post(server.url("/api/appointments")).json(&body).send().await?;
    expect_error(res, 400, "appointment_id, pet_id, and vet_id must be integers").await?;

    let mut body = appointment(1, "2024-01-15", "09:00", "booked");
    body["status"] = json!("");
    let res = admin.post(server.url("/api/appointments")).json(&body).send().await?;
    expect_error(
        res,
        400,
        "appointment_date, appointment_time, reason, and status are required",
    )
    .await?;

    let res = admin
        .put(server.url("/api/appointments/1"))
        .json(&json!({ "pet_id": 1, "appointment_date": "2024-01-15" }))
        .send()
        .await?;
    expect_error(res, 400, "pet_id and vet_id must be integers").await?;

    let res = admin.delete(server.url("/api/appointments/one")).send().await?;
    expect_error(res, 400, "Invalid appointment_id").await
}

#[tokio::test]
async fn appointment_update_and_missing_rows() -> Result<()> {
    let server = TestServer::start().await?;
    let admin = server.admin().await?;

    let res = admin
        .post(server.url("/api/appointments"))
        .json(&appointment(8, "2024-03-01", "10:00", "booked"))
        .send()
        .await?;
    assert_eq!(
        res.json::<Value>().await?,
        json!({ "message": "Appointment created", "appointment_id": 8 })
    );

    let res = admin
        .put(server.url("/api/appointments/8"))
        .json(&appointment(8, "2024-03-02", "11:00", "done"))
        .send()
        .await?;
    assert_eq!(res.json::<Value>().await?, json!({ "message": "Appointment updated" }));

    let res = admin
        .put(server.url("/api/appointments/9"))
        .json(&appointment(9, "2024-03-02", "11:00", "done"))
        .send()
        .await?;
    expect_error(res, 404, "Appointment not found").await
}

async fn seed_appointments(server: &TestServer, admin: &reqwest::Client) -> Result<()> {
    for body in [
        appointment(1, "2024-01-20", "15:00", "done"),
        appointment(2, "2024-01-05", "09:00", "done"),
        appointment(3, "2024-01-20", "08:30", "done"),
        appointment(4, "2024-01-10", "10:00", "booked"),
        appointment(5, "2024-02-01", "09:00", "done"),
        appointment(6, "2023-12-31", "09:00", "done"),
    ] {
        let res = admin.post(server.url("/api/appointments")).json(&body).send().await?;
        assert_eq!(res.status(), StatusCode::CREATED);
    }
    Ok(())
}

#[tokio::test]
async fn appointment_search_filters_and_orders() -> Result<()> {
    let server = TestServer::start().await?;
    let admin = server.admin().await?;
    seed_appointments(&server, &admin).await?;

    let rows: Vec<Value> = admin
        .get(server.url("/api/appointments/search?status=done&from=2024-01-01&to=2024-01-31"))
        .send()
        .await?
        .json()
        .await?;
    let ids: Vec<i64> = rows.iter().filter_map(|r| r["appointment_id"].as_i64()).collect();
    assert_eq!(ids, vec![2, 3, 1]);

    // Empty parameters are ignored
    let rows: Vec<Value> = admin
        .get(server.url("/api/appointments/search?status=&from=&to="))
        .send()
        .await?
        .json()
        .await?;
    let ids: Vec<i64> = rows.iter().filter_map(|r| r["appointment_id"].as_i64()).collect();
    assert_eq!(ids, vec![6, 2, 4, 3, 1, 5]);
    Ok(())
}

#[tokio::test]
async fn appointments_per_month_is_ascending() -> Result<()> {
    let server = TestServer::start().await?;
    let admin = server.admin().await?;
    seed_appointments(&server, &admin).await?;

    let user = server.user().await?;
    let counts: Value = user
        .get(server.url("/api/stats/appointments-per-month"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(
        counts,
        json!([
            { "month": "2023-12", "count": 1 },
            { "month": "2024-01", "count": 4 },
            { "month": "2024-02", "count": 1 }
        ])
    );
    Ok(())
}
