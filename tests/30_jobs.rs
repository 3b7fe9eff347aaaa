mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

async fn create_company(
    server: &common::TestServer,
    token: &str,
    handle: &str,
) -> Result<()> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/companies", server.base_url))
        .bearer_auth(token)
        .json(&json!({ "handle": handle, "name": format!("Jobs Co {}", handle) }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "company setup failed");
    Ok(())
}

#[tokio::test]
async fn job_create_get_and_filters() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::admin_token(server).await?;
    let client = reqwest::Client::new();
    let handle = common::unique("jobco");
    create_company(server, &token, &handle).await?;

    // One job with equity, one without
    let tag = &handle;
    let res = client
        .post(format!("{}/jobs", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "title": format!("Engineer {}", tag),
            "salary": 120000,
            "equity": 0.05,
            "companyHandle": handle,
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let payload = res.json::<serde_json::Value>().await?;
    let job_id = payload["job"]["id"].as_i64().expect("job id") as i32;
    assert_eq!(payload["job"]["companyHandle"], json!(handle));
    assert_eq!(payload["job"]["equity"], json!("0.05"));

    let res = client
        .post(format!("{}/jobs", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "title": format!("Analyst {}", tag),
            "salary": 60000,
            "companyHandle": handle,
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    // Fetch single job by id
    let res = client
        .get(format!("{}/jobs/{}", server.base_url, job_id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // hasEquity=true hides the equity-less job
    let res = client
        .get(format!("{}/jobs", server.base_url))
        .query(&[("title", tag.as_str()), ("hasEquity", "true")])
        .send()
        .await?;
    let jobs = res.json::<serde_json::Value>().await?["jobs"]
        .as_array()
        .cloned()
        .unwrap_or_default();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["id"].as_i64(), Some(job_id as i64));

    // minSalary filters inclusively
    let res = client
        .get(format!("{}/jobs", server.base_url))
        .query(&[("title", tag.as_str()), ("minSalary", "60000")])
        .send()
        .await?;
    let jobs = res.json::<serde_json::Value>().await?["jobs"]
        .as_array()
        .cloned()
        .unwrap_or_default();
    assert_eq!(jobs.len(), 2);

    // The company's detail view nests both jobs
    let res = client
        .get(format!("{}/companies/{}", server.base_url, handle))
        .send()
        .await?;
    let company_jobs = res.json::<serde_json::Value>().await?["company"]["jobs"]
        .as_array()
        .cloned()
        .unwrap_or_default();
    assert_eq!(company_jobs.len(), 2);

    // Delete one job; it disappears from both views
    let res = client
        .delete(format!("{}/jobs/{}", server.base_url, job_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<serde_json::Value>().await?["deleted"].as_i64(),
        Some(job_id as i64)
    );

    let res = client
        .get(format!("{}/jobs/{}", server.base_url, job_id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn job_for_missing_company_is_not_found() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::admin_token(server).await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/jobs", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Ghost Role",
            "companyHandle": "no-such-company",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn deleting_a_company_cascades_to_its_jobs() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::admin_token(server).await?;
    let client = reqwest::Client::new();
    let handle = common::unique("casc");
    create_company(server, &token, &handle).await?;

    let res = client
        .post(format!("{}/jobs", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "title": "Doomed Role", "companyHandle": handle }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let job_id = res.json::<serde_json::Value>().await?["job"]["id"]
        .as_i64()
        .unwrap();

    let res = client
        .delete(format!("{}/companies/{}", server.base_url, handle))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/jobs/{}", server.base_url, job_id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn apply_flow_links_user_and_job() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::admin_token(server).await?;
    let client = reqwest::Client::new();
    let handle = common::unique("appco");
    create_company(server, &token, &handle).await?;

    let res = client
        .post(format!("{}/jobs", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "title": "Open Role", "companyHandle": handle }))
        .send()
        .await?;
    let job_id = res.json::<serde_json::Value>().await?["job"]["id"]
        .as_i64()
        .unwrap();

    let username = common::unique("appl");
    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({
            "username": username,
            "password": "password1",
            "firstName": "App",
            "lastName": "Licant",
            "email": "applicant@example.com",
        }))
        .send()
        .await?;
    let user_token = res.json::<serde_json::Value>().await?["token"]
        .as_str()
        .unwrap()
        .to_string();

    // Apply as the user themselves
    let res = client
        .post(format!(
            "{}/users/{}/jobs/{}",
            server.base_url, username, job_id
        ))
        .bearer_auth(&user_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let payload = res.json::<serde_json::Value>().await?;
    assert_eq!(payload["applied"].as_i64(), Some(job_id));

    // The application shows on the profile
    let res = client
        .get(format!("{}/users/{}", server.base_url, username))
        .bearer_auth(&user_token)
        .send()
        .await?;
    let payload = res.json::<serde_json::Value>().await?;
    assert_eq!(payload["user"]["applications"], json!([job_id]));

    // Applying twice conflicts
    let res = client
        .post(format!(
            "{}/users/{}/jobs/{}",
            server.base_url, username, job_id
        ))
        .bearer_auth(&user_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // A user cannot apply on someone else's behalf
    let res = client
        .post(format!(
            "{}/users/{}/jobs/{}",
            server.base_url,
            common::ADMIN_USERNAME,
            job_id
        ))
        .bearer_auth(&user_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
async fn profile_update_changes_only_supplied_fields() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let username = common::unique("prof");

    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({
            "username": username,
            "password": "password1",
            "firstName": "Before",
            "lastName": "Change",
            "email": "profile@example.com",
        }))
        .send()
        .await?;
    let user_token = res.json::<serde_json::Value>().await?["token"]
        .as_str()
        .unwrap()
        .to_string();

    let res = client
        .patch(format!("{}/users/{}", server.base_url, username))
        .bearer_auth(&user_token)
        .json(&json!({ "firstName": "After" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let payload = res.json::<serde_json::Value>().await?;
    assert_eq!(payload["user"]["firstName"], json!("After"));
    assert_eq!(payload["user"]["lastName"], json!("Change"));
    assert_eq!(payload["user"]["email"], json!("profile@example.com"));

    // Empty patch bodies are rejected
    let res = client
        .patch(format!("{}/users/{}", server.base_url, username))
        .bearer_auth(&user_token)
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
