use jsonfetch::{JsonFetchClient, RequestOptions};
use serde_json::{json, Value};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let base_url = std::env::var("JSONFETCH_BASE_URL")?;

    let client = JsonFetchClient::new(base_url, 2)?;

    let created = client
        .post::<Value, _>("/users", &json!({ "name": "Kit" }), ())
        .await?;
    println!("created ({}): {}", created.status, created.data);

    let page = client
        .get::<Value>(
            "/users",
            RequestOptions::new().query("name", "Kit").query("limit", 10),
        )
        .await?;
    println!("found ({}): {}", page.status, page.data);

    Ok(())
}
