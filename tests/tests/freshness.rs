mod common;

use chrono::{Duration as TimeDelta, Utc};
use common::*;
use keyseek::{Collection, Criteria, Document, FieldDescriptor, Schema};
use std::time::Duration;

async fn users() -> Result<Collection> {
    let users = open(
        Schema::new("user")
            .field(FieldDescriptor::string("username").sortable().case_sensitive())
            .field(FieldDescriptor::string("name"))
            .field(FieldDescriptor::string("ssn")),
    )
    .await?;
    users.save(Document::new().with("username", "boog").with("ssn", "123")).await?;
    users.save(Document::new().with("username", "aoog").with("ssn", "123")).await?;
    Ok(users)
}

#[tokio::test]
async fn test_case_sensitive_sort() -> Result<()> {
    let users = users().await?;
    let page = users.find(Criteria::all().eq("ssn", "123"))?.sort("username")?.exec().await?;
    assert_eq!(column(&page, "username"), vec!["aoog", "boog"]);
    Ok(())
}

#[tokio::test]
async fn test_since() -> Result<()> {
    let users = users().await?;

    let page = users.find_one(Criteria::all().eq("username", "boog"))?.since(Utc::now() - TimeDelta::seconds(10)).exec().await?;
    assert_eq!(column(&page, "username"), vec!["boog"]);

    let page = users.find_one(Criteria::all().eq("username", "boog"))?.since(Utc::now() + TimeDelta::seconds(1)).exec().await?;
    assert!(page.first().is_none());
    Ok(())
}

#[tokio::test]
async fn test_until() -> Result<()> {
    let users = users().await?;

    let page = users.find_one(Criteria::all().eq("username", "boog"))?.until(Utc::now() + TimeDelta::seconds(1)).exec().await?;
    assert_eq!(column(&page, "username"), vec!["boog"]);

    let page = users.find_one(Criteria::all().eq("username", "boog"))?.until(Utc::now() - TimeDelta::seconds(10)).exec().await?;
    assert!(page.first().is_none());
    Ok(())
}

#[tokio::test]
async fn test_sort_by_freshness() -> Result<()> {
    let users = open(Schema::new("user").field(FieldDescriptor::string("name"))).await?;
    let mut saved = Vec::new();
    for name in ["ajohn", "bjohn", "cjohn"] {
        saved.push(users.save(Document::new().with("name", name)).await?);
        tokio::time::sleep(Duration::from_millis(2)).await;
    }

    let mut touched = saved.swap_remove(0);
    touched.set("name", "djohn");
    users.save(touched).await?;

    let page = users.find(Criteria::all())?.sort("-updated")?.exec().await?;
    assert_eq!(column(&page, "name"), vec!["djohn", "cjohn", "bjohn"]);
    Ok(())
}
