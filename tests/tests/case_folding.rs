mod common;

use common::*;
use keyseek::{CollectionConfig, Criteria, Document, FieldDescriptor, FieldType, Fields, MutationError, Schema, Value};

fn user_schema(username: FieldDescriptor) -> Schema {
    Schema::new("user").field(username).field(FieldDescriptor::string("firstName").sortable()).field(FieldDescriptor::string("ssn"))
}

#[tokio::test]
async fn test_case_insensitive_lookup() -> Result<()> {
    let users = open(user_schema(FieldDescriptor::string("username").sortable())).await?;
    users.save(Document::new().with("username", "Jason").with("ssn", "1")).await?;

    for probe in ["jason", "Jason", "JASON"] {
        let page = users.find(Criteria::all().eq("username", probe))?.exec().await?;
        assert_eq!(page.len(), 1, "probe {probe}");
        assert_eq!(text(&page.data[0], "username"), Some("Jason"));
        assert_eq!(text(&page.data[0], "_username"), Some("jason"));
    }
    Ok(())
}

#[tokio::test]
async fn test_case_sensitive_override() -> Result<()> {
    let users = open(user_schema(FieldDescriptor::string("username").sortable().case_sensitive())).await?;
    let saved = users.save(Document::new().with("username", "Jason")).await?;
    assert_eq!(saved.get("_username"), None);

    assert!(users.find(Criteria::all().eq("username", "jason"))?.exec().await?.is_empty());
    assert_eq!(users.find(Criteria::all().eq("username", "Jason"))?.exec().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_ignore_case_disabled_globally() -> Result<()> {
    let users = open_with(user_schema(FieldDescriptor::string("username").sortable()), CollectionConfig::default().with_ignore_case(false)).await?;
    users.save(Document::new().with("username", "b")).await?;
    users.save(Document::new().with("username", "A")).await?;
    users.save(Document::new().with("username", "a")).await?;

    let page = users.find(Criteria::all())?.sort("username")?.exec().await?;
    assert_eq!(column(&page, "username"), vec!["A", "a", "b"]);
    Ok(())
}

#[tokio::test]
async fn test_bulk_create_maintains_shadows() -> Result<()> {
    let users = open(user_schema(FieldDescriptor::string("username").sortable())).await?;
    users
        .create(vec![
            Document::new().with("username", "JOHN").with("firstName", "John"),
            Document::new().with("username", "jane").with("firstName", "JANE"),
        ])
        .await?;

    let page = users.find(Criteria::all())?.sort("firstName")?.exec().await?;
    assert_eq!(column(&page, "firstName"), vec!["JANE", "John"]);
    assert_eq!(column(&page, "_firstName"), vec!["jane", "john"]);
    assert_eq!(column(&page, "_username"), vec!["jane", "john"]);
    Ok(())
}

#[tokio::test]
async fn test_bulk_create_checks_every_document_first() -> Result<()> {
    let users = open(user_schema(FieldDescriptor::string("username").sortable())).await?;
    let err = users.create(vec![Document::new().with("username", "ok"), Document::new().with("firstName", true)]).await.unwrap_err();
    assert!(matches!(err, MutationError::FieldType { ref field, .. } if field == "firstName"));
    assert!(users.find(Criteria::all())?.exec().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_null_and_undefined_shadows() -> Result<()> {
    let users = open(user_schema(FieldDescriptor::string("username").sortable())).await?;
    let mut doc = users.save(Document::new().with("username", "Ann").with_null("firstName")).await?;
    assert_eq!(doc.get("_firstName"), Some(None));

    doc.unset("username");
    let doc = users.save(doc).await?;
    assert_eq!(doc.get("_username"), None);
    Ok(())
}

#[tokio::test]
async fn test_non_string_in_folded_field_is_rejected() -> Result<()> {
    let users = open(user_schema(FieldDescriptor::string("username").sortable())).await?;
    let err = users.save(Document::new().with("username", 42i64)).await.unwrap_err();
    assert!(matches!(err, MutationError::FieldType { ref field, expected: FieldType::String, found: FieldType::I64 } if field == "username"));
    Ok(())
}

#[tokio::test]
async fn test_update_keeps_shadows_in_sync() -> Result<()> {
    let users = open(Schema::new("user").field(FieldDescriptor::string("company").sortable())).await?;
    users
        .create(["Facebook", "Google", "SAP", "Google", "Facebook"].into_iter().map(|company| Document::new().with("company", company)).collect())
        .await?;

    let page = users.find(Criteria::all())?.sort("company")?.exec().await?;
    assert_eq!(text(&page.data[0], "_company"), Some("facebook"));
    assert_eq!(text(&page.data[4], "_company"), Some("sap"));

    let patch = Fields::from([("company".to_string(), Some(Value::from("Hatchpad.io")))]);
    assert_eq!(users.update(Criteria::all(), patch).await?, 5);

    let page = users.find(Criteria::all())?.sort("company")?.exec().await?;
    assert_eq!(page.len(), 5);
    for doc in &page.data {
        assert_eq!(text(doc, "company"), Some("Hatchpad.io"));
        assert_eq!(text(doc, "_company"), Some("hatchpad.io"));
    }
    Ok(())
}
