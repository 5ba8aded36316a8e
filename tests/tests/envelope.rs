mod common;

use common::*;
use keyseek::{Collection, Criteria, Cursor, Document, FieldDescriptor, Page, Schema};
use std::time::Duration;

struct Fixture {
    users: Collection,
    first: Page,
}

async fn fixture() -> Result<Fixture> {
    let users = open(Schema::new("user").field(FieldDescriptor::string("username").sortable())).await?;
    for name in ["c", "b", "e"] {
        users.save(Document::new().with("username", name)).await?;
    }
    tokio::time::sleep(Duration::from_millis(5)).await;
    users.save(Document::new().with("username", "d")).await?;

    let first = users.find(Criteria::all())?.sort("username")?.exec().await?;
    users.create(["dd", "f", "a", "bb"].into_iter().map(|name| Document::new().with("username", name)).collect()).await?;
    Ok(Fixture { users, first })
}

fn username(cursor: &Option<Cursor>) -> Option<&str> { cursor.as_ref()?.value("username")?.as_str() }

#[tokio::test]
async fn test_freshness_watermarks() -> Result<()> {
    let Fixture { first, .. } = fixture().await?;
    let freshest = first.freshest.as_ref().and_then(|v| v.as_timestamp()).expect("freshest");
    let stalest = first.stalest.as_ref().and_then(|v| v.as_timestamp()).expect("stalest");
    assert!(stalest < freshest);
    Ok(())
}

#[tokio::test]
async fn test_first_and_last_cursors() -> Result<()> {
    let Fixture { first, .. } = fixture().await?;
    assert_eq!(username(&first.first_cursor), Some("b"));
    assert_eq!(username(&first.last_cursor), Some("e"));
    Ok(())
}

#[tokio::test]
async fn test_resume_ascending() -> Result<()> {
    let Fixture { users, first } = fixture().await?;

    let after = users.find(Criteria::all())?.sort("username")?.after(first.last_cursor.clone().expect("last")).exec().await?;
    assert_eq!(column(&after, "username"), vec!["f"]);

    let before = users.find(Criteria::all())?.sort("username")?.before(first.first_cursor.clone().expect("first")).exec().await?;
    assert_eq!(column(&before, "username"), vec!["a"]);
    Ok(())
}

#[tokio::test]
async fn test_resume_descending() -> Result<()> {
    let Fixture { users, first } = fixture().await?;

    let after = users.find(Criteria::all())?.sort("-username")?.after(first.last_cursor.clone().expect("last")).exec().await?;
    assert_eq!(column(&after, "username"), vec!["dd", "d", "c", "bb", "b", "a"]);

    let before = users.find(Criteria::all())?.sort("-username")?.before(first.first_cursor.clone().expect("first")).exec().await?;
    assert_eq!(column(&before, "username"), vec!["f", "e", "dd", "d", "c", "bb"]);
    Ok(())
}

#[tokio::test]
async fn test_empty_page_has_no_metadata() -> Result<()> {
    let Fixture { users, .. } = fixture().await?;
    let page = users.find(Criteria::all().eq("username", "zz"))?.exec().await?;
    assert!(page.is_empty());
    assert_eq!(page, Page::default());
    Ok(())
}
