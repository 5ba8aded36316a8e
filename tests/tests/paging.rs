mod common;

use common::*;
use itertools::Itertools;
use keyseek::{Collection, Criteria, Cursor, CursorError, Document, EntityId, FieldDescriptor, FieldType, MutationError, QueryError, Schema};

const NAMES: [&str; 6] = ["alice", "Bob", "carol", "bob", "Dave", "alice"];

async fn seed() -> Result<Collection> {
    let c = open(
        Schema::new("member")
            .field(FieldDescriptor::string("name").sortable())
            .field(FieldDescriptor::new("rank", FieldType::I64).sortable())
            .field(FieldDescriptor::string("team").sortable()),
    )
    .await?;
    for (i, name) in NAMES.iter().enumerate() {
        let mut doc = Document::new().with("name", *name);
        // Every third row leaves rank null and every fourth leaves team undefined.
        if i % 3 != 0 {
            doc.set("rank", (i % 2) as i64);
        } else {
            doc.set_null("rank");
        }
        if i % 4 != 0 {
            doc.set("team", if i % 2 == 0 { "red" } else { "Blue" });
        }
        c.save(doc).await?;
    }
    Ok(c)
}

fn ids(page: &keyseek::Page) -> Vec<EntityId> { page.data.iter().map(|d| d.id).collect() }

const SORTS: [&str; 6] = ["name", "-name", "rank,-name", "-rank,team", "team,-rank,name", "-updated"];

#[tokio::test]
async fn test_after_pages_concatenate_to_full_result() -> Result<()> {
    let c = seed().await?;
    for sort in SORTS {
        let full = ids(&c.find(Criteria::all())?.sort(sort)?.exec().await?);

        for limit in [1, 2, 4] {
            let mut seen = Vec::new();
            let mut page = c.find(Criteria::all())?.sort(sort)?.limit(limit).exec().await?;
            while let Some(last) = page.last_cursor.clone() {
                seen.extend(ids(&page));
                page = c.find(Criteria::all())?.sort(sort)?.limit(limit).after(last).exec().await?;
            }
            assert_eq!(seen, full, "sort {sort} limit {limit}");
            assert!(seen.iter().all_unique());
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_before_returns_previous_page() -> Result<()> {
    let c = seed().await?;
    for sort in SORTS {
        let first = c.find(Criteria::all())?.sort(sort)?.limit(2).exec().await?;
        let second = c.find(Criteria::all())?.sort(sort)?.limit(2).after(first.last_cursor.clone().expect("last")).exec().await?;
        let back = c.find(Criteria::all())?.sort(sort)?.limit(2).before(second.first_cursor.clone().expect("first")).exec().await?;
        assert_eq!(ids(&back), ids(&first), "sort {sort}");
    }
    Ok(())
}

#[tokio::test]
async fn test_after_and_before_window() -> Result<()> {
    let c = seed().await?;
    let full = c.find(Criteria::all())?.sort("name")?.exec().await?;
    let lower = c.cursor(&full.data[1]);
    let upper = c.cursor(&full.data[4]);

    let window = c.find(Criteria::all())?.sort("name")?.after(lower).before(upper).exec().await?;
    assert_eq!(ids(&window), ids(&full)[2..4].to_vec());
    Ok(())
}

#[tokio::test]
async fn test_token_round_trip() -> Result<()> {
    let c = seed().await?;
    let first = c.find(Criteria::all())?.sort("team,-rank")?.limit(3).exec().await?;
    let cursor = first.last_cursor.clone().expect("last");

    let token = c.encode_cursor(&cursor)?;
    assert_eq!(c.decode_cursor(&token)?, cursor);

    let by_token = c.find(Criteria::all())?.sort("team,-rank")?.limit(3).after_token(&token)?.exec().await?;
    let by_cursor = c.find(Criteria::all())?.sort("team,-rank")?.limit(3).after(cursor).exec().await?;
    assert_eq!(ids(&by_token), ids(&by_cursor));
    Ok(())
}

#[tokio::test]
async fn test_tampered_token_rejected() -> Result<()> {
    let c = seed().await?;
    let first = c.find(Criteria::all())?.sort("name")?.limit(1).exec().await?;
    let token = c.encode_cursor(first.last_cursor.as_ref().expect("last"))?;

    let (payload, tag) = token.split_once('.').expect("signed token");
    let mut bytes = payload.as_bytes().to_vec();
    bytes[0] = if bytes[0] == b'A' { b'B' } else { b'A' };
    let tampered = format!("{}.{}", String::from_utf8(bytes)?, tag);

    let err = c.find(Criteria::all())?.sort("name")?.after_token(&tampered).unwrap_err();
    assert!(matches!(err, QueryError::InvalidCursor(CursorError::BadSignature)));

    let err = c.find(Criteria::all())?.after_token("not a token").unwrap_err();
    assert!(matches!(err, QueryError::InvalidCursor(_)));
    Ok(())
}

#[tokio::test]
async fn test_invalid_sort_field() -> Result<()> {
    let c = seed().await?;
    let err = c.find(Criteria::all())?.sort("nickname").unwrap_err();
    assert!(matches!(err, QueryError::InvalidSortField(ref f) if f == "nickname"));
    Ok(())
}

#[tokio::test]
async fn test_cursor_missing_sort_field() -> Result<()> {
    let c = seed().await?;
    let err = c.find(Criteria::all())?.sort("name")?.after(Cursor::new(EntityId::new())).exec().await.unwrap_err();
    assert!(matches!(err, QueryError::InvalidCursor(CursorError::MissingField(ref f)) if f == "name"));
    Ok(())
}

#[tokio::test]
async fn test_mistyped_sort_value_rejected() -> Result<()> {
    let c = open(Schema::new("code").field(FieldDescriptor::string("code").sortable().case_sensitive())).await?;
    let err = c.save(Document::new().with("code", 5i64)).await.unwrap_err();
    assert!(matches!(err, MutationError::FieldType { ref field, expected: FieldType::String, found: FieldType::I64 } if field == "code"));

    c.save(Document::new().with("code", "a")).await?;
    c.save(Document::new().with("code", "b")).await?;
    c.save(Document::new().with_null("code")).await?;

    let full = ids(&c.find(Criteria::all())?.sort("code")?.exec().await?);
    assert_eq!(full.len(), 3);
    let mut seen = Vec::new();
    let mut page = c.find(Criteria::all())?.sort("code")?.limit(1).exec().await?;
    while let Some(last) = page.last_cursor.clone() {
        seen.extend(ids(&page));
        page = c.find(Criteria::all())?.sort("code")?.limit(1).after(last).exec().await?;
    }
    assert_eq!(seen, full);
    Ok(())
}

#[tokio::test]
async fn test_mixed_integer_and_float_pages_completely() -> Result<()> {
    let c = open(Schema::new("score").field(FieldDescriptor::new("score", FieldType::F64).sortable())).await?;
    let big = 1i64 << 53;
    c.save(Document::new().with("score", big + 1)).await?;
    c.save(Document::new().with("score", big as f64)).await?;
    c.save(Document::new().with("score", big)).await?;
    c.save(Document::new().with("score", 0.5)).await?;
    c.save(Document::new().with("score", -2i64)).await?;

    for sort in ["score", "-score"] {
        let full = ids(&c.find(Criteria::all())?.sort(sort)?.exec().await?);
        let mut seen = Vec::new();
        let mut page = c.find(Criteria::all())?.sort(sort)?.limit(2).exec().await?;
        while let Some(last) = page.last_cursor.clone() {
            seen.extend(ids(&page));
            page = c.find(Criteria::all())?.sort(sort)?.limit(2).after(last).exec().await?;
        }
        assert_eq!(seen, full, "sort {sort}");
        assert_eq!(full.len(), 5);
    }
    Ok(())
}
