use pretty_assertions::assert_eq;

use outline_pages_worker::content_update::apply_update;
use outline_pages_worker::error::ApiError;
use outline_pages_worker::models::{OperationRequest, PageRequest, SortOrder, UpdateKind};

fn parse_request(body: &str) -> Result<PageRequest, serde_json::Error> {
    serde_json::from_str(body)
}

#[test]
fn create_request_deserializes_into_tagged_variant() {
    let request = parse_request(
        r##"{
            "operation": "create",
            "collection_id": "col-1",
            "title": "Notes",
            "content": "# Notes",
            "api_key": "key",
            "email": "user@example.com"
        }"##,
    )
    .expect("valid create body");

    assert_eq!(request.api_key, "key");
    assert_eq!(
        request.operation,
        OperationRequest::Create {
            collection_id: "col-1".to_string(),
            title: "Notes".to_string(),
            content: "# Notes".to_string(),
        }
    );
}

#[test]
fn update_request_nests_update_type_tag() {
    let request = parse_request(
        r##"{
            "operation": "update",
            "document_id": "doc-1",
            "update_type": "find_replace",
            "find": "old",
            "content": "new",
            "api_key": "key",
            "email": "user@example.com"
        }"##,
    )
    .expect("valid update body");

    let OperationRequest::Update { kind, .. } = &request.operation else {
        panic!("expected update variant");
    };
    assert_eq!(
        kind,
        &UpdateKind::FindReplace {
            find: "old".to_string()
        }
    );
}

#[test]
fn find_replace_without_find_field_is_rejected_at_parse_time() {
    let result = parse_request(
        r##"{
            "operation": "update",
            "document_id": "doc-1",
            "update_type": "find_replace",
            "content": "new",
            "api_key": "key",
            "email": "user@example.com"
        }"##,
    );

    assert!(result.is_err());
}

#[test]
fn unknown_operation_is_rejected_at_parse_time() {
    let result = parse_request(
        r##"{
            "operation": "destroy",
            "document_id": "doc-1",
            "api_key": "key",
            "email": "user@example.com"
        }"##,
    );

    assert!(result.is_err());
}

#[test]
fn update_table_defaults_sort_order_and_keeps_key_order() {
    let request = parse_request(
        r##"{
            "operation": "update_table",
            "document_id": "doc-1",
            "table_data": { "Task": "X", "Status": "Done" },
            "api_key": "key",
            "email": "user@example.com"
        }"##,
    )
    .expect("valid update_table body");

    let OperationRequest::UpdateTable {
        table_data,
        sort_by,
        sort_order,
        ..
    } = &request.operation
    else {
        panic!("expected update_table variant");
    };

    assert_eq!(*sort_by, None);
    assert_eq!(*sort_order, SortOrder::Asc);
    let keys: Vec<&String> = table_data.keys().collect();
    assert_eq!(keys, vec!["Task", "Status"]);
}

#[test]
fn validation_rejects_empty_required_fields() {
    let request = parse_request(
        r##"{
            "operation": "create",
            "collection_id": "col-1",
            "title": "",
            "content": "body",
            "api_key": "key",
            "email": "user@example.com"
        }"##,
    )
    .expect("parses before validation");

    let error = request.validate().unwrap_err();
    assert!(matches!(error, ApiError::Validation(_)));
    assert!(error.message().contains("title"));
}

#[test]
fn validation_rejects_malformed_email_and_empty_table_data() {
    let bad_email = parse_request(
        r##"{
            "operation": "read",
            "document_id": "doc-1",
            "api_key": "key",
            "email": "not-an-address"
        }"##,
    )
    .expect("parses before validation");
    assert!(matches!(
        bad_email.validate().unwrap_err(),
        ApiError::Validation(_)
    ));

    let empty_table = parse_request(
        r##"{
            "operation": "update_table",
            "document_id": "doc-1",
            "table_data": {},
            "api_key": "key",
            "email": "user@example.com"
        }"##,
    )
    .expect("parses before validation");
    let error = empty_table.validate().unwrap_err();
    assert!(error.message().contains("table_data"));
}

#[test]
fn validation_rejects_sort_by_outside_table_data_keys() {
    let request = parse_request(
        r##"{
            "operation": "update_table",
            "document_id": "doc-1",
            "table_data": { "A": "1" },
            "sort_by": "B",
            "api_key": "key",
            "email": "user@example.com"
        }"##,
    )
    .expect("parses before validation");

    let error = request.validate().unwrap_err();
    assert!(matches!(error, ApiError::Validation(_)));
    assert!(error.message().contains("sort_by"));
}

#[test]
fn append_and_prepend_join_with_a_blank_line() {
    let appended = apply_update("existing", &UpdateKind::Append, "added").expect("append");
    assert_eq!(appended, "existing\n\nadded");

    let prepended = apply_update("existing\n", &UpdateKind::Prepend, "added").expect("prepend");
    assert_eq!(prepended, "added\n\nexisting\n");
}

#[test]
fn replace_swaps_content_verbatim() {
    let replaced = apply_update("old body", &UpdateKind::Replace, "new body").expect("replace");
    assert_eq!(replaced, "new body");
}

#[test]
fn find_replace_substitutes_every_occurrence() {
    let kind = UpdateKind::FindReplace {
        find: "TODO".to_string(),
    };
    let updated = apply_update("TODO one\nTODO two\n", &kind, "DONE").expect("find present");
    assert_eq!(updated, "DONE one\nDONE two\n");
}

#[test]
fn find_replace_fails_explicitly_when_find_is_absent() {
    let kind = UpdateKind::FindReplace {
        find: "TODO".to_string(),
    };
    let error = apply_update("nothing to see\n", &kind, "DONE").unwrap_err();

    assert!(matches!(error, ApiError::FindNotFound(_)));
    assert_eq!(error.status_code(), 409);
}
