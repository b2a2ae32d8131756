//! Ranking a fetched page of user search results

use aigm::shared::messaging::UserSearchResult;
use aigm::shared::search::{rank, SearchParams, SearchQuery};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::{assert_contains, assert_ok};

fn result(username: &str, display_name: Option<&str>) -> UserSearchResult {
    UserSearchResult {
        id: Uuid::new_v4(),
        username: username.to_string(),
        display_name: display_name.map(str::to_string),
        avatar_url: None,
        status: "online".to_string(),
    }
}

fn usernames(users: &[UserSearchResult]) -> Vec<&str> {
    users.iter().map(|u| u.username.as_str()).collect()
}

#[test]
fn test_alphabetical_page_is_reranked() {
    // As the datastore returns them: ordered by username
    let page = vec![
        result("alex", None),
        result("alexander", Some("Alexander Great")),
        result("alexandra", None),
        result("balex", None),
        result("zed", Some("alex")),
    ];

    let ranked = rank(page, "Alex");
    assert_eq!(
        usernames(&ranked),
        ["alex", "alexander", "alexandra", "zed", "balex"]
    );
}

#[test]
fn test_ranking_does_not_drop_or_duplicate() {
    let page = vec![result("carol", None), result("alex", None), result("dave", None)];
    let ids: Vec<Uuid> = page.iter().map(|u| u.id).collect();

    let ranked = rank(page, "alex");
    let mut ranked_ids: Vec<Uuid> = ranked.iter().map(|u| u.id).collect();
    let mut expected = ids.clone();
    ranked_ids.sort();
    expected.sort();
    assert_eq!(ranked_ids, expected);
}

#[test]
fn test_query_validation_messages() {
    let err = SearchQuery::parse("").unwrap_err();
    assert_contains!(err.to_string(), "Search query must be at least 1 character");

    let err = SearchQuery::parse(&"q".repeat(101)).unwrap_err();
    assert_contains!(err.to_string(), "Search query cannot exceed 100 characters");

    let query = assert_ok!(SearchQuery::parse("  Mixed Case  "));
    assert_eq!(query.as_str(), "mixed case");
}

#[test]
fn test_params_deserialize_with_defaults() {
    let params: SearchParams = serde_json::from_str(r#"{ "q": "alex" }"#).unwrap();
    assert_eq!(params.page(20, 100), (20, 0));
}
