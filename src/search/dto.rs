use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::users::repo_types::PartnerMatch;

/// Query parameters for partner search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// A single hit: who claimed the searched identity and when. The partner's
/// own details and the submitter's contact fields stay server-side.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<PartnerMatch> for SearchMatch {
    fn from(row: PartnerMatch) -> Self {
        Self {
            name: row.name,
            created_at: row.created_at,
        }
    }
}

/// Response for the search endpoint; an empty `matches` list is a success.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub count: usize,
    pub matches: Vec<SearchMatch>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn match_serializes_only_name_and_created_at() {
        let json = serde_json::to_value(SearchMatch {
            name: "A".into(),
            created_at: datetime!(2024-05-01 12:00 UTC),
        })
        .unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert!(obj.contains_key("name"));
        assert!(obj.contains_key("createdAt"));
    }

    #[test]
    fn response_reports_count_alongside_matches() {
        let json = serde_json::to_value(SearchResponse {
            success: true,
            count: 1,
            matches: vec![SearchMatch {
                name: "A".into(),
                created_at: datetime!(2024-05-01 12:00 UTC),
            }],
        })
        .unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["matches"][0]["name"], "A");
        assert!(json["matches"][0].get("phone").is_none());
        assert!(json["matches"][0].get("email").is_none());
        assert!(json["matches"][0].get("partner").is_none());
    }
}
