use serde::{Deserialize, Deserializer, Serialize};

/// An id the frontend may send either as `1` or as `"1"`. Serializes back in
/// the form it arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(i64),
    String(String),
}

impl NumberOrString {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            NumberOrString::Number(n) => Some(*n),
            NumberOrString::String(s) => s.trim().parse().ok(),
        }
    }
}

// the frontend sends category ids both as `1` and as `"1"`, storage keeps them as text
pub fn deserialize_optional_category<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<NumberOrString>::deserialize(deserializer)?.map(|value| match value {
            NumberOrString::Number(n) => n.to_string(),
            NumberOrString::String(s) => s,
        }),
    )
}

// `?page=abc` or `?page=` falls back to the first page instead of rejecting the request
pub fn deserialize_page_or_default<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let page = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(page.and_then(|p| p.as_i64()).unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "deserialize_optional_category")]
        category: Option<String>,
    }

    #[derive(Deserialize)]
    struct Query {
        #[serde(deserialize_with = "deserialize_page_or_default")]
        page: i64,
    }

    #[test]
    fn category_accepts_number_or_string() {
        let body: Body = serde_json::from_str(r#"{"category": 3}"#).unwrap();
        assert_eq!(body.category.as_deref(), Some("3"));
        let body: Body = serde_json::from_str(r#"{"category": "3"}"#).unwrap();
        assert_eq!(body.category.as_deref(), Some("3"));
    }

    #[test]
    fn category_may_be_null_or_absent() {
        let body: Body = serde_json::from_str(r#"{"category": null}"#).unwrap();
        assert_eq!(body.category, None);
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.category, None);
    }

    #[test]
    fn category_rejects_other_types() {
        assert!(serde_json::from_str::<Body>(r#"{"category": [1]}"#).is_err());
    }

    #[test]
    fn id_serializes_in_its_original_form() {
        let text: NumberOrString = serde_json::from_str(r#""2""#).unwrap();
        assert_eq!(text.as_i64(), Some(2));
        assert_eq!(serde_json::to_string(&text).unwrap(), r#""2""#);

        let number: NumberOrString = serde_json::from_str("2").unwrap();
        assert_eq!(number.as_i64(), Some(2));
        assert_eq!(serde_json::to_string(&number).unwrap(), "2");

        let junk: NumberOrString = serde_json::from_str(r#""two""#).unwrap();
        assert_eq!(junk.as_i64(), None);
    }

    #[test]
    fn page_parses_numeric_text() {
        let query: Query = serde_json::from_str(r#"{"page": "3"}"#).unwrap();
        assert_eq!(query.page, 3);
        let query: Query = serde_json::from_str(r#"{"page": 2}"#).unwrap();
        assert_eq!(query.page, 2);
    }

    #[test]
    fn page_falls_back_to_first() {
        let query: Query = serde_json::from_str(r#"{"page": "abc"}"#).unwrap();
        assert_eq!(query.page, 1);
        let query: Query = serde_json::from_str(r#"{"page": ""}"#).unwrap();
        assert_eq!(query.page, 1);
    }
}
