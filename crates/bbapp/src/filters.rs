//! Query construction for the pull request list endpoint.

/// Server-side filters for `GET /repositories/{workspace}/{repo}/pullrequests`.
#[derive(Debug, Clone, Default)]
pub struct PrFilter {
    /// PR state, sent uppercased (`OPEN`, `MERGED`, `DECLINED`, `SUPERSEDED`).
    pub state: Option<String>,
    /// Author username, matched via a `q` expression.
    pub author: Option<String>,
    /// Page size; the API default is smaller than useful for a listing.
    pub limit: Option<u32>,
}

const DEFAULT_PAGE_LEN: u32 = 50;

impl PrFilter {
    /// Renders the filter as query pairs, omitting unset or empty values.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(state) = non_empty(&self.state) {
            pairs.push(("state".to_string(), state.to_uppercase()));
        }
        if let Some(author) = non_empty(&self.author) {
            pairs.push(("q".to_string(), format!("author.username=\"{}\"", author)));
        }
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_LEN);
        pairs.push(("pagelen".to_string(), limit.to_string()));

        pairs
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_only_sets_page_length() {
        let query = PrFilter::default().to_query();
        assert_eq!(query, vec![("pagelen".to_string(), "50".to_string())]);
    }

    #[test]
    fn state_is_uppercased() {
        let filter = PrFilter {
            state: Some("open".to_string()),
            ..Default::default()
        };
        let query = filter.to_query();
        assert!(query.contains(&("state".to_string(), "OPEN".to_string())));
    }

    #[test]
    fn author_becomes_a_q_expression() {
        let filter = PrFilter {
            author: Some("jodev".to_string()),
            ..Default::default()
        };
        let query = filter.to_query();
        assert!(query.contains(&("q".to_string(), "author.username=\"jodev\"".to_string())));
    }

    #[test]
    fn empty_strings_are_treated_as_unset() {
        let filter = PrFilter {
            state: Some(String::new()),
            author: Some(String::new()),
            limit: Some(10),
        };
        assert_eq!(
            filter.to_query(),
            vec![("pagelen".to_string(), "10".to_string())]
        );
    }

    #[test]
    fn explicit_limit_overrides_default() {
        let filter = PrFilter {
            limit: Some(5),
            ..Default::default()
        };
        assert_eq!(
            filter.to_query(),
            vec![("pagelen".to_string(), "5".to_string())]
        );
    }
}
