use crate::sidebar::SEARCH;

/// Query-string parameters understood by the search route.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchParams {
    /// Query to submit on arrival.
    pub q: Option<String>,
    /// Conversation to show.
    pub chat_id: Option<String>,
}

impl SearchParams {
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            if value.trim().is_empty() {
                continue;
            }
            match key {
                "q" => params.q = Some(value.to_string()),
                "chat_id" => params.chat_id = Some(value.to_string()),
                _ => {}
            }
        }
        params
    }
}

pub fn search_path(chat_id: &str) -> String {
    format!("{}?chat_id={chat_id}", SEARCH.href)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_ignored() {
        let params = SearchParams::from_pairs([("q", "  "), ("chat_id", "chat_004"), ("x", "1")]);
        assert_eq!(params.q, None);
        assert_eq!(params.chat_id.as_deref(), Some("chat_004"));
    }

    #[test]
    fn search_path_carries_chat_id() {
        assert_eq!(search_path("chat_1"), "/search?chat_id=chat_1");
    }
}
