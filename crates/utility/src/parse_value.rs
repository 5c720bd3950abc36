use serde::de::DeserializeOwned;

pub fn parse_value<T>(raw: &str) -> Option<T>
where
    T: DeserializeOwned,
{
    let raw = raw.trim();

    // Try JSON as-is
    // This should always be the highest-priority attempt
    if let Ok(v) = serde_json::from_str::<T>(raw) {
        return Some(v);
    }

    // Try CSV → JSON array fallback
    // In case T: Vec<String>
    //     Not JSON - CLIENT_IDS=worker-1,worker-2 -> ["worker-1","worker-2"]
    if raw.contains(',') {
        let items = raw
            .split(',')
            .map(|s| serde_json::Value::String(s.trim().to_string()))
            .collect::<Vec<_>>();

        if let Ok(v) = serde_json::from_value::<T>(serde_json::Value::Array(items)) {
            return Some(v);
        }
    }

    // Plain scalar string
    // In case T: String
    //     Endpoint=sb://...;SharedAccessKey=... would never deserialize as JSON
    serde_json::from_value::<T>(serde_json::Value::String(raw.to_string())).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_scalars() {
        assert_eq!(parse_value::<u64>(" 120000 "), Some(120_000));
        assert_eq!(parse_value::<bool>("false"), Some(false));
    }

    #[test]
    fn parses_plain_string_with_quotes_and_equals() {
        let raw = r#"Endpoint=sb://h/;SharedAccessKey=a"b\c=="#;

        assert_eq!(parse_value::<String>(raw).as_deref(), Some(raw));
    }

    #[test]
    fn parses_csv_into_list() {
        assert_eq!(
            parse_value::<Vec<String>>("worker-1, worker-2"),
            Some(vec!["worker-1".to_string(), "worker-2".to_string()])
        );
    }

    #[test]
    fn rejects_mismatched_type() {
        assert_eq!(parse_value::<u64>("not-a-number"), None);
    }
}
