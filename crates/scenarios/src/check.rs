//! Named response assertions
//!
//! A check is a predicate over a [`ResponseView`]. A failed check is
//! recorded by the runner; it never aborts the iteration.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// What a check gets to see of a response
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResponseView {
    /// HTTP status, `None` when the request never got a response
    pub status: Option<u16>,
    /// Parsed JSON body, `None` when empty or not JSON
    pub body: Option<Value>,
}

impl ResponseView {
    pub fn new(status: Option<u16>, body: Option<Value>) -> Self {
        Self { status, body }
    }

    /// Build a view from a raw body, ignoring bodies that are not JSON
    pub fn from_raw(status: Option<u16>, raw_body: Option<&str>) -> Self {
        let body = raw_body
            .filter(|b| !b.trim().is_empty())
            .and_then(|b| serde_json::from_str(b).ok());
        Self { status, body }
    }

    /// Look up a dotted path in the body, e.g. `wods.0.blocks`
    pub fn json(&self, path: &str) -> Option<&Value> {
        let mut current = self.body.as_ref()?;
        for segment in path.split('.').filter(|s| !s.is_empty()) {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn json_array(&self, path: &str) -> Option<&Vec<Value>> {
        self.json(path).and_then(Value::as_array)
    }
}

type Predicate = Arc<dyn Fn(&ResponseView) -> bool + Send + Sync>;

/// A named predicate over a response
#[derive(Clone)]
pub struct Check {
    name: String,
    predicate: Predicate,
}

impl Check {
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&ResponseView) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// `status is <code>`
    pub fn status(code: u16) -> Self {
        Self::status_named(format!("status is {}", code), code)
    }

    pub fn status_named(name: impl Into<String>, code: u16) -> Self {
        Self::new(name, move |r| r.status == Some(code))
    }

    /// The field at `path` is an array
    pub fn is_array(name: impl Into<String>, path: &'static str) -> Self {
        Self::new(name, move |r| r.json_array(path).is_some())
    }

    /// The field at `path` is an array with at least one element
    pub fn non_empty_array(name: impl Into<String>, path: &'static str) -> Self {
        Self::new(name, move |r| {
            r.json_array(path).is_some_and(|items| !items.is_empty())
        })
    }

    /// The field at `path` is an array of at most `max` elements.
    /// A missing or non-array field fails.
    pub fn max_len(name: impl Into<String>, path: &'static str, max: usize) -> Self {
        Self::new(name, move |r| {
            r.json_array(path).is_some_and(|items| items.len() <= max)
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn evaluate(&self, response: &ResponseView) -> CheckOutcome {
        CheckOutcome {
            name: self.name.clone(),
            passed: (self.predicate)(response),
        }
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check").field("name", &self.name).finish()
    }
}

/// Result of evaluating one check
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckOutcome {
    pub name: String,
    pub passed: bool,
}

/// Evaluate every check in order; all of them run regardless of failures
pub fn evaluate_all(checks: &[Check], response: &ResponseView) -> Vec<CheckOutcome> {
    checks.iter().map(|c| c.evaluate(response)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_check() {
        let check = Check::status(200);
        assert_eq!(check.name(), "status is 200");
        assert!(check.evaluate(&ResponseView::new(Some(200), None)).passed);
        assert!(!check.evaluate(&ResponseView::new(Some(500), None)).passed);
        assert!(!check.evaluate(&ResponseView::new(None, None)).passed);
    }

    #[test]
    fn test_json_path_lookup() {
        let view = ResponseView::new(
            Some(200),
            Some(json!({"wods": [{"blocks": [{"name": "row"}]}]})),
        );
        assert_eq!(view.json("wods.0.blocks.0.name"), Some(&json!("row")));
        assert!(view.json("wods.1").is_none());
        assert!(view.json("wods.x").is_none());
        assert!(view.json("missing").is_none());
    }

    #[test]
    fn test_from_raw_ignores_non_json() {
        let view = ResponseView::from_raw(Some(502), Some("<html>bad gateway</html>"));
        assert_eq!(view.status, Some(502));
        assert!(view.body.is_none());

        let view = ResponseView::from_raw(Some(200), Some("   "));
        assert!(view.body.is_none());

        let view = ResponseView::from_raw(Some(200), Some(r#"{"blocks":[]}"#));
        assert_eq!(view.json_array("blocks").map(Vec::len), Some(0));
    }

    #[test]
    fn test_array_checks() {
        let has_blocks = Check::non_empty_array("has blocks", "blocks");
        let empty = ResponseView::new(Some(200), Some(json!({"blocks": []})));
        let full = ResponseView::new(Some(200), Some(json!({"blocks": [{"name": "a"}]})));
        let wrong_type = ResponseView::new(Some(200), Some(json!({"blocks": "a"})));

        assert!(!has_blocks.evaluate(&empty).passed);
        assert!(has_blocks.evaluate(&full).passed);
        assert!(!has_blocks.evaluate(&wrong_type).passed);

        let is_array = Check::is_array("has blocks", "blocks");
        assert!(is_array.evaluate(&empty).passed);
        assert!(!is_array.evaluate(&wrong_type).passed);
    }

    #[test]
    fn test_max_len_check() {
        let five = Check::max_len("pagination respected", "wods", 5);
        let zero = Check::max_len("pagination respected", "wods", 0);
        let view = |n: usize| {
            ResponseView::new(Some(200), Some(json!({ "wods": vec![json!({}); n] })))
        };

        assert!(five.evaluate(&view(5)).passed);
        assert!(!five.evaluate(&view(6)).passed);
        assert!(zero.evaluate(&view(0)).passed);
        assert!(!zero.evaluate(&view(1)).passed);
        assert!(!five.evaluate(&ResponseView::new(Some(200), None)).passed);
    }

    #[test]
    fn test_evaluate_all_keeps_going_after_failure() {
        let checks = vec![
            Check::status(200),
            Check::non_empty_array("has blocks", "blocks"),
        ];
        let outcomes = evaluate_all(
            &checks,
            &ResponseView::new(Some(500), Some(json!({"blocks": [1]}))),
        );

        assert_eq!(
            outcomes,
            vec![
                CheckOutcome { name: "status is 200".to_string(), passed: false },
                CheckOutcome { name: "has blocks".to_string(), passed: true },
            ]
        );
    }
}
