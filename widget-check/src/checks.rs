//! Static checks over the widget HTML.
//!
//! These are text-level probes, not a JS parser: each check looks for the
//! literal snippet or pattern the widget needs to call the chat endpoint and
//! render its answer.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

const DEFAULT_ENDPOINT: &str = "https://qn4fgxzu09.execute-api.us-east-1.amazonaws.com/chat";
const DEFAULT_MESSAGE_CLASS: &str = "miso-message";

/// What the widget is expected to send and read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedApi {
    pub endpoint_url: String,
    pub method: String,
    pub content_type: String,
    pub request_body_format: String,
    pub response_format: String,
    /// CSS class of the chat bubble the answer is rendered into
    pub message_class: String,
}

impl Default for ExpectedApi {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT.to_string(),
            method: "POST".to_string(),
            content_type: "application/json".to_string(),
            request_body_format: "json".to_string(),
            response_format: "json".to_string(),
            message_class: DEFAULT_MESSAGE_CLASS.to_string(),
        }
    }
}

impl ExpectedApi {
    /// Defaults, overridden by `WIDGET_API_ENDPOINT` and `WIDGET_MESSAGE_CLASS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            endpoint_url: std::env::var("WIDGET_API_ENDPOINT").unwrap_or(defaults.endpoint_url),
            message_class: std::env::var("WIDGET_MESSAGE_CLASS")
                .unwrap_or(defaults.message_class),
            ..Self::default()
        }
    }
}

/// API usage scraped from the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiDetails {
    pub endpoint_url: Option<String>,
    pub method: Option<String>,
    pub content_type: Option<String>,
    pub request_body_format: Option<String>,
    /// Inside of the object literal passed to `JSON.stringify`
    pub request_structure: Option<String>,
    pub response_format: Option<String>,
    pub error_handling: bool,
    pub timeout_handling: bool,
}

fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static pattern compiles"))
}

fn fetch_url() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r#"fetch\s*\(\s*["']([^"']+)["']"#)
}

fn method() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r#"method:\s*["']([^"']+)["']"#)
}

fn content_type() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r#"["']Content-Type["']:\s*["']([^"']+)["']"#)
}

fn stringify_structure() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"JSON\.stringify\s*\(\s*\{([^}]+)\}\s*\)")
}

fn stringify_query() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"JSON\.stringify\s*\(\s*\{\s*query\s*\}")
}

fn query_input_value() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(
        &RE,
        r#"document\.getElementById\s*\(\s*["']queryInput["']\s*\)\.value"#,
    )
}

fn first_group(re: &Regex, html: &str) -> Option<String> {
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn has_error_handling(html: &str) -> bool {
    html.contains("catch") && html.contains("err")
}

/// Scrape endpoint, method, headers and body handling from the page.
pub fn extract_api_details(html: &str) -> ApiDetails {
    let stringifies = html.contains("JSON.stringify");

    ApiDetails {
        endpoint_url: first_group(fetch_url(), html),
        method: first_group(method(), html).map(|m| m.to_uppercase()),
        content_type: first_group(content_type(), html),
        request_body_format: stringifies.then(|| "json".to_string()),
        request_structure: if stringifies {
            first_group(stringify_structure(), html).map(|s| s.trim().to_string())
        } else {
            None
        },
        response_format: html.contains(".json()").then(|| "json".to_string()),
        error_handling: has_error_handling(html),
        timeout_handling: html.to_lowercase().contains("timeout"),
    }
}

/// Expected versus scraped value for a failed comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub expected: String,
    pub actual: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub label: &'static str,
    pub passed: bool,
    pub mismatch: Option<Mismatch>,
}

impl Check {
    fn flag(label: &'static str, passed: bool) -> Self {
        Self {
            label,
            passed,
            mismatch: None,
        }
    }

    fn equals(label: &'static str, expected: &str, actual: Option<&String>) -> Self {
        let passed = actual.is_some_and(|value| value == expected);
        Self {
            label,
            passed,
            mismatch: (!passed).then(|| Mismatch {
                expected: expected.to_string(),
                actual: actual.cloned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub icon: &'static str,
    pub checks: Vec<Check>,
}

impl Section {
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|check| check.passed)
    }

    pub fn failed(&self) -> Vec<&'static str> {
        self.checks
            .iter()
            .filter(|check| !check.passed)
            .map(|check| check.label)
            .collect()
    }
}

/// Endpoint, method, headers and formats match the deployed API.
pub fn endpoint_compatibility(html: &str, expected: &ExpectedApi) -> Section {
    let details = extract_api_details(html);

    let format_matches =
        |actual: &Option<String>, wanted: &str| actual.as_deref() == Some(wanted);

    Section {
        title: "API Endpoint Compatibility",
        icon: "📡",
        checks: vec![
            Check::equals(
                "Endpoint Url Correct",
                &expected.endpoint_url,
                details.endpoint_url.as_ref(),
            ),
            Check::equals("Method Correct", &expected.method, details.method.as_ref()),
            Check::equals(
                "Content Type Correct",
                &expected.content_type,
                details.content_type.as_ref(),
            ),
            Check::flag(
                "Request Format Correct",
                format_matches(&details.request_body_format, &expected.request_body_format),
            ),
            Check::flag(
                "Response Format Correct",
                format_matches(&details.response_format, &expected.response_format),
            ),
            Check::flag("Error Handling Present", details.error_handling),
        ],
    }
}

/// The request carries the trimmed, non-empty query from the input box.
pub fn request_format(html: &str) -> Section {
    let empty_query_guard = ["if (!query)", "if (query === \"\")", "if (!query.trim())"]
        .iter()
        .any(|guard| html.contains(guard));

    Section {
        title: "Request Format",
        icon: "📤",
        checks: vec![
            Check::flag(
                "Query Parameter Present",
                html.contains("query") && html.contains("JSON.stringify"),
            ),
            Check::flag("Query Variable Used", stringify_query().is_match(html)),
            Check::flag("Input Value Captured", query_input_value().is_match(html)),
            Check::flag("Input Trimmed", html.contains(".trim()")),
            Check::flag("Empty Query Validation", empty_query_guard),
        ],
    }
}

/// The response is parsed, checked and rendered into the chat.
pub fn response_handling(html: &str, expected: &ExpectedApi) -> Section {
    Section {
        title: "Response Handling",
        icon: "📥",
        checks: vec![
            Check::flag("Json Parsing", html.contains(".json()")),
            Check::flag("Success Response Handling", html.contains("data.answer")),
            Check::flag(
                "Error Response Handling",
                html.contains("data.error") || html.contains("res.status"),
            ),
            Check::flag("Network Error Handling", has_error_handling(html)),
            Check::flag(
                "Response Status Check",
                html.contains("res.ok") || html.contains("res.status"),
            ),
            Check::flag(
                "Response Display",
                html.contains(expected.message_class.as_str()) && html.contains("appendChild"),
            ),
        ],
    }
}

/// Every section run against one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub details: ApiDetails,
    pub sections: Vec<Section>,
}

impl Report {
    pub fn run(html: &str, expected: &ExpectedApi) -> Self {
        Self {
            details: extract_api_details(html),
            sections: vec![
                endpoint_compatibility(html, expected),
                request_format(html),
                response_handling(html, expected),
            ],
        }
    }

    pub fn all_passed(&self) -> bool {
        self.sections.iter().all(Section::all_passed)
    }
}

fn mark(passed: bool) -> &'static str {
    if passed {
        "✅"
    } else {
        "❌"
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🧪 Checking chat widget API integration")?;
        writeln!(f, "{}", "=".repeat(50))?;

        let details = &self.details;
        let shown = |value: &Option<String>| value.clone().unwrap_or_else(|| "none".to_string());
        writeln!(f, "   Endpoint: {}", shown(&details.endpoint_url))?;
        writeln!(f, "   Method: {}", shown(&details.method))?;
        writeln!(f, "   Request body: {}", shown(&details.request_structure))?;
        writeln!(f, "   Timeout handling: {}", mark(details.timeout_handling))?;

        for (index, section) in self.sections.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "{} {}. {}", section.icon, index + 1, section.title)?;
            for check in &section.checks {
                writeln!(f, "   {} {}", mark(check.passed), check.label)?;
                if let Some(mismatch) = &check.mismatch {
                    writeln!(f, "      Expected: {}", mismatch.expected)?;
                    writeln!(
                        f,
                        "      Actual: {}",
                        mismatch.actual.as_deref().unwrap_or("none")
                    )?;
                }
            }
        }

        writeln!(f)?;
        writeln!(f, "📊 Summary:")?;
        for section in &self.sections {
            let status = if section.all_passed() {
                "✅ PASSED"
            } else {
                "❌ FAILED"
            };
            writeln!(f, "   {}: {}", section.title, status)?;
        }

        writeln!(f)?;
        if self.all_passed() {
            writeln!(f, "🎉 All API integration checks passed")
        } else {
            writeln!(f, "❌ Some API integration checks failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDGET: &str = r#"<!DOCTYPE html>
<html>
<body>
  <div id="chat"></div>
  <input id="queryInput" type="text" />
  <script>
    async function sendQuery() {
      const query = document.getElementById("queryInput").value.trim();
      if (!query) return;
      try {
        const res = await fetch("https://qn4fgxzu09.execute-api.us-east-1.amazonaws.com/chat", {
          method: "post",
          headers: { "Content-Type": "application/json" },
          body: JSON.stringify({ query })
        });
        const data = await res.json();
        const bubble = document.createElement("div");
        bubble.className = "miso-message";
        bubble.textContent = res.ok ? data.answer : data.error;
        document.getElementById("chat").appendChild(bubble);
      } catch (err) {
        console.error(err);
      }
    }
  </script>
</body>
</html>"#;

    #[test]
    fn test_extracts_api_details() {
        let details = extract_api_details(WIDGET);

        assert_eq!(
            details.endpoint_url.as_deref(),
            Some("https://qn4fgxzu09.execute-api.us-east-1.amazonaws.com/chat")
        );
        assert_eq!(details.method.as_deref(), Some("POST"));
        assert_eq!(details.content_type.as_deref(), Some("application/json"));
        assert_eq!(details.request_body_format.as_deref(), Some("json"));
        assert_eq!(details.request_structure.as_deref(), Some("query"));
        assert_eq!(details.response_format.as_deref(), Some("json"));
        assert!(details.error_handling);
        assert!(!details.timeout_handling);
    }

    #[test]
    fn test_conforming_widget_passes() {
        let report = Report::run(WIDGET, &ExpectedApi::default());
        for section in &report.sections {
            assert!(section.failed().is_empty(), "{}: {:?}", section.title, section.failed());
        }
        assert!(report.all_passed());
        assert!(report.to_string().contains("🎉 All API integration checks passed"));
    }

    #[test]
    fn test_wrong_endpoint_reports_mismatch() {
        let html = WIDGET.replace("/chat\"", "/v2/chat\"").replace("method: \"post\"", "method: 'GET'");
        let section = endpoint_compatibility(&html, &ExpectedApi::default());

        assert_eq!(section.failed(), vec!["Endpoint Url Correct", "Method Correct"]);

        let method = &section.checks[1];
        assert_eq!(
            method.mismatch,
            Some(Mismatch {
                expected: "POST".to_string(),
                actual: Some("GET".to_string()),
            })
        );

        let rendered = Report::run(&html, &ExpectedApi::default()).to_string();
        assert!(rendered.contains("      Expected: POST\n      Actual: GET"));
        assert!(rendered.contains("API Endpoint Compatibility: ❌ FAILED"));
    }

    #[test]
    fn test_request_without_trim_or_guard() {
        let html = WIDGET
            .replace(".value.trim()", ".value")
            .replace("if (!query) return;", "");
        let section = request_format(&html);

        assert_eq!(section.failed(), vec!["Input Trimmed", "Empty Query Validation"]);
    }

    #[test]
    fn test_plain_page_fails_everything_it_should() {
        let report = Report::run("<html><body>Hello</body></html>", &ExpectedApi::default());

        assert!(!report.all_passed());
        let missing_url = &report.sections[0].checks[0];
        assert_eq!(missing_url.mismatch.as_ref().unwrap().actual, None);
        assert!(report.to_string().contains("      Actual: none"));
        assert_eq!(report.sections[2].failed().len(), 6);
    }

    #[test]
    fn test_custom_message_class() {
        let expected = ExpectedApi {
            message_class: "chat-bubble".to_string(),
            ..ExpectedApi::default()
        };
        let section = response_handling(WIDGET, &expected);
        assert_eq!(section.failed(), vec!["Response Display"]);
    }

    #[test]
    fn test_timeout_detection_is_case_insensitive() {
        let details = extract_api_details("const controller = setTimeOut(abort, 5000);");
        assert!(details.timeout_handling);
    }
}
