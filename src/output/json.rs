//! JSON rendering of the final report.

use super::Report;

/// Serialize the report to pretty-printed JSON.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if serialization fails.
pub fn to_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Report;
    use crate::scanner::ProblemFile;
    use std::path::PathBuf;

    #[test]
    fn test_json_shape() {
        let report = Report::build(
            2,
            Vec::new(),
            vec![vec![PathBuf::from("a.svg"), PathBuf::from("b.svg")]],
            vec![ProblemFile::new(PathBuf::from("c.svg"), "Not a valid SVG file")],
        );

        let json = to_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["groups"][0]["kind"], "similar");
        assert_eq!(value["groups"][0]["files"][0], "a.svg");
        assert!(value["groups"][0].get("fingerprint").is_none());
        assert_eq!(value["problem_files"][0]["reason"], "Not a valid SVG file");
        assert_eq!(value["summary"]["total_files"], 2);
        assert_eq!(value["summary"]["group_count"], 1);
    }
}
