//! Human-readable audit report.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::manifest::AssetCategory;

use super::result::{AuditDetail, AuditError, AuditResult, IssueKind};

const RULE_WIDTH: usize = 50;

/// Per-category tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategorySummary {
    pub total: usize,
    pub issues: usize,
}

/// Aggregated view of one audit run.
#[derive(Debug, Clone)]
pub struct AuditReport {
    results: Vec<AuditResult>,
    summary: BTreeMap<AssetCategory, CategorySummary>,
}

impl AuditReport {
    pub fn new(results: Vec<AuditResult>) -> Self {
        let mut summary: BTreeMap<AssetCategory, CategorySummary> = AssetCategory::ALL
            .iter()
            .map(|c| (*c, CategorySummary::default()))
            .collect();
        for r in &results {
            let entry = summary.entry(r.category).or_default();
            entry.total += 1;
            if !r.is_ok() {
                entry.issues += 1;
            }
        }
        Self { results, summary }
    }

    pub fn results(&self) -> &[AuditResult] {
        &self.results
    }

    pub fn summary(&self, category: AssetCategory) -> CategorySummary {
        self.summary.get(&category).copied().unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.is_ok()).count()
    }

    pub fn issue_count(&self) -> usize {
        self.total() - self.passed()
    }

    /// Percentage of assets that passed; 0 for an empty run.
    pub fn success_rate(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        self.passed() as f64 / self.total() as f64 * 100.0
    }

    /// Failing URLs grouped by issue kind, kinds in first-seen order.
    pub fn issues_by_kind(&self) -> Vec<(IssueKind, Vec<&str>)> {
        let mut groups: Vec<(IssueKind, Vec<&str>)> = Vec::new();
        for r in &self.results {
            let Some(kind) = r.issue() else { continue };
            match groups.iter_mut().find(|(k, _)| *k == kind) {
                Some((_, urls)) => urls.push(&r.url),
                None => groups.push((kind, vec![r.url.as_str()])),
            }
        }
        groups
    }

    fn has_issue(&self, pred: impl Fn(IssueKind) -> bool) -> bool {
        self.results.iter().filter_map(AuditResult::issue).any(pred)
    }

    /// Remediation text keyed by the kinds of issue present.
    pub fn recommendations(&self) -> Vec<String> {
        let mut recs = Vec::new();
        if self.has_issue(|k| k == IssueKind::RedirectHtml) {
            recs.push(
                "Replace files with redirect HTML with actual content \
                 (they were likely captured from a protected environment)"
                    .to_string(),
            );
        }
        if self.has_issue(|k| k == IssueKind::Empty) {
            recs.push("Re-capture empty files or remove references to them".to_string());
        }
        if self.has_issue(|k| matches!(k, IssueKind::Http(_))) {
            recs.push("Check that missing files exist and are accessible".to_string());
        }
        if self.has_issue(|k| k == IssueKind::ConnectionError) {
            recs.push("Check that the server is running and reachable".to_string());
        }
        if recs.is_empty() {
            recs.push("All files are accessible! The website should work properly.".to_string());
        }
        recs
    }

    /// Full plain-text report.
    pub fn render(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut out = String::new();
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "SUMMARY REPORT");
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "Total files tested: {}", self.total());
        let _ = writeln!(out, "Files accessible: {}", self.passed());
        let _ = writeln!(out, "Files with issues: {}", self.issue_count());
        let _ = writeln!(out, "Success rate: {:.1}%", self.success_rate());

        let _ = writeln!(out, "\n--- BY CATEGORY ---");
        for (category, s) in &self.summary {
            if s.total == 0 {
                continue;
            }
            let _ = writeln!(
                out,
                "  {:<6} {}/{} issues",
                category.as_str().to_uppercase(),
                s.issues,
                s.total
            );
        }

        let groups = self.issues_by_kind();
        if !groups.is_empty() {
            let _ = writeln!(out, "\nIssues found:");
            for (kind, urls) in &groups {
                let _ = writeln!(out, "  - {}: {}", kind, urls.join(", "));
            }

            let _ = writeln!(out, "\n--- DETAILED ISSUES ---");
            for (i, r) in self.results.iter().filter(|r| !r.is_ok()).enumerate() {
                let _ = writeln!(
                    out,
                    "{}. {}: {}",
                    i + 1,
                    r.category.as_str().to_uppercase(),
                    r.url
                );
                if let Some(problem) = r.problem() {
                    let _ = writeln!(out, "   Issue: {}", problem);
                }
                if let AuditDetail::Redirect { preview } = &r.detail {
                    let _ = writeln!(out, "   Content: {}...", preview);
                }
            }
        }

        let _ = writeln!(out, "\nRecommendations:");
        for (i, rec) in self.recommendations().iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, rec);
        }
        let _ = writeln!(out, "{}", rule);
        out
    }
}

/// Progress line printed as each asset finishes.
pub fn result_line(r: &AuditResult) -> String {
    match &r.detail {
        AuditDetail::Ok { content_length, .. } => {
            format!("✅ {}: Accessible ({} bytes)", r.url, content_length)
        }
        AuditDetail::Redirect { .. } => format!(
            "⚠️  {}: Contains redirect HTML (not actual {})",
            r.url, r.category
        ),
        AuditDetail::Empty => format!("⚠️  {}: Empty content", r.url),
        AuditDetail::Error(AuditError::Http(code)) => format!("❌ {}: HTTP {}", r.url, code),
        AuditDetail::Error(AuditError::Network(msg)) => format!("❌ {}: Error - {}", r.url, msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(url: &str, category: AssetCategory, detail: AuditDetail) -> AuditResult {
        AuditResult {
            url: url.into(),
            category,
            detail,
        }
    }

    fn ok(url: &str, category: AssetCategory) -> AuditResult {
        r(
            url,
            category,
            AuditDetail::Ok {
                content_length: 10,
                content_type: None,
            },
        )
    }

    fn redirect(url: &str, category: AssetCategory) -> AuditResult {
        r(
            url,
            category,
            AuditDetail::Redirect {
                preview: "<!DOCTYPE html>".into(),
            },
        )
    }

    #[test]
    fn redirect_increments_category_issues() {
        let report = AuditReport::new(vec![
            redirect("css2(1)", AssetCategory::Css),
            ok("css2", AssetCategory::Css),
            ok("icon-192.png", AssetCategory::Image),
        ]);
        assert_eq!(report.summary(AssetCategory::Css), CategorySummary { total: 2, issues: 1 });
        assert_eq!(report.summary(AssetCategory::Image), CategorySummary { total: 1, issues: 0 });
        assert_eq!(report.summary(AssetCategory::Js), CategorySummary::default());
        assert_eq!(report.passed(), 2);
        assert_eq!(report.issue_count(), 1);
    }

    #[test]
    fn issues_grouped_in_first_seen_order() {
        let report = AuditReport::new(vec![
            r("a.svg", AssetCategory::Image, AuditDetail::Error(AuditError::Http(404))),
            redirect("css2(1)", AssetCategory::Css),
            r("b.svg", AssetCategory::Image, AuditDetail::Error(AuditError::Http(404))),
            redirect("js", AssetCategory::Js),
        ]);
        let groups = report.issues_by_kind();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, IssueKind::Http(404));
        assert_eq!(groups[0].1, ["a.svg", "b.svg"]);
        assert_eq!(groups[1].0, IssueKind::RedirectHtml);
        assert_eq!(groups[1].1, ["css2(1)", "js"]);
    }

    #[test]
    fn recommendations_follow_issue_kinds() {
        let report = AuditReport::new(vec![
            redirect("css2(1)", AssetCategory::Css),
            r(
                "js",
                AssetCategory::Js,
                AuditDetail::Error(AuditError::Network("refused".into())),
            ),
        ]);
        let recs = report.recommendations();
        assert_eq!(recs.len(), 2);
        assert!(recs[0].contains("redirect HTML"));
        assert!(recs[1].contains("server is running"));
    }

    #[test]
    fn clean_run_reports_all_clear() {
        let report = AuditReport::new(vec![ok("index.html", AssetCategory::Page)]);
        assert_eq!(report.success_rate(), 100.0);
        let text = report.render();
        assert!(text.contains("All files are accessible!"));
        assert!(!text.contains("Issues found:"));
    }

    #[test]
    fn empty_run_has_zero_rate() {
        let report = AuditReport::new(Vec::new());
        assert_eq!(report.success_rate(), 0.0);
        assert!(report.render().contains("Total files tested: 0"));
    }

    #[test]
    fn render_lists_counts_and_details() {
        let report = AuditReport::new(vec![
            redirect("css2(1)", AssetCategory::Css),
            ok("css2", AssetCategory::Css),
            r("js", AssetCategory::Js, AuditDetail::Empty),
        ]);
        let text = report.render();
        assert!(text.contains("Total files tested: 3"));
        assert!(text.contains("Files accessible: 1"));
        assert!(text.contains("Success rate: 33.3%"));
        assert!(text.contains("CSS    1/2 issues"));
        assert!(text.contains("  - redirect_html: css2(1)"));
        assert!(text.contains("  - empty: js"));
        assert!(text.contains("1. CSS: css2(1)"));
        assert!(text.contains("Content: <!DOCTYPE html>..."));
    }

    #[test]
    fn result_lines() {
        assert_eq!(
            result_line(&ok("icon-192.png", AssetCategory::Image)),
            "✅ icon-192.png: Accessible (10 bytes)"
        );
        assert_eq!(
            result_line(&redirect("css2(1)", AssetCategory::Css)),
            "⚠️  css2(1): Contains redirect HTML (not actual css)"
        );
        assert_eq!(
            result_line(&r("x", AssetCategory::Js, AuditDetail::Error(AuditError::Http(500)))),
            "❌ x: HTTP 500"
        );
    }
}
