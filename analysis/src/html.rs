//! Self-contained HTML rendering of conversion reports.
//!
//! Output is a pure function of its inputs: the generation time comes from
//! the report's own timestamp, so equal reports render byte-identical pages.

use api_report_core::{ApiFormat, ConversionReport, ConversionStatus, HttpMethod};

/// Title used when the caller does not supply one.
pub const DEFAULT_TITLE: &str = "API Conversion Report";

/// Escapes text for use in HTML element content and attribute values.
///
/// # Examples
///
/// ```
/// use api_report_analysis::html::escape_html;
///
/// assert_eq!(escape_html("<a href=\"x\">Tom & 'Jerry'</a>"),
///            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Foreground and background colors of a method badge.
pub fn method_colors(method: &str) -> (&'static str, &'static str) {
    match HttpMethod::parse(method) {
        HttpMethod::Get => ("#1e88e5", "#e3f2fd"),
        HttpMethod::Post => ("#43a047", "#e8f5e9"),
        HttpMethod::Put => ("#fb8c00", "#fff3e0"),
        HttpMethod::Delete => ("#e53935", "#ffebee"),
        HttpMethod::Patch => ("#8e24aa", "#f3e5f5"),
        _ => ("#757575", "#f5f5f5"),
    }
}

/// Inline badge markup for an HTTP method.
pub(crate) fn method_badge(method: &str) -> String {
    let (fg, bg) = method_colors(method);
    format!(
        "<span class=\"method-badge\" style=\"background-color: {bg}; color: {fg}; border: 1px solid {fg};\">{}</span>",
        escape_html(method)
    )
}

const REPORT_CSS: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; background: #f8f9fa; padding: 20px; }
        .container { max-width: 1200px; margin: 0 auto; background: white; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; border-radius: 8px 8px 0 0; }
        .header h1 { font-size: 2.2em; margin-bottom: 10px; }
        .header .meta { opacity: 0.9; font-size: 1.05em; }
        .summary { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; padding: 30px; border-bottom: 1px solid #eee; }
        .summary-card { text-align: center; padding: 20px; border-radius: 8px; border: 1px solid #eee; }
        .summary-card h3 { font-size: 2.5em; margin-bottom: 5px; }
        .summary-card p { color: #666; font-weight: 500; }
        .total { color: #3b82f6; }
        .success { color: #22c55e; }
        .failed { color: #ef4444; }
        .rate { padding: 30px; border-bottom: 1px solid #eee; }
        .rate-label { display: flex; justify-content: space-between; margin-bottom: 8px; }
        .progress-bar { width: 100%; height: 20px; background: #e5e7eb; border-radius: 10px; overflow: hidden; }
        .progress-fill { height: 100%; background: linear-gradient(90deg, #22c55e, #16a34a); }
        .results { padding: 30px; }
        .results h2 { margin-bottom: 20px; color: #374151; }
        table { width: 100%; border-collapse: collapse; }
        th, td { padding: 10px 14px; text-align: left; border-bottom: 1px solid #e5e7eb; }
        th { background: #f8f9fa; color: #374151; }
        .status-badge { padding: 4px 12px; border-radius: 20px; font-size: 0.85em; font-weight: 600; }
        .status-success { background: #dcfce7; color: #166534; }
        .status-failed { background: #fef2f2; color: #991b1b; }
        .method-badge { padding: 2px 8px; border-radius: 4px; font-size: 0.8em; font-weight: 700; font-family: monospace; }
        .path { font-family: 'Monaco', 'Menlo', monospace; font-size: 0.9em; }
        .error { color: #991b1b; }
        .footer { text-align: center; padding: 20px; color: #6b7280; border-top: 1px solid #e5e7eb; }
        @media print { body { background: white; padding: 0; } .container { box-shadow: none; } }
"#;

/// Renders a conversion report as a standalone HTML page.
///
/// The success rate is `round(successful / total * 100)` and `0` for an
/// empty report.
pub fn render_conversion_report(
    report: &ConversionReport,
    source: ApiFormat,
    target: ApiFormat,
    title: &str,
) -> String {
    let title = escape_html(title);
    let timestamp = escape_html(&report.timestamp);
    let rate = report.success_percent();

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("    <meta charset=\"UTF-8\">\n");
    out.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    out.push_str(&format!("    <title>{title}</title>\n"));
    out.push_str(&format!("    <style>{REPORT_CSS}    </style>\n"));
    out.push_str("</head>\n<body>\n    <div class=\"container\">\n");

    out.push_str("        <div class=\"header\">\n");
    out.push_str(&format!("            <h1>{title}</h1>\n"));
    out.push_str(&format!(
        "            <div class=\"meta\">{} &rarr; {} | Generated on {timestamp}</div>\n",
        escape_html(source.display_name()),
        escape_html(target.display_name()),
    ));
    out.push_str("        </div>\n");

    out.push_str("        <div class=\"summary\">\n");
    for (class, value, label) in [
        ("total", report.total, "Total Endpoints"),
        ("success", report.successful, "Successful"),
        ("failed", report.failed, "Failed"),
    ] {
        out.push_str(&format!(
            "            <div class=\"summary-card\"><h3 class=\"{class}\">{value}</h3><p>{label}</p></div>\n"
        ));
    }
    out.push_str("        </div>\n");

    out.push_str("        <div class=\"rate\">\n");
    out.push_str(&format!(
        "            <div class=\"rate-label\"><span>Success Rate</span><strong>{rate}%</strong></div>\n"
    ));
    out.push_str(&format!(
        "            <div class=\"progress-bar\"><div class=\"progress-fill\" style=\"width: {rate}%\"></div></div>\n"
    ));
    out.push_str("        </div>\n");

    out.push_str("        <div class=\"results\">\n            <h2>Endpoint Results</h2>\n");
    out.push_str("            <table>\n                <thead><tr><th>Status</th><th>Name</th><th>Method</th><th>Path</th><th>Details</th></tr></thead>\n                <tbody>\n");
    for endpoint in &report.endpoints {
        let (status_class, status_label) = match endpoint.status {
            ConversionStatus::Success => ("status-success", "SUCCESS"),
            ConversionStatus::Failed => ("status-failed", "FAILED"),
        };
        let details = match &endpoint.error_message {
            Some(message) => format!("<span class=\"error\">{}</span>", escape_html(message)),
            None => "-".to_string(),
        };
        out.push_str(&format!(
            "                    <tr><td><span class=\"status-badge {status_class}\">{status_label}</span></td><td>{}</td><td>{}</td><td class=\"path\">{}</td><td>{details}</td></tr>\n",
            escape_html(&endpoint.name),
            method_badge(&endpoint.method),
            escape_html(&endpoint.path),
        ));
    }
    out.push_str("                </tbody>\n            </table>\n        </div>\n");

    out.push_str(&format!(
        "        <div class=\"footer\"><p>Report generated by api-report | {timestamp}</p></div>\n"
    ));
    out.push_str("    </div>\n</body>\n</html>\n");
    out
}
