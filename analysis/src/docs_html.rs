//! Standalone HTML page for generated documentation.

use api_report_core::{ApiFormat, Documentation, EndpointDoc, ResponseClass};

use crate::html::{escape_html, method_badge};

const DOCS_CSS: &str = r#"
    :root { --primary: #2563eb; --text: #1f2937; --muted: #6b7280; --card: #f9fafb; --border: #e5e7eb; --code: #f1f5f9;
            --success: #16a34a; --success-light: #dcfce7; --warning: #ea580c; --warning-light: #ffedd5; --error: #dc2626; --error-light: #fee2e2; }
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: var(--text); }
    .container { max-width: 1200px; margin: 0 auto; padding: 2rem; }
    h1 { font-size: 2.5rem; margin-bottom: 1.5rem; }
    h2 { font-size: 2rem; margin: 2rem 0 1rem; padding-bottom: 0.5rem; border-bottom: 1px solid var(--border); }
    h3 { font-size: 1.4rem; }
    h4 { font-size: 1.15rem; margin-bottom: 0.75rem; }
    p { margin-bottom: 1rem; }
    .header { border-bottom: 1px solid var(--border); padding-bottom: 2rem; margin-bottom: 2rem; }
    .metadata { display: flex; flex-wrap: wrap; gap: 2rem; font-size: 0.9rem; color: var(--muted); }
    .metadata-label { font-weight: 500; margin-right: 0.5rem; }
    .badge { display: inline-block; padding: 0.25rem 0.5rem; border-radius: 0.25rem; font-size: 0.75rem; font-weight: 500; }
    .required { background: var(--error-light); color: var(--error); }
    .optional { background: var(--code); color: var(--muted); }
    code { font-family: Menlo, Monaco, Consolas, monospace; font-size: 0.9em; padding: 0.2em 0.4em; border-radius: 0.25rem; background: var(--code); }
    pre { background: var(--code); border-radius: 0.5rem; padding: 1rem; overflow: auto; margin-bottom: 1rem; }
    pre code { padding: 0; background: transparent; white-space: pre; }
    table { width: 100%; border-collapse: collapse; margin-bottom: 1.5rem; }
    th, td { padding: 0.75rem 1rem; text-align: left; border-bottom: 1px solid var(--border); }
    th { font-weight: 600; background: var(--card); }
    .endpoint { border: 1px solid var(--border); border-radius: 0.5rem; padding: 1.5rem; margin-bottom: 2rem; background: var(--card); }
    .endpoint-header { display: flex; align-items: center; gap: 1rem; margin-bottom: 1rem; }
    .method-badge { padding: 0.25rem 0.75rem; border-radius: 0.25rem; font-weight: 700; font-family: monospace; }
    .section { margin-top: 1.5rem; }
    .response { border-left: 4px solid var(--border); padding: 0.75rem 1rem; margin-bottom: 1rem; background: white; }
    .response-success { border-left-color: var(--success); }
    .response-client-error { border-left-color: var(--warning); }
    .response-server-error { border-left-color: var(--error); }
    .response-header { display: flex; gap: 1rem; align-items: center; margin-bottom: 0.5rem; }
    .status-code { font-weight: 700; font-family: monospace; }
    .content-type-badge { font-size: 0.75rem; color: var(--muted); }
    .footer { text-align: center; padding: 2rem 0; color: var(--muted); border-top: 1px solid var(--border); margin-top: 2rem; }
"#;

/// Renders documentation as a standalone HTML page.
///
/// `generated_on` is shown verbatim in the metadata block.
pub fn render_documentation(
    docs: &Documentation,
    source: ApiFormat,
    target: ApiFormat,
    generated_on: &str,
) -> String {
    let source_name = escape_html(source.display_name());
    let target_name = escape_html(target.display_name());
    let generated_on = escape_html(generated_on);

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("  <meta charset=\"UTF-8\">\n");
    out.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    out.push_str(&format!(
        "  <title>API Documentation - {source_name} to {target_name}</title>\n"
    ));
    out.push_str(&format!("  <style>{DOCS_CSS}  </style>\n"));
    out.push_str("</head>\n<body>\n  <div class=\"container\">\n");

    out.push_str("    <div class=\"header\">\n      <h1>API Documentation</h1>\n");
    out.push_str("      <div class=\"metadata\">\n");
    for (label, value) in [
        ("Source Format:", source_name.as_str()),
        ("Target Format:", target_name.as_str()),
        ("Generated on:", generated_on.as_str()),
    ] {
        out.push_str(&format!(
            "        <div class=\"metadata-item\"><span class=\"metadata-label\">{label}</span><span>{value}</span></div>\n"
        ));
    }
    out.push_str("      </div>\n    </div>\n");

    out.push_str("    <h2>Overview</h2>\n");
    out.push_str(&format!("    <p>{}</p>\n", escape_html(&docs.overview)));

    out.push_str("    <h2>Endpoints</h2>\n");
    for endpoint in &docs.endpoints {
        out.push_str(&endpoint_html(endpoint));
    }

    out.push_str(&format!(
        "    <div class=\"footer\"><p>Documentation generated by api-report | {generated_on}</p></div>\n"
    ));
    out.push_str("  </div>\n</body>\n</html>\n");
    out
}

fn endpoint_html(endpoint: &EndpointDoc) -> String {
    let mut out = String::new();
    out.push_str("    <div class=\"endpoint\">\n");
    out.push_str(&format!(
        "      <div class=\"endpoint-header\">{}<h3 class=\"endpoint-title\">{}</h3></div>\n",
        method_badge(&endpoint.method),
        escape_html(&endpoint.name)
    ));
    out.push_str(&format!(
        "      <p class=\"endpoint-description\">{}</p>\n",
        escape_html(&endpoint.description)
    ));
    out.push_str(&format!(
        "      <p class=\"endpoint-path\"><code>{} {}</code></p>\n",
        escape_html(&endpoint.method),
        escape_html(&endpoint.path)
    ));

    if !endpoint.parameters.is_empty() {
        out.push_str("      <div class=\"section\">\n        <h4>Parameters</h4>\n");
        out.push_str("        <table class=\"params-table\">\n          <thead><tr><th>Name</th><th>Type</th><th>Required</th><th>Description</th></tr></thead>\n          <tbody>\n");
        for param in &endpoint.parameters {
            let badge = if param.required {
                "<span class=\"badge required\">Required</span>"
            } else {
                "<span class=\"badge optional\">Optional</span>"
            };
            out.push_str(&format!(
                "            <tr><td><code>{}</code></td><td>{}</td><td>{badge}</td><td>{}</td></tr>\n",
                escape_html(&param.name),
                escape_html(&param.param_type),
                escape_html(param.description.as_deref().unwrap_or_default()),
            ));
        }
        out.push_str("          </tbody>\n        </table>\n      </div>\n");
    }

    if let Some(body) = &endpoint.request_body {
        out.push_str("      <div class=\"section\">\n        <h4>Request Body</h4>\n");
        if let Some(description) = &body.description {
            out.push_str(&format!("        <p>{}</p>\n", escape_html(description)));
        }
        if let Some(content_type) = &body.content_type {
            out.push_str(&format!(
                "        <p class=\"content-type\">Content-Type: <code>{}</code></p>\n",
                escape_html(content_type)
            ));
        }
        if let Some(schema) = &body.schema {
            out.push_str(&schema_block(schema));
        }
        out.push_str("      </div>\n");
    }

    if !endpoint.responses.is_empty() {
        out.push_str("      <div class=\"section\">\n        <h4>Responses</h4>\n        <div class=\"responses\">\n");
        for response in &endpoint.responses {
            let class = match response.class() {
                ResponseClass::Success => "response response-success",
                ResponseClass::ClientError => "response response-client-error",
                ResponseClass::ServerError => "response response-server-error",
                ResponseClass::Other => "response",
            };
            out.push_str(&format!("          <div class=\"{class}\">\n"));
            out.push_str(&format!(
                "            <div class=\"response-header\"><div class=\"status-code\">{}</div>",
                escape_html(&response.status_code)
            ));
            if let Some(content_type) = &response.content_type {
                out.push_str(&format!(
                    "<div class=\"content-type-badge\">{}</div>",
                    escape_html(content_type)
                ));
            }
            out.push_str("</div>\n");
            out.push_str(&format!(
                "            <p class=\"response-description\">{}</p>\n",
                escape_html(&response.description)
            ));
            if let Some(schema) = &response.schema {
                out.push_str(&schema_block(schema));
            }
            out.push_str("          </div>\n");
        }
        out.push_str("        </div>\n      </div>\n");
    }

    out.push_str("    </div>\n");
    out
}

fn schema_block(schema: &serde_json::Value) -> String {
    let pretty = serde_json::to_string_pretty(schema).unwrap_or_default();
    format!(
        "        <pre class=\"schema\"><code>{}</code></pre>\n",
        escape_html(&pretty)
    )
}
