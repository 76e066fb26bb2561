//! Server-side HTML for the estimate page.

use std::collections::HashMap;
use std::fmt::Write;

use hp_core::{Control, FieldSpec, FormCollector, Section};

/// Message shown under the form after a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
}

const STYLE: &str = r#"
body { font-family: 'Inter', sans-serif; background: #0F172A; color: #E2E8F0; margin: 40px; }
.main-header { font-size: 40px; font-weight: 600; color: #FFFFFF; margin-bottom: 5px; }
.sub-header { font-size: 16px; margin-bottom: 40px; }
.columns { display: grid; grid-template-columns: repeat(3, 1fr); gap: 48px; }
.section-header { color: #F8FAFC; font-weight: 500; padding-bottom: 10px; border-bottom: 1px solid #94A3B8; margin-bottom: 20px; }
label { display: block; margin: 14px 0 6px; }
input, select { width: 100%; }
hr { margin: 30px 0; border: none; border-top: 1px solid #E2E8F0; }
.actions { text-align: center; }
.notice { margin-top: 24px; padding: 14px; border-radius: 6px; }
.success { background: #14532D; }
.error { background: #7F1D1D; }
"#;

/// Render the full page.
///
/// `raw` holds the submitted values keyed by form key; fields missing from it
/// show their defaults.
pub fn page(collector: &FormCollector, raw: &HashMap<String, String>, notice: Option<&Notice>) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>House Price Estimator</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str("<div class=\"main-header\">House Price Estimator</div>\n");
    html.push_str(
        "<div class=\"sub-header\">Enter the property details below to generate an estimated market value.</div>\n",
    );
    html.push_str("<form method=\"post\" action=\"/\">\n<div class=\"columns\">\n");

    for section in Section::ALL {
        html.push_str("<div class=\"column\">\n");
        let _ = writeln!(html, "<div class=\"section-header\">{}</div>", escape(section.title()));
        for spec in collector.section(section) {
            let value = raw
                .get(spec.key())
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| spec.default_input());
            field(&mut html, spec, &value);
        }
        html.push_str("</div>\n");
    }

    html.push_str("</div>\n<hr>\n<div class=\"actions\">\n");
    html.push_str("<button type=\"submit\" name=\"action\" value=\"estimate\">Generate Estimate</button>\n");
    html.push_str("</div>\n</form>\n");

    match notice {
        Some(Notice::Success(msg)) => {
            let _ = writeln!(html, "<div class=\"notice success\">{}</div>", escape(msg));
        }
        Some(Notice::Error(msg)) => {
            let _ = writeln!(html, "<div class=\"notice error\">{}</div>", escape(msg));
        }
        None => {}
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn field(html: &mut String, spec: &FieldSpec, value: &str) {
    let key = spec.key();
    let _ = writeln!(html, "<label for=\"{}\">{}</label>", key, escape(spec.label));
    match spec.control {
        Control::Slider { min, max, step, .. } => {
            let _ = writeln!(
                html,
                "<input type=\"range\" id=\"{key}\" name=\"{key}\" min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{}\">",
                escape(value)
            );
        }
        Control::Number { min, max, step, .. } => {
            let max = max.map(|m| format!(" max=\"{}\"", m)).unwrap_or_default();
            let _ = writeln!(
                html,
                "<input type=\"number\" id=\"{key}\" name=\"{key}\" min=\"{min}\"{max} step=\"{step}\" value=\"{}\">",
                escape(value)
            );
        }
        Control::Select { encoding, .. } => {
            let _ = writeln!(html, "<select id=\"{key}\" name=\"{key}\">");
            for label in encoding.labels() {
                let selected = if label == value { " selected" } else { "" };
                let _ = writeln!(html, "<option{selected}>{}</option>", escape(label));
            }
            html.push_str("</select>\n");
        }
    }
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
