//! `{{placeholder}}` templates for certificate reports

use std::collections::HashMap;

/// Replaces every `{{key}}` present in `values`; unknown placeholders are left as-is
///
/// Substitution is a single left-to-right pass, so substituted values are never
/// scanned for placeholders themselves.
pub fn render(template: &str, values: &HashMap<&str, String>) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            output.push_str(&rest[start..]);
            return output;
        };
        let key = &after_open[..end];
        match values.get(key) {
            Some(value) => output.push_str(value),
            None => output.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after_open[end + 2..];
    }
    output.push_str(rest);
    output
}

/// Minimal HTML escaping for text nodes and attribute values
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub const HTML_CERTIFICATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{title}}</title>
<style>
  body { background: #ffffff; font-family: sans-serif; }
  .outer { border: 8px solid #0d47a1; padding: 8px; max-width: 850px; margin: 0 auto; }
  .inner { border: 2px solid #c9a44c; padding: 40px; }
  h1 { color: #0d47a1; text-align: center; letter-spacing: 0.1em; }
  h2 { color: #4b5563; text-align: center; text-transform: uppercase; }
  table { width: 100%; border-collapse: collapse; }
  th, td { border: 1px solid #e5e7eb; padding: 10px 18px; text-align: left; }
  th { background: #f9fafb; text-transform: uppercase; font-size: 11px; width: 33%; }
  td.mono { font-family: monospace; font-size: 11px; word-break: break-all; color: #1e3a8a; }
  .footer { text-align: center; color: #9ca3af; font-size: 11px; margin-top: 32px; }
</style>
</head>
<body>
<div class="outer"><div class="inner">
<h1>{{title}}</h1>
<h2>{{subtitle}}</h2>
<p style="text-align:center;font-style:italic">{{statement}}</p>
<table>
{{rows}}
</table>
<p style="text-align:center"><em>{{signature}}</em><br><strong>{{signatory}}</strong></p>
<p style="text-align:center">{{verification_caption}}<br><a href="{{verification_url}}">{{verification_url}}</a></p>
<div class="footer">{{footer}}<br>{{contact}}</div>
</div></div>
</body>
</html>
"#;

pub const HTML_PENDING: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{{title}}</title></head>
<body>
<div style="border:2px dashed #d1d5db;padding:32px;text-align:center;color:#9ca3af">
<p style="font-size:20px;color:#4b5563">{{title}}</p>
<p>{{statement}}</p>
</div>
</body>
</html>
"#;
