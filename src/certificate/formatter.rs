//! Renders certificate views as text, Markdown, HTML or JSON

use std::{collections::HashMap, fmt, str::FromStr};

use super::templates::{self, escape_html};
use super::view::CertificateView;
use crate::error::{Error, Result};

/// Output formats of a certificate report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CertificateFormat {
    #[default]
    PlainText,
    Markdown,
    Html,
    Json,
}

impl CertificateFormat {
    pub fn extension(self) -> &'static str {
        match self {
            CertificateFormat::PlainText => "txt",
            CertificateFormat::Markdown => "md",
            CertificateFormat::Html => "html",
            CertificateFormat::Json => "json",
        }
    }
}

impl fmt::Display for CertificateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CertificateFormat::PlainText => "text",
            CertificateFormat::Markdown => "markdown",
            CertificateFormat::Html => "html",
            CertificateFormat::Json => "json",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for CertificateFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" | "plain" => Ok(CertificateFormat::PlainText),
            "markdown" | "md" => Ok(CertificateFormat::Markdown),
            "html" => Ok(CertificateFormat::Html),
            "json" => Ok(CertificateFormat::Json),
            other => Err(Error::ValidationError(format!("Unknown report format: {}", other))),
        }
    }
}

pub struct CertificateFormatter;

impl CertificateFormatter {
    pub fn format(view: &CertificateView, format: CertificateFormat) -> Result<String> {
        match format {
            CertificateFormat::PlainText => Ok(Self::to_text(view)),
            CertificateFormat::Markdown => Ok(Self::to_markdown(view)),
            CertificateFormat::Html => Ok(Self::to_html(view)),
            CertificateFormat::Json => Self::to_json(view),
        }
    }

    pub fn to_text(view: &CertificateView) -> String {
        let mut output = String::new();
        output.push_str(&view.title);
        output.push('\n');
        output.push_str(&"=".repeat(view.title.len()));
        output.push('\n');

        if view.is_pending() {
            output.push_str(&view.statement);
            output.push('\n');
            return output;
        }

        output.push_str(&view.subtitle);
        output.push_str("\n\n");
        output.push_str(&view.statement);
        output.push_str("\n\n");

        let width = view.rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
        for row in &view.rows {
            output.push_str(&format!("{:<width$} : {}\n", row.label, row.value, width = width));
        }

        output.push('\n');
        output.push_str(&format!("{}\n{}\n\n", view.signature, view.signatory));
        output.push_str(&format!("{}: {}\n\n", view.verification_caption, view.verification_url));
        output.push_str(&format!("{}\n{}\n", view.footer, view.contact));
        output
    }

    pub fn to_markdown(view: &CertificateView) -> String {
        let mut md = format!("# {}\n\n", view.title);

        if view.is_pending() {
            md.push_str(&format!("_{}_\n", view.statement));
            return md;
        }

        md.push_str(&format!("## {}\n\n_{}_\n\n", view.subtitle, view.statement));
        md.push_str("| Field | Value |\n|---|---|\n");
        for row in &view.rows {
            let value = if row.monospace {
                format!("`{}`", row.value)
            } else {
                row.value.replace('|', "\\|")
            };
            md.push_str(&format!("| **{}** | {} |\n", row.label, value));
        }
        md.push_str(&format!(
            "\n**{}**, {}\n\n{}: <{}>\n\n---\n{}  \n{}\n",
            view.signature, view.signatory, view.verification_caption, view.verification_url, view.footer, view.contact
        ));
        md
    }

    pub fn to_html(view: &CertificateView) -> String {
        let mut values: HashMap<&str, String> = HashMap::new();
        values.insert("title", escape_html(&view.title));
        values.insert("statement", escape_html(&view.statement));

        if view.is_pending() {
            return templates::render(templates::HTML_PENDING, &values);
        }

        let rows: String = view
            .rows
            .iter()
            .map(|row| {
                let class = if row.monospace { " class=\"mono\"" } else { "" };
                format!("<tr><th>{}</th><td{}>{}</td></tr>\n", escape_html(row.label), class, escape_html(&row.value))
            })
            .collect();

        values.insert("subtitle", escape_html(&view.subtitle));
        values.insert("rows", rows);
        values.insert("signature", escape_html(&view.signature));
        values.insert("signatory", escape_html(&view.signatory));
        values.insert("verification_caption", escape_html(&view.verification_caption));
        values.insert("verification_url", escape_html(&view.verification_url));
        values.insert("footer", escape_html(&view.footer));
        values.insert("contact", escape_html(&view.contact));
        templates::render(templates::HTML_CERTIFICATE, &values)
    }

    /// The record itself, or a pending marker when none exists
    pub fn to_json(view: &CertificateView) -> Result<String> {
        match view.record() {
            Some(record) => Ok(serde_json::to_string_pretty(record)?),
            None => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "status": "pending",
                "message": view.title,
            }))?),
        }
    }
}
