//! HTML renderer
//!
//! Draws a [`Page`] as a single self-contained HTML document. The refresh
//! control is a form that posts to `/refresh`.

use chrono::{DateTime, Local};

use crate::dashboard::page::{Cell, CellKind, Heading, Page, Report, Table, Tone, LOADING_MESSAGE};

const STYLE: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; background: #f7fafc; color: #2d3748; margin: 0; }
.container { max-width: 1200px; margin: 0 auto; padding: 24px; }
.header h1 { margin: 0; }
.header p { color: #718096; margin-top: 4px; }
.card { background: #fff; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); padding: 20px; margin-bottom: 24px; }
table { width: 100%; border-collapse: collapse; }
th, td { padding: 8px 12px; border-bottom: 1px solid #e2e8f0; text-align: left; }
td.currency { text-align: right; font-variant-numeric: tabular-nums; }
td.center { text-align: center; }
td.label { font-weight: 600; }
.success { color: #2f855a; }
.warning { color: #c05621; }
.note { margin-top: 10px; color: #718096; font-size: 0.9rem; }
.stats-grid { display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px; }
.stat-label { color: #718096; font-size: 0.9rem; }
.stat-value { font-size: 1.6rem; font-weight: 700; }
.loading, .error { padding: 48px; text-align: center; font-size: 1.2rem; }
.error { color: #c53030; }
.footer { display: flex; align-items: center; gap: 16px; }
.refresh-btn { background: #3182ce; color: #fff; border: 0; border-radius: 6px; padding: 8px 16px; cursor: pointer; }
.last-updated { color: #718096; }
"#;

/// Render a page as an HTML document
pub fn render_html(page: &Page, heading: &Heading, rendered_at: DateTime<Local>) -> String {
    let (body, auto_reload) = match page {
        Page::Loading => (
            format!(r#"<div class="loading">{}</div>"#, LOADING_MESSAGE),
            true,
        ),
        Page::Error(message) => (
            format!(r#"<div class="error">Error: {}</div>"#, escape(message)),
            false,
        ),
        Page::Report(report) => (render_report(report, heading, rendered_at), false),
    };

    // While loading, poll until the refresh cycle has finished.
    let reload = if auto_reload {
        r#"<meta http-equiv="refresh" content="2">"#
    } else {
        ""
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n{reload}\n<title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<div class=\"container\">\n{body}\n</div>\n</body>\n</html>\n",
        title = escape(&heading.title),
    )
}

fn render_report(report: &Report, heading: &Heading, rendered_at: DateTime<Local>) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "<header class=\"header\"><h1>{}</h1><p>{}</p></header>\n<div class=\"dashboard\">\n",
        escape(&heading.title),
        escape(&heading.subtitle)
    ));

    for table in report.tables() {
        out.push_str(&render_table(table));
    }

    out.push_str("<section class=\"card stats\"><h2>Summary</h2><div class=\"stats-grid\">\n");
    for stat in &report.summary {
        out.push_str(&format!(
            "<div class=\"stat\"><div class=\"stat-label\">{}</div><div class=\"stat-value{}\">{}</div></div>\n",
            stat.label,
            tone_class(stat.tone),
            escape(&stat.value)
        ));
    }
    out.push_str("</div></section>\n</div>\n");

    out.push_str(&format!(
        "<footer class=\"footer\"><form method=\"post\" action=\"/refresh\"><button type=\"submit\" class=\"refresh-btn\">Refresh Data</button></form><span class=\"last-updated\">Last updated: {}</span></footer>\n",
        rendered_at.format("%-I:%M:%S %p")
    ));

    out
}

fn render_table(table: &Table) -> String {
    let mut out = format!(
        "<section class=\"card\"><h2>{}</h2><div class=\"table-container\"><table>\n<thead><tr>",
        table.title
    );

    for header in &table.headers {
        out.push_str(&format!("<th>{}</th>", header));
    }
    out.push_str("</tr></thead>\n<tbody>\n");

    for row in &table.rows {
        out.push_str("<tr class=\"data-row\">");
        for cell in row {
            out.push_str(&render_cell(cell));
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table></div>");
    if let Some(note) = table.note {
        out.push_str(&format!("<p class=\"note\">{}</p>", note));
    }
    out.push_str("</section>\n");

    out
}

fn render_cell(cell: &Cell) -> String {
    let kind = match cell.kind {
        CellKind::Label => "label",
        CellKind::Text => "text",
        CellKind::Currency => "currency",
        CellKind::Count => "center",
    };
    format!(
        "<td class=\"{}{}\">{}</td>",
        kind,
        tone_class(cell.tone),
        escape(&cell.text)
    )
}

fn tone_class(tone: Tone) -> &'static str {
    match tone {
        Tone::Normal => "",
        Tone::Success => " success",
        Tone::Warning => " warning",
    }
}

/// Escape text for use in HTML content and attribute values
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::view::tests::{product, sale, west};
    use crate::dashboard::view::ViewState;

    fn ready_state() -> ViewState {
        ViewState {
            regions: vec![west()],
            products: vec![product("Cloud"), product("Edge")],
            last_month: vec![sale("Cloud", "West"), sale("Edge", "East"), sale("Edge", "West")],
            loading: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>R&D</b>"), "&lt;b&gt;R&amp;D&lt;/b&gt;");
        assert_eq!(escape(r#"say "hi""#), "say &quot;hi&quot;");
    }

    #[test]
    fn test_loading_page_has_no_tables() {
        let html = render_html(&Page::Loading, &Heading::default(), Local::now());
        assert!(html.contains(LOADING_MESSAGE));
        assert!(html.contains("http-equiv=\"refresh\""));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_error_page_has_no_tables() {
        let page = Page::Error("Request to /sales/last-month timed out".to_string());
        let html = render_html(&page, &Heading::default(), Local::now());
        assert!(html.contains("Error: Request to /sales/last-month timed out"));
        assert!(!html.contains("<table>"));
        assert!(!html.contains("Refresh Data"));
    }

    #[test]
    fn test_report_rows_and_footer() {
        let html = render_html(
            &Page::build(&ready_state()),
            &Heading::default(),
            Local::now(),
        );

        assert_eq!(html.matches("<table>").count(), 3);
        assert_eq!(html.matches("<tr class=\"data-row\">").count(), 6);
        assert!(html.contains("<td class=\"currency success\">$60,000</td>"));
        assert!(html.contains("<td class=\"currency warning\">$40,000</td>"));
        assert!(html.contains("action=\"/refresh\""));
        assert!(html.contains("Pipeline Analytics &amp; Insights"));

        let summary = html.find("<h2>Summary</h2>").unwrap();
        let footer = html.find("<footer").unwrap();
        let last_month = html.find("Last Month Sales (LIVE)").unwrap();
        assert!(last_month < summary && summary < footer);
    }

    #[test]
    fn test_row_text_is_escaped() {
        let mut state = ready_state();
        state.regions[0].region = "<script>".to_string();
        let html = render_html(&Page::build(&state), &Heading::default(), Local::now());
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
