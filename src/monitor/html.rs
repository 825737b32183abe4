use crate::monitor::report::{
    ActivityCell, ConnectionsCell, PoolList, PoolReport, ReportTable, RowValue, COLOR_ACTIVE,
    COLOR_AVAILABLE, COLOR_BACKGROUND,
};
use crate::monitor::view::MonitorView;
use std::fmt::Write;

const STYLE_CAPTION: &str = "text-align: right; color: #333333;";
const STYLE_DATA: &str = "background: white;";
const STYLE_NO_DATA: &str = "color: #666666;";

/// Render a resolved view to a complete HTML document.
///
/// `link` is the endpoint's own path; list rows and chart images point back
/// at it. The whole document is assembled in memory and returned in one
/// piece, so a caller never flushes a partial page.
pub fn render_view(view: &MonitorView, link: &str) -> String {
    let mut out = String::with_capacity(2048);
    out.push_str(
        "<html><head><title>Poolscope Monitor</title></head><body bgcolor=\"#eeeeee\">\n",
    );
    match view {
        MonitorView::List(list) => render_list(&mut out, list, link),
        MonitorView::Stats(report) => render_stats(&mut out, report, link),
    }
    out.push_str("</body></html>\n");
    out
}

fn render_stats(out: &mut String, report: &PoolReport, link: &str) {
    render_table(out, &report.definition, link);
    render_table(out, &report.snapshot, link);
    for table in &report.statistics {
        render_table(out, table, link);
    }
}

fn render_table(out: &mut String, table: &ReportTable, link: &str) {
    let _ = write!(
        out,
        "<b>{}</b> {}\n",
        escape(&table.heading),
        escape(&table.detail)
    );
    out.push_str(
        "<table width=\"550\" cellpadding=\"2\" cellspacing=\"2\" border=\"0\" \
         bgcolor=\"#EEEEEE\" style=\"border: 1px solid black\">\n  <tbody>\n",
    );
    for row in &table.rows {
        let _ = write!(
            out,
            "    <tr>\n      <td width=\"200\" valign=\"top\" style=\"{}\">{}</td>\n",
            STYLE_CAPTION,
            escape(&row.label)
        );
        match &row.value {
            RowValue::Off => {
                let _ = write!(out, "      <td style=\"{}\">off</td>\n", STYLE_NO_DATA);
            }
            RowValue::Text(text) => {
                let _ = write!(
                    out,
                    "      <td style=\"{}\">{}</td>\n",
                    STYLE_DATA,
                    escape(text)
                );
            }
            RowValue::Connections(cell) => {
                let _ = write!(out, "      <td style=\"{}\">", STYLE_DATA);
                render_connections(out, cell, link);
                out.push_str("</td>\n");
            }
            RowValue::Activity(cell) => {
                let _ = write!(out, "      <td style=\"{}\">", STYLE_DATA);
                render_activity(out, cell, link);
                out.push_str("</td>\n");
            }
        }
        out.push_str("    </tr>\n");
    }
    out.push_str("  </tbody>\n</table>\n<br/>\n");
}

fn render_connections(out: &mut String, cell: &ConnectionsCell, link: &str) {
    let _ = write!(
        out,
        "{} (<span style=\"color: #{};\">active</span>), \
         {} (<span style=\"color: #{};\">available</span>), ",
        cell.active, COLOR_ACTIVE, cell.available, COLOR_AVAILABLE
    );
    if cell.offline > 0 {
        let _ = write!(out, "{} (offline), ", cell.offline);
    }
    let _ = write!(
        out,
        "{} (<span style=\"color: #{};\">max</span>)<br/>",
        cell.maximum, COLOR_BACKGROUND
    );
    render_chart_image(out, &cell.chart.to_query(), link, "connections");
}

fn render_activity(out: &mut String, cell: &ActivityCell, link: &str) {
    let _ = write!(out, "{}%<br/>", cell.percent);
    render_chart_image(out, &cell.chart.to_query(), link, "activity");
}

fn render_chart_image(out: &mut String, query: &str, link: &str, alt: &str) {
    let _ = write!(
        out,
        "<img style=\"margin: 4px;\" src=\"{}?{}\" width=\"300\" height=\"5\" alt=\"{}\">",
        escape(link),
        query,
        alt
    );
}

fn render_list(out: &mut String, list: &PoolList, link: &str) {
    out.push_str("<b>Choose</b> a pool\n");
    out.push_str(
        "<table cellpadding=\"2\" cellspacing=\"2\" border=\"0\" bgcolor=\"#EEEEEE\" \
         style=\"border: 1px solid black\">\n  <tbody>\n",
    );
    for row in &list.rows {
        let style = if list.selected.as_deref() == Some(row.alias.as_str()) {
            " style=\"background: white;\""
        } else {
            ""
        };
        let _ = write!(
            out,
            "    <tr{}>\n      <td><a href=\"{}?alias={}\">{}</a></td>\n      <td>{}</td>\n    </tr>\n",
            style,
            escape(link),
            url_encode(&row.alias),
            escape(&row.alias),
            escape(&row.url)
        );
    }
    out.push_str("  </tbody>\n</table>\n<br/>\n");
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn url_encode(text: &str) -> String {
    url::form_urlencoded::byte_serialize(text.as_bytes()).collect()
}
