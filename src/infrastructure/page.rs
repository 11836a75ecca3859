// HTML page shell that hosts the dashboard figure
use crate::domain::figure::Figure;

pub const GRAPH_ID: &str = "sales-dashboard";

#[derive(Debug, Clone)]
pub struct PageShell {
    pub title: String,
    pub background: String,
    pub plotly_js: String,
}

impl PageShell {
    pub fn render(&self, figure: &Figure) -> serde_json::Result<String> {
        let figure_json = script_safe(&serde_json::to_string(figure)?);
        let title = escape_html(&self.title);
        let background = escape_html(&self.background);
        let plotly_js = escape_html(&self.plotly_js);

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{plotly_js}"></script>
</head>
<body style="margin: 0; background-color: {background};">
<div style="background-color: {background}; padding: 20px;">
<h1 style="text-align: center; color: white;">{title}</h1>
<div id="{GRAPH_ID}"></div>
</div>
<script>
const figure = {figure_json};
Plotly.newPlot("{GRAPH_ID}", figure.data, figure.layout, {{displayModeBar: false, staticPlot: true}});
</script>
</body>
</html>
"#
        ))
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

// A JSON literal must not close the surrounding <script> element.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}
