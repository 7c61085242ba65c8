use crate::page::{Content, Element, Page};

/// HTML for the region's injected content, or its escaped text when it has none.
pub fn render_inner(element: &Element) -> String {
    match &element.content {
        Some(content) => render_content(content),
        None => escape(&element.text),
    }
}

pub fn render_content(content: &Content) -> String {
    match content {
        Content::Loading => {
            r#"<p style="text-align: center; color: #666;">Loading chart...</p>"#.to_owned()
        }
        Content::GpaResult {
            name,
            gpa,
            score_count,
        } => GPA_RESULT_HTML
            .replace("{{NAME}}", &escape(name))
            .replace("{{GPA}}", &escape(gpa))
            .replace("{{COUNT}}", &score_count.to_string()),
        Content::Chart { name, chart, rows } => {
            let items: String = rows
                .iter()
                .map(|row| format!("<li>{}</li>", escape(&row.to_string())))
                .collect();
            CHART_HTML
                .replace("{{CHART}}", &escape(chart))
                .replace("{{NAME}}", &escape(name))
                .replace("{{ITEMS}}", &items)
        }
        Content::Error(message) => {
            format!(r#"<p style="color: #721c24;">{}</p>"#, escape(message))
        }
    }
}

/// Snapshot of the whole page with every element's current state filled in.
pub fn render_page(page: &Page) -> String {
    let mut html = INDEX_HTML.to_owned();
    for (id, element) in page.elements() {
        let classes: Vec<&str> = element.classes.iter().map(String::as_str).collect();
        html = html
            .replace(&format!("{{{{class:{id}}}}}"), &classes.join(" "))
            .replace(&format!("{{{{value:{id}}}}}"), &escape(&element.value))
            .replace(&format!("{{{{inner:{id}}}}}"), &render_inner(element));
    }
    html
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
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

const GPA_RESULT_HTML: &str = r#"
<h3>GPA Calculation Result</h3>
<p><strong>Student:</strong> {{NAME}}</p>
<div class="gpa-value">{{GPA}}</div>
<p><strong>Total Scores Recorded:</strong> {{COUNT}}</p>
"#;

const CHART_HTML: &str = r#"
<img src="{{CHART}}" alt="Grade Chart">
<div class="chart-info">
  <p><strong>Grade Summary for {{NAME}}</strong></p>
  <ul style="list-style-position: inside; text-align: left;">{{ITEMS}}</ul>
</div>
"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Student Grade Tracker</title>
  <style>
    :root {
      --primary: #667eea;
      --secondary: #764ba2;
      --ink: #2b2a28;
      --card: rgba(255, 255, 255, 0.9);
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--primary), var(--secondary));
      color: var(--ink);
      font-family: "Segoe UI", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      border-radius: 24px;
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    .tabs {
      display: flex;
      gap: 6px;
    }

    .tab-btn {
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font-weight: 600;
      background: transparent;
    }

    .tab-btn.active {
      background: var(--primary);
      color: white;
    }

    .tab-content,
    .result-box,
    .chart-container {
      display: none;
    }

    .tab-content.active,
    .result-box.show,
    .chart-container.show {
      display: block;
    }

    .message.success {
      color: #155724;
      background: #d4edda;
    }

    .message.error {
      color: #721c24;
      background: #f8d7da;
    }

    .gpa-value {
      font-size: 2.4rem;
      font-weight: 700;
      color: var(--primary);
    }

    .chart-container img {
      max-width: 100%;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Student Grade Tracker</h1>
    </header>

    <nav class="tabs">
      <button id="btn-save" class="{{class:btn-save}}" type="button">Save Record</button>
      <button id="btn-gpa" class="{{class:btn-gpa}}" type="button">Calculate GPA</button>
      <button id="btn-chart" class="{{class:btn-chart}}" type="button">View Chart</button>
    </nav>

    <section id="save" class="{{class:save}}">
      <input id="save-name" placeholder="Student name" value="{{value:save-name}}" />
      <input id="save-course" placeholder="Course" value="{{value:save-course}}" />
      <input id="save-score" placeholder="Score (0-100)" value="{{value:save-score}}" />
      <button type="button">Save</button>
      <div id="save-message" class="{{class:save-message}}">{{inner:save-message}}</div>
    </section>

    <section id="gpa" class="{{class:gpa}}">
      <input id="gpa-name" placeholder="Student name" value="{{value:gpa-name}}" />
      <button type="button">Calculate</button>
      <div id="gpa-message" class="{{class:gpa-message}}">{{inner:gpa-message}}</div>
      <div id="gpa-result" class="{{class:gpa-result}}">{{inner:gpa-result}}</div>
    </section>

    <section id="chart" class="{{class:chart}}">
      <input id="chart-name" placeholder="Student name" value="{{value:chart-name}}" />
      <button type="button">Show Chart</button>
      <div id="chart-message" class="{{class:chart-message}}">{{inner:chart-message}}</div>
      <div id="chart-container" class="{{class:chart-container}}">{{inner:chart-container}}</div>
    </section>
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CourseScore;
    use crate::page::ids;

    #[test]
    fn chart_markup_lists_rows_in_order() {
        let html = render_content(&Content::Chart {
            name: "Alice".to_owned(),
            chart: "data:image/png;base64,AAAA".to_owned(),
            rows: vec![
                CourseScore {
                    course: "Math".to_owned(),
                    score: "90".to_owned(),
                },
                CourseScore {
                    course: "Art".to_owned(),
                    score: "80".to_owned(),
                },
            ],
        });
        assert!(html.contains(r#"<img src="data:image/png;base64,AAAA""#));
        assert!(html.contains("<li>Math: 90/100</li><li>Art: 80/100</li>"));
    }

    #[test]
    fn user_text_is_escaped() {
        let html = render_content(&Content::GpaResult {
            name: "<script>alert(1)</script>".to_owned(),
            gpa: "3.5".to_owned(),
            score_count: 2,
        });
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn page_snapshot_reflects_state() {
        let mut page = Page::grade_tracker();
        page.switch_tab(ids::GPA_PANEL, "btn-gpa").unwrap();
        page.set_value(ids::GPA_NAME, "Ann \"A\"").unwrap();
        page.show_message(ids::GPA_MESSAGE, "No scores", "error").unwrap();

        let html = render_page(&page);
        assert!(html.contains(r#"<section id="gpa" class="active tab-content">"#));
        assert!(html.contains(r#"<section id="save" class="tab-content">"#));
        assert!(html.contains(r#"value="Ann &quot;A&quot;""#));
        assert!(html.contains(r#"<div id="gpa-message" class="error message">No scores</div>"#));
        assert!(!html.contains("{{"));
    }
}
