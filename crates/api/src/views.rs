//! HTML rendering of the execution trace.
//!
//! One line per trace entry, preserving order. The same view renders both
//! successful runs and runs that ended in an error entry.

use galaxy_core::Trace;

/// Render the trace as a complete HTML page.
pub fn render_trace(trace: &Trace) -> String {
    let mut body = String::new();
    for line in trace.lines() {
        body.push_str("    <p>");
        body.push_str(&escape(&line));
        body.push_str("</p>\n");
    }

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
           <meta charset=\"utf-8\">\n\
           <title>Galaxy SQL Tour</title>\n\
         </head>\n\
         <body>\n\
           <h1>Galaxy SQL Tour</h1>\n\
         {body}\
           <p><a href=\"/\">Back</a></p>\n\
         </body>\n\
         </html>\n"
    )
}

/// Escape text for safe inclusion in HTML element content.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
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

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_html_metacharacters() {
        assert_eq!(
            escape(r#"select * from t where a < 1 & b > '2'"#),
            "select * from t where a &lt; 1 &amp; b &gt; &#39;2&#39;"
        );
    }

    #[test]
    fn renders_one_line_per_entry_in_order() {
        let mut trace = Trace::new();
        trace.note("1 Create tables");
        trace.step("Create a table named: cities", "create table cities (City VARCHAR(255))");

        let html = render_trace(&trace);
        let first = html.find("1 Create tables").unwrap();
        let second = html.find("Create a table named: cities").unwrap();
        let third = html.find("SQL: create table cities").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn renders_error_entries_through_the_same_view() {
        let trace = Trace::from_error("connection failed: boom");
        let html = render_trace(&trace);
        assert!(html.contains("ERROR: connection failed: boom"));
    }
}
