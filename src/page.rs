//! Management page rendering.
//!
//! Keys and targets come straight from the store and may hold anything that
//! was written to it, so every value is escaped before it lands in the page.
//! Keys reach the delete script through a `data-key` attribute rather than
//! being spliced into script source.

use crate::models::MappingRow;
use crate::routes;
use std::fmt::Write;

const HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Register New URL Redirect</title>
    <style>
        body { max-width: 800px; margin: 0 auto; padding: 20px; font-family: sans-serif; }
        form { display: flex; flex-direction: column; gap: 10px; margin-bottom: 30px; }
        input { padding: 8px; }
        button { padding: 10px; background: #0066ff; color: white; border: none; cursor: pointer; }
        .delete-btn { background: #ff3333; padding: 5px 10px; }
        table { width: 100%; border-collapse: collapse; }
        th, td { text-align: left; padding: 8px; border-bottom: 1px solid #ddd; }
    </style>
</head>
<body>
"#;

const SCRIPT: &str = r#"    <script>
        async function deleteRedirect(button) {
            const key = button.dataset.key;
            if (confirm('Are you sure you want to delete this redirect?')) {
                const response = await fetch(REGISTER_PATH + '?key=' + encodeURIComponent(key), {
                    method: 'DELETE'
                });
                if (response.ok) {
                    location.reload();
                } else {
                    alert('Error deleting redirect');
                }
            }
        }
    </script>
</body>
</html>
"#;

/// Render the management page for the given rows
pub fn render_register_page(rows: &[MappingRow]) -> String {
    let mut html = String::with_capacity(4096 + rows.len() * 256);
    html.push_str(HEAD);

    let action = escape_html(routes::REGISTER);
    // Writing into a String cannot fail.
    let _ = write!(
        html,
        r#"    <h1>Register New URL Redirect</h1>
    <form method="POST" action="{action}">
        <div>
            <label for="shortPath">Short Path (e.g., /blog):</label>
            <input type="text" id="shortPath" name="shortPath" required>
        </div>
        <div>
            <label for="targetUrl">Target URL:</label>
            <input type="url" id="targetUrl" name="targetUrl" required>
        </div>
        <button type="submit">Create Redirect</button>
    </form>

    <h2>Existing Redirects</h2>
    <table>
        <thead>
            <tr>
                <th>Short Path</th>
                <th>Redirect</th>
                <th> </th>
            </tr>
        </thead>
        <tbody>
"#
    );

    for row in rows {
        render_row(&mut html, row);
    }

    html.push_str("        </tbody>\n    </table>\n\n");
    let _ = writeln!(html, "    <script>const REGISTER_PATH = '{}';</script>", routes::REGISTER);
    html.push_str(SCRIPT);
    html
}

fn render_row(html: &mut String, row: &MappingRow) {
    let key = escape_html(&row.short_path);
    let target_cell = match row.target_url.as_deref() {
        Some(target) if is_linkable(target) => {
            let target = escape_html(target);
            format!(r#"<a href="{target}" target="_blank" rel="noopener noreferrer">{target}</a>"#)
        }
        Some(target) => escape_html(target),
        None => String::new(),
    };

    let _ = write!(
        html,
        r#"            <tr>
                <td>{key}</td>
                <td>{target_cell}</td>
                <td><button onclick="deleteRedirect(this)" data-key="{key}" class="delete-btn">Delete</button></td>
            </tr>
"#
    );
}

// Anything other than http(s) stays plain text so a stored `javascript:`
// target cannot become a clickable link.
fn is_linkable(target: &str) -> bool {
    url::Url::parse(target)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Escape text for use in HTML element content and quoted attributes
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
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
