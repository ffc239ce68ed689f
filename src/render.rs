//! HTML and plain-text rendering of query results.

use catalog_core::TemplateEntry;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(unsafe_text: &str) -> String {
    let mut out = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the browsing page: owner tabs, a search box and one card per entry.
///
/// An empty result renders a "No templates found" block instead of cards.
pub fn render_page(
    entries: &[&TemplateEntry],
    owners: &[&str],
    active_owner: &str,
    search: &str,
) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Template Manager</title>\n</head>\n<body>\n",
    );

    html.push_str("<nav class=\"user-tabs\">\n");
    for owner in owners {
        let class = if *owner == active_owner {
            "user-tab active"
        } else {
            "user-tab"
        };
        html.push_str(&format!(
            "<a class=\"{}\" data-user=\"{}\" href=\"/?owner={}\">{}</a>\n",
            class,
            escape_html(owner),
            urlencoding::encode(owner),
            escape_html(owner)
        ));
    }
    html.push_str("</nav>\n");

    html.push_str(&format!(
        "<form method=\"get\" action=\"/\">\n<input type=\"hidden\" name=\"owner\" value=\"{}\">\n<input id=\"searchInput\" type=\"search\" name=\"q\" value=\"{}\">\n</form>\n",
        escape_html(active_owner),
        escape_html(search)
    ));

    html.push_str("<div id=\"templatesContainer\">\n");
    if entries.is_empty() {
        html.push_str(
            "<div class=\"no-templates\">\n<h3>No templates found</h3>\n<p>Try adjusting your search or add a new template.</p>\n</div>\n",
        );
    }
    for entry in entries {
        html.push_str(&render_card(entry));
    }
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn render_card(entry: &TemplateEntry) -> String {
    let id = escape_html(&entry.id);
    let content = escape_html(&entry.content);
    format!(
        "<div class=\"template-card\" data-id=\"{id}\">\n\
         <div class=\"template-header\">\n<h3>{name}</h3>\n<span class=\"template-category\">{category}</span>\n</div>\n\
         <pre class=\"template-content\">{content}</pre>\n\
         <div class=\"template-actions\">\n<a class=\"btn btn-copy\" href=\"/api/v1/templates/{raw}/raw\">Copy</a>\n</div>\n\
         </div>\n",
        id = id,
        name = escape_html(&entry.name),
        category = escape_html(&entry.category),
        content = content,
        raw = urlencoding::encode(&entry.id),
    )
}

/// Render entries as aligned `id  name  [category]` lines.
pub fn render_list(entries: &[&TemplateEntry]) -> String {
    if entries.is_empty() {
        return "No templates found\n".to_string();
    }

    let width = entries
        .iter()
        .map(|e| e.id.chars().count())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for entry in entries {
        output.push_str(&format!(
            "{:<width$}  {}  [{}]\n",
            entry.id,
            entry.name,
            entry.category,
            width = width
        ));
    }
    output
}
