//! HTML Pages
//!
//! Errors are always rendered as complete HTML documents, while successful
//! commands are plain text. Clients rely on that asymmetry.
//!
//! Every piece of client-supplied text is escaped before it is embedded in
//! a page.

use axum::http::StatusCode;

/// Builds a complete page with the shared GetSet layout.
pub fn build_html(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n    \
         <head>\n        \
         <title>GetSet - {title}</title>\n        \
         <meta charset='utf-8' />\n    \
         </head>\n    \
         <body>\n        \
         <h1>{title}</h1>\n\
         {body}\n    \
         </body>\n\
         </html>\n"
    )
}

/// The landing page served at `/`.
pub fn home_page() -> String {
    build_html(
        "Home",
        "        <ul>\n\
         \x20           <li><a href='/manual.html'>Manual test</a></li>\n\
         \x20           <li><a href='/auto.html'>Auto test</a></li>\n\
         \x20           <li><a href='/command'>Command URL (GET gives <code>400 Bad request</code>)</a></li>\n\
         \x20       </ul>",
    )
}

/// An error page such as `400 Bad Request` with `message` in red.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );
    let body = format!(
        "        <span style='color:red'>{}</span>",
        escape_html(message)
    );
    build_html(&title, &body)
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
