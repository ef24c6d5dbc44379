//! Server-rendered HTML pages

use axum::http::StatusCode;

use crate::models::Book;

/// Escape text for inclusion in HTML content and attribute values
pub fn escape(text: &str) -> String {
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

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape(title),
        body = body,
    )
}

/// Library page listing every book
pub fn index(books: &[Book]) -> String {
    let mut body = String::from("<h1>My Library</h1>\n");

    if books.is_empty() {
        body.push_str("<p>No books in the library yet.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for book in books {
            body.push_str(&format!(
                concat!(
                    "<li>{title} - {author} - {rating} ",
                    "<a href=\"/edit/{id}\">Edit Rating</a> ",
                    "<form method=\"post\" action=\"/delete/{id}\" style=\"display:inline\">",
                    "<button type=\"submit\">Delete</button></form></li>\n"
                ),
                id = book.id,
                title = escape(&book.title),
                author = escape(&book.author),
                rating = book.rating,
            ));
        }
        body.push_str("</ul>\n");
    }

    body.push_str("<a href=\"/add\">Add New Book</a>\n");
    layout("My Library", &body)
}

/// Empty add-book form
pub fn add_form() -> String {
    let body = r#"<h1>Add Book</h1>
<form method="post" action="/add">
<label>Book Name <input name="book_name" type="text" required></label>
<label>Book Author <input name="book_author" type="text" required></label>
<label>Rating <input name="book_rating" type="text" required></label>
<button type="submit">Add Book</button>
</form>
<a href="/">Back to library</a>
"#;
    layout("Add Book", body)
}

/// Rating form pre-filled with the current rating
pub fn edit_form(book: &Book) -> String {
    let body = format!(
        r#"<h1>Edit Rating</h1>
<p>Book Name: {title}</p>
<p>Current Rating: {rating}</p>
<form method="post" action="/edit/{id}">
<label>New Rating <input name="new_rating" type="text" value="{rating}" required></label>
<button type="submit">Change Rating</button>
</form>
<a href="/">Back to library</a>
"#,
        id = book.id,
        title = escape(&book.title),
        rating = book.rating,
    );
    layout("Edit Rating", &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let heading = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<a href=\"/\">Back to library</a>\n",
        escape(&heading),
        escape(message)
    );
    layout(&heading, &body)
}
