//! HTML pages for the web form.

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::card::Card;

const STYLE: &str = "body{font-family:sans-serif;max-width:40rem;margin:2rem auto;padding:0 1rem}\
form{display:flex;gap:.5rem}input{flex:1;padding:.4rem}\
.card{border:1px solid #ccc;border-radius:8px;padding:1rem 1.5rem;margin-top:1.5rem}\
.phonetic{color:#555}.error{color:#b00}img{max-width:256px;display:block;margin-top:1rem}";

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        title = encode_text(title),
    )
}

fn form(expression: &str) -> String {
    format!(
        "<form method=\"post\" action=\"/generate\">\n\
         <input name=\"expression\" placeholder=\"Enter an English expression\" value=\"{}\" required>\n\
         <button type=\"submit\">Generate card</button>\n</form>\n",
        encode_double_quoted_attribute(expression),
    )
}

/// The landing page: a form posting an expression to `/generate`.
///
/// `error` is shown above the form, and `expression` pre-fills it.
#[must_use]
pub fn index_page(error: Option<&str>, expression: &str) -> String {
    let mut body = String::from("<h1>Vocabulary flashcards</h1>\n");
    if let Some(error) = error {
        let _ = writeln!(body, "<p class=\"error\">{}</p>", encode_text(error));
    }
    body.push_str(&form(expression));
    page("Vocabulary flashcards", &body)
}

/// A generated card, followed by the form for the next expression.
///
/// The illustration block is left out when the card has no image.
#[must_use]
pub fn card_page(card: &Card) -> String {
    let mut body = String::from("<h1>Vocabulary flashcards</h1>\n");
    body.push_str(&form(""));
    body.push_str("<div class=\"card\">\n");
    let _ = writeln!(body, "<h2>{}</h2>", encode_text(card.expression()));
    let _ = writeln!(body, "<p class=\"phonetic\">{}</p>", encode_text(card.phonetic()));
    let _ = writeln!(body, "<p class=\"explanation\">{}</p>", encode_text(card.explanation()));
    body.push_str("<ul class=\"examples\">\n");
    for example in card.usage_examples() {
        let _ = writeln!(body, "<li>{}</li>", encode_text(example));
    }
    body.push_str("</ul>\n");
    if let Some(url) = card.image_url() {
        let _ = writeln!(
            body,
            "<img class=\"illustration\" src=\"{}\" alt=\"Illustration of {}\">",
            encode_double_quoted_attribute(url),
            encode_double_quoted_attribute(card.expression()),
        );
    }
    body.push_str("</div>\n");
    page(card.expression(), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlashcardError;

    fn card(expression: &str, image: Option<&str>) -> Card {
        Card::assemble(
            expression,
            Ok("/ˈkævəti/".into()),
            Ok("A hole in a tooth.".into()),
            Ok(vec!["The dentist found a cavity.".into()]),
            image.map(str::to_string).ok_or(FlashcardError::EmptyResponse("none".into())),
        )
    }

    #[test]
    fn index_has_form() {
        let html = index_page(None, "");
        assert!(html.contains("action=\"/generate\""));
        assert!(html.contains("name=\"expression\""));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn index_shows_escaped_error() {
        let html = index_page(Some("Expression <b>must</b> not be empty"), "");
        assert!(html.contains("Expression &lt;b&gt;must&lt;/b&gt; not be empty"));
    }

    #[test]
    fn card_page_renders_fields() {
        let html = card_page(&card("cavity", Some("https://img/c.png?a=1&b=2")));
        assert!(html.contains("<h2>cavity</h2>"));
        assert!(html.contains("/ˈkævəti/"));
        assert!(html.contains("A hole in a tooth."));
        assert!(html.contains("<li>The dentist found a cavity.</li>"));
        assert!(html.contains("src=\"https://img/c.png?a=1&amp;b=2\""));
    }

    #[test]
    fn card_page_omits_missing_illustration() {
        let html = card_page(&card("cavity", None));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn card_page_escapes_expression() {
        let html = card_page(&card("<script>alert(1)</script>", None));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
