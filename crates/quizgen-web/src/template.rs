use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../templates/index.html");
const RESULTS_HTML: &str = include_str!("../../../templates/results.html");

/// Render the upload form page.
pub fn render_index() -> Html<String> {
    Html(INDEX_HTML.to_string())
}

/// Render the results page, injecting the generated text and the two
/// artifact filenames as download links.
pub fn render_results(mcqs: &str, txt_filename: &str, pdf_filename: &str) -> Html<String> {
    let html = RESULTS_HTML
        .replace("{{ mcqs }}", &html_escape(mcqs))
        .replace("{{ txt_filename }}", &html_escape(txt_filename))
        .replace("{{ pdf_filename }}", &html_escape(pdf_filename));
    Html(html)
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
