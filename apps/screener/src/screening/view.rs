//! View: renders controller state as the screening page. Never mutates state.

use std::fmt::Write;

use crate::screening::controller::ScreeningController;
use crate::screening::models::CandidateRanking;

/// Everything the page needs, derived from a controller snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningView {
    pub job_description: String,
    pub resumes: String,
    pub submit_enabled: bool,
    pub show_loader: bool,
    pub error_banner: Option<String>,
    /// `Some(empty)` is an empty result set, not an error.
    pub rankings: Option<Vec<CandidateRanking>>,
}

impl ScreeningView {
    pub fn from_controller(controller: &ScreeningController) -> Self {
        let status = controller.status();
        Self {
            job_description: controller.job_description().to_string(),
            resumes: controller.resumes().to_string(),
            submit_enabled: controller.can_submit(),
            show_loader: status.is_loading(),
            error_banner: status.failure().map(|f| f.message.clone()),
            rankings: status.rankings().map(<[CandidateRanking]>::to_vec),
        }
    }
}

const PAGE_STYLE: &str = r#"
body { font-family: system-ui, sans-serif; background: #f8fafc; color: #0f172a; margin: 0; }
header, footer { text-align: center; padding: 1.5rem; }
footer { font-size: 0.85rem; color: #64748b; }
main { display: grid; grid-template-columns: repeat(auto-fit, minmax(22rem, 1fr)); gap: 2rem; max-width: 72rem; margin: 0 auto; padding: 1rem 2rem; }
section { background: #fff; border: 1px solid #e2e8f0; border-radius: 0.75rem; padding: 1.5rem; }
label { display: block; font-weight: 600; margin-bottom: 0.5rem; }
textarea { width: 100%; box-sizing: border-box; min-height: 12rem; margin-bottom: 1.25rem; font: inherit; }
button { width: 100%; padding: 0.75rem; font-weight: 600; color: #fff; background: #4f46e5; border: 0; border-radius: 0.5rem; cursor: pointer; }
button:disabled { background: #94a3b8; cursor: not-allowed; }
.error { margin-top: 1rem; text-align: center; color: #dc2626; background: #fee2e2; padding: 0.75rem; border-radius: 0.5rem; }
.loader { text-align: center; color: #4f46e5; }
.empty { text-align: center; color: #64748b; }
ol { padding-left: 1.25rem; }
li { margin-bottom: 1rem; }
.score { float: right; font-weight: 700; }
"#;

// Keeps the trigger disabled while either field is blank and swaps in the
// loading indicator once the form is sent.
const PAGE_SCRIPT: &str = r#"
(function () {
  var form = document.getElementById('screening-form');
  var jd = document.getElementById('job_description');
  var resumes = document.getElementById('resumes');
  var button = document.getElementById('submit');
  function sync() { button.disabled = !jd.value.trim() || !resumes.value.trim(); }
  jd.addEventListener('input', sync);
  resumes.addEventListener('input', sync);
  form.addEventListener('submit', function () {
    button.disabled = true;
    button.textContent = 'Screening resumes...';
  });
})();
"#;

/// Renders the full HTML document for a view.
pub fn render_page(view: &ScreeningView) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>AI Resume Screener</title>\n");
    let _ = write!(html, "<style>{PAGE_STYLE}</style>\n</head>\n<body>\n");
    html.push_str("<header><h1>AI Resume Screener</h1><p>Paste a job description and resumes to get a ranked shortlist.</p></header>\n<main>\n");

    render_form(&mut html, view);
    render_results(&mut html, view);

    html.push_str("</main>\n<footer><p>Powered by the Gemini API. Designed for efficient and fair candidate evaluation.</p></footer>\n");
    let _ = write!(html, "<script>{PAGE_SCRIPT}</script>\n</body>\n</html>\n");
    html
}

fn render_form(html: &mut String, view: &ScreeningView) {
    html.push_str("<section>\n<form id=\"screening-form\" method=\"post\" action=\"/screen\">\n");
    let _ = write!(
        html,
        "<label for=\"job_description\">Job Description</label>\n\
         <textarea id=\"job_description\" name=\"job_description\" placeholder=\"Paste the full job description here...\">{}</textarea>\n",
        escape_html(&view.job_description)
    );
    let _ = write!(
        html,
        "<label for=\"resumes\">Resumes</label>\n\
         <textarea id=\"resumes\" name=\"resumes\" placeholder=\"Paste resumes here, separated by a line of dashes (---)\">{}</textarea>\n",
        escape_html(&view.resumes)
    );

    let disabled = if view.submit_enabled { "" } else { " disabled" };
    let label = if view.show_loader {
        "<span class=\"loader\">Screening resumes...</span>"
    } else {
        "Screen &amp; Rank Resumes"
    };
    let _ = writeln!(html, "<button id=\"submit\" type=\"submit\"{disabled}>{label}</button>");
    html.push_str("</form>\n");

    if let Some(message) = &view.error_banner {
        let _ = writeln!(
            html,
            "<div class=\"error\" role=\"alert\">{}</div>",
            escape_html(message)
        );
    }
    html.push_str("</section>\n");
}

fn render_results(html: &mut String, view: &ScreeningView) {
    html.push_str("<section>\n<h2>Candidate Rankings</h2>\n");

    if view.show_loader {
        html.push_str("<p class=\"loader\">Analyzing resumes...</p>\n");
    } else {
        match &view.rankings {
            None => html.push_str(
                "<p class=\"empty\">Rankings will appear here once you screen resumes.</p>\n",
            ),
            Some(rankings) if rankings.is_empty() => html.push_str(
                "<p class=\"empty\">No candidates could be ranked from the provided resumes.</p>\n",
            ),
            Some(rankings) => {
                html.push_str("<ol>\n");
                for ranking in rankings {
                    render_ranking(html, ranking);
                }
                html.push_str("</ol>\n");
            }
        }
    }

    html.push_str("</section>\n");
}

fn render_ranking(html: &mut String, ranking: &CandidateRanking) {
    let _ = write!(
        html,
        "<li value=\"{}\"><span class=\"score\">{}/100</span><strong>{}</strong><p>{}</p>",
        ranking.rank,
        ranking.score,
        escape_html(&ranking.candidate_name),
        escape_html(&ranking.rationale)
    );
    render_phrase_list(html, "Strengths", &ranking.strengths);
    render_phrase_list(html, "Gaps", &ranking.gaps);
    html.push_str("</li>\n");
}

fn render_phrase_list(html: &mut String, title: &str, phrases: &[String]) {
    if phrases.is_empty() {
        return;
    }
    let joined: Vec<String> = phrases.iter().map(|p| escape_html(p)).collect();
    let _ = write!(html, "<p><em>{title}:</em> {}</p>", joined.join(", "));
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
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
