// Prompt templates for the job analysis pipeline.
// Placeholders are filled by `fill_template` before sending.

/// Link extraction prompt. Replace: {num_jobs}, {markdown}
pub const LINK_EXTRACTION_PROMPT_TEMPLATE: &str = r#"Extract up to {num_jobs} job application links from the given markdown content.
Return the result as a JSON object with a single key "apply_links" containing an array of strings (the links).
The output should be a valid JSON object, with no additional text.

Example of the expected format:
{"apply_links": ["https://example.com/job1", "https://example.com/job2"]}

Markdown content:
{markdown}"#;

/// Ranking prompt. Replace: {num_jobs}, {resume}, {jobs_json}
pub const RANKING_PROMPT_TEMPLATE: &str = r#"Analyze the resume and job listings, and return a JSON list of the top {num_jobs} roles that best fit the candidate's experience and skills.
Include only the job title, compensation, and apply link for each recommended role.
The output should be a valid JSON array of objects in the following format, with no additional text:

[
  {
    "job_title": "Job Title",
    "compensation": "Compensation (if available, otherwise empty string)",
    "apply_link": "Application URL"
  }
]

Based on the following resume:
{resume}

And the following job listings:
{jobs_json}"#;

pub fn link_extraction_prompt(markdown: &str, num_jobs: usize) -> String {
    let num_jobs = num_jobs.to_string();
    fill_template(
        LINK_EXTRACTION_PROMPT_TEMPLATE,
        &[("num_jobs", num_jobs.as_str()), ("markdown", markdown)],
    )
}

pub fn ranking_prompt(resume: &str, jobs_json: &str, num_jobs: usize) -> String {
    let num_jobs = num_jobs.to_string();
    fill_template(
        RANKING_PROMPT_TEMPLATE,
        &[
            ("num_jobs", num_jobs.as_str()),
            ("resume", resume),
            ("jobs_json", jobs_json),
        ],
    )
}

/// Replaces each `{name}` in `template` in a single pass.
/// Substituted values are never rescanned, so placeholders inside them stay verbatim.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        let hit = values.iter().find_map(|(name, value)| {
            tail.strip_prefix('{')
                .and_then(|t| t.strip_prefix(name))
                .and_then(|t| t.strip_prefix('}'))
                .map(|after| (*value, after))
        });

        match hit {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
