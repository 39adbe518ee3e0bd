//! Command-line client for a running Job Finder API.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;

use jobfinder::analysis::models::{AnalysisRequest, AnalysisResponse};

#[derive(Parser)]
#[command(name = "analyze-jobs", version)]
#[command(about = "Find the jobs on a careers page that best fit a résumé")]
struct Cli {
    /// Résumé text
    #[arg(long, conflicts_with = "resume_file")]
    resume: Option<String>,

    /// File containing the résumé text
    #[arg(long)]
    resume_file: Option<PathBuf>,

    /// Jobs page to scrape; the server default is used when omitted
    #[arg(long)]
    jobs_url: Option<String>,

    /// How many jobs to recommend (1-10)
    #[arg(long, default_value_t = 3)]
    num_jobs: u32,

    #[arg(long, default_value = "http://localhost:8000/analyze-jobs")]
    api_url: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let resume = match (cli.resume, cli.resume_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading résumé from {}", path.display()))?,
        (None, None) => bail!("pass the résumé with --resume or --resume-file"),
    };

    let request = AnalysisRequest {
        resume,
        jobs_page_url: cli.jobs_url,
        num_jobs: Some(cli.num_jobs),
    };

    let response = match reqwest::Client::new()
        .post(&cli.api_url)
        .header(reqwest::header::ACCEPT, "application/json")
        .json(&request)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) if e.is_connect() => bail!(
            "could not connect to {}. Make sure the server is running (cargo run --bin jobfinder)",
            cli.api_url
        ),
        Err(e) => return Err(e).context("sending analysis request"),
    };

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("API request failed with status code {}\nResponse: {body}", status.as_u16());
    }

    let results: AnalysisResponse = response.json().await.context("decoding API response")?;
    print!("{}", render(&results));
    Ok(())
}

fn render(results: &AnalysisResponse) -> String {
    let mut out = String::from("\nRecommended Jobs:\n================\n");
    if results.recommended_jobs.is_empty() {
        out.push_str("\nNo matching jobs found.\n");
    }
    for (i, job) in results.recommended_jobs.iter().enumerate() {
        out.push_str(&format!(
            "\n{}. {}\n   Compensation: {}\n   Apply Link: {}\n",
            i + 1,
            job.job_title,
            job.compensation,
            job.apply_link
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobfinder::analysis::models::RecommendedJob;

    #[test]
    fn test_render_numbers_jobs() {
        let results = AnalysisResponse {
            recommended_jobs: vec![
                RecommendedJob {
                    job_title: "Staff Rust Engineer".to_string(),
                    compensation: "$220k".to_string(),
                    apply_link: "https://jobs.example.com/1".to_string(),
                },
                RecommendedJob {
                    job_title: "SRE".to_string(),
                    compensation: String::new(),
                    apply_link: "https://jobs.example.com/2".to_string(),
                },
            ],
        };

        let out = render(&results);
        assert!(out.contains("1. Staff Rust Engineer\n   Compensation: $220k"));
        assert!(out.contains("2. SRE\n"));
        assert!(out.contains("Apply Link: https://jobs.example.com/2"));
    }

    #[test]
    fn test_render_empty() {
        let out = render(&AnalysisResponse {
            recommended_jobs: vec![],
        });
        assert!(out.contains("No matching jobs found."));
    }

    #[test]
    fn test_cli_parses_defaults() {
        let cli = Cli::parse_from(["analyze-jobs", "--resume", "Rust engineer"]);
        assert_eq!(cli.num_jobs, 3);
        assert_eq!(cli.api_url, "http://localhost:8000/analyze-jobs");
        assert!(cli.jobs_url.is_none());
    }
}
