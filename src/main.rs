mod assemble;
mod browser;
mod catalog;
mod classify;
mod config;
mod error;
mod harvest;
mod logging;
mod matching;
mod models;
mod output;
mod resolve;
mod scroll;
mod temporal;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::warn;

use browser::{login, ChromeSession};
use classify::truncate;
use config::{Credentials, Misclassified, Settings, DEFAULT_WEBDRIVER_URL};
use harvest::{Harvester, JobQuery, Selection};
use output::{file_stem, jobs_file_stem, profile_file_stem, write_json, write_report, Report, Written};
use temporal::hours_ago;

#[derive(Parser)]
#[command(name = "harvest")]
#[command(about = "Collect LinkedIn profiles, activity and job postings into JSON and text reports")]
struct Cli {
    /// WebDriver endpoint (a running chromedriver)
    #[arg(long, global = true, env = "HARVEST_WEBDRIVER_URL", default_value = DEFAULT_WEBDRIVER_URL)]
    webdriver_url: String,

    /// Run Chrome without a window
    #[arg(long, global = true)]
    headless: bool,

    /// Directory reports are written to
    #[arg(long, global = true, default_value = ".")]
    output_dir: PathBuf,

    /// Directory for page-source dumps of pages that yielded nothing
    #[arg(long, global = true)]
    debug_dir: Option<PathBuf>,

    /// Never write page-source dumps
    #[arg(long, global = true)]
    no_debug_dump: bool,

    /// Seconds to wait between job page requests
    #[arg(long, global = true)]
    request_delay: Option<f64>,

    /// Seconds to wait after each scroll
    #[arg(long, global = true)]
    scroll_pause: Option<f64>,

    /// Upper bound on scrolls per page
    #[arg(long, global = true)]
    max_scrolls: Option<usize>,

    /// Keep comments whose text could not be recognised, with placeholder content
    #[arg(long, global = true)]
    keep_placeholders: bool,

    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Profile details plus recent posts, comments and reactions
    Profile {
        /// Profile URL
        url: String,

        /// Most items to keep per activity type
        #[arg(long, default_value = "5")]
        activity_limit: usize,

        /// Only activity from the last N hours
        #[arg(long, default_value = "24")]
        hours: u32,
    },

    /// Recent posts of a profile
    Posts {
        /// Profile URL
        url: String,

        /// Only posts from the last N hours
        #[arg(long, default_value = "24")]
        hours: u32,

        /// Most posts to keep
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Recent comments of a profile
    Comments {
        /// Profile URL
        url: String,

        /// Latest N comments regardless of age (overrides --hours)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Only comments from the last N hours
        #[arg(long, default_value = "24")]
        hours: u32,
    },

    /// Latest reactions of a profile
    Reactions {
        /// Profile URL
        url: String,

        /// Number of reactions to keep
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Jobs with a given title at a given company
    Jobs {
        /// Company name
        company: String,

        /// Job title words
        title: String,

        /// Most jobs to return
        #[arg(short, long, default_value = "50")]
        max_results: usize,

        /// Skip visiting each job page (search results only)
        #[arg(long)]
        quick: bool,

        /// Write the JSON report to this file instead of the default name
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// A single job posting
    Job {
        /// Job URL
        url: String,
    },
}

fn seconds(flag: &str, value: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(value).map_err(|_| anyhow!("--{} must be a non-negative number of seconds", flag))
}

fn build_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings {
        webdriver_url: cli.webdriver_url.clone(),
        headless: cli.headless,
        max_scrolls: cli.max_scrolls,
        ..Settings::default()
    };
    if let Some(delay) = cli.request_delay {
        settings.request_delay = seconds("request-delay", delay)?;
    }
    if let Some(pause) = cli.scroll_pause {
        settings.scroll_pause = Some(seconds("scroll-pause", pause)?);
    }
    if cli.no_debug_dump {
        settings.debug_dir = None;
    } else if let Some(dir) = &cli.debug_dir {
        settings.debug_dir = Some(dir.clone());
    }
    if cli.keep_placeholders {
        settings.misclassified = Misclassified::Placeholder;
    }
    Ok(settings)
}

fn print_written(written: &Written) {
    println!("\nSaved:");
    println!("  JSON: {}", written.json.display());
    println!("  Text: {}", written.text.display());
}

fn run(command: Commands, harvester: &mut Harvester<'_, ChromeSession>, output_dir: &Path) -> Result<()> {
    match command {
        Commands::Profile {
            url,
            activity_limit,
            hours,
        } => {
            println!("Scraping profile {} (last {} hours, up to {} items each)...", url, hours, activity_limit);
            let report = harvester.comprehensive(&url, activity_limit, hours);

            match &report.person {
                Some(person) => {
                    println!("\nName: {}", person.name);
                    if !person.headline.is_empty() {
                        println!("Headline: {}", person.headline);
                    }
                    if let Some(company) = &report.company {
                        println!("Company: {}", company);
                    }
                    if let Some(title) = &report.job_title {
                        println!("Title: {}", title);
                    }
                }
                None => println!("\nProfile details not available."),
            }
            println!("Posts:     {}", report.recent_posts.len());
            println!("Comments:  {}", report.recent_comments.len());
            println!("Reactions: {}", report.recent_reactions.len());
            for (section, status) in &report.scraping_status {
                if status != "success" {
                    println!("  {} {}", section, status);
                }
            }

            let stem = profile_file_stem(&url, report.scraped_at);
            print_written(&write_report(output_dir, &stem, &report)?);
        }

        Commands::Posts { url, hours, limit } => {
            let owner = harvester.owner(&url)?;
            let selection = Selection::Since {
                cutoff: hours_ago(hours),
                cap: limit,
            };
            let posts = harvester.posts(&owner, &selection)?;

            println!("Found {} post(s) from the last {} hours", posts.len(), hours);
            for (i, post) in posts.iter().enumerate() {
                println!(
                    "{:>3}. [{}] {} ({} likes)",
                    i + 1,
                    post.posted_date,
                    truncate(&post.content.replace('\n', " "), 70),
                    post.likes_count
                );
            }

            let mut report = Report::new("posts", &owner.url, posts).with_param("hours", hours);
            if let Some(limit) = limit {
                report = report.with_param("limit", limit);
            }
            let stem = file_stem("posts", report.scraped_at);
            print_written(&write_report(output_dir, &stem, &report)?);
        }

        Commands::Comments { url, limit, hours } => {
            let owner = harvester.owner(&url)?;
            let selection = match limit {
                Some(n) => Selection::Latest(n),
                None => Selection::within_hours(hours),
            };
            let comments = harvester.comments(&owner, &selection)?;

            println!("Found {} comment(s)", comments.len());
            for (i, comment) in comments.iter().enumerate() {
                println!(
                    "{:>3}. [{}] {}",
                    i + 1,
                    comment.commented_date,
                    truncate(&comment.content.replace('\n', " "), 80)
                );
            }

            let report = Report::new("comments", &owner.url, comments);
            let report = match limit {
                Some(n) => report.with_param("limit", n),
                None => report.with_param("hours", hours),
            };
            let stem = file_stem("comments", report.scraped_at);
            print_written(&write_report(output_dir, &stem, &report)?);
        }

        Commands::Reactions { url, limit } => {
            let owner = harvester.owner(&url)?;
            let reactions = harvester.reactions(&owner, limit)?;

            println!("Found {} reaction(s)", reactions.len());
            for (i, reaction) in reactions.iter().enumerate() {
                println!(
                    "{:>3}. {:<10} {}",
                    i + 1,
                    reaction.reaction_type,
                    truncate(&reaction.post_preview.replace('\n', " "), 70)
                );
            }

            let report = Report::new("reactions", &owner.url, reactions).with_param("limit", limit);
            let stem = file_stem("reactions", report.scraped_at);
            print_written(&write_report(output_dir, &stem, &report)?);
        }

        Commands::Jobs {
            company,
            title,
            max_results,
            quick,
            output,
        } => {
            println!("Searching for '{}' positions at '{}'...", title, company);
            let query = JobQuery {
                company: company.clone(),
                title: title.clone(),
                max_results,
                detailed: !quick,
            };
            let jobs = harvester.search_jobs(&query)?;

            if jobs.is_empty() {
                println!("No matching jobs found.");
            } else {
                println!("{:<4} {:<40} {:<25} {:<20}", "#", "TITLE", "COMPANY", "LOCATION");
                println!("{}", "-".repeat(92));
                for (i, job) in jobs.iter().enumerate() {
                    println!(
                        "{:<4} {:<40} {:<25} {:<20}",
                        i + 1,
                        truncate(&job.title, 38),
                        truncate(&job.company, 23),
                        truncate(&job.location, 18)
                    );
                }
            }

            let report = Report::new("jobs", &format!("{} at {}", title, company), jobs)
                .with_param("company", &company)
                .with_param("title", &title)
                .with_param("max_results", max_results)
                .with_param("detailed", !quick);
            match output {
                Some(path) => {
                    write_json(&path, &report)?;
                    println!("\nSaved: {}", path.display());
                }
                None => {
                    let stem = jobs_file_stem(&company, &title, report.scraped_at);
                    print_written(&write_report(output_dir, &stem, &report)?);
                }
            }
        }

        Commands::Job { url } => {
            let job = harvester.job(&url, None)?;

            println!("{}", job.title);
            println!("Company: {}", job.company);
            println!("Location: {}", job.location);
            if !job.posted_date.is_empty() {
                println!("Posted: {}", job.posted_date);
            }
            if !job.applicant_count.is_empty() {
                println!("Applicants: {}", job.applicant_count);
            }
            if !job.description.is_empty() {
                println!("\n--- Description ---\n{}", truncate(&job.description, 600));
            }

            let report = Report::new("job", &url, vec![job]);
            let stem = file_stem("job", report.scraped_at);
            print_written(&write_report(output_dir, &stem, &report)?);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let credentials = Credentials::from_env()?;
    let settings = build_settings(&cli)?;

    let mut session = ChromeSession::launch(&settings).context("Failed to start browser session")?;
    login(&mut session, &credentials, &settings).context("LinkedIn login failed")?;

    let result = {
        let mut harvester = Harvester::new(&mut session, &settings);
        run(cli.command, &mut harvester, &cli.output_dir)
    };

    if let Err(e) = session.close() {
        warn!(target: "harvest.session", error = %e, "Browser did not shut down cleanly");
    }
    result
}
