//! Command-line front end

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::detail::DetailView;
use crate::filter::{FilterField, TYPE_FILTER_PATH};
use crate::models::{CategoryTab, ContentRecord, ContentType, LoginRequest, RegisterRequest};
use crate::planner::{DayPlan, PlanRequest};
use crate::search::{Pagination, SearchView};
use crate::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "tour-explorer")]
#[command(version, about = "Browse Korean tourism content, manage your account and plan trips", long_about = None)]
pub struct Cli {
    /// Directory holding the session storage (overrides TOUR_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List regions (시/도), or the sub-regions of --parent
    Areas {
        #[arg(long)]
        parent: Option<String>,
    },
    /// List category codes for a content type
    Categories {
        /// 12 spots, 14 facilities, 15 festivals, 25 courses
        #[arg(long, default_value = "12")]
        content_type: String,
        #[arg(long)]
        cat1: Option<String>,
        #[arg(long)]
        cat2: Option<String>,
    },
    /// Faceted search on the type-filter page
    Search {
        /// Start from this page location instead of building a filter
        #[arg(long, conflicts_with_all = ["tab", "cat1", "cat2", "cat3", "area", "sub_area", "title"])]
        location: Option<String>,
        /// spots, facilities, festivals or courses
        #[arg(long)]
        tab: Option<String>,
        #[arg(long)]
        cat1: Option<String>,
        #[arg(long)]
        cat2: Option<String>,
        #[arg(long)]
        cat3: Option<String>,
        /// Region code (시/도)
        #[arg(long)]
        area: Option<String>,
        /// Sub-region code (시/군/구)
        #[arg(long)]
        sub_area: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show one content record with its type-specific details
    Detail {
        content_id: String,
    },
    /// Random recommendations for a content type
    Random {
        #[arg(long, default_value = "12")]
        content_type: String,
        #[arg(long, default_value_t = 8)]
        limit: u32,
    },
    /// Create an account
    Register {
        #[arg(long)]
        user_id: String,
        #[arg(long, env = "TOUR_PASSWORD")]
        password: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
    },
    /// Sign in and store the token pair
    Login {
        #[arg(long)]
        user_id: String,
        #[arg(long, env = "TOUR_PASSWORD")]
        password: String,
    },
    /// Sign out and clear stored tokens
    Logout,
    /// Show the stored session
    Status,
    /// Mail a verification code
    EmailRequest {
        email: String,
    },
    /// Check a mailed verification code
    EmailVerify {
        email: String,
        code: String,
    },
    /// Generate an AI itinerary
    Plan {
        destination: String,
        #[arg(long, default_value_t = 3)]
        days: u32,
        /// Repeatable: 관광지, 문화시설, 축제, 행사
        #[arg(long = "interest")]
        interests: Vec<String>,
    },
}

fn parse_content_type(code: &str) -> Result<ContentType> {
    ContentType::from_code(code).with_context(|| format!("Unknown content type: {}", code))
}

fn print_records(records: &[ContentRecord]) {
    for record in records {
        println!("{:>10}  [{}] {}  {}", record.content_id, record.content_type_id, record.title, record.full_address());
    }
}

fn print_plan(plan: &[DayPlan]) {
    for day in plan {
        println!("Day {}: {}", day.day, day.title);
        println!("  아침   {} - {}", day.morning.activity, day.morning.description);
        println!("  점심   {} - {}", day.lunch.recommendation, day.lunch.description);
        if let Some(afternoon) = &day.afternoon {
            println!("  오후   {} - {}", afternoon.activity, afternoon.description);
        }
        println!("  저녁   {} - {}", day.dinner.recommendation, day.dinner.description);
    }
}

/// Run one command against `state`; the stored session has already been restored
pub async fn execute(command: Commands, state: &AppState) -> Result<()> {
    match command {
        Commands::Areas { parent } => {
            for item in state.codes.area_codes(parent.as_deref(), false).await {
                println!("{:>6}  {}", item.code, item.name);
            }
        }
        Commands::Categories { content_type, cat1, cat2 } => {
            parse_content_type(&content_type)?;
            for item in state
                .codes
                .category_codes(&content_type, cat1.as_deref(), cat2.as_deref())
                .await
            {
                println!("{:>10}  {}", item.code, item.name);
            }
        }
        Commands::Search { location, tab, cat1, cat2, cat3, area, sub_area, title, page } => {
            let mut type_page = match location {
                Some(location) => state.type_page(&location).await,
                None => {
                    let tab = match tab {
                        Some(value) => CategoryTab::by_value(&value)
                            .with_context(|| format!("Unknown tab: {}", value))?,
                        None => CategoryTab::default_tab(),
                    };
                    let start = format!("{}?category={}", TYPE_FILTER_PATH, tab.value);
                    let mut type_page = state.type_page(&start).await;

                    // Parents before children so the cascade does not undo a child
                    let edits = [
                        (FilterField::Cat1, cat1),
                        (FilterField::Cat2, cat2),
                        (FilterField::Cat3, cat3),
                        (FilterField::Area, area),
                        (FilterField::SubArea, sub_area),
                        (FilterField::Title, title),
                    ];
                    for (field, value) in edits {
                        if let Some(value) = value {
                            type_page.set_field(field, value).await;
                        }
                    }
                    type_page.submit().await;
                    type_page
                }
            };

            println!("{}", type_page.location());
            match type_page.view().await {
                SearchView::Results(records) => {
                    let mut pager = Pagination::default();
                    pager.go_to(page, records.len());
                    print_records(pager.slice(&records));
                    println!(
                        "page {}/{} ({} results)",
                        pager.current_page(),
                        pager.total_pages(records.len()).max(1),
                        records.len()
                    );
                }
                SearchView::Prompt(message) => println!("{}", message),
                SearchView::Failed(message) => bail!(message),
                SearchView::Idle | SearchView::Loading => {}
            }
        }
        Commands::Detail { content_id } => match state.detail_loader().load(&content_id).await {
            DetailView::Loaded(record) => {
                println!("{}", serde_json::to_string_pretty(&record)?);
            }
            DetailView::NotFound => bail!("정보를 찾을 수 없습니다."),
            DetailView::Failed(message) => bail!(message),
            DetailView::Idle | DetailView::Loading => {}
        },
        Commands::Random { content_type, limit } => {
            let content_type = parse_content_type(&content_type)?;
            let records = state.tour.random(content_type, limit).await?.into_data()?;
            print_records(&records);
        }
        Commands::Register { user_id, password, name, email, phone } => {
            let request = RegisterRequest {
                user_id,
                user_pwd: password,
                user_name: name,
                user_email: email,
                phone,
            };
            let message = state.session.register(&request).await?;
            println!("{}", message);
        }
        Commands::Login { user_id, password } => {
            let session = state.session.login(&LoginRequest { user_id, password }).await?;
            println!("Signed in as {}", session.user_id.as_deref().unwrap_or("(unknown)"));
        }
        Commands::Logout => {
            state.session.logout().await;
            println!("Signed out");
        }
        Commands::Status => {
            if state.session.is_authenticated() {
                if let Some(session) = state.session.current_session() {
                    println!("Signed in as {}", session.user_id.as_deref().unwrap_or("(unknown)"));
                    if let Some(expires_at) = session.expires_at {
                        println!("Token expires {}", expires_at.to_rfc3339());
                    }
                }
            } else {
                println!("Not signed in");
            }
        }
        Commands::EmailRequest { email } => {
            state.session.request_email_auth(&email).await?;
            println!("Verification code sent to {}", email);
        }
        Commands::EmailVerify { email, code } => {
            if state.session.verify_email_auth(&email, &code).await? {
                println!("Email verified");
            } else {
                bail!("Verification failed");
            }
        }
        Commands::Plan { destination, days, interests } => {
            let plan = state
                .planner
                .generate(&PlanRequest::new(destination, days, interests))
                .await?;
            print_plan(&plan);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cli = Cli::parse_from([
            "tour-explorer", "search", "--tab", "festivals", "--cat1", "A02", "--area", "1", "--title", "불꽃",
        ]);
        match cli.command {
            Commands::Search { tab, cat1, area, title, page, .. } => {
                assert_eq!(tab.as_deref(), Some("festivals"));
                assert_eq!(cat1.as_deref(), Some("A02"));
                assert_eq!(area.as_deref(), Some("1"));
                assert_eq!(title.as_deref(), Some("불꽃"));
                assert_eq!(page, 1);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_location_conflicts_with_fields() {
        let result = Cli::try_parse_from([
            "tour-explorer", "search", "--location", "/type-filter?cat1=A01", "--cat1", "A02",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_plan_and_global_data_dir() {
        let cli = Cli::parse_from([
            "tour-explorer", "plan", "부산", "--days", "2", "--interest", "관광지", "--interest", "축제",
            "--data-dir", "/tmp/tour",
        ]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/tour")));
        match cli.command {
            Commands::Plan { destination, days, interests } => {
                assert_eq!(destination, "부산");
                assert_eq!(days, 2);
                assert_eq!(interests, vec!["관광지", "축제"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_content_type() {
        assert!(parse_content_type("39").is_err());
        assert_eq!(parse_content_type("25").unwrap(), ContentType::TourCourse);
    }
}
