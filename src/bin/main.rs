use anyhow::Error;
use linkedin_agent::{
    endpoints::{self, analytics, content, users},
    forms::{self, LoginForm, Navigator, RegisterForm},
    models::{ContentRequest, ContentType, ScheduleRequest, Tone},
    ApiClient, Config, FileStorage, Session,
};
use serde_json::Value;
use std::{path::PathBuf, time::Duration};
use structopt::StructOpt;

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::from_args();

    log::debug!("Starting application with {:#?}", args);

    // the session lives in a file, so logging in once is enough for
    // every command that follows
    let api = args.client()?;
    let navigator = Terminal;

    // logging out already throws the session away, so a 401 there isn't
    // an expired session
    let redirect_on_error = !matches!(args.cmd, Command::Logout);
    let result = run(&api, &navigator, args.cmd).await;

    if let Err(ref e) = result {
        if let Some(api_error) = e.downcast_ref::<linkedin_agent::ApiError>() {
            if redirect_on_error {
                forms::handle_error(api_error, &navigator);
            }
        }
    }

    result
}

async fn run(
    api: &ApiClient,
    navigator: &Terminal,
    cmd: Command,
) -> Result<(), Error> {
    match cmd {
        Command::Register {
            name,
            email,
            password,
        } => {
            let form = RegisterForm {
                name,
                email,
                password,
            };
            let banner = form.submit(api, navigator).await?;
            println!("{}", banner);
        },
        Command::Login { email, password } => {
            LoginForm::new(email, password).submit(api, navigator).await?;
        },
        Command::Logout => endpoints::logout(api).await?,
        Command::Me => {
            let user = endpoints::me(api).await?;
            println!("{} <{}>", user.name, user.email);
        },
        Command::ConnectLinkedIn => {
            let url = endpoints::linkedin_connect_url(api)?;
            println!("Open {} in your browser", url);
        },
        Command::Generate {
            topic,
            content_type,
            tone,
        } => {
            let mut request = ContentRequest::new(topic, content_type);
            request.tone = tone;
            let generated = content::generate(api, &request).await?;

            println!("{}", generated.content);
            if !generated.hashtags.is_empty() {
                println!();
                println!("#{}", generated.hashtags.join(" #"));
            }
            println!();
            println!(
                "Estimated engagement: {:.1}%, best time: {}",
                generated.estimated_engagement * 100.0,
                generated.best_posting_time
            );
        },
        Command::Variations { content_id } => {
            print_json(&content::variations(api, &content_id).await?)?
        },
        Command::Schedule { content_id, at } => {
            let request = ScheduleRequest {
                content_id,
                scheduled_time: at,
            };
            print_json(&content::schedule(api, &request).await?)?;
        },
        Command::Publish { content_id } => {
            print_json(&content::publish_now(api, &content_id).await?)?
        },
        Command::Trending => {
            let trending = content::trending_topics(api).await?;
            if let Some(industry) = trending.industry {
                println!("Trending in {}:", industry);
            }
            for topic in &trending.trends {
                println!(
                    "- {} ({:.0}%)",
                    topic.topic,
                    topic.relevance_score * 100.0
                );
                for angle in &topic.suggested_angles {
                    println!("    * {}", angle);
                }
            }
        },
        Command::Calendar { start, end } => {
            print_json(&content::calendar(api, &start, &end).await?)?
        },
        Command::Dashboard => {
            let stats = analytics::dashboard(api).await?;
            println!("Published posts:  {}", stats.total_posts);
            println!("Engagement:       {}", stats.total_engagement);
            println!("Profile views:    {}", stats.profile_views);
            println!(
                "Avg. engagement:  {:.2}%",
                stats.avg_engagement_rate * 100.0
            );
            println!("Viral posts:      {}", stats.viral_posts);
            println!("Scheduled posts:  {}", stats.scheduled_posts);
        },
        Command::PostAnalytics { post_id } => {
            print_json(&analytics::post_analytics(api, &post_id).await?)?
        },
        Command::Trends { days } => {
            print_json(&analytics::trends(api, days).await?)?
        },
        Command::TopContent => print_json(&analytics::top_content(api).await?)?,
        Command::Profile => print_json(&users::profile(api).await?)?,
        Command::UpdateProfile { changes } => {
            let changes: Value = serde_json::from_str(&changes)?;
            print_json(&users::update_profile(api, &changes).await?)?;
        },
        Command::LinkedInStatus => {
            print_json(&users::linkedin_status(api).await?)?
        },
    }

    Ok(())
}

fn print_json(value: &Value) -> Result<(), Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// There's no browser to redirect, so tell the user where to go instead.
struct Terminal;

impl Navigator for Terminal {
    fn navigate(&self, target: &str) {
        if target == linkedin_agent::LOGIN_PATH {
            eprintln!("Your session has expired, please run the login command");
        } else {
            log::debug!("Navigated to {}", target);
        }
    }
}

#[derive(Debug, StructOpt)]
struct Args {
    #[structopt(
        long = "api-url",
        help = "The backend's base address (overrides LINKEDIN_AGENT_API_URL)"
    )]
    api_url: Option<String>,
    #[structopt(
        long = "session-file",
        default_value = ".linkedin-agent-session.json",
        parse(from_os_str),
        help = "Where the session token is kept between runs"
    )]
    session_file: PathBuf,
    #[structopt(
        long = "timeout",
        parse(try_from_str = linkedin_agent::parse_timeout),
        help = "Request timeout in seconds"
    )]
    timeout: Option<Duration>,
    #[structopt(subcommand)]
    cmd: Command,
}

impl Args {
    fn client(&self) -> Result<ApiClient, Error> {
        let mut config = match self.api_url {
            Some(ref url) => Config::with_base_url(url)?,
            None => Config::from_env()?,
        };

        if let Some(timeout) = self.timeout {
            config = config.timeout(timeout);
        }

        let session = Session::new(FileStorage::new(&self.session_file));

        ApiClient::new(config, session).map_err(Error::from)
    }
}

#[derive(Debug, StructOpt)]
enum Command {
    #[structopt(about = "Create a new account")]
    Register {
        #[structopt(long = "name")]
        name: String,
        #[structopt(short = "u", long = "email")]
        email: String,
        #[structopt(short = "p", long = "password")]
        password: String,
    },
    #[structopt(about = "Log in and remember the session")]
    Login {
        #[structopt(short = "u", long = "email")]
        email: String,
        #[structopt(short = "p", long = "password")]
        password: String,
    },
    #[structopt(about = "Log out and forget the session")]
    Logout,
    #[structopt(about = "Show the logged in user")]
    Me,
    #[structopt(name = "connect-linkedin", about = "Print the LinkedIn connect URL")]
    ConnectLinkedIn,
    #[structopt(about = "Generate a new post")]
    Generate {
        topic: String,
        #[structopt(
            short = "t",
            long = "type",
            default_value = "text_post",
            help = "text_post, article, carousel, poll or video"
        )]
        content_type: ContentType,
        #[structopt(long = "tone", default_value = "professional")]
        tone: Tone,
    },
    #[structopt(about = "Generate A/B variations of a post")]
    Variations { content_id: String },
    #[structopt(about = "Schedule a post")]
    Schedule {
        content_id: String,
        #[structopt(long = "at", help = "An ISO 8601 timestamp")]
        at: Option<String>,
    },
    #[structopt(about = "Publish a post right now")]
    Publish { content_id: String },
    #[structopt(about = "Show trending topics")]
    Trending,
    #[structopt(about = "Show the content calendar")]
    Calendar { start: String, end: String },
    #[structopt(about = "Show the analytics dashboard")]
    Dashboard,
    #[structopt(name = "post-analytics", about = "Show a post's analytics")]
    PostAnalytics { post_id: String },
    #[structopt(about = "Show engagement trends")]
    Trends {
        #[structopt(long = "days")]
        days: Option<u32>,
    },
    #[structopt(name = "top-content", about = "Show the best performing posts")]
    TopContent,
    #[structopt(about = "Show the user's profile")]
    Profile,
    #[structopt(name = "update-profile", about = "Update the profile from a JSON object")]
    UpdateProfile { changes: String },
    #[structopt(name = "linkedin-status", about = "Is LinkedIn connected?")]
    LinkedInStatus,
}
