use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use folio_sdk::{Collection, LeadCategory, Theme};
use folio_types::ProjectCategory;

#[derive(Parser)]
#[command(
    name = "folio",
    about = "Folio: portfolio content store and operator console",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding folio.toml and the store
    #[arg(long, global = true, default_value = "./folio-data")]
    pub data_dir: PathBuf,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in with an access key
    Login(LoginArgs),
    /// Sign out
    Logout,
    /// Show the current session and its permissions
    Whoami,
    /// Show or update the owner profile
    Profile(ProfileArgs),
    /// List entries of a collection
    List(ListArgs),
    /// Search projects, posts and skills
    Search(SearchArgs),
    /// Render a blog post with its related posts
    Post(PostArgs),
    /// Create, edit or delete blog posts
    Blog(EntryArgs),
    /// Create, edit or delete projects
    Project(EntryArgs),
    /// Create, edit or delete experience entries
    Experience(EntryArgs),
    /// Submit, triage or delete project requests
    Lead(LeadArgs),
    /// Write a full JSON backup
    Export(ExportArgs),
    /// Show or set the colour theme
    Theme(ThemeArgs),
    /// Adopt changes written by another process
    Sync,
}

#[derive(Args)]
pub struct LoginArgs {
    pub key: String,
}

#[derive(Args, Default)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub role: Option<String>,
    #[arg(long)]
    pub bio: Option<String>,
    #[arg(long)]
    pub resume_url: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub github: Option<String>,
    #[arg(long)]
    pub linkedin: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
}

impl ProfileArgs {
    pub fn is_update(&self) -> bool {
        [
            &self.name,
            &self.role,
            &self.bio,
            &self.resume_url,
            &self.email,
            &self.phone,
            &self.github,
            &self.linkedin,
            &self.address,
        ]
        .iter()
        .any(|field| field.is_some())
    }
}

#[derive(Args)]
pub struct ListArgs {
    pub collection: Collection,
    #[arg(short, long, default_value = "")]
    pub query: String,
}

#[derive(Args)]
pub struct SearchArgs {
    pub query: String,
}

#[derive(Args)]
pub struct PostArgs {
    pub id: String,
}

#[derive(Args)]
pub struct EntryArgs {
    #[command(subcommand)]
    pub action: EntryAction,
}

#[derive(Subcommand)]
pub enum EntryAction {
    /// Open a blank draft, fill it from the flags and save
    Create(FieldArgs),
    /// Load an entry, apply the flags and save
    Edit(EditArgs),
    /// Remove an entry
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct EditArgs {
    pub id: String,
    #[command(flatten)]
    pub fields: FieldArgs,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub id: String,
    /// Skip the confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Draft fields. Each flag applies to the collections that carry it.
#[derive(Args, Default)]
pub struct FieldArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub excerpt: Option<String>,
    #[arg(long)]
    pub body: Option<String>,
    /// Read the body from a file
    #[arg(long, conflicts_with = "body")]
    pub body_file: Option<PathBuf>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
    #[arg(long)]
    pub read_time: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, value_delimiter = ',')]
    pub stack: Vec<String>,
    #[arg(long)]
    pub demo_url: Option<String>,
    #[arg(long)]
    pub source_url: Option<String>,
    #[arg(long)]
    pub project_category: Option<ProjectCategory>,
    #[arg(long)]
    pub featured: Option<bool>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub role: Option<String>,
    #[arg(long)]
    pub period: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long, value_delimiter = ',')]
    pub tasks: Vec<String>,
}

#[derive(Args)]
pub struct LeadArgs {
    #[command(subcommand)]
    pub action: LeadAction,
}

#[derive(Subcommand)]
pub enum LeadAction {
    /// Send a project request through the public form
    Submit(LeadSubmitArgs),
    /// Advance a request: new, contacted, closed
    Toggle(LeadIdArgs),
    /// Remove a request
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct LeadSubmitArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, default_value = "Web App")]
    pub category: LeadCategory,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub budget: Option<String>,
}

#[derive(Args)]
pub struct LeadIdArgs {
    pub id: String,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Directory to write the backup into
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,
}

#[derive(Args)]
pub struct ThemeArgs {
    pub theme: Option<Theme>,
    /// Switch between dark and light
    #[arg(long, conflicts_with = "theme")]
    pub toggle: bool,
}
