use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context};
use chrono::Utc;
use colored::Colorize;
use serde_json::json;

use folio_sdk::{Collection, Draft, EditOutcome, Folio, ItemId, LeadForm};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let folio = Folio::open(&cli.data_dir)
        .with_context(|| format!("opening {}", cli.data_dir.display()))?;
    let json = cli.format == OutputFormat::Json;
    match cli.command {
        Command::Login(args) => cmd_login(&folio, args, json),
        Command::Logout => cmd_logout(&folio, json),
        Command::Whoami => cmd_whoami(&folio, json),
        Command::Profile(args) => cmd_profile(&folio, args, json),
        Command::List(args) => cmd_list(&folio, args, json),
        Command::Search(args) => cmd_search(&folio, args, json),
        Command::Post(args) => cmd_post(&folio, args, json),
        Command::Blog(args) => cmd_entry(&folio, Collection::BlogPosts, args.action, json),
        Command::Project(args) => cmd_entry(&folio, Collection::Projects, args.action, json),
        Command::Experience(args) => cmd_entry(&folio, Collection::Experiences, args.action, json),
        Command::Lead(args) => cmd_lead(&folio, args.action, json).await,
        Command::Export(args) => cmd_export(&folio, args, json),
        Command::Theme(args) => cmd_theme(&folio, args, json),
        Command::Sync => cmd_sync(&folio, json),
    }
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_login(folio: &Folio, args: LoginArgs, json: bool) -> anyhow::Result<()> {
    let session = folio.login(&args.key)?;
    if json {
        return print_json(&json!({ "session": session, "role": session.role() }));
    }
    println!("{} Signed in ({})", "✓".green().bold(), session.to_string().cyan());
    Ok(())
}

fn cmd_logout(folio: &Folio, json: bool) -> anyhow::Result<()> {
    folio.logout()?;
    if json {
        return print_json(&json!({ "session": folio.session() }));
    }
    println!("{} Signed out.", "✓".green());
    Ok(())
}

fn cmd_whoami(folio: &Folio, json: bool) -> anyhow::Result<()> {
    let session = folio.session();
    let permissions = folio.permissions();
    let sections = folio.visible_sections();
    if json {
        return print_json(&json!({
            "session": session,
            "role": session.role(),
            "permissions": {
                "canModify": permissions.can_modify,
                "canDelete": permissions.can_delete,
                "canViewLeads": permissions.can_view_leads,
                "canManageProfile": permissions.can_manage_profile,
            },
            "sections": sections,
        }));
    }

    match session.role() {
        Some(role) => println!("Signed in as {}", role.to_string().yellow().bold()),
        None => println!("Not signed in."),
    }
    let flag = |allowed: bool| if allowed { "yes".green() } else { "no".red() };
    println!("  modify:         {}", flag(permissions.can_modify));
    println!("  delete:         {}", flag(permissions.can_delete));
    println!("  view leads:     {}", flag(permissions.can_view_leads));
    println!("  manage profile: {}", flag(permissions.can_manage_profile));
    let names: Vec<&str> = sections.iter().map(|s| s.as_str()).collect();
    println!("  sections:       {}", names.join(", ").cyan());

    if session.is_authenticated() {
        let overview = folio.editor().overview();
        println!(
            "\n{} posts, {} projects, {} experiences, {} new leads",
            overview.post_count.to_string().bold(),
            overview.project_count.to_string().bold(),
            overview.experience_count.to_string().bold(),
            overview.new_lead_count.to_string().bold(),
        );
    }
    Ok(())
}

fn cmd_profile(folio: &Folio, args: ProfileArgs, json: bool) -> anyhow::Result<()> {
    if args.is_update() {
        let mut profile = folio.document().profile.clone();
        let contact = &mut profile.contact;
        let fields = [
            (args.name, &mut profile.name),
            (args.role, &mut profile.role),
            (args.bio, &mut profile.bio),
            (args.resume_url, &mut profile.resume_url),
            (args.email, &mut contact.email),
            (args.phone, &mut contact.phone),
            (args.github, &mut contact.github),
            (args.linkedin, &mut contact.linkedin),
            (args.address, &mut contact.address),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        let outcome = folio.editor().update_profile(profile)?;
        return report(&outcome, json);
    }

    let profile = folio.document().profile.clone();
    if json {
        return print_json(&serde_json::to_value(&profile)?);
    }
    println!("{} ({})", profile.name.bold(), profile.role.cyan());
    if !profile.bio.is_empty() {
        println!("\n{}\n", profile.bio);
    }
    let contact = &profile.contact;
    for (label, value) in [
        ("email", &contact.email),
        ("phone", &contact.phone),
        ("github", &contact.github),
        ("linkedin", &contact.linkedin),
        ("address", &contact.address),
        ("resume", &profile.resume_url),
    ] {
        if !value.is_empty() {
            println!("  {:<9}{}", format!("{label}:").dimmed(), value);
        }
    }
    Ok(())
}

fn cmd_list(folio: &Folio, args: ListArgs, json: bool) -> anyhow::Result<()> {
    let items = folio.editor().filter_items(args.collection, &args.query);
    if json {
        return print_json(&serde_json::to_value(&items)?);
    }
    if items.is_empty() {
        if args.collection == Collection::LeadRequests
            && !folio.permissions().can_view_leads
        {
            println!("{}", "Leads are only visible to administrators.".yellow());
        } else {
            println!("No {} found.", args.collection);
        }
        return Ok(());
    }
    for item in &items {
        println!("{}  {}", item.id.to_string().yellow(), item.title.bold());
        if !item.subtitle.is_empty() {
            println!("    {}", item.subtitle.dimmed());
        }
    }
    Ok(())
}

fn cmd_search(folio: &Folio, args: SearchArgs, json: bool) -> anyhow::Result<()> {
    let results = folio.search(&args.query);
    if json {
        return print_json(&serde_json::to_value(&results)?);
    }
    if results.is_empty() {
        println!("No results for {}.", args.query.bold());
        return Ok(());
    }
    if !results.projects.is_empty() {
        println!("{}", "Projects".bold().underline());
        for project in &results.projects {
            println!("  {}  {}", project.id.to_string().yellow(), project.title);
        }
    }
    if !results.posts.is_empty() {
        println!("{}", "Articles".bold().underline());
        for post in &results.posts {
            println!("  {}  {}", post.id.to_string().yellow(), post.title);
        }
    }
    if !results.skills.is_empty() {
        println!("{}", "Skills".bold().underline());
        println!("  {}", results.skills.join(", ").cyan());
    }
    Ok(())
}

fn cmd_post(folio: &Folio, args: PostArgs, json: bool) -> anyhow::Result<()> {
    let page = folio.post_page(&ItemId::new(args.id))?;
    if json {
        return print_json(&serde_json::to_value(&page)?);
    }
    let post = &page.post;
    println!("{}", post.title.bold());
    println!(
        "{} · {} · {}",
        post.date.dimmed(),
        post.category.cyan(),
        post.read_time.dimmed()
    );
    println!("\n{}\n", page.html);
    if !page.related.is_empty() {
        println!("{}", "Related".bold().underline());
        for related in &page.related {
            println!("  {}  {}", related.id.to_string().yellow(), related.title);
        }
    }
    Ok(())
}

fn cmd_entry(
    folio: &Folio,
    collection: Collection,
    action: EntryAction,
    json: bool,
) -> anyhow::Result<()> {
    let editor = folio.editor();
    let (outcome, fields) = match action {
        EntryAction::Create(fields) => (editor.begin_create(collection)?, fields),
        EntryAction::Edit(args) => (editor.begin_edit(collection, &ItemId::new(args.id))?, args.fields),
        EntryAction::Delete(args) => {
            let outcome = editor.delete(collection, &ItemId::new(args.id), |title| {
                args.yes || confirm(&format!("Delete \"{title}\"?"))
            })?;
            return report(&outcome, json);
        }
    };
    if !matches!(outcome, EditOutcome::Editing) {
        return report(&outcome, json);
    }

    let body = match &fields.body_file {
        Some(path) => Some(read_body(path)?),
        None => fields.body.clone(),
    };
    editor.update_draft(|draft| apply_fields(draft, fields, body))?;
    let outcome = editor.save()?;
    editor.cancel();
    report(&outcome, json)
}

fn read_body(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn apply_fields(draft: &mut Draft, fields: FieldArgs, body: Option<String>) {
    fn set(slot: &mut String, value: Option<String>) {
        if let Some(value) = value {
            *slot = value;
        }
    }
    fn set_list(slot: &mut Vec<String>, values: Vec<String>) {
        let values: Vec<String> = values
            .into_iter()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        if !values.is_empty() {
            *slot = values;
        }
    }

    match draft {
        Draft::BlogPost { post, .. } => {
            set(&mut post.title, fields.title);
            set(&mut post.excerpt, fields.excerpt);
            set(&mut post.body, body);
            set(&mut post.category, fields.category);
            set(&mut post.read_time, fields.read_time);
            set(&mut post.image, fields.image);
            set_list(&mut post.tags, fields.tags);
        }
        Draft::Project { project, .. } => {
            set(&mut project.title, fields.title);
            set(&mut project.description, fields.description);
            set_list(&mut project.stack, fields.stack);
            if fields.demo_url.is_some() {
                project.demo_url = fields.demo_url;
            }
            if fields.source_url.is_some() {
                project.source_url = fields.source_url;
            }
            if fields.image.is_some() {
                project.image = fields.image;
            }
            if let Some(category) = fields.project_category {
                project.category = category;
            }
            if let Some(featured) = fields.featured {
                project.featured = featured;
            }
        }
        Draft::Experience { experience, .. } => {
            set(&mut experience.company, fields.company);
            set(&mut experience.role, fields.role);
            set(&mut experience.period, fields.period);
            set(&mut experience.location, fields.location);
            set(&mut experience.description, fields.description);
            set_list(&mut experience.tasks, fields.tasks);
        }
    }
}

fn confirm(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

async fn cmd_lead(folio: &Folio, action: LeadAction, json: bool) -> anyhow::Result<()> {
    match action {
        LeadAction::Submit(args) => {
            let lead = folio
                .submit_lead(LeadForm {
                    client_name: args.name,
                    client_email: args.email,
                    category: args.category,
                    description: args.description,
                    budget: args.budget,
                })
                .await?;
            if json {
                return print_json(&serde_json::to_value(&lead)?);
            }
            println!(
                "{} Request {} received from {}.",
                "✓".green().bold(),
                lead.id.to_string().yellow(),
                lead.client_name.bold()
            );
            Ok(())
        }
        LeadAction::Toggle(args) => {
            let outcome = folio.editor().toggle_lead_status(&ItemId::new(args.id))?;
            report(&outcome, json)
        }
        LeadAction::Delete(args) => {
            let outcome = folio.editor().delete(
                Collection::LeadRequests,
                &ItemId::new(args.id),
                |name| args.yes || confirm(&format!("Delete the request from {name}?")),
            )?;
            report(&outcome, json)
        }
    }
}

fn cmd_export(folio: &Folio, args: ExportArgs, json: bool) -> anyhow::Result<()> {
    let outcome = folio.editor().export(Utc::now())?;
    let EditOutcome::Exported(export) = outcome else {
        return report(&outcome, json);
    };
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;
    let path = args.out.join(&export.file_name);
    std::fs::write(&path, &export.contents)
        .with_context(|| format!("writing {}", path.display()))?;
    if json {
        return print_json(&json!({ "exported": path, "bytes": export.contents.len() }));
    }
    println!("{} Exported to {}", "✓".green().bold(), path.display().to_string().bold());
    Ok(())
}

fn cmd_theme(folio: &Folio, args: ThemeArgs, json: bool) -> anyhow::Result<()> {
    let theme = match (args.theme, args.toggle) {
        (Some(theme), _) => {
            folio.set_theme(theme)?;
            theme
        }
        (None, true) => folio.toggle_theme()?,
        (None, false) => folio.theme()?,
    };
    if json {
        return print_json(&json!({ "theme": theme }));
    }
    println!("Theme: {}", theme.as_str().cyan());
    Ok(())
}

fn cmd_sync(folio: &Folio, json: bool) -> anyhow::Result<()> {
    let adopted = folio.sync()?;
    if json {
        return print_json(&json!({ "adopted": adopted, "revision": folio.store().revision() }));
    }
    if adopted {
        println!("{} Picked up external changes.", "✓".green());
    } else {
        println!("Already up to date.");
    }
    Ok(())
}

/// Print an editor outcome. Denied and invalid outcomes become errors so the
/// process exits non-zero.
fn report(outcome: &EditOutcome, json: bool) -> anyhow::Result<()> {
    let value = match outcome {
        EditOutcome::Editing => json!({ "outcome": "editing" }),
        EditOutcome::Saved { id, created, revision } => {
            json!({ "outcome": "saved", "id": id, "created": created, "revision": revision })
        }
        EditOutcome::Deleted { id, revision } => {
            json!({ "outcome": "deleted", "id": id, "revision": revision })
        }
        EditOutcome::LeadUpdated { id, revision } => {
            json!({ "outcome": "leadUpdated", "id": id, "revision": revision })
        }
        EditOutcome::ProfileUpdated { revision } => {
            json!({ "outcome": "profileUpdated", "revision": revision })
        }
        EditOutcome::Exported(export) => {
            json!({ "outcome": "exported", "fileName": export.file_name })
        }
        EditOutcome::Denied { reason } => json!({ "outcome": "denied", "reason": reason }),
        EditOutcome::Invalid { reason } => json!({ "outcome": "invalid", "reason": reason }),
        EditOutcome::Declined => json!({ "outcome": "declined" }),
    };
    if json {
        print_json(&value)?;
    } else if let Some(note) = outcome_line(outcome) {
        println!("{note}");
    }
    match outcome {
        EditOutcome::Denied { reason } => bail!("permission denied: {reason}"),
        EditOutcome::Invalid { reason } => bail!("cannot save: {reason}"),
        _ => Ok(()),
    }
}

fn outcome_line(outcome: &EditOutcome) -> Option<String> {
    let line = match outcome {
        EditOutcome::Saved { id, created: true, .. } => {
            format!("{} Created {}", "✓".green().bold(), id.to_string().yellow())
        }
        EditOutcome::Saved { id, .. } => {
            format!("{} Updated {}", "✓".green().bold(), id.to_string().yellow())
        }
        EditOutcome::Deleted { id, .. } => {
            format!("{} Deleted {}", "✓".green(), id.to_string().yellow())
        }
        EditOutcome::LeadUpdated { id, .. } => {
            format!("{} Advanced {}", "✓".green(), id.to_string().yellow())
        }
        EditOutcome::ProfileUpdated { .. } => format!("{} Profile updated.", "✓".green()),
        EditOutcome::Declined => "Nothing deleted.".dimmed().to_string(),
        _ => return None,
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn run(dir: &Path, args: &[&str]) -> anyhow::Result<()> {
        let mut argv = vec!["folio", "--data-dir"];
        let dir = dir.to_str().unwrap();
        argv.push(dir);
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        tokio::runtime::Runtime::new()?.block_on(run_command(cli))
    }

    fn open(dir: &Path) -> Folio {
        Folio::open(dir).unwrap()
    }

    #[test]
    fn login_persists_between_invocations() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["login", "editor"]).unwrap();
        assert!(open(dir.path()).session().is_authenticated());
        run(dir.path(), &["logout"]).unwrap();
        assert!(!open(dir.path()).session().is_authenticated());
    }

    #[test]
    fn bad_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(dir.path(), &["login", "wrong"]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid access key.");
    }

    #[test]
    fn create_blog_post_from_flags() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["login", "admin"]).unwrap();
        run(
            dir.path(),
            &[
                "blog", "create", "--title", "Ownership", "--excerpt", "Borrowing", "--body",
                "Text", "--tags", "Rust",
            ],
        )
        .unwrap();
        let doc = open(dir.path()).document();
        assert_eq!(doc.blog_posts[0].title, "Ownership");
        assert_eq!(doc.blog_posts[0].tags, vec!["Rust"]);
    }

    #[test]
    fn missing_fields_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["login", "admin"]).unwrap();
        let err = run(dir.path(), &["project", "create", "--title", "Half"]).unwrap_err();
        assert!(err.to_string().starts_with("cannot save"));
        assert!(open(dir.path()).document().projects.iter().all(|p| p.title != "Half"));
    }

    #[test]
    fn viewer_cannot_edit() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["login", "viewer"]).unwrap();
        let err = run(dir.path(), &["experience", "edit", "experience-nexus", "--period", "2020"])
            .unwrap_err();
        assert!(err.to_string().starts_with("permission denied"));
    }

    #[test]
    fn edit_and_delete_project() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["login", "admin"]).unwrap();
        run(dir.path(), &["project", "edit", "project-runweek", "--featured", "true"]).unwrap();
        let doc = open(dir.path()).document();
        assert!(doc.project(&ItemId::new("project-runweek")).unwrap().featured);

        run(dir.path(), &["project", "delete", "project-runweek", "--yes"]).unwrap();
        assert!(open(dir.path()).document().project(&ItemId::new("project-runweek")).is_none());
    }

    #[test]
    fn lead_submit_then_toggle() {
        let dir = tempfile::tempdir().unwrap();
        run(
            dir.path(),
            &[
                "lead", "submit", "--name", "Dana", "--email", "dana@example.com",
                "--description", "Booking site",
            ],
        )
        .unwrap();
        let id = open(dir.path()).document().lead_requests[0].id.clone();

        run(dir.path(), &["login", "admin"]).unwrap();
        run(dir.path(), &["lead", "toggle", id.as_str()]).unwrap();
        let status = open(dir.path()).document().lead_requests[0].status;
        assert_eq!(status, folio_sdk::LeadStatus::Contacted);
    }

    #[test]
    fn export_writes_backup_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("backups");
        run(dir.path(), &["login", "admin"]).unwrap();
        run(dir.path(), &["export", "--out", out.to_str().unwrap()]).unwrap();
        let files: Vec<_> = std::fs::read_dir(&out).unwrap().collect();
        assert_eq!(files.len(), 1);
        let name = files[0].as_ref().unwrap().file_name();
        assert!(name.to_string_lossy().starts_with("backup-"));
    }

    #[test]
    fn theme_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["theme", "light"]).unwrap();
        assert_eq!(open(dir.path()).theme().unwrap(), folio_sdk::Theme::Light);
        run(dir.path(), &["theme", "--toggle"]).unwrap();
        assert_eq!(open(dir.path()).theme().unwrap(), folio_sdk::Theme::Dark);
    }

    #[test]
    fn profile_update_requires_login() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(dir.path(), &["profile", "--bio", "New"]).is_err());
        run(dir.path(), &["login", "admin"]).unwrap();
        run(dir.path(), &["profile", "--bio", "New"]).unwrap();
        assert_eq!(open(dir.path()).document().profile.bio, "New");
    }
}
