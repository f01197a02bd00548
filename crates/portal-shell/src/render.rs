//! Terminal rendering of the portal views.

use colored::Colorize;
use portal_application::{Dashboard, SubmitOutcome};
use portal_core::catalog::Candidate;
use portal_core::certificate::{Certificate, CertificateDraft, VisibleRecognitionFields};
use portal_core::project::ProjectDraft;
use portal_core::reference::{PanelView, ReferencePicker};
use portal_core::session::SessionStatus;

pub fn header() {
    println!("{}", "=== Student Portal ===".bright_magenta().bold());
    println!(
        "{}",
        "Type '/login <user> <password>' to sign in, '/help' for commands, '/quit' to exit."
            .bright_black()
    );
    println!();
}

pub fn help() {
    let lines = [
        ("/login <user> <password>", "sign in"),
        ("/logout", "sign out"),
        ("/whoami", "show the signed-in user"),
        ("/dashboard", "list projects and certificates"),
        ("/project new | edit <id> | delete <id>", "manage projects"),
        ("/certificate new [category] | delete <id>", "manage certificates"),
        ("/quit", "exit"),
    ];
    for (usage, text) in lines {
        println!("  {} {}", format!("{usage:<44}").bright_cyan(), text.bright_black());
    }
    println!("{}", "While a form is open:".bright_yellow());
    let form_lines = [
        ("set <field> <value>", "title, description, year_and_sem, status, github_link, ..."),
        ("tech <text> | contrib <text>", "search technologies or contributors"),
        ("pick <n> | enter | add <label>", "select a suggestion, accept, or add new"),
        ("remove <n> | close", "remove a chip, close the suggestion panel"),
        ("recognition rank|other|none", "choose the recognition kind"),
        ("file <path>", "attach the certificate scan"),
        ("show | submit | cancel | dismiss", "view, send, discard, clear the banner"),
    ];
    for (usage, text) in form_lines {
        println!("  {} {}", format!("{usage:<44}").cyan(), text.bright_black());
    }
}

pub fn info(message: &str) {
    println!("{}", message.bright_black());
}

pub fn success(message: &str) {
    println!("{}", message.bright_green());
}

pub fn warning(message: &str) {
    println!("{}", message.yellow());
}

pub fn error(message: &str) {
    eprintln!("{}", message.red());
}

pub fn banner(message: Option<&str>) {
    if let Some(message) = message {
        println!("{} {}", "[!]".red().bold(), message.red());
    }
}

pub fn status(status: &SessionStatus) {
    match &status.user {
        Some(user) => println!(
            "{} {} ({})",
            "Signed in as".bright_black(),
            user.display_name().bright_green(),
            user.username
        ),
        None if status.loading => info("Checking session..."),
        None => info("Not signed in."),
    }
    banner(status.error.as_deref());
}

pub fn outcome(outcome: &SubmitOutcome) {
    match outcome {
        SubmitOutcome::Submitted => success("Saved."),
        SubmitOutcome::AlreadySubmitting => warning("A submission is already in progress."),
        SubmitOutcome::Invalid(message) | SubmitOutcome::Failed(message) => {
            banner(Some(message))
        }
    }
}

fn certificate_line(certificate: &Certificate) {
    let year = certificate
        .year_and_sem
        .map(|year| year.to_string())
        .unwrap_or_default();
    println!(
        "  {} {}  {}  {}",
        format!("#{}", certificate.id).bright_black(),
        certificate.title.bold(),
        certificate.source,
        year.bright_black()
    );
}

fn certificate_section(title: &str, certificates: &[Certificate]) {
    println!("{}", format!("{title} ({})", certificates.len()).bright_yellow());
    if certificates.is_empty() {
        info("  none");
    }
    for certificate in certificates {
        certificate_line(certificate);
    }
}

pub fn dashboard(dashboard: &Dashboard) {
    banner(dashboard.banner.as_deref());
    println!("{}", format!("Projects ({})", dashboard.projects.len()).bright_yellow());
    if dashboard.projects.is_empty() {
        info("  none");
    }
    for project in &dashboard.projects {
        println!(
            "  {} {}  [{}]",
            format!("#{}", project.id).bright_black(),
            project.title.bold(),
            project.status
        );
    }
    certificate_section("Technical Certifications", &dashboard.technical);
    certificate_section("Foreign Languages", &dashboard.foreign_languages);
    certificate_section("Co- and Extra-Curricular", &dashboard.other);
}

fn chips(name: &str, picker: &ReferencePicker) {
    let selection = picker.selection();
    let rendered: Vec<String> = selection
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mut chip = format!("{}:{}", index + 1, item.label());
            if item.is_new() {
                chip.push_str(" (new)");
            }
            if selection.is_protected(&item.key()) {
                chip.push_str(" (you)");
            }
            chip
        })
        .collect();
    println!("  {:<14} {}", name, rendered.join("  ").bright_cyan());
}

pub fn panel(view: &PanelView) {
    match view {
        PanelView::Closed => {}
        PanelView::Suggestions(candidates) => suggestions(candidates),
        PanelView::AddNew(query) => {
            println!("    {}", format!("Add \"{query}\"  (enter)").bright_green())
        }
        PanelView::NoSuggestions => info("    No suggestions"),
    }
}

fn suggestions(candidates: &[Candidate]) {
    for (index, candidate) in candidates.iter().enumerate() {
        println!("    {} {}", format!("{}.", index + 1).bright_black(), candidate.label);
    }
}

fn field(name: &str, value: &str) {
    println!("  {:<14} {}", name, value);
}

pub fn project_draft(draft: &ProjectDraft) {
    let mode = if draft.mode.is_edit() {
        "Edit project"
    } else {
        "New project"
    };
    println!("{}", mode.bright_magenta().bold());
    field("title", &draft.title);
    field("description", &draft.description);
    field(
        "year_and_sem",
        &draft.year_and_sem.map(|year| year.to_string()).unwrap_or_default(),
    );
    field("status", &draft.status.to_string());
    field("github_link", &draft.github_link);
    chips("technologies", &draft.technologies);
    chips("contributors", &draft.contributors);
}

pub fn certificate_draft(draft: &CertificateDraft, visible: VisibleRecognitionFields) {
    println!("{}", "New certificate".bright_magenta().bold());
    field("title", &draft.title);
    field("source", &draft.source);
    field("category", draft.category.title());
    field(
        "year_and_sem",
        &draft.year_and_sem.map(|year| year.to_string()).unwrap_or_default(),
    );
    field(
        "file",
        draft.file.as_ref().map(|file| file.file_name.as_str()).unwrap_or(""),
    );
    field("course_link", &draft.course_link);
    field("course_provider", &draft.course_provider);
    field("domain", &draft.domain);
    field("duration", &draft.duration);
    field("event_type", &draft.event_type);
    field("fest_name", &draft.fest_name);
    field("recognition", &draft.recognition.kind().to_string());
    if visible.rank {
        field("rank", draft.recognition.rank());
    }
    if visible.other {
        field("other", draft.recognition.other());
    }
    if draft.shows_technologies() {
        chips("technologies", &draft.technologies);
    }
}
