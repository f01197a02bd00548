//! The interactive session: routes parsed commands to the application
//! services and renders the results.

use std::path::Path;
use std::sync::Arc;

use portal_application::forms::ProjectReferenceField;
use portal_application::{
    CertificateFormController, DashboardService, ProjectFormController, SessionManager,
};
use portal_core::catalog::CatalogRepository;
use portal_core::certificate::{CertificateField, CertificateFile, CertificateRepository};
use portal_core::config::FormSettings;
use portal_core::error::{PortalError, Result};
use portal_core::project::{ProjectField, ProjectRepository};
use portal_core::reference::ConfirmOutcome;
use portal_core::session::{Access, AuthGateway, Credentials};
use portal_core::user::CurrentUser;
use portal_infrastructure::HttpPortalClient;

use crate::commands::{Command, FieldTarget, FormCommand, parse_command, parse_form_command};
use crate::render;

/// What the REPL loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The backend seams the shell talks through.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<dyn AuthGateway>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub certificates: Arc<dyn CertificateRepository>,
}

impl Services {
    pub fn from_client(client: Arc<HttpPortalClient>) -> Self {
        Self {
            auth: client.clone(),
            catalog: client.clone(),
            projects: client.clone(),
            certificates: client,
        }
    }
}

enum OpenForm {
    Project {
        form: ProjectFormController,
        field: ProjectReferenceField,
    },
    Certificate(CertificateFormController),
}

enum FormStep {
    Stay,
    Close,
    Saved,
}

pub struct Shell {
    services: Services,
    session: SessionManager,
    dashboard: DashboardService,
    forms: FormSettings,
    open: Option<OpenForm>,
}

fn report(err: &PortalError) {
    render::error(&err.detail_or(&err.to_string()));
}

fn to_project_field(target: FieldTarget) -> ProjectReferenceField {
    match target {
        FieldTarget::Technologies => ProjectReferenceField::Technologies,
        FieldTarget::Contributors => ProjectReferenceField::Contributors,
    }
}

fn render_confirm(outcome: &ConfirmOutcome) {
    match outcome {
        ConfirmOutcome::SelectedExisting(id) => render::info(&format!("Selected #{id}")),
        ConfirmOutcome::CreatedNew(_) => render::info("Added new entry"),
        ConfirmOutcome::Nothing => render::info("Nothing to add"),
    }
}

async fn read_certificate_file(path: &Path) -> Result<CertificateFile> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| PortalError::io(format!("{}: {e}", path.display())))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| PortalError::validation(format!("Not a file: {}", path.display())))?;
    CertificateFile::new(file_name, bytes)
}

impl Shell {
    pub fn new(services: Services, forms: FormSettings) -> Self {
        Self {
            session: SessionManager::new(services.auth.clone()),
            dashboard: DashboardService::new(
                services.projects.clone(),
                services.certificates.clone(),
            ),
            services,
            forms,
            open: None,
        }
    }

    #[cfg(test)]
    fn session(&self) -> &SessionManager {
        &self.session
    }

    #[cfg(test)]
    fn has_open_form(&self) -> bool {
        self.open.is_some()
    }

    /// Prompt shown by the REPL, naming the open form if any.
    pub fn prompt(&self) -> &'static str {
        match self.open {
            Some(OpenForm::Project { .. }) => "project> ",
            Some(OpenForm::Certificate(_)) => "certificate> ",
            None => ">> ",
        }
    }

    /// Runs the startup session check.
    pub async fn start(&self) {
        self.session.check_status().await;
        render::status(&self.session.status());
    }

    pub async fn handle(&mut self, line: &str) -> Flow {
        let line = line.trim();
        if line.is_empty() {
            return Flow::Continue;
        }

        if line.starts_with('/') {
            match parse_command(line) {
                Ok(command) => return self.run(command).await,
                Err(err) => report(&err),
            }
            return Flow::Continue;
        }

        if self.open.is_none() {
            render::warning("No form is open. Type /help for commands.");
            return Flow::Continue;
        }
        match parse_form_command(line) {
            Ok(command) => self.run_form(command).await,
            Err(err) => report(&err),
        }
        Flow::Continue
    }

    /// The signed-in user, or a hint to sign in.
    fn require_user(&self) -> Option<CurrentUser> {
        match self.session.status().access() {
            Access::Granted(user) => Some(user),
            Access::Loading => {
                render::warning("Still checking the session, try again in a moment.");
                None
            }
            Access::RedirectToLogin => {
                render::warning("Please log in first: /login <user> <password>");
                None
            }
        }
    }

    fn discard_form(&mut self) {
        if self.open.take().is_some() {
            render::info("Open form discarded.");
        }
    }

    async fn run(&mut self, command: Command) -> Flow {
        match command {
            Command::Login { username, password } => {
                let outcome = self
                    .session
                    .login(&Credentials::new(username, password))
                    .await;
                match outcome.error {
                    None => render::status(&self.session.status()),
                    Some(message) => render::banner(Some(&message)),
                }
            }
            Command::Logout => {
                self.open = None;
                self.session.logout().await;
                render::status(&self.session.status());
            }
            Command::WhoAmI => render::status(&self.session.status()),
            Command::Dashboard => {
                if self.require_user().is_some() {
                    self.show_dashboard().await;
                }
            }
            Command::ProjectNew => {
                if let Some(user) = self.require_user() {
                    self.discard_form();
                    let form = ProjectFormController::open_create(
                        self.services.projects.clone(),
                        self.services.catalog.clone(),
                        &user,
                    )
                    .await;
                    render::project_draft(&form.draft().await);
                    self.open = Some(OpenForm::Project {
                        form,
                        field: ProjectReferenceField::Technologies,
                    });
                }
            }
            Command::ProjectEdit(id) => {
                if let Some(user) = self.require_user() {
                    self.discard_form();
                    match ProjectFormController::open_edit(
                        self.services.projects.clone(),
                        self.services.catalog.clone(),
                        &id,
                        Some(&user),
                    )
                    .await
                    {
                        Ok(form) => {
                            render::project_draft(&form.draft().await);
                            self.open = Some(OpenForm::Project {
                                form,
                                field: ProjectReferenceField::Technologies,
                            });
                        }
                        Err(err) => report(&err),
                    }
                }
            }
            Command::ProjectDelete(id) => {
                if self.require_user().is_some() {
                    match self.dashboard.delete_project(&id).await {
                        Ok(()) => render::success(&format!("Project #{id} deleted.")),
                        Err(message) => render::banner(Some(&message)),
                    }
                }
            }
            Command::CertificateNew(category) => {
                if self.require_user().is_some() {
                    self.discard_form();
                    let form = CertificateFormController::open(
                        self.services.certificates.clone(),
                        self.services.catalog.clone(),
                        category.unwrap_or(self.forms.default_certificate_category),
                        self.forms.recognition_policy,
                    )
                    .await;
                    render::certificate_draft(&form.draft().await, form.visible_recognition().await);
                    self.open = Some(OpenForm::Certificate(form));
                }
            }
            Command::CertificateDelete(id) => {
                if self.require_user().is_some() {
                    match self.dashboard.delete_certificate(&id).await {
                        Ok(()) => render::success(&format!("Certificate #{id} deleted.")),
                        Err(message) => render::banner(Some(&message)),
                    }
                }
            }
            Command::Help => render::help(),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    async fn show_dashboard(&self) {
        let dashboard = self.dashboard.load().await;
        render::dashboard(&dashboard);
    }

    async fn run_form(&mut self, command: FormCommand) {
        let step = match self.open.as_mut() {
            Some(OpenForm::Project { form, field }) => project_step(form, field, command).await,
            Some(OpenForm::Certificate(form)) => certificate_step(form, command).await,
            None => return,
        };
        match step {
            Ok(FormStep::Stay) => {}
            Ok(FormStep::Close) => {
                self.open = None;
                render::info("Form closed.");
            }
            Ok(FormStep::Saved) => {
                self.open = None;
                render::success("Saved.");
                self.show_dashboard().await;
            }
            Err(err) => report(&err),
        }
    }
}

async fn project_step(
    form: &ProjectFormController,
    field: &mut ProjectReferenceField,
    command: FormCommand,
) -> Result<FormStep> {
    match command {
        FormCommand::Set { field: name, value } => {
            let target = name
                .parse::<ProjectField>()
                .map_err(|_| PortalError::validation(format!("Unknown project field: '{name}'")))?;
            form.set_field(target, &value).await?;
        }
        FormCommand::Query { target, text } => {
            *field = to_project_field(target);
            form.set_query(*field, &text).await;
            render::panel(&form.panel(*field).await);
        }
        FormCommand::Enter => render_confirm(&form.confirm(*field).await),
        FormCommand::Pick(n) => {
            if !form.pick(*field, n - 1).await {
                return Err(PortalError::validation(format!("No suggestion #{n}")));
            }
        }
        FormCommand::Add(label) => {
            form.add_new(*field, &label).await;
        }
        FormCommand::Remove(n) => {
            if !form.remove(*field, n - 1).await {
                return Err(PortalError::validation(format!("Chip #{n} cannot be removed")));
            }
        }
        FormCommand::Close => form.click_outside().await,
        FormCommand::Recognition(_) | FormCommand::File(_) => {
            return Err(PortalError::validation("Only certificate forms take that command"));
        }
        FormCommand::Show => {
            render::project_draft(&form.draft().await);
            render::banner(form.banner().await.as_deref());
        }
        FormCommand::Submit => {
            let outcome = form.submit().await;
            if outcome.is_submitted() {
                return Ok(FormStep::Saved);
            }
            render::outcome(&outcome);
        }
        FormCommand::Cancel => return Ok(FormStep::Close),
        FormCommand::Dismiss => form.dismiss_banner().await,
    }
    Ok(FormStep::Stay)
}

async fn certificate_step(form: &CertificateFormController, command: FormCommand) -> Result<FormStep> {
    match command {
        FormCommand::Set { field: name, value } => {
            let target = name.parse::<CertificateField>().map_err(|_| {
                PortalError::validation(format!("Unknown certificate field: '{name}'"))
            })?;
            form.set_field(target, &value).await?;
        }
        FormCommand::Query { target, text } => {
            if target == FieldTarget::Contributors {
                return Err(PortalError::validation("Certificates have no contributors"));
            }
            if !form.shows_technologies().await {
                return Err(PortalError::validation(
                    "Technologies apply to technical certificates only",
                ));
            }
            form.set_technology_query(&text).await;
            render::panel(&form.technology_panel().await);
        }
        FormCommand::Enter => render_confirm(&form.confirm_technology().await),
        FormCommand::Pick(n) => {
            if !form.pick_technology(n - 1).await {
                return Err(PortalError::validation(format!("No suggestion #{n}")));
            }
        }
        FormCommand::Add(label) => {
            form.add_technology(&label).await;
        }
        FormCommand::Remove(n) => {
            if !form.remove_technology(n - 1).await {
                return Err(PortalError::validation(format!("Chip #{n} cannot be removed")));
            }
        }
        FormCommand::Close => form.click_outside().await,
        FormCommand::Recognition(kind) => form.choose_recognition(kind).await,
        FormCommand::File(path) => {
            let file = read_certificate_file(&path).await?;
            render::info(&format!("Attached {} ({} bytes)", file.file_name, file.bytes.len()));
            form.attach_file(file).await;
        }
        FormCommand::Show => {
            render::certificate_draft(&form.draft().await, form.visible_recognition().await);
            render::banner(form.banner().await.as_deref());
        }
        FormCommand::Submit => {
            let outcome = form.submit().await;
            if outcome.is_submitted() {
                return Ok(FormStep::Saved);
            }
            render::outcome(&outcome);
        }
        FormCommand::Cancel => return Ok(FormStep::Close),
        FormCommand::Dismiss => form.dismiss_banner().await,
    }
    Ok(FormStep::Stay)
}
