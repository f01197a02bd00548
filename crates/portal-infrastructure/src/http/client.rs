//! HttpPortalClient - REST implementation of the portal backend traits.
//!
//! One client instance owns the cookie jar that carries the backend session.
//! Every non-GET request forwards the anti-forgery token found in that jar.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use portal_core::catalog::{CatalogRepository, Student, Technology};
use portal_core::certificate::{Certificate, CertificateFile, CertificateRepository, CertificateSubmission};
use portal_core::config::BackendSettings;
use portal_core::error::{PortalError, Result};
use portal_core::id::EntityId;
use portal_core::project::{Project, ProjectRepository, ProjectSubmission};
use portal_core::session::{AuthGateway, Credentials};
use portal_core::user::CurrentUser;

use super::wire::{self, ListEnvelope, LoginRequest, LoginResponse};

/// HTTP client plus the jar it stores cookies in.
#[derive(Clone)]
struct HttpSession {
    client: Client,
    jar: Arc<Jar>,
}

impl HttpSession {
    fn build(timeout: Duration) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(timeout)
            .build()
            .map_err(|e| PortalError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, jar })
    }
}

/// Talks to the portal backend over its REST API.
pub struct HttpPortalClient {
    base_url: Url,
    settings: BackendSettings,
    session: RwLock<HttpSession>,
}

impl HttpPortalClient {
    pub fn new(settings: BackendSettings) -> Result<Self> {
        let base_url = Url::parse(&settings.base_url).map_err(|e| {
            PortalError::config(format!("Invalid backend URL '{}': {}", settings.base_url, e))
        })?;
        let session = HttpSession::build(Duration::from_secs(settings.timeout_secs))?;

        Ok(Self {
            base_url,
            settings,
            session: RwLock::new(session),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn current_session(&self) -> Result<HttpSession> {
        self.session
            .read()
            .map(|session| session.clone())
            .map_err(|_| PortalError::internal("HTTP session lock poisoned"))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Anti-forgery token currently held in the cookie jar.
    fn csrf_token(&self, jar: &Jar) -> Option<String> {
        let header = jar.cookies(&self.base_url)?;
        let header = header.to_str().ok()?;
        wire::cookie_value(header, &self.settings.csrf_cookie_name)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let session = self.current_session()?;
        let attach_token = method != Method::GET;
        let mut builder = session.client.request(method, self.url(path));

        if attach_token && let Some(token) = self.csrf_token(&session.jar) {
            builder = builder.header(self.settings.csrf_header_name.as_str(), token);
        }
        Ok(builder)
    }

    /// Sends the request and turns non-success statuses into errors.
    async fn execute(&self, builder: RequestBuilder, action: &str) -> Result<Response> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(action, error = %e, "Backend request failed");
            PortalError::transport(format!("Failed to {}: {}", action, e))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = wire::status_error(status.as_u16(), &body);
        tracing::debug!(action, status = status.as_u16(), error = %err, "Backend rejected request");
        Err(err)
    }

    async fn read_json<T: DeserializeOwned>(response: Response, action: &str) -> Result<T> {
        let body = response
            .text()
            .await
            .map_err(|e| PortalError::transport(format!("Failed to read {} response: {}", action, e)))?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str, action: &str) -> Result<Vec<T>> {
        let response = self.execute(self.request(Method::GET, path)?, action).await?;
        let envelope: ListEnvelope<T> = Self::read_json(response, action).await?;
        Ok(envelope.into_vec())
    }

    fn text_form(fields: Vec<(String, String)>) -> Form {
        fields
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value))
    }

    fn file_part(file: &CertificateFile) -> Result<Part> {
        let mime = mime_guess::from_path(&file.file_name).first_or_octet_stream();
        Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(mime.as_ref())
            .map_err(|e| PortalError::internal(format!("Invalid MIME type for {}: {}", file.file_name, e)))
    }
}

#[async_trait]
impl AuthGateway for HttpPortalClient {
    async fn login(&self, credentials: &Credentials) -> Result<CurrentUser> {
        let body = LoginRequest {
            username: &credentials.username,
            password: &credentials.password,
        };
        let builder = self.request(Method::POST, "/api/login/")?.json(&body);
        let response = self.execute(builder, "log in").await?;
        let login: LoginResponse = Self::read_json(response, "login").await?;

        let user = login.into_user();
        tracing::info!(user_id = %user.id, username = %user.username, "Logged in");
        Ok(user)
    }

    async fn logout(&self) -> Result<()> {
        self.execute(self.request(Method::POST, "/api/logout/")?, "log out")
            .await?;
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<CurrentUser>> {
        let response = self
            .execute(self.request(Method::GET, "/api/current-user/")?, "check session")
            .await?;
        let body = response
            .text()
            .await
            .map_err(|e| PortalError::transport(format!("Failed to read session response: {}", e)))?;

        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn clear_session_artifacts(&self) {
        let fresh = match HttpSession::build(Duration::from_secs(self.settings.timeout_secs)) {
            Ok(fresh) => fresh,
            Err(e) => {
                tracing::error!(error = %e, "Failed to rebuild HTTP session");
                return;
            }
        };
        match self.session.write() {
            Ok(mut session) => {
                *session = fresh;
                tracing::debug!("Cookie jar discarded");
            }
            Err(_) => tracing::error!("HTTP session lock poisoned; cookies not cleared"),
        }
    }
}

#[async_trait]
impl CatalogRepository for HttpPortalClient {
    async fn technologies(&self) -> Result<Vec<Technology>> {
        self.get_list("/api/technologies/", "load technologies").await
    }

    async fn students(&self) -> Result<Vec<Student>> {
        self.get_list("/api/students/", "load students").await
    }
}

#[async_trait]
impl ProjectRepository for HttpPortalClient {
    async fn list(&self) -> Result<Vec<Project>> {
        self.get_list("/api/projects/", "load projects").await
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Project> {
        let path = format!("/api/projects/{}/", id);
        match self.execute(self.request(Method::GET, &path)?, "load project").await {
            Ok(response) => Self::read_json(response, "project").await,
            Err(e) if e.status() == Some(404) => Err(PortalError::not_found("project", id.as_str())),
            Err(e) => Err(e),
        }
    }

    async fn create(&self, submission: &ProjectSubmission) -> Result<()> {
        let form = Self::text_form(submission.form_fields());
        let builder = self
            .request(Method::POST, "/api/projects/create/")?
            .multipart(form);
        self.execute(builder, "create project").await?;
        tracing::info!(name = %submission.name, "Project created");
        Ok(())
    }

    async fn update(&self, id: &EntityId, submission: &ProjectSubmission) -> Result<()> {
        let mut fields = vec![("id".to_string(), id.to_string())];
        fields.extend(submission.form_fields());

        let builder = self
            .request(Method::POST, "/edit_project")?
            .header("Accept", "application/json")
            .header("X-Requested-With", "XMLHttpRequest")
            .multipart(Self::text_form(fields));
        self.execute(builder, "update project").await?;
        tracing::info!(project_id = %id, "Project updated");
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<()> {
        let path = format!("/delete_project/{}", id);
        self.execute(self.request(Method::GET, &path)?, "delete project")
            .await?;
        tracing::info!(project_id = %id, "Project deleted");
        Ok(())
    }
}

#[async_trait]
impl CertificateRepository for HttpPortalClient {
    async fn list(&self) -> Result<Vec<Certificate>> {
        self.get_list("/api/certificates/", "load certificates").await
    }

    async fn create(&self, submission: &CertificateSubmission) -> Result<()> {
        let form = Self::text_form(submission.form_fields())
            .part("certificate", Self::file_part(&submission.file)?);
        let builder = self
            .request(Method::POST, "/api/certificates/create/")?
            .multipart(form);
        self.execute(builder, "create certificate").await?;
        tracing::info!(title = %submission.title, category = %submission.category, "Certificate created");
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<()> {
        let path = format!("/delete_certification/{}", id);
        self.execute(self.request(Method::DELETE, &path)?, "delete certificate")
            .await?;
        tracing::info!(certificate_id = %id, "Certificate deleted");
        Ok(())
    }
}
