//! # Typed endpoint wrappers
//!
//! One method per backend route used by the admin client. Collection routes
//! answer `{ "success": bool, "<key>": [...] }`; auth routes answer
//! `{ "data": { ... } }`. A body with `"success": false` is treated as an error
//! even on a 2xx status, and a missing collection key decodes as empty.
//!
//! | Area | Routes |
//! |------|--------|
//! | Auth | `POST /auth/login`, `GET /auth/profile` |
//! | Users | `GET /admin/users`, `GET /admin/users/search`, `PUT /admin/users/:id/block`, `DELETE /admin/users/:id` |
//! | Projects | `GET/POST /admin/projects`, `GET /admin/projects/:id`, `PUT /admin/projects/:id/modules/:mid` |
//! | Tickets | `GET /admin/tickets`, `PUT/DELETE /admin/tickets/:id` |
//! | Appointments | `GET /admin/appointments`, `PUT/DELETE /admin/appointments/:id` |
//! | Quotes | `GET /admin/quote-requests`, `PUT/DELETE /admin/quote-requests/:id`, `GET/PUT /admin/quote-pricing` |
//! | Invoices | `GET /admin/invoices`, `POST /admin/invoice` (multipart) |
//! | Career | `GET/POST /career/jobs`, `PUT/DELETE /career/jobs/:id`, `GET /career/applications`, `PUT /career/applications/:id` |

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::client::{ApiClient, FilePart, Upload};
use crate::error::ApiError;
use crate::models::*;

/// Successful `/auth/login` payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ProfileData {
    user: AuthUser,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Fail on `"success": false`, carrying the body's message.
fn check_success(body: &Value) -> Result<(), ApiError> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Request was not successful")
            .to_string();
        return Err(ApiError::Status {
            status: 200,
            message,
        });
    }
    Ok(())
}

/// Pull `key` out of an envelope and decode it.
fn take_field<T: DeserializeOwned + Default>(mut body: Value, key: &str) -> Result<T, ApiError> {
    check_success(&body)?;
    match body.get_mut(key).map(Value::take) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => Ok(serde_json::from_value(value)?),
    }
}

impl ApiClient {
    async fn collection<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
    ) -> Result<Vec<T>, ApiError> {
        let body: Value = self.get(path).await?;
        take_field(body, key)
    }

    async fn mutate<B: Serialize + ?Sized>(
        &self,
        method: Mutation,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let response: Value = match method {
            Mutation::Post => self.post(path, body).await?,
            Mutation::Put => self.put(path, body).await?,
        };
        check_success(&response)
    }

    async fn remove(&self, path: &str) -> Result<(), ApiError> {
        let response: Value = self.delete(path).await?;
        check_success(&response)
    }

    // Auth

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let envelope: DataEnvelope<LoginResponse> = self
            .post("/auth/login", &Credentials { email, password })
            .await?;
        Ok(envelope.data)
    }

    pub async fn profile(&self) -> Result<AuthUser, ApiError> {
        let envelope: DataEnvelope<ProfileData> = self.get("/auth/profile").await?;
        Ok(envelope.data.user)
    }

    // Users

    pub async fn list_users(&self) -> Result<Vec<AdminUser>, ApiError> {
        self.collection("/admin/users", "users").await
    }

    pub async fn search_users(&self, query: &str) -> Result<Vec<SearchCandidate>, ApiError> {
        let body: Value = self
            .get_query("/admin/users/search", &[("q", query)])
            .await?;
        take_field(body, "users")
    }

    pub async fn set_user_blocked(&self, id: &str, blocked: bool) -> Result<(), ApiError> {
        self.mutate(
            Mutation::Put,
            &format!("/admin/users/{id}/block"),
            &json!({ "blocked": blocked }),
        )
        .await
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        self.remove(&format!("/admin/users/{id}")).await
    }

    // Projects

    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.collection("/admin/projects", "projects").await
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, ApiError> {
        let body: Value = self.get(&format!("/admin/projects/{id}")).await?;
        check_success(&body)?;
        let project = body
            .get("project")
            .cloned()
            .ok_or_else(|| ApiError::Decode("missing project".to_string()))?;
        Ok(serde_json::from_value(project)?)
    }

    pub async fn create_project(&self, project: &NewProject) -> Result<(), ApiError> {
        self.mutate(Mutation::Post, "/admin/projects", project).await
    }

    pub async fn update_module(
        &self,
        project_id: &str,
        module_id: &str,
        update: &ModuleUpdate,
    ) -> Result<(), ApiError> {
        self.mutate(
            Mutation::Put,
            &format!("/admin/projects/{project_id}/modules/{module_id}"),
            update,
        )
        .await
    }

    // Tickets

    pub async fn list_tickets(&self) -> Result<Vec<Ticket>, ApiError> {
        self.collection("/admin/tickets", "tickets").await
    }

    pub async fn set_ticket_status(&self, id: &str, status: &TicketStatus) -> Result<(), ApiError> {
        self.mutate(
            Mutation::Put,
            &format!("/admin/tickets/{id}"),
            &json!({ "status": status }),
        )
        .await
    }

    pub async fn delete_ticket(&self, id: &str) -> Result<(), ApiError> {
        self.remove(&format!("/admin/tickets/{id}")).await
    }

    // Appointments

    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        self.collection("/admin/appointments", "appointments").await
    }

    pub async fn set_appointment_status(
        &self,
        id: &str,
        status: &AppointmentStatus,
    ) -> Result<(), ApiError> {
        self.mutate(
            Mutation::Put,
            &format!("/admin/appointments/{id}"),
            &json!({ "status": status }),
        )
        .await
    }

    pub async fn delete_appointment(&self, id: &str) -> Result<(), ApiError> {
        self.remove(&format!("/admin/appointments/{id}")).await
    }

    // Quote requests

    pub async fn list_quote_requests(&self) -> Result<Vec<QuoteRequest>, ApiError> {
        self.collection("/admin/quote-requests", "requests").await
    }

    pub async fn set_quote_status(&self, id: &str, status: &QuoteStatus) -> Result<(), ApiError> {
        self.mutate(
            Mutation::Put,
            &format!("/admin/quote-requests/{id}"),
            &json!({ "status": status }),
        )
        .await
    }

    pub async fn delete_quote_request(&self, id: &str) -> Result<(), ApiError> {
        self.remove(&format!("/admin/quote-requests/{id}")).await
    }

    pub async fn get_quote_pricing(&self) -> Result<QuotePricing, ApiError> {
        let body: Value = self.get("/admin/quote-pricing").await?;
        take_field(body, "pricing")
    }

    pub async fn update_quote_pricing(&self, pricing: &QuotePricing) -> Result<(), ApiError> {
        self.mutate(
            Mutation::Put,
            "/admin/quote-pricing",
            &json!({ "pricing": pricing }),
        )
        .await
    }

    // Invoices

    pub async fn list_invoices(&self) -> Result<Vec<Invoice>, ApiError> {
        self.collection("/admin/invoices", "invoices").await
    }

    /// Upload an invoice document for a client. `client_id` is sent as both
    /// `userId` and `clientId`; the backend reads whichever it knows.
    pub async fn upload_invoice(
        &self,
        client_id: Option<&str>,
        file: FilePart,
        meta: &InvoiceMeta,
    ) -> Result<(), ApiError> {
        let mut upload = Upload::new(file);
        if let Some(id) = client_id {
            upload = upload.field("userId", id).field("clientId", id);
        }
        let upload = upload.json_field("invoiceData", meta)?;
        let response: Value = self.upload("/admin/invoice", upload).await?;
        check_success(&response)
    }

    // Career

    pub async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
        self.collection("/career/jobs", "jobs").await
    }

    pub async fn create_job(&self, job: &JobPayload) -> Result<(), ApiError> {
        self.mutate(Mutation::Post, "/career/jobs", job).await
    }

    pub async fn update_job(&self, id: &str, job: &JobPayload) -> Result<(), ApiError> {
        self.mutate(Mutation::Put, &format!("/career/jobs/{id}"), job).await
    }

    pub async fn delete_job(&self, id: &str) -> Result<(), ApiError> {
        self.remove(&format!("/career/jobs/{id}")).await
    }

    pub async fn list_applications(&self) -> Result<Vec<JobApplication>, ApiError> {
        self.collection("/career/applications", "applications").await
    }

    pub async fn set_application_status(
        &self,
        id: &str,
        status: &ApplicationStatus,
    ) -> Result<(), ApiError> {
        self.mutate(
            Mutation::Put,
            &format!("/career/applications/{id}"),
            &json!({ "status": status }),
        )
        .await
    }
}

#[derive(Clone, Copy)]
enum Mutation {
    Post,
    Put,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[test]
    fn test_take_field_missing_is_empty() {
        let users: Vec<AdminUser> = take_field(json!({"success": true}), "users").unwrap();
        assert!(users.is_empty());
    }

    #[test]
    fn test_take_field_success_false() {
        let err = take_field::<Vec<AdminUser>>(
            json!({"success": false, "message": "Not allowed"}),
            "users",
        )
        .unwrap_err();
        assert_eq!(err.user_message("x"), "Not allowed");
    }

    #[tokio::test]
    async fn test_login_envelope() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/auth/login")
            .match_body(Matcher::Json(json!({"email": "a@x.io", "password": "pw"})))
            .with_status(200)
            .with_body(r#"{"data": {"token": "jwt-1", "user": {"id": 1, "email": "a@x.io", "name": "Admin"}}}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let response = client.login("a@x.io", "pw").await.unwrap();
        assert_eq!(response.token, "jwt-1");
        assert_eq!(response.user.display_name(), "Admin");
    }

    #[tokio::test]
    async fn test_search_users() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/admin/users/search")
            .match_query(Matcher::UrlEncoded("q".into(), "al".into()))
            .with_status(200)
            .with_body(r#"{"users": [{"id": "u1", "name": "Alice", "email": "alice@x.io", "phone": null}]}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let found = client.search_users("al").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Alice");
        assert!(found[0].phone.is_none());
    }

    #[tokio::test]
    async fn test_delete_failure_surfaces_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/admin/tickets/t1")
            .with_status(404)
            .with_body(r#"{"success": false, "message": "Ticket not found"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let err = client.delete_ticket("t1").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Ticket not found");
    }

    #[tokio::test]
    async fn test_quote_pricing_fetch_and_save() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/admin/quote-pricing")
            .with_status(200)
            .with_body(r#"{"success": true, "pricing": {"basePrices": {"Website": 15000}, "seo": {"Basic": 2999}}}"#)
            .create_async()
            .await;
        let save = server
            .mock("PUT", "/admin/quote-pricing")
            .match_body(Matcher::PartialJson(json!({"pricing": {"basePrices": {"Website": 0}}})))
            .with_status(200)
            .with_body(r#"{"success": true}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let mut pricing = client.get_quote_pricing().await.unwrap();
        assert_eq!(pricing.seo["Basic"], 2999);

        pricing.set_price(PricingCategory::BasePrices, "Website", "n/a");
        client.update_quote_pricing(&pricing).await.unwrap();
        save.assert_async().await;
    }

    #[tokio::test]
    async fn test_status_update_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/admin/appointments/5")
            .match_body(Matcher::Json(json!({"status": "Confirmed"})))
            .with_status(200)
            .with_body(r#"{"success": true}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        client
            .set_appointment_status("5", &AppointmentStatus::Confirmed)
            .await
            .unwrap();
        mock.assert_async().await;
    }
}
