use std::time::Duration;

use configs::ClientConfig;
use reqwest::Response;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};

/// Employee as returned by the API. Timestamps are not shown and are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub days_worked: i32,
    pub hour_cost: f64,
    pub hours_worked: f64,
}

impl Employee {
    pub fn salary(&self) -> f64 {
        self.hours_worked * self.hour_cost
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmployeePage {
    pub employees: Vec<Employee>,
    pub current_page: u64,
    pub total_employees: u64,
    pub total_pages: u64,
}

/// Request body for create and update; unset fields are left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmployeeForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_worked: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_worked: Option<f64>,
}

/// HTTP wrapper over the `/employee` resource. No caching.
#[derive(Clone, Debug)]
pub struct EmployeeApi {
    http: reqwest::Client,
    base_url: String,
}

impl EmployeeApi {
    pub fn new(cfg: &ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self::with_client(http, &cfg.base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self { http, base_url: base_url.trim_end_matches('/').to_string() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn employees_url(&self) -> String {
        format!("{}/employee", self.base_url)
    }

    fn employee_url(&self, id: i32) -> String {
        format!("{}/employee/{}", self.base_url, id)
    }

    pub async fn list(&self, page: u64, query: &str, order_by: &str) -> ClientResult<EmployeePage> {
        let page = page.to_string();
        let resp = self
            .http
            .get(self.employees_url())
            .query(&[("page", page.as_str()), ("query", query), ("orderBy", order_by)])
            .send()
            .await?;
        Self::handle_response(resp, "Failed to fetch employees").await
    }

    pub async fn get(&self, id: i32) -> ClientResult<Employee> {
        let resp = self.http.get(self.employee_url(id)).send().await?;
        Self::handle_response(resp, "Failed to fetch employee").await
    }

    pub async fn create(&self, form: &EmployeeForm) -> bool {
        let req = self.http.post(self.employees_url()).json(form);
        Self::succeeded("create", req.send().await)
    }

    pub async fn update(&self, id: i32, form: &EmployeeForm) -> bool {
        let req = self.http.put(self.employee_url(id)).json(form);
        Self::succeeded("update", req.send().await)
    }

    pub async fn remove(&self, id: i32) -> bool {
        let req = self.http.delete(self.employee_url(id));
        Self::succeeded("remove", req.send().await)
    }

    fn succeeded(op: &str, sent: Result<Response, reqwest::Error>) -> bool {
        match sent {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                debug!(op, status = resp.status().as_u16(), "request rejected");
                false
            }
            Err(e) => {
                warn!(op, error = %e, "request failed");
                false
            }
        }
    }

    async fn handle_response<T: DeserializeOwned>(resp: Response, fallback: &str) -> ClientResult<T> {
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
                .unwrap_or_else(|| fallback.to_string());
            return Err(ClientError::Status { status: status.as_u16(), message });
        }
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn form_omits_unset_fields() {
        let form = EmployeeForm { hours_worked: Some(12.5), ..Default::default() };
        assert_eq!(serde_json::to_value(&form).unwrap(), json!({"hours_worked": 12.5}));
    }

    #[test]
    fn employee_ignores_timestamps() {
        let e: Employee = serde_json::from_value(json!({
            "id": 1, "name": "Ana", "days_worked": 20, "hour_cost": 15.5, "hours_worked": 160.0,
            "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(e.salary(), 2480.0);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = EmployeeApi::with_client(reqwest::Client::new(), "http://localhost:8000/api/");
        assert_eq!(api.employees_url(), "http://localhost:8000/api/employee");
        assert_eq!(api.employee_url(3), "http://localhost:8000/api/employee/3");
    }
}
