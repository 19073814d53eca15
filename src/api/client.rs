use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ApiConfig;

use super::error::ApiError;
use super::ids::{ListId, UserId};
use super::types::{
    AddWordRequest, CreateListRequest, DailyWord, DeleteListOutcome, ListWords, ListsWithHistory,
    LoginRequest, LoginResponse, RandomWordResponse, Registration, VocabList, WordInList,
};

/// Client for the vocabulary backend.
///
/// Every endpoint is derived from the one configured base URL. Calls are
/// attempted once; failures are returned to the caller untouched.
#[derive(Clone)]
pub struct VocabApi {
    client: Client,
    base: Url,
}

impl VocabApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base = Url::parse(&config.base_url).map_err(|e| ApiError::Malformed {
            url: config.base_url.clone(),
            reason: format!("invalid base URL: {}", e),
        })?;
        if base.cannot_be_a_base() {
            return Err(ApiError::Malformed {
                url: config.base_url.clone(),
                reason: "base URL cannot carry a path".to_string(),
            });
        }

        let connect_timeout = Duration::from_secs(config.connect_timeout_seconds.into());
        let mut builder = Client::builder().connect_timeout(connect_timeout);
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs.into()));
        }
        let client = builder.build().map_err(|e| ApiError::Transport {
            url: config.base_url.clone(),
            source: e,
        })?;

        Ok(Self { client, base })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Send a request and return the status and raw body.
    async fn fetch(&self, request: RequestBuilder, url: &Url) -> Result<(u16, String), ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "request failed before a response arrived");
            ApiError::Transport {
                url: url.to_string(),
                source: e,
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| ApiError::Transport {
            url: url.to_string(),
            source: e,
        })?;
        tracing::debug!(%url, status, bytes = body.len(), "response received");
        Ok((status, body))
    }

    /// Send a request and decode a 2xx JSON body.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<T, ApiError> {
        let (status, body) = self.fetch(request, url).await?;
        if !(200..300).contains(&status) {
            let err = ApiError::from_status(status, &body);
            tracing::info!(%url, status, error = %err, "server reported failure");
            return Err(err);
        }
        decode(url, &body)
    }

    pub async fn random_word(&self) -> Result<DailyWord, ApiError> {
        let url = self.endpoint(&["api", "dictionary", "random"]);
        let raw: RandomWordResponse = self.fetch_json(self.client.get(url.clone()), &url).await?;
        Ok(DailyWord::from(raw))
    }

    /// Random word for the landing screen. Never fails: any error yields
    /// the offline placeholder.
    pub async fn daily_word(&self) -> DailyWord {
        match self.random_word().await {
            Ok(word) => word,
            Err(err) => {
                tracing::warn!(error = %err, "daily word unavailable");
                DailyWord::unavailable()
            }
        }
    }

    /// Lists the user can pick from, plus the id of their history list.
    ///
    /// The history list never appears in `lists`, whatever the server sent.
    pub async fn lists_excluding_history(
        &self,
        user: &UserId,
    ) -> Result<ListsWithHistory, ApiError> {
        let url = self.endpoint(&["api", "vocab", "lists", user.as_str(), "exclude-history"]);
        let response: ListsWithHistory = self.fetch_json(self.client.get(url.clone()), &url).await?;
        if response.vocab_history_id.is_none() {
            tracing::warn!(user = %user, "no vocabHistoryId in response");
        }
        Ok(response.without_history())
    }

    /// Every list of the user, history list included.
    pub async fn all_lists(&self, user: &UserId) -> Result<Vec<VocabList>, ApiError> {
        let url = self.endpoint(&["api", "vocab", "lists", user.as_str()]);
        self.fetch_json(self.client.get(url.clone()), &url).await
    }

    /// Create a list. Returns the created list when the server echoes it.
    pub async fn create_list(
        &self,
        user: &UserId,
        list_name: &str,
    ) -> Result<Option<VocabList>, ApiError> {
        let url = self.endpoint(&["api", "vocab", "lists"]);
        let body = CreateListRequest {
            user_id: user,
            list_name: list_name.trim(),
        };
        let created: Value = self
            .fetch_json_or_empty(self.client.post(url.clone()).json(&body), &url)
            .await?;
        tracing::info!(user = %user, list_name = body.list_name, "list created");
        Ok(extract(created, "list"))
    }

    /// Delete a list; the server removes its words with it.
    ///
    /// Only transport failures are errors; every HTTP status maps to an
    /// outcome.
    pub async fn delete_list(
        &self,
        user: &UserId,
        list: &ListId,
    ) -> Result<DeleteListOutcome, ApiError> {
        let url = self.endpoint(&["api", "vocab", "lists", user.as_str(), list.as_str()]);
        let (status, body) = self.fetch(self.client.delete(url.clone()), &url).await?;
        let outcome = DeleteListOutcome::from_response(status, body);
        tracing::info!(user = %user, list = %list, ?outcome, "delete list finished");
        Ok(outcome)
    }

    pub async fn words_in_list(&self, user: &UserId, list: &ListId) -> Result<ListWords, ApiError> {
        let url = self.endpoint(&["api", "vocab", "words", user.as_str(), list.as_str()]);
        self.fetch_json(self.client.get(url.clone()), &url).await
    }

    pub async fn add_word(
        &self,
        user: &UserId,
        list: &ListId,
        word: &str,
        definition: &str,
    ) -> Result<Option<WordInList>, ApiError> {
        let url = self.endpoint(&["api", "vocab", "words"]);
        let body = AddWordRequest {
            user_id: user,
            list_id: list,
            word,
            definition,
        };
        let created: Value = self
            .fetch_json_or_empty(self.client.post(url.clone()).json(&body), &url)
            .await?;
        tracing::info!(user = %user, list = %list, word, "word saved");
        Ok(extract(created, "word"))
    }

    /// Password login. The returned id is the whole session identity.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserId, ApiError> {
        let url = self.endpoint(&["api", "auth", "login"]);
        let body = LoginRequest {
            email: email.trim(),
            password,
        };
        let response: LoginResponse = self
            .fetch_json(self.client.post(url.clone()).json(&body), &url)
            .await?;
        tracing::info!(user = %response.user_id, "login succeeded");
        Ok(response.user_id)
    }

    /// Register an account. Some deployments answer with the new user id.
    pub async fn register(&self, registration: &Registration) -> Result<Option<UserId>, ApiError> {
        let url = self.endpoint(&["api", "auth", "register"]);
        let response: Value = self
            .fetch_json_or_empty(self.client.post(url.clone()).json(registration), &url)
            .await?;
        tracing::info!(email = %registration.email, "registration accepted");
        Ok(response
            .get("userId")
            .cloned()
            .and_then(|id| serde_json::from_value(id).ok()))
    }

    /// Like `fetch_json` but an empty 2xx body decodes as `null`.
    async fn fetch_json_or_empty(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<Value, ApiError> {
        let (status, body) = self.fetch(request, url).await?;
        if !(200..300).contains(&status) {
            return Err(ApiError::from_status(status, &body));
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        decode(url, &body)
    }
}

fn decode<T: DeserializeOwned>(url: &Url, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::warn!(%url, error = %e, "failed to parse response as JSON");
        ApiError::Malformed {
            url: url.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Read `T` from the body itself or from a wrapping `key` field.
fn extract<T: DeserializeOwned>(value: Value, key: &str) -> Option<T> {
    if let Some(inner) = value.get(key) {
        if let Ok(found) = serde_json::from_value(inner.clone()) {
            return Some(found);
        }
    }
    serde_json::from_value(value).ok()
}
